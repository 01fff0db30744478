use common::auth::PUBLIC_VIEWER_MUR;
use common::domain::{Signup, SpaceBinding};

/// Decide the caller's effective binding from a resolved bindings sequence.
///
/// Scans in order and returns the first binding whose subject equals the
/// caller's MUR name; the resolver emits closest scope first, so a child
/// binding beats an inherited one. A binding granted to the public-viewer
/// sentinel acts as an always-included fallback subject for every caller.
/// `None` is the sole in-engine "not allowed" decision, distinct from
/// not-found and from internal store failures.
pub fn authorize<'a>(caller_mur: &str, bindings: &'a [SpaceBinding]) -> Option<&'a SpaceBinding> {
    bindings
        .iter()
        .find(|binding| binding.mur_name == caller_mur)
        .or_else(|| {
            bindings
                .iter()
                .find(|binding| binding.mur_name == PUBLIC_VIEWER_MUR)
        })
}

/// MUR name used for binding evaluation: the approved caller's compliant
/// username, or the public-viewer sentinel for anonymous and not-yet-approved
/// callers.
pub fn effective_mur(signup: Option<&Signup>) -> &str {
    match signup {
        Some(signup) => &signup.compliant_username,
        None => PUBLIC_VIEWER_MUR,
    }
}
