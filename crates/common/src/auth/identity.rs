/// MUR name of the sentinel subject that represents anonymous read access to
/// community-visible spaces.
pub const PUBLIC_VIEWER_MUR: &str = "public-viewer";

/// Caller identity resolved by the authentication middleware.
///
/// Threaded explicitly through the call chain; never fetched from ambient
/// per-request storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallerIdentity {
    /// Authenticated caller with a stable username
    User(String),
    /// Anonymous caller
    PublicViewer,
}

impl CallerIdentity {
    pub fn username(&self) -> &str {
        match self {
            CallerIdentity::User(name) => name,
            CallerIdentity::PublicViewer => PUBLIC_VIEWER_MUR,
        }
    }

    pub fn is_public_viewer(&self) -> bool {
        matches!(self, CallerIdentity::PublicViewer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_identity_username() {
        let identity = CallerIdentity::User("alice".to_string());
        assert_eq!(identity.username(), "alice");
        assert!(!identity.is_public_viewer());
    }

    #[test]
    fn test_public_viewer_uses_sentinel_mur() {
        let identity = CallerIdentity::PublicViewer;
        assert_eq!(identity.username(), PUBLIC_VIEWER_MUR);
        assert!(identity.is_public_viewer());
    }
}
