use common::domain::{
    NSTemplateTier, Space, SpaceBinding, SpaceUserConfig, Visibility, Workspace, WorkspaceBinding,
};

/// Detail fields populated only on single-workspace reads.
#[derive(Debug, Default)]
pub struct ProjectionDetail {
    pub available_roles: Option<Vec<String>>,
    pub bindings: Option<Vec<WorkspaceBinding>>,
}

/// Visibility per storage generation: the SpaceUserConfig side record wins,
/// the space's embedded field covers spaces provisioned before the side
/// record existed.
pub fn effective_visibility(space: &Space, config: Option<&SpaceUserConfig>) -> Visibility {
    config.map(|c| c.visibility).unwrap_or(space.visibility)
}

/// Merge a space, its visibility configuration and the caller's effective
/// binding into the externally visible workspace projection.
///
/// No authorization decision happens here; that already happened upstream.
pub fn build_workspace(
    space: &Space,
    config: Option<&SpaceUserConfig>,
    caller_binding: &SpaceBinding,
    detail: ProjectionDetail,
) -> Workspace {
    Workspace {
        name: space.name.clone(),
        namespace: space.namespace.clone(),
        owner: space.creator.clone(),
        role: caller_binding.role.clone(),
        visibility: effective_visibility(space, config),
        available_roles: detail.available_roles,
        bindings: detail.bindings,
    }
}

/// Translate resolved bindings into the {subject, role} list, sorted by
/// subject for a stable response shape.
pub fn workspace_bindings(bindings: &[SpaceBinding]) -> Vec<WorkspaceBinding> {
    let mut out: Vec<WorkspaceBinding> = bindings
        .iter()
        .map(|binding| WorkspaceBinding {
            mur_name: binding.mur_name.clone(),
            role: binding.role.clone(),
        })
        .collect();
    out.sort_by(|a, b| a.mur_name.cmp(&b.mur_name));
    out
}

/// Sorted role names from the tier's role catalog
pub fn roles_from_tier(tier: &NSTemplateTier) -> Vec<String> {
    let mut roles = tier.space_roles.clone();
    roles.sort();
    roles
}
