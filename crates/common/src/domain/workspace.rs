use serde::Serialize;

use super::Visibility;

/// A {subject, role} pair on the workspace projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceBinding {
    pub mur_name: String,
    pub role: String,
}

/// The read-only composite returned to API clients.
///
/// Built fresh per request from a Space, its visibility configuration, its
/// tier's role catalog and the resolved bindings; never persisted.
/// `available_roles` and `bindings` are populated only on single-workspace
/// reads, list responses omit them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workspace {
    pub name: String,
    pub namespace: String,
    pub owner: String,
    /// The caller's own effective role on this workspace
    pub role: String,
    pub visibility: Visibility,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_roles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bindings: Option<Vec<WorkspaceBinding>>,
}

/// Envelope for the workspace list endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceList {
    pub items: Vec<Workspace>,
}
