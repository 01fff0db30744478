use std::sync::Arc;

use common::auth::{CallerIdentity, PUBLIC_VIEWER_MUR};
use common::domain::{
    ClusterStore, DomainError, DomainResult, ImpersonatingWriter, Space, SpaceUserConfig,
    Visibility, Workspace,
};
use garde::Validate;
use tracing::{debug, instrument, warn};

use super::access::{authorize, effective_mur};
use super::binding_resolver::SpaceBindingResolver;
use super::projection::{
    build_workspace, effective_visibility, roles_from_tier, workspace_bindings, ProjectionDetail,
};

/// Request to fetch a single workspace
#[derive(Debug, Clone, Validate)]
pub struct GetWorkspaceRequest {
    #[garde(skip)]
    pub identity: CallerIdentity,
    #[garde(length(min = 1))]
    pub workspace_name: String,
}

/// Request to list the caller's workspaces
#[derive(Debug, Clone, Validate)]
pub struct ListWorkspacesRequest {
    #[garde(skip)]
    pub identity: CallerIdentity,
}

/// Request to change a workspace's visibility
#[derive(Debug, Clone, Validate)]
pub struct PatchVisibilityRequest {
    #[garde(skip)]
    pub identity: CallerIdentity,
    #[garde(length(min = 1))]
    pub workspace_name: String,
    #[garde(skip)]
    pub visibility: Visibility,
}

/// Domain service resolving workspace access for a caller and coordinating
/// visibility mutations.
pub struct WorkspaceService {
    store: Arc<dyn ClusterStore>,
    writer: Arc<dyn ImpersonatingWriter>,
    resolver: SpaceBindingResolver,
}

impl WorkspaceService {
    pub fn new(store: Arc<dyn ClusterStore>, writer: Arc<dyn ImpersonatingWriter>) -> Self {
        let resolver = SpaceBindingResolver::new(store.clone());
        Self {
            store,
            writer,
            resolver,
        }
    }

    /// MUR name the caller evaluates as: the compliant username of an
    /// approved signup, or the public-viewer sentinel otherwise
    async fn caller_mur(&self, identity: &CallerIdentity) -> DomainResult<String> {
        match identity {
            CallerIdentity::PublicViewer => Ok(PUBLIC_VIEWER_MUR.to_string()),
            CallerIdentity::User(username) => {
                let signup = self.store.get_provisioned_signup(username).await?;
                Ok(effective_mur(signup.as_ref()).to_string())
            }
        }
    }

    /// The target space, with absence reported as a missing workspace
    async fn target_space(&self, workspace_name: &str) -> DomainResult<Space> {
        self.store
            .get_space(workspace_name)
            .await
            .map_err(|err| match err {
                DomainError::SpaceNotFound(_) => {
                    DomainError::WorkspaceNotFound(workspace_name.to_string())
                }
                other => other,
            })
    }

    /// Get a single workspace with its bindings and available roles.
    ///
    /// "No applicable binding" reads the same as a missing workspace, so a
    /// caller with zero bindings never learns whether the space exists.
    #[instrument(
        skip(self, request),
        fields(workspace = %request.workspace_name, caller = %request.identity.username())
    )]
    pub async fn get_workspace(&self, request: GetWorkspaceRequest) -> DomainResult<Workspace> {
        common::garde::validate_struct(&request)?;

        let caller_mur = self.caller_mur(&request.identity).await?;
        let space = self.target_space(&request.workspace_name).await?;

        let all_bindings = self.resolver.list_bindings_for_space(&space).await?;
        let Some(caller_binding) = authorize(&caller_mur, &all_bindings) else {
            debug!("no applicable binding for caller");
            return Err(DomainError::WorkspaceNotFound(request.workspace_name));
        };

        let config = self.store.get_space_user_config(&space.name).await?;
        let visibility = effective_visibility(&space, config.as_ref());

        // a sentinel grant only opens community-visible spaces
        if caller_binding.mur_name == PUBLIC_VIEWER_MUR && visibility != Visibility::Community {
            debug!("public-viewer grant on a non-community space");
            return Err(DomainError::WorkspaceNotFound(request.workspace_name));
        }

        let tier = self.store.get_nstemplate_tier(&space.tier_name).await?;

        Ok(build_workspace(
            &space,
            config.as_ref(),
            caller_binding,
            ProjectionDetail {
                available_roles: Some(roles_from_tier(&tier)),
                bindings: Some(workspace_bindings(&all_bindings)),
            },
        ))
    }

    /// List all workspaces visible to the caller.
    ///
    /// Best effort: a binding whose space or config lookup fails is skipped
    /// with a warning instead of failing the whole listing.
    #[instrument(skip(self, request), fields(caller = %request.identity.username()))]
    pub async fn list_workspaces(
        &self,
        request: ListWorkspacesRequest,
    ) -> DomainResult<Vec<Workspace>> {
        common::garde::validate_struct(&request)?;

        let caller_mur = self.caller_mur(&request.identity).await?;
        let murs = if caller_mur == PUBLIC_VIEWER_MUR {
            vec![caller_mur.clone()]
        } else {
            vec![caller_mur.clone(), PUBLIC_VIEWER_MUR.to_string()]
        };

        let bindings = self.store.list_space_bindings_for_murs(&murs).await?;

        let mut workspaces = Vec::new();
        for binding in &bindings {
            if binding.space_name.is_empty() {
                warn!("space binding has no target space, skipping entry");
                continue;
            }
            let space = match self.store.get_space(&binding.space_name).await {
                Ok(space) => space,
                Err(err) => {
                    warn!(space = %binding.space_name, error = %err, "unable to get space, skipping entry");
                    continue;
                }
            };
            let config = match self.store.get_space_user_config(&space.name).await {
                Ok(config) => config,
                Err(err) => {
                    warn!(space = %space.name, error = %err, "unable to get space config, skipping entry");
                    continue;
                }
            };

            let visibility = effective_visibility(&space, config.as_ref());
            if binding.mur_name == PUBLIC_VIEWER_MUR && visibility != Visibility::Community {
                // community grant on a private space is inert
                continue;
            }

            workspaces.push(build_workspace(
                &space,
                config.as_ref(),
                binding,
                ProjectionDetail::default(),
            ));
        }

        debug!(count = workspaces.len(), "listed workspaces");
        Ok(workspaces)
    }

    /// Change a workspace's visibility as the caller.
    ///
    /// Requesting the current value is a no-op success. The write itself runs
    /// under the caller's own authority, so the store's access control is the
    /// real gate; the in-engine binding check only rejects early.
    #[instrument(
        skip(self, request),
        fields(
            workspace = %request.workspace_name,
            caller = %request.identity.username(),
            visibility = %request.visibility
        )
    )]
    pub async fn patch_visibility(&self, request: PatchVisibilityRequest) -> DomainResult<Workspace> {
        common::garde::validate_struct(&request)?;

        let username = match &request.identity {
            CallerIdentity::User(username) => username.clone(),
            CallerIdentity::PublicViewer => {
                return Err(DomainError::NotApproved("anonymous caller".to_string()))
            }
        };
        let signup = self
            .store
            .get_provisioned_signup(&username)
            .await?
            .ok_or_else(|| DomainError::NotApproved(username.clone()))?;

        let space = self.target_space(&request.workspace_name).await?;
        let all_bindings = self.resolver.list_bindings_for_space(&space).await?;

        let config = self.store.get_space_user_config(&space.name).await?;
        let current = effective_visibility(&space, config.as_ref());

        let caller_binding = match authorize(&signup.compliant_username, &all_bindings) {
            None => {
                debug!("no applicable binding for caller");
                return Err(DomainError::WorkspaceNotFound(request.workspace_name));
            }
            Some(binding) if binding.mur_name == PUBLIC_VIEWER_MUR => {
                // community visibility grants read access only; a caller
                // without a binding of their own cannot mutate
                if current == Visibility::Community {
                    return Err(DomainError::PermissionDenied(format!(
                        "user {} has no role on workspace {}",
                        signup.compliant_username, request.workspace_name
                    )));
                }
                return Err(DomainError::WorkspaceNotFound(request.workspace_name));
            }
            Some(binding) => binding,
        };

        let tier = self.store.get_nstemplate_tier(&space.tier_name).await?;
        let detail = ProjectionDetail {
            available_roles: Some(roles_from_tier(&tier)),
            bindings: Some(workspace_bindings(&all_bindings)),
        };

        if current == request.visibility {
            debug!("visibility unchanged, no update performed");
            return Ok(build_workspace(&space, config.as_ref(), caller_binding, detail));
        }

        let new_config = SpaceUserConfig {
            space_name: space.name.clone(),
            visibility: request.visibility,
        };
        self.writer
            .update_space_user_config(&new_config, &signup.compliant_username)
            .await
            .map_err(|err| match err {
                DomainError::PermissionDenied(msg) => DomainError::PermissionDenied(msg),
                DomainError::Conflict(msg) => {
                    DomainError::StoreError(anyhow::anyhow!("update conflict: {msg}"))
                }
                other => other,
            })?;

        debug!("workspace visibility updated");
        Ok(build_workspace(
            &space,
            Some(&new_config),
            caller_binding,
            detail,
        ))
    }
}
