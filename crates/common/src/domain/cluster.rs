use async_trait::async_trait;

use super::{DomainResult, NSTemplateTier, Signup, Space, SpaceBinding, SpaceUserConfig};

/// Read access to the shared cluster's resource cache.
///
/// Reads are assumed consistent for the duration of a single request but are
/// not synchronized across requests; callers own request-scoped snapshotting.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ClusterStore: Send + Sync {
    /// Get a space by name
    async fn get_space(&self, name: &str) -> DomainResult<Space>;

    /// List all bindings whose target is the given space
    async fn list_space_bindings_for_space(
        &self,
        space_name: &str,
    ) -> DomainResult<Vec<SpaceBinding>>;

    /// List all bindings whose subject is one of the given MUR names
    async fn list_space_bindings_for_murs(
        &self,
        mur_names: &[String],
    ) -> DomainResult<Vec<SpaceBinding>>;

    /// Get the visibility side record for a space, if one exists
    async fn get_space_user_config(
        &self,
        space_name: &str,
    ) -> DomainResult<Option<SpaceUserConfig>>;

    /// Get a tier definition by name
    async fn get_nstemplate_tier(&self, name: &str) -> DomainResult<NSTemplateTier>;

    /// Get the provisioned signup for a username; `None` when the signup is
    /// not approved yet
    async fn get_provisioned_signup(&self, username: &str) -> DomainResult<Option<Signup>>;
}

/// Privileged write path for visibility updates.
///
/// The update runs under the caller's own authority so the store's access
/// control re-checks the mutation; the engine's in-memory decision is only a
/// fast-path rejection.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ImpersonatingWriter: Send + Sync {
    /// Update a space's visibility config as the given user
    async fn update_space_user_config(
        &self,
        config: &SpaceUserConfig,
        as_username: &str,
    ) -> DomainResult<()>;
}
