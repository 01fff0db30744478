use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::{
    ClusterStore, DomainError, DomainResult, ImpersonatingWriter, NSTemplateTier, Signup, Space,
    SpaceBinding, SpaceUserConfig,
};

/// In-memory cluster store.
///
/// Backs the binary's dev mode and the end-to-end tests. Impersonated writes
/// are gated by an admin-role binding check, so the mutation path exercises
/// the same property as the real store: the write is re-checked under the
/// caller's own authority, not the service account's.
#[derive(Default)]
pub struct InMemoryCluster {
    inner: RwLock<ClusterState>,
}

#[derive(Default)]
struct ClusterState {
    spaces: HashMap<String, Space>,
    bindings: Vec<SpaceBinding>,
    configs: HashMap<String, SpaceUserConfig>,
    tiers: HashMap<String, NSTemplateTier>,
    signups: HashMap<String, Signup>,
    config_writes: usize,
}

impl InMemoryCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_space(&self, space: Space) {
        let mut state = self.inner.write().expect("cluster state lock poisoned");
        state.spaces.insert(space.name.clone(), space);
    }

    pub fn add_space_binding(&self, binding: SpaceBinding) {
        let mut state = self.inner.write().expect("cluster state lock poisoned");
        state.bindings.push(binding);
    }

    pub fn set_space_user_config(&self, config: SpaceUserConfig) {
        let mut state = self.inner.write().expect("cluster state lock poisoned");
        state.configs.insert(config.space_name.clone(), config);
    }

    pub fn add_tier(&self, tier: NSTemplateTier) {
        let mut state = self.inner.write().expect("cluster state lock poisoned");
        state.tiers.insert(tier.name.clone(), tier);
    }

    pub fn add_signup(&self, signup: Signup) {
        let mut state = self.inner.write().expect("cluster state lock poisoned");
        state.signups.insert(signup.name.clone(), signup);
    }

    /// Number of config updates that reached the store; lets tests assert
    /// that idempotent patches perform no write
    pub fn config_write_count(&self) -> usize {
        self.inner
            .read()
            .expect("cluster state lock poisoned")
            .config_writes
    }
}

#[async_trait]
impl ClusterStore for InMemoryCluster {
    async fn get_space(&self, name: &str) -> DomainResult<Space> {
        let state = self.inner.read().expect("cluster state lock poisoned");
        state
            .spaces
            .get(name)
            .cloned()
            .ok_or_else(|| DomainError::SpaceNotFound(name.to_string()))
    }

    async fn list_space_bindings_for_space(
        &self,
        space_name: &str,
    ) -> DomainResult<Vec<SpaceBinding>> {
        let state = self.inner.read().expect("cluster state lock poisoned");
        Ok(state
            .bindings
            .iter()
            .filter(|binding| binding.space_name == space_name)
            .cloned()
            .collect())
    }

    async fn list_space_bindings_for_murs(
        &self,
        mur_names: &[String],
    ) -> DomainResult<Vec<SpaceBinding>> {
        let state = self.inner.read().expect("cluster state lock poisoned");
        Ok(state
            .bindings
            .iter()
            .filter(|binding| mur_names.contains(&binding.mur_name))
            .cloned()
            .collect())
    }

    async fn get_space_user_config(
        &self,
        space_name: &str,
    ) -> DomainResult<Option<SpaceUserConfig>> {
        let state = self.inner.read().expect("cluster state lock poisoned");
        Ok(state.configs.get(space_name).cloned())
    }

    async fn get_nstemplate_tier(&self, name: &str) -> DomainResult<NSTemplateTier> {
        let state = self.inner.read().expect("cluster state lock poisoned");
        state
            .tiers
            .get(name)
            .cloned()
            .ok_or_else(|| DomainError::TierNotFound(name.to_string()))
    }

    async fn get_provisioned_signup(&self, username: &str) -> DomainResult<Option<Signup>> {
        let state = self.inner.read().expect("cluster state lock poisoned");
        Ok(state.signups.get(username).cloned())
    }
}

#[async_trait]
impl ImpersonatingWriter for InMemoryCluster {
    async fn update_space_user_config(
        &self,
        config: &SpaceUserConfig,
        as_username: &str,
    ) -> DomainResult<()> {
        let mut state = self.inner.write().expect("cluster state lock poisoned");

        if !state.spaces.contains_key(&config.space_name) {
            return Err(DomainError::SpaceNotFound(config.space_name.clone()));
        }

        // the impersonated user needs an admin binding on the target space
        let is_admin = state.bindings.iter().any(|binding| {
            binding.space_name == config.space_name
                && binding.mur_name == as_username
                && binding.role == "admin"
        });
        if !is_admin {
            return Err(DomainError::PermissionDenied(format!(
                "user {} may not update space {}",
                as_username, config.space_name
            )));
        }

        state.config_writes += 1;
        state
            .configs
            .insert(config.space_name.clone(), config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Visibility;

    fn space(name: &str) -> Space {
        Space {
            name: name.to_string(),
            namespace: format!("{name}-tenant"),
            creator: "owner".to_string(),
            tier_name: "base1ns".to_string(),
            parent_space: None,
            visibility: Visibility::Private,
        }
    }

    #[tokio::test]
    async fn test_get_space_not_found() {
        let cluster = InMemoryCluster::new();
        let result = cluster.get_space("missing").await;
        assert!(matches!(result, Err(DomainError::SpaceNotFound(_))));
    }

    #[tokio::test]
    async fn test_list_bindings_preserves_insertion_order() {
        let cluster = InMemoryCluster::new();
        cluster.add_space_binding(SpaceBinding {
            mur_name: "owner".to_string(),
            space_name: "home".to_string(),
            role: "admin".to_string(),
        });
        cluster.add_space_binding(SpaceBinding {
            mur_name: "guest".to_string(),
            space_name: "home".to_string(),
            role: "viewer".to_string(),
        });
        cluster.add_space_binding(SpaceBinding {
            mur_name: "owner".to_string(),
            space_name: "other".to_string(),
            role: "admin".to_string(),
        });

        let bindings = cluster.list_space_bindings_for_space("home").await.unwrap();
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].mur_name, "owner");
        assert_eq!(bindings[1].mur_name, "guest");
    }

    #[tokio::test]
    async fn test_update_requires_admin_binding() {
        let cluster = InMemoryCluster::new();
        cluster.add_space(space("home"));
        cluster.add_space_binding(SpaceBinding {
            mur_name: "guest".to_string(),
            space_name: "home".to_string(),
            role: "viewer".to_string(),
        });

        let config = SpaceUserConfig {
            space_name: "home".to_string(),
            visibility: Visibility::Community,
        };
        let result = cluster.update_space_user_config(&config, "guest").await;
        assert!(matches!(result, Err(DomainError::PermissionDenied(_))));
        assert_eq!(cluster.config_write_count(), 0);
    }

    #[tokio::test]
    async fn test_update_by_admin_persists_config() {
        let cluster = InMemoryCluster::new();
        cluster.add_space(space("home"));
        cluster.add_space_binding(SpaceBinding {
            mur_name: "owner".to_string(),
            space_name: "home".to_string(),
            role: "admin".to_string(),
        });

        let config = SpaceUserConfig {
            space_name: "home".to_string(),
            visibility: Visibility::Community,
        };
        cluster
            .update_space_user_config(&config, "owner")
            .await
            .unwrap();

        assert_eq!(cluster.config_write_count(), 1);
        let stored = cluster.get_space_user_config("home").await.unwrap().unwrap();
        assert_eq!(stored.visibility, Visibility::Community);
    }

    #[tokio::test]
    async fn test_update_unknown_space_is_not_found() {
        let cluster = InMemoryCluster::new();
        let config = SpaceUserConfig {
            space_name: "missing".to_string(),
            visibility: Visibility::Community,
        };
        let result = cluster.update_space_user_config(&config, "owner").await;
        assert!(matches!(result, Err(DomainError::SpaceNotFound(_))));
    }
}
