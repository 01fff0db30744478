use std::collections::HashSet;
use std::sync::Arc;

use common::domain::{ClusterStore, DomainResult, Space, SpaceBinding};
use tracing::{debug, instrument};

/// Walks a space's ancestor chain and collects every binding that applies to
/// the target space, directly or through inheritance.
pub struct SpaceBindingResolver {
    store: Arc<dyn ClusterStore>,
}

impl SpaceBindingResolver {
    pub fn new(store: Arc<dyn ClusterStore>) -> Self {
        Self { store }
    }

    /// Collect bindings for `space` and all of its ancestors.
    ///
    /// Bindings on the space itself come first and ancestor bindings follow
    /// in walk order, so the evaluator's first-match rule gives the closest
    /// scope precedence. The walk keeps a visited set and stops at the root
    /// or on the first already-seen space name, so cyclic parent data cannot
    /// hang resolution. The first store error aborts the whole walk; there is
    /// no partial silent success.
    #[instrument(skip(self, space), fields(space = %space.name))]
    pub async fn list_bindings_for_space(&self, space: &Space) -> DomainResult<Vec<SpaceBinding>> {
        let mut bindings = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();

        let mut current = space.clone();
        loop {
            if !visited.insert(current.name.clone()) {
                debug!(space = %current.name, "parent chain revisits a space, stopping walk");
                break;
            }

            let mut scoped = self
                .store
                .list_space_bindings_for_space(&current.name)
                .await?;
            bindings.append(&mut scoped);

            let Some(parent_name) = current.parent_space.clone() else {
                break;
            };
            current = self.store.get_space(&parent_name).await?;
        }

        debug!(count = bindings.len(), "resolved space bindings");
        Ok(bindings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::domain::{DomainError, MockClusterStore, Visibility};

    fn space(name: &str, parent: Option<&str>) -> Space {
        Space {
            name: name.to_string(),
            namespace: format!("{name}-tenant"),
            creator: "owner".to_string(),
            tier_name: "base1ns".to_string(),
            parent_space: parent.map(str::to_string),
            visibility: Visibility::Private,
        }
    }

    fn binding(mur: &str, space: &str, role: &str) -> SpaceBinding {
        SpaceBinding {
            mur_name: mur.to_string(),
            space_name: space.to_string(),
            role: role.to_string(),
        }
    }

    #[tokio::test]
    async fn test_single_space_without_parent() {
        let mut store = MockClusterStore::new();
        store
            .expect_list_space_bindings_for_space()
            .withf(|name: &str| name == "home")
            .times(1)
            .returning(|_| Ok(vec![binding("owner", "home", "admin")]));

        let resolver = SpaceBindingResolver::new(Arc::new(store));
        let bindings = resolver
            .list_bindings_for_space(&space("home", None))
            .await
            .unwrap();

        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].role, "admin");
    }

    #[tokio::test]
    async fn test_parent_bindings_follow_child_bindings() {
        let mut store = MockClusterStore::new();
        store
            .expect_list_space_bindings_for_space()
            .withf(|name: &str| name == "child")
            .returning(|_| Ok(vec![binding("owner", "child", "viewer")]));
        store
            .expect_list_space_bindings_for_space()
            .withf(|name: &str| name == "parent")
            .returning(|_| Ok(vec![binding("owner", "parent", "admin")]));
        store
            .expect_get_space()
            .withf(|name: &str| name == "parent")
            .returning(|_| Ok(space("parent", None)));

        let resolver = SpaceBindingResolver::new(Arc::new(store));
        let bindings = resolver
            .list_bindings_for_space(&space("child", Some("parent")))
            .await
            .unwrap();

        // closest scope first: child binding wins the tie-break downstream
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].space_name, "child");
        assert_eq!(bindings[1].space_name, "parent");
    }

    #[tokio::test]
    async fn test_grandparent_chain_is_walked_to_the_root() {
        let mut store = MockClusterStore::new();
        store
            .expect_list_space_bindings_for_space()
            .returning(|name| Ok(vec![binding("owner", name, "admin")]));
        store
            .expect_get_space()
            .withf(|name: &str| name == "mid")
            .returning(|_| Ok(space("mid", Some("root"))));
        store
            .expect_get_space()
            .withf(|name: &str| name == "root")
            .returning(|_| Ok(space("root", None)));

        let resolver = SpaceBindingResolver::new(Arc::new(store));
        let bindings = resolver
            .list_bindings_for_space(&space("leaf", Some("mid")))
            .await
            .unwrap();

        let walked: Vec<&str> = bindings.iter().map(|b| b.space_name.as_str()).collect();
        assert_eq!(walked, vec!["leaf", "mid", "root"]);
    }

    #[tokio::test]
    async fn test_cyclic_parent_chain_terminates() {
        let mut store = MockClusterStore::new();
        store
            .expect_list_space_bindings_for_space()
            .returning(|name| Ok(vec![binding("owner", name, "admin")]));
        store
            .expect_get_space()
            .withf(|name: &str| name == "b")
            .returning(|_| Ok(space("b", Some("a"))));
        store
            .expect_get_space()
            .withf(|name: &str| name == "a")
            .returning(|_| Ok(space("a", Some("b"))));

        let resolver = SpaceBindingResolver::new(Arc::new(store));
        let bindings = resolver
            .list_bindings_for_space(&space("a", Some("b")))
            .await
            .unwrap();

        // each space contributes exactly once before the cycle guard fires
        assert_eq!(bindings.len(), 2);
    }

    #[tokio::test]
    async fn test_store_error_aborts_the_walk() {
        let mut store = MockClusterStore::new();
        store
            .expect_list_space_bindings_for_space()
            .withf(|name: &str| name == "child")
            .returning(|_| Ok(vec![]));
        store
            .expect_get_space()
            .withf(|name: &str| name == "parent")
            .returning(|_| Err(DomainError::StoreError(anyhow::anyhow!("cache unavailable"))));

        let resolver = SpaceBindingResolver::new(Arc::new(store));
        let result = resolver
            .list_bindings_for_space(&space("child", Some("parent")))
            .await;

        assert!(matches!(result, Err(DomainError::StoreError(_))));
    }
}
