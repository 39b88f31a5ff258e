//! Navigation state with stale-result protection.
//!
//! The HTTP API resolves each browse request statelessly through
//! [`HierarchyResolver`]; the `Navigator` is the library surface for
//! stateful consumers (a desktop shell, a long-lived session holding one
//! "current folder") where overlapping navigations must not race.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, warn};

use portal_entity::hierarchy::item::Item;
use portal_entity::hierarchy::path::NavPath;

use super::resolver::HierarchyResolver;

/// The current path and the items resolved for it.
#[derive(Debug, Clone, Default)]
pub struct NavState {
    pub path: NavPath,
    pub items: Vec<Item>,
}

/// Holds the current navigation state and keeps it consistent when
/// resolutions overlap.
///
/// Every `navigate` call takes a fresh generation number. A resolution
/// commits its result only while its generation is still the latest one,
/// so a slow resolution for an old path can never overwrite the result
/// of a newer navigation. Failed resolutions are logged and leave the
/// previous state in place.
#[derive(Debug)]
pub struct Navigator {
    resolver: Arc<HierarchyResolver>,
    generation: AtomicU64,
    state: RwLock<NavState>,
}

impl Navigator {
    /// Create a navigator over the given resolver, starting at the root.
    pub fn new(resolver: Arc<HierarchyResolver>) -> Self {
        Self {
            resolver,
            generation: AtomicU64::new(0),
            state: RwLock::new(NavState::default()),
        }
    }

    /// Navigate to a path, committing the result unless it went stale.
    pub async fn navigate(&self, path: NavPath) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        match self.resolver.resolve(&path).await {
            Ok(items) => {
                if self.generation.load(Ordering::SeqCst) == generation {
                    *self.state.write().await = NavState { path, items };
                } else {
                    debug!(path = %path, "Discarding stale resolution result");
                }
            }
            Err(error) => {
                warn!(path = %path, error = %error, "Hierarchy resolution failed");
            }
        }
    }

    /// Snapshot of the current navigation state.
    pub async fn current(&self) -> NavState {
        self.state.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::Notify;
    use uuid::Uuid;

    use super::super::names::ClientNames;
    use super::super::testing::{folder_entry, FakeIndex, FakeStore};
    use super::*;

    fn navigator(store: FakeStore, index: FakeIndex) -> Arc<Navigator> {
        let resolver = HierarchyResolver::new(
            Arc::new(store),
            Arc::new(index),
            Arc::new(ClientNames::default()),
        );
        Arc::new(Navigator::new(Arc::new(resolver)))
    }

    #[tokio::test]
    async fn test_navigate_commits_items() {
        let client = Uuid::new_v4();
        let store = FakeStore::new();
        store.insert(&client.to_string(), vec![folder_entry("2023")]);

        let navigator = navigator(store, FakeIndex::default());
        navigator.navigate(NavPath::new([client.to_string()])).await;

        let state = navigator.current().await;
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].name, "2023");
    }

    #[tokio::test]
    async fn test_stale_resolution_is_discarded() {
        let slow_client = Uuid::new_v4();
        let fast_client = Uuid::new_v4();

        let store = FakeStore::new();
        store.insert(&slow_client.to_string(), vec![folder_entry("2020")]);
        store.insert(&fast_client.to_string(), vec![folder_entry("2024")]);

        let release = Arc::new(Notify::new());
        store.gate(&slow_client.to_string(), release.clone());

        let navigator = navigator(store, FakeIndex::default());

        let slow_path = NavPath::new([slow_client.to_string()]);
        let slow = {
            let navigator = navigator.clone();
            tokio::spawn(async move { navigator.navigate(slow_path).await })
        };
        tokio::task::yield_now().await;

        navigator.navigate(NavPath::new([fast_client.to_string()])).await;

        release.notify_one();
        slow.await.unwrap();

        let state = navigator.current().await;
        assert_eq!(state.path, NavPath::new([fast_client.to_string()]));
        assert_eq!(state.items[0].name, "2024");
    }

    #[tokio::test]
    async fn test_failed_resolution_keeps_previous_state() {
        use std::sync::atomic::Ordering;

        let client = Uuid::new_v4();
        let store = Arc::new(FakeStore::new());
        store.insert(&client.to_string(), vec![folder_entry("2023")]);

        let resolver = HierarchyResolver::new(
            store.clone(),
            Arc::new(FakeIndex::default()),
            Arc::new(ClientNames::default()),
        );
        let navigator = Navigator::new(Arc::new(resolver));

        let path = NavPath::new([client.to_string()]);
        navigator.navigate(path.clone()).await;

        store.fail.store(true, Ordering::SeqCst);
        navigator.navigate(NavPath::new([Uuid::new_v4().to_string()])).await;

        let state = navigator.current().await;
        assert_eq!(state.path, path);
        assert_eq!(state.items.len(), 1);
    }
}
