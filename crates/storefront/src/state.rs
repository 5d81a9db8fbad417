//! Application state shared across handlers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::OwnedMutexGuard;
use tower_sessions::session::Id;

use crate::config::StorefrontConfig;
use crate::models::Storefront;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Visitor state is not kept here;
/// it lives in each visitor's session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    session_locks: SessionLocks,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                session_locks: SessionLocks::default(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Per-session request locks.
    #[must_use]
    pub fn session_locks(&self) -> &SessionLocks {
        &self.inner.session_locks
    }

    /// Generate the state for a new visitor.
    ///
    /// With `STOREFRONT_CATALOG_SEED` set every visitor gets the same catalog
    /// and order number.
    #[must_use]
    pub fn new_storefront(&self) -> Storefront {
        let catalog = &self.inner.config.catalog;
        let settings = catalog.settings();
        match catalog.seed {
            Some(seed) => Storefront::generate(&mut StdRng::seed_from_u64(seed), &settings),
            None => Storefront::generate(&mut rand::rng(), &settings),
        }
    }
}

/// One async mutex per session that currently has a request in flight.
///
/// Entries nobody holds or waits on are pruned whenever a lock is handed out,
/// so the map only grows with concurrent sessions.
#[derive(Debug, Default)]
pub struct SessionLocks {
    locks: Mutex<HashMap<Id, Arc<tokio::sync::Mutex<()>>>>,
}

impl SessionLocks {
    /// Wait until no other request holds the lock for `id`.
    pub async fn acquire(&self, id: Id) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(id).or_default())
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_same_session_waits_for_holder() {
        let locks = SessionLocks::default();
        let id = Id(7);

        let held = locks.acquire(id).await;
        let second = tokio::time::timeout(Duration::from_millis(50), locks.acquire(id)).await;
        assert!(second.is_err());

        drop(held);
        let second = tokio::time::timeout(Duration::from_millis(50), locks.acquire(id)).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_other_sessions_do_not_wait() {
        let locks = SessionLocks::default();
        let _held = locks.acquire(Id(1)).await;
        let other = tokio::time::timeout(Duration::from_millis(50), locks.acquire(Id(2))).await;
        assert!(other.is_ok());
    }

    #[tokio::test]
    async fn test_released_locks_are_pruned() {
        let locks = SessionLocks::default();
        drop(locks.acquire(Id(1)).await);
        drop(locks.acquire(Id(2)).await);

        let _held = locks.acquire(Id(3)).await;
        let tracked: Vec<Id> = locks
            .locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        assert_eq!(tracked, vec![Id(3)]);
    }
}
