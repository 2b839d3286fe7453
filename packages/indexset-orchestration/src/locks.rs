use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-index-set-id lock registry.
///
/// The orchestrator is stateless between calls, so nothing else serializes
/// concurrent mutations of the same id; without this, two concurrent
/// start-rebalancing calls for one collection could both pass the
/// "not already present" check before either writes back. Operations on
/// different ids stay fully parallel.
///
/// Entries are evicted when the last guard for an id is released, so the
/// registry stays proportional to the number of ids with operations in
/// flight rather than every id ever touched.
#[derive(Default)]
pub struct IdLockRegistry {
    locks: DashMap<i64, Arc<Mutex<()>>>,
}

impl IdLockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the single-writer lock for `id`, waiting if another operation
    /// on the same id is in flight.
    pub async fn acquire(&self, id: i64) -> IdLockGuard<'_> {
        let lock = self
            .locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = lock.lock_owned().await;
        IdLockGuard {
            registry: self,
            id,
            guard: Some(guard),
        }
    }

    /// Number of ids with a live lock entry.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Guard for a single-writer id lock. Dropping it releases the lock and
/// evicts the registry entry if no other holder or waiter remains.
pub struct IdLockGuard<'a> {
    registry: &'a IdLockRegistry,
    id: i64,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for IdLockGuard<'_> {
    fn drop(&mut self) {
        // Release the mutex (and its Arc clone) before inspecting the
        // count: waiters hold their own clones and keep the entry alive.
        self.guard.take();
        self.registry
            .locks
            .remove_if(&self.id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_same_id_is_serialized() {
        let registry = Arc::new(IdLockRegistry::new());
        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let registry = registry.clone();
            let in_flight = in_flight.clone();
            let max_seen = max_seen.clone();
            tasks.push(tokio::spawn(async move {
                let _guard = registry.acquire(7).await;
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(tokio::time::Duration::from_millis(5)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
        // All guards released: no entries survive.
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_different_ids_run_in_parallel() {
        let registry = Arc::new(IdLockRegistry::new());

        let guard_a = registry.acquire(1).await;
        // Holding id 1 must not block id 2.
        let guard_b = tokio::time::timeout(
            tokio::time::Duration::from_millis(50),
            registry.acquire(2),
        )
        .await
        .expect("lock for a different id should be free");

        drop(guard_a);
        drop(guard_b);
    }

    #[tokio::test]
    async fn test_entry_evicted_after_last_release() {
        let registry = IdLockRegistry::new();

        {
            let _guard = registry.acquire(7).await;
            assert_eq!(registry.len(), 1);
        }
        assert!(registry.is_empty());

        // Cycling through many ids leaves nothing behind.
        for id in 0..100 {
            let _guard = registry.acquire(id).await;
        }
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_entry_survives_while_a_waiter_is_queued() {
        let registry = Arc::new(IdLockRegistry::new());

        let guard = registry.acquire(7).await;

        let waiter = {
            let registry = registry.clone();
            tokio::spawn(async move {
                let _guard = registry.acquire(7).await;
            })
        };

        // Give the waiter time to park on the mutex, then release; the
        // entry must not be evicted out from under it.
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
        drop(guard);

        waiter.await.unwrap();
        assert!(registry.is_empty());
    }
}
