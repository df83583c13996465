use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = DashMap<i32, Arc<Mutex<()>>>;

/// Per-user serialization point for read-modify-write sequences
/// (summary aggregation, active-plan toggling). Entries live only while
/// someone holds or waits on them.
#[derive(Clone, Default)]
pub struct UserLocks {
    inner: Arc<LockMap>,
}

/// Held lock for one user. Dropping it releases the lock and forgets the
/// user's entry when nobody else is queued on it.
pub struct UserGuard {
    user_id: i32,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<LockMap>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, user_id: i32) -> UserGuard {
        // Clone the Arc out so the shard guard is released before awaiting.
        let lock = self
            .inner
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        UserGuard {
            user_id,
            guard: Some(lock.lock_owned().await),
            locks: Arc::clone(&self.inner),
        }
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.inner.len()
    }
}

impl Drop for UserGuard {
    fn drop(&mut self) {
        self.guard.take();
        // The map holds one reference; any other is a holder or waiter.
        // remove_if runs under the shard lock, so no acquire can clone in between.
        self.locks
            .remove_if(&self.user_id, |_, m| Arc::strong_count(m) == 1);
    }
}
