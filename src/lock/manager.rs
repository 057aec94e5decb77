//! Bounded lock acquisition with a TTL safety net.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::store::KvStore;

use super::lock_key;

/// Value written under a lock key. Presence is the signal; the content is
/// never read back.
const LOCK_MARKER: &[u8] = b"1";

/// Per-unit-of-work lock bookkeeping.
///
/// Holds the open-lock registry: every identifier locked during the cycle,
/// in acquisition order, each exactly once. Cross-unit exclusion comes only
/// from the store's atomic set-if-absent; the registry exists so that
/// [`release_all`](LockManager::release_all) can tear everything down at
/// close.
pub struct LockManager {
    store: Arc<dyn KvStore>,
    lock_ttl: Duration,
    retry_initial: Duration,
    retry_cap: Duration,
    wait_max: Duration,
    held: Vec<String>,
}

impl LockManager {
    pub fn new(store: Arc<dyn KvStore>, config: &SessionConfig) -> Self {
        Self {
            store,
            lock_ttl: config.lock_ttl(),
            retry_initial: config.lock_retry_initial(),
            retry_cap: config.lock_retry_cap(),
            wait_max: config.lock_wait_max(),
            held: Vec::new(),
        }
    }

    /// Identifiers currently locked by this unit of work, in acquisition
    /// order.
    pub fn held(&self) -> &[String] {
        &self.held
    }

    /// Block until this unit of work exclusively owns the lock for `id`.
    ///
    /// Re-acquiring an identifier already held here is a no-op. Contention
    /// is retried with doubling backoff until the wait budget is exhausted,
    /// then surfaces as [`SessionError::LockTimeout`]. The lock key carries
    /// the lock TTL, so a holder that dies without closing frees the slot on
    /// its own.
    pub async fn acquire(&mut self, id: &str) -> Result<()> {
        if self.held.iter().any(|held| held == id) {
            return Ok(());
        }

        let key = lock_key(id);
        let started = Instant::now();
        let deadline = started + self.wait_max;
        let mut delay = self.retry_initial;
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            if self
                .store
                .set_if_absent_with_ttl(&key, LOCK_MARKER, self.lock_ttl)
                .await?
            {
                tracing::debug!(id, attempts, "session lock acquired");
                self.held.push(id.to_string());
                return Ok(());
            }

            if Instant::now() + delay > deadline {
                let waited_ms = started.elapsed().as_millis() as u64;
                tracing::warn!(id, attempts, waited_ms, "gave up acquiring session lock");
                return Err(SessionError::LockTimeout {
                    id: id.to_string(),
                    waited_ms,
                });
            }

            tokio::time::sleep(delay).await;
            delay = (delay * 2).min(self.retry_cap);
        }
    }

    /// Release the lock for `id` and forget it in the registry.
    ///
    /// Deleting an absent lock is not an error, so releasing an identifier
    /// this unit of work never locked is harmless.
    pub async fn release(&mut self, id: &str) -> Result<()> {
        self.store.delete(&lock_key(id)).await?;
        self.held.retain(|held| held != id);
        Ok(())
    }

    /// Release every lock taken during this unit of work, oldest first.
    ///
    /// Best-effort: a failed delete is logged and skipped so the remaining
    /// locks still get released. The registry is empty afterwards; the TTL
    /// covers anything a failed delete left behind.
    pub async fn release_all(&mut self) {
        for id in std::mem::take(&mut self.held) {
            if let Err(error) = self.store.delete(&lock_key(&id)).await {
                tracing::warn!(id, %error, "failed to release session lock at close");
            }
        }
    }
}
