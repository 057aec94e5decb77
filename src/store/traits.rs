//! Store-client boundary: the key-value commands the session layer consumes.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Remote key-value store with native expiry.
///
/// One connection handle is owned by a single unit of work, but the session
/// handler and its lock manager share it, so implementations must be
/// `Send + Sync`. All mutation is keyed; there are no scans.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Fetch the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Create or replace `key` with `value`, expiring after `ttl`.
    async fn set_with_ttl(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()>;

    /// Delete `key`. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Whether `key` currently exists.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Atomically create `key` with `value` and `ttl` only if it does not
    /// already exist. Returns `false` when the key was present. This is the
    /// primitive every cross-process exclusion guarantee rests on.
    async fn set_if_absent_with_ttl(
        &self,
        key: &str,
        value: &[u8],
        ttl: Duration,
    ) -> Result<bool>;

    /// The name of this store implementation.
    fn name(&self) -> &str;
}

/// Opens one store connection per unit of work.
///
/// The handle returned by [`connect`](StoreConnector::connect) is owned by
/// the unit of work that opened it and dropped at close.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    /// Establish a connection handle for `location`.
    async fn connect(&self, location: &str) -> Result<Arc<dyn KvStore>>;

    /// The name of this connector implementation.
    fn name(&self) -> &str;
}
