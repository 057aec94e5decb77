//! Lifecycle contract between the host request runtime and the session layer.

use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Outcome of a session read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadOutcome {
    /// Session payload. Empty when the identifier has never been written.
    Data(Vec<u8>),
    /// The identifier was neither minted by this unit of work nor known to
    /// the store. The host must discard it, mint a fresh identifier, and
    /// restart the read; the restart belongs to the host, not to this
    /// crate.
    Regenerate,
}

impl ReadOutcome {
    /// The payload carried by this outcome. A regeneration signal reads as
    /// empty.
    pub fn into_data(self) -> Vec<u8> {
        match self {
            ReadOutcome::Data(data) => data,
            ReadOutcome::Regenerate => Vec::new(),
        }
    }
}

/// Mints session identifiers.
///
/// Identifier format policy belongs to the host; the session layer only
/// records which identifiers were minted during the current unit of work.
pub trait IdGenerator: Send + Sync {
    /// Produce a fresh identifier.
    fn generate(&self) -> String;

    /// The name of this generator implementation.
    fn name(&self) -> &str;
}

/// Default generator: 32 alphanumeric characters from the thread-local
/// CSPRNG.
#[derive(Debug, Clone, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect()
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Session lifecycle hooks invoked by the host request runtime.
///
/// One handler value serves one unit of work (request). It owns the store
/// connection, the origin set of locally minted identifiers, and the
/// open-lock registry; none of that state is shared across units of work.
#[async_trait]
pub trait SessionHandler: Send {
    /// Establish the store connection. Failure is fatal to the unit of
    /// work. `name` is the host's session name, kept for diagnostics.
    async fn open(&mut self, location: &str, name: &str) -> Result<()>;

    /// Mint a fresh identifier and record it as locally generated.
    fn generate_id(&mut self) -> String;

    /// Load the payload for `id`, locking the session first.
    ///
    /// Returns [`ReadOutcome::Regenerate`], with no lock taken, when the
    /// identifier must be replaced. Otherwise the payload, empty if the
    /// session was never written.
    async fn read(&mut self, id: &str) -> Result<ReadOutcome>;

    /// Create or replace the payload for `id` with the configured session
    /// TTL.
    async fn write(&mut self, id: &str, data: &[u8]) -> Result<()>;

    /// Delete the session and its lock. Idempotent; always succeeds.
    async fn destroy(&mut self, id: &str) -> Result<()>;

    /// Release every held lock and drop the store connection. Always
    /// succeeds once the locks are released.
    async fn close(&mut self) -> Result<()>;

    /// Expiry is native to the store, so this collects nothing; it exists
    /// only to satisfy the lifecycle contract and always succeeds.
    async fn gc(&mut self, max_lifetime_secs: u64) -> Result<()>;

    /// The name of this handler implementation.
    fn name(&self) -> &str;
}
