//! Error taxonomy for the session lifecycle.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Failures surfaced to the host runtime.
///
/// Identifier regeneration is deliberately absent: a rejected identifier is
/// a control signal ([`crate::sessions::ReadOutcome::Regenerate`]), not an
/// error. Teardown operations (destroy, close, gc) never fail outward.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Opening the store connection failed, or a data operation ran without
    /// an open connection. Fatal to the unit of work.
    #[error("session store connection failed: {0}")]
    Connection(String),

    /// Persisting session data failed. The store's set is atomic, so the
    /// previous payload is assumed intact.
    #[error("failed to persist session {id}")]
    WriteFailed {
        id: String,
        #[source]
        source: anyhow::Error,
    },

    /// Bounded lock acquisition gave up before the current holder released.
    #[error("timed out acquiring lock for session {id} after {waited_ms}ms")]
    LockTimeout { id: String, waited_ms: u64 },

    /// Any other store-level failure (lookup, existence check, delete).
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
