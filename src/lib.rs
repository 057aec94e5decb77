#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::doc_markdown,
    clippy::manual_let_else,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::uninlined_format_args
)]

//! Locking web-session lifecycle over a remote key-value store.
//!
//! One [`KvSessionHandler`] serves one request: the host runtime opens it,
//! reads and writes session payloads through it, and closes it when the
//! response is done. Concurrent requests for the same session identifier
//! are serialized by a per-session lock key in the store, bounded by a TTL
//! safety net so a crashed request can never wedge a session past the
//! host's processing deadline. Caller-supplied identifiers unknown to the
//! store are answered with a regeneration signal instead of being trusted,
//! which closes the session-fixation door.
//!
//! The store itself stays behind the [`KvStore`] trait; session payloads
//! are opaque bytes, and expiry is the store's native TTL, so there is no
//! garbage collector here.

pub mod config;
pub mod error;
pub mod lock;
pub mod sessions;
pub mod store;

pub use config::SessionConfig;
pub use error::{Result, SessionError};
pub use sessions::{
    create_handler, IdGenerator, KvSessionHandler, RandomIdGenerator, ReadOutcome,
    SessionHandler,
};
pub use store::{InMemoryConnector, InMemoryStore, KvStore, StoreConnector};
