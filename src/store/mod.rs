//! Key-value store boundary — the remote store protocol and the in-memory
//! reference backend.

pub mod in_memory;
pub mod traits;

pub use in_memory::{InMemoryConnector, InMemoryStore};
pub use traits::{KvStore, StoreConnector};

/// Create a connector for the default (in-memory) backend.
pub fn create_connector() -> Box<dyn StoreConnector> {
    Box::new(InMemoryConnector::new())
}
