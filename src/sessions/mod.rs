//! Session lifecycle — the locking handler, identifier minting, and the
//! contract the host request runtime drives.

pub mod handler;
pub mod traits;

pub use handler::KvSessionHandler;
pub use traits::{IdGenerator, RandomIdGenerator, ReadOutcome, SessionHandler};

use crate::config::SessionConfig;
use crate::store::StoreConnector;

/// Create a handler for one unit of work over `connector`, with the default
/// identifier generator.
pub fn create_handler(
    connector: Box<dyn StoreConnector>,
    config: SessionConfig,
) -> KvSessionHandler {
    KvSessionHandler::new(connector, Box::new(RandomIdGenerator), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::create_connector;

    #[test]
    fn factory_builds_a_kv_handler() {
        let handler = create_handler(create_connector(), SessionConfig::default());
        assert_eq!(handler.name(), "kv");
    }
}
