//! Locking session facade over a remote key-value store.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::lock::LockManager;
use crate::store::{KvStore, StoreConnector};

use super::traits::{IdGenerator, ReadOutcome, SessionHandler};

/// Decide whether an incoming identifier must be replaced.
///
/// An identifier minted by this unit of work is always trusted, even before
/// its first write. A caller-supplied identifier unknown to the store is
/// either a legitimately expired session or a fixation attempt with a
/// guessed identifier; both get a fresh one.
fn must_regenerate(minted_locally: bool, exists_in_store: bool) -> bool {
    !minted_locally && !exists_in_store
}

/// Store connection plus the lock bookkeeping scoped to it.
struct Connection {
    store: Arc<dyn KvStore>,
    locks: LockManager,
}

/// Session lifecycle facade. One value serves one unit of work.
pub struct KvSessionHandler {
    connector: Box<dyn StoreConnector>,
    ids: Box<dyn IdGenerator>,
    config: SessionConfig,
    conn: Option<Connection>,
    minted: HashSet<String>,
    session_name: String,
}

impl KvSessionHandler {
    pub fn new(
        connector: Box<dyn StoreConnector>,
        ids: Box<dyn IdGenerator>,
        config: SessionConfig,
    ) -> Self {
        Self {
            connector,
            ids,
            config,
            conn: None,
            minted: HashSet::new(),
            session_name: String::new(),
        }
    }

    fn connection(&mut self) -> Result<&mut Connection> {
        self.conn
            .as_mut()
            .ok_or_else(|| SessionError::Connection("session store is not open".to_string()))
    }
}

#[async_trait]
impl SessionHandler for KvSessionHandler {
    async fn open(&mut self, location: &str, name: &str) -> Result<()> {
        let store = self
            .connector
            .connect(location)
            .await
            .map_err(|error| SessionError::Connection(error.to_string()))?;
        tracing::debug!(
            location,
            session_name = name,
            store = store.name(),
            "session store opened"
        );
        let locks = LockManager::new(store.clone(), &self.config);
        self.conn = Some(Connection { store, locks });
        self.session_name = name.to_string();
        Ok(())
    }

    fn generate_id(&mut self) -> String {
        let id = self.ids.generate();
        self.minted.insert(id.clone());
        id
    }

    async fn read(&mut self, id: &str) -> Result<ReadOutcome> {
        let minted = self.minted.contains(id);
        let conn = self.connection()?;

        let exists = if minted {
            true
        } else {
            conn.store.exists(id).await?
        };
        if must_regenerate(minted, exists) {
            tracing::debug!(id, "rejecting foreign session id unknown to the store");
            return Ok(ReadOutcome::Regenerate);
        }

        conn.locks.acquire(id).await?;
        let data = conn.store.get(id).await?.unwrap_or_default();
        Ok(ReadOutcome::Data(data))
    }

    async fn write(&mut self, id: &str, data: &[u8]) -> Result<()> {
        let ttl = self.config.session_ttl();
        let conn = self.connection()?;
        conn.store
            .set_with_ttl(id, data, ttl)
            .await
            .map_err(|source| SessionError::WriteFailed {
                id: id.to_string(),
                source,
            })
    }

    async fn destroy(&mut self, id: &str) -> Result<()> {
        let conn = match self.conn.as_mut() {
            Some(conn) => conn,
            None => return Ok(()),
        };
        if let Err(error) = conn.store.delete(id).await {
            tracing::warn!(id, %error, "failed to delete session data during destroy");
        }
        if let Err(error) = conn.locks.release(id).await {
            tracing::warn!(id, %error, "failed to delete session lock during destroy");
        }
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut conn) = self.conn.take() {
            conn.locks.release_all().await;
            tracing::debug!(session_name = self.session_name, "session store closed");
        }
        // The unit of work is over; identifiers minted for it are no longer
        // trusted anywhere.
        self.minted.clear();
        Ok(())
    }

    async fn gc(&mut self, _max_lifetime_secs: u64) -> Result<()> {
        // The store expires sessions on its own; nothing to collect.
        Ok(())
    }

    fn name(&self) -> &str {
        "kv"
    }
}
