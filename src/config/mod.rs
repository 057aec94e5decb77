//! Session lifecycle tuning.
//!
//! Values arrive already resolved: plain integers from whatever
//! configuration layer the host runtime uses. This crate never loads or
//! parses configuration sources itself.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning for session persistence and lock acquisition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    /// Store TTL applied on every session write, in seconds. Default: `1440`.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// Lock TTL, in seconds: the safety net that frees locks held by units
    /// of work that died without closing. Should equal the host's maximum
    /// allowed processing duration. Default: `30`.
    #[serde(default = "default_lock_ttl_secs")]
    pub lock_ttl_secs: u64,

    /// First backoff sleep between contended lock attempts, in milliseconds.
    /// Default: `50`.
    #[serde(default = "default_lock_retry_initial_ms")]
    pub lock_retry_initial_ms: u64,

    /// Ceiling for the doubling backoff sleep, in milliseconds.
    /// Default: `1000`.
    #[serde(default = "default_lock_retry_cap_ms")]
    pub lock_retry_cap_ms: u64,

    /// Total time budget for one lock acquisition, in milliseconds. Zero
    /// means a single attempt. Default: `30000`.
    #[serde(default = "default_lock_wait_max_ms")]
    pub lock_wait_max_ms: u64,
}

fn default_session_ttl_secs() -> u64 {
    1440
}

fn default_lock_ttl_secs() -> u64 {
    30
}

fn default_lock_retry_initial_ms() -> u64 {
    50
}

fn default_lock_retry_cap_ms() -> u64 {
    1000
}

fn default_lock_wait_max_ms() -> u64 {
    30_000
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_ttl_secs: default_session_ttl_secs(),
            lock_ttl_secs: default_lock_ttl_secs(),
            lock_retry_initial_ms: default_lock_retry_initial_ms(),
            lock_retry_cap_ms: default_lock_retry_cap_ms(),
            lock_wait_max_ms: default_lock_wait_max_ms(),
        }
    }
}

impl SessionConfig {
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn lock_ttl(&self) -> Duration {
        Duration::from_secs(self.lock_ttl_secs)
    }

    pub fn lock_retry_initial(&self) -> Duration {
        Duration::from_millis(self.lock_retry_initial_ms)
    }

    pub fn lock_retry_cap(&self) -> Duration {
        Duration::from_millis(self.lock_retry_cap_ms)
    }

    pub fn lock_wait_max(&self) -> Duration {
        Duration::from_millis(self.lock_wait_max_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = SessionConfig::default();
        assert_eq!(config.session_ttl_secs, 1440);
        assert_eq!(config.lock_ttl_secs, 30);
        assert_eq!(config.lock_retry_initial_ms, 50);
        assert_eq!(config.lock_retry_cap_ms, 1000);
        assert_eq!(config.lock_wait_max_ms, 30_000);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"lock_ttl_secs": 60}"#).unwrap();
        assert_eq!(config.lock_ttl_secs, 60);
        assert_eq!(config.session_ttl_secs, 1440);
        assert_eq!(config.lock_wait_max_ms, 30_000);
    }

    #[test]
    fn duration_accessors_use_the_right_units() {
        let config = SessionConfig::default();
        assert_eq!(config.session_ttl(), Duration::from_secs(1440));
        assert_eq!(config.lock_retry_initial(), Duration::from_millis(50));
        assert_eq!(config.lock_wait_max(), Duration::from_secs(30));
    }
}
