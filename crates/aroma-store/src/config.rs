//! Store configuration loaded from environment variables.
//!
//! All settings have defaults so the data layer can start with zero
//! configuration for local development (an in-memory SQLite store).

use std::time::Duration;

use aroma_shared::constants::{DEFAULT_MAX_MEDIA_BYTES, DEFAULT_RECENT_LIMIT};

/// Path understood by SQLite as a private in-memory database.
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Data layer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Location of the SQLite database file.
    /// Env: `AROMA_DATABASE_PATH`
    /// Default: `:memory:`
    pub database_path: String,

    /// How long a statement may wait on a locked database before failing.
    /// Env: `AROMA_BUSY_TIMEOUT_MS`
    /// Default: 5000 ms
    pub busy_timeout: Duration,

    /// Upper bound of "recently created" listings.
    /// Env: `AROMA_RECENT_LIMIT`
    /// Default: 200
    pub recent_limit: usize,

    /// Upper bound of rows scanned by best-effort name searches.
    /// Env: `AROMA_SEARCH_SCAN_LIMIT`
    /// Default: 1000
    pub search_scan_limit: usize,

    /// Largest media blob accepted, in bytes.
    /// Env: `AROMA_MAX_MEDIA_BYTES`
    /// Default: 5 MiB
    pub max_media_bytes: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: IN_MEMORY_PATH.to_string(),
            busy_timeout: Duration::from_millis(5_000),
            recent_limit: DEFAULT_RECENT_LIMIT,
            search_scan_limit: 1_000,
            max_media_bytes: DEFAULT_MAX_MEDIA_BYTES,
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("AROMA_DATABASE_PATH") {
            if !path.trim().is_empty() {
                config.database_path = path;
            }
        }

        if let Some(millis) = parse_positive(&lookup, "AROMA_BUSY_TIMEOUT_MS") {
            config.busy_timeout = Duration::from_millis(millis as u64);
        }

        if let Some(limit) = parse_positive(&lookup, "AROMA_RECENT_LIMIT") {
            config.recent_limit = limit;
        }

        if let Some(limit) = parse_positive(&lookup, "AROMA_SEARCH_SCAN_LIMIT") {
            config.search_scan_limit = limit;
        }

        if let Some(bytes) = parse_positive(&lookup, "AROMA_MAX_MEDIA_BYTES") {
            config.max_media_bytes = bytes;
        }

        config
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path == IN_MEMORY_PATH
    }
}

fn parse_positive<F>(lookup: &F, key: &str) -> Option<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Some(value),
        _ => {
            tracing::warn!(key, value = %raw, "Invalid setting, using default");
            None
        }
    }
}
