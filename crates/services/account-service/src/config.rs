//! Account service configuration.

use std::env;
use std::str::FromStr;

use tracing::warn;

use crate::command::PermissionState;
use crate::messages::StringsConfig;
use common::{CacheConfig, DatabaseConfig};
use domain::DEFAULT_CONFIRM_KEYWORD;

/// Account service configuration.
#[derive(Clone)]
pub struct AccountServiceConfig {
    pub database: DatabaseConfig,
    /// Redis auth cache tier; `None` keeps the cache in-process only
    pub cache: Option<CacheConfig>,
    /// Word the player must repeat to confirm unregistration
    pub confirm_keyword: String,
    pub unregister_permission_state: PermissionState,
    pub strings: StringsConfig,
}

impl std::fmt::Debug for AccountServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountServiceConfig")
            .field("database_url", &"[REDACTED]")
            .field("database_read_timeout_ms", &self.database.read_timeout_ms)
            .field("cache_url", &self.cache.as_ref().map(|_| "[REDACTED]"))
            .field("confirm_keyword", &self.confirm_keyword)
            .field("unregister_permission_state", &self.unregister_permission_state)
            .finish()
    }
}

impl AccountServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration through `lookup`, which maps a variable name to
    /// its value. Unset or unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_defaults = DatabaseConfig::default();
        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").unwrap_or(db_defaults.url),
            max_connections: parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")
                .unwrap_or(db_defaults.max_connections),
            min_connections: parse_var(&lookup, "DATABASE_MIN_CONNECTIONS")
                .unwrap_or(db_defaults.min_connections),
            read_timeout_ms: parse_var(&lookup, "STORE_READ_TIMEOUT_MS")
                .unwrap_or(db_defaults.read_timeout_ms),
        };

        let cache = lookup("REDIS_URL").map(|url| CacheConfig {
            url,
            evict_timeout_ms: parse_var(&lookup, "REDIS_EVICT_TIMEOUT_MS")
                .unwrap_or(CacheConfig::default().evict_timeout_ms),
        });

        let unregister_permission_state = match lookup("UNREGISTER_PERMISSION_STATE") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("{}, falling back to permission", e);
                PermissionState::Permission
            }),
            None => PermissionState::default(),
        };

        Self {
            database,
            cache,
            confirm_keyword: lookup("CONFIRM_KEYWORD")
                .unwrap_or_else(|| DEFAULT_CONFIRM_KEYWORD.to_string()),
            unregister_permission_state,
            strings: StringsConfig::from_lookup(&lookup),
        }
    }
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            cache: None,
            confirm_keyword: DEFAULT_CONFIRM_KEYWORD.to_string(),
            unregister_permission_state: PermissionState::default(),
            strings: StringsConfig::default(),
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    lookup(name).and_then(|raw| raw.trim().parse().ok())
}
