//! Infrastructure layer - database and cache.

pub mod cache;
mod db;
pub mod migrations;

pub use cache::{AuthCache, CachedAuthCheck, LayeredAuthCache, LocalAuthCache, RedisAuthCache};
pub use db::Database;
pub use migrations::Migrator;
