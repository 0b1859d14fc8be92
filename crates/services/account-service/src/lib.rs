//! Account Service Library
//!
//! Hosts the self-service account commands of the authentication layer.
//! The transport that owns player connections builds an [`AccountService`],
//! then hands every command line it receives to [`AccountService::dispatch`].
//!
//! # Layout
//!
//! - **command**: name/alias registry and permission gating
//! - **service**: credential verification and the unregister flow
//! - **repository**: credential store gateway (SeaORM)
//! - **infra**: database, migrations and auth cache tiers
//! - **events**: account lifecycle event bus
//! - **messages**: pre-rendered user-facing messages
//! - **session**: traits the transport implements for invokers

pub mod command;
pub mod config;
pub mod events;
pub mod infra;
pub mod messages;
pub mod reporting;
pub mod repository;
pub mod service;
pub mod session;

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::command::{CommandRegistry, Dispatch};
use crate::config::AccountServiceConfig;
use crate::events::EventBus;
use crate::infra::{AuthCache, Database, LayeredAuthCache, LocalAuthCache, RedisAuthCache};
use crate::messages::MessageCatalog;
use crate::reporting::TracingReporter;
use crate::repository::{CredentialRepository, CredentialStore};
use crate::service::{PasswordVerifier, UnregisterCommand, UnregisterSettings};
use crate::session::Invoker;
use domain::{Argon2Matcher, COMMAND_UNREGISTER, COMMAND_UNREGISTER_ALIAS};

/// Register every account command against the given collaborators.
pub fn build_command_registry(
    repository: Arc<dyn CredentialRepository>,
    cache: Arc<dyn AuthCache>,
    events: EventBus,
    config: &AccountServiceConfig,
) -> CommandRegistry {
    let verifier = Arc::new(PasswordVerifier::new(
        repository.clone(),
        Arc::new(Argon2Matcher),
    ));

    let unregister = UnregisterCommand::new(
        verifier,
        repository,
        cache,
        Arc::new(events),
        Arc::new(TracingReporter),
        UnregisterSettings {
            confirm_keyword: config.confirm_keyword.clone(),
            permission_state: config.unregister_permission_state,
            messages: MessageCatalog::from_config(&config.strings),
        },
    );

    let mut registry = CommandRegistry::new();
    registry.register(
        &[COMMAND_UNREGISTER, COMMAND_UNREGISTER_ALIAS],
        Arc::new(unregister),
    );
    registry
}

/// Fully wired account service.
pub struct AccountService {
    commands: CommandRegistry,
    events: EventBus,
    local_cache: Arc<LocalAuthCache>,
}

impl AccountService {
    /// Connect to the database (running migrations) and optional Redis
    /// cache, then register all commands.
    pub async fn connect(config: AccountServiceConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let database = Database::connect(&config.database).await?;
        let repository = Arc::new(CredentialStore::new(
            database.shared_connection(),
            Duration::from_millis(config.database.read_timeout_ms),
        ));

        let local_cache = Arc::new(LocalAuthCache::new());
        let mut cache = LayeredAuthCache::new().with_tier(local_cache.clone());
        if let Some(cache_config) = &config.cache {
            match RedisAuthCache::connect(cache_config).await {
                Ok(redis) => cache = cache.with_tier(Arc::new(redis)),
                Err(e) => warn!("Redis auth cache unavailable, using local cache only: {}", e),
            }
        }

        let events = EventBus::default();
        let commands = build_command_registry(repository, Arc::new(cache), events.clone(), &config);
        info!(
            permission_state = %config.unregister_permission_state,
            "Account service ready"
        );

        Ok(Self {
            commands,
            events,
            local_cache,
        })
    }

    /// Dispatch a raw command line on behalf of `invoker`.
    pub async fn dispatch(&self, invoker: &Invoker, line: &str) -> Dispatch {
        self.commands.dispatch_line(invoker, line).await
    }

    /// Bus that account lifecycle listeners subscribe to
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// In-process auth cache, for the login flow to populate
    pub fn auth_cache(&self) -> Arc<LocalAuthCache> {
        self.local_cache.clone()
    }
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &AccountServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}
