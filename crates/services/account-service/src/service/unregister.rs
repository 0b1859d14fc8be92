//! Self-service account unregistration.
//!
//! A player repeats their password plus the confirmation keyword in a single
//! command. On success the account is removed from the live system at once
//! (event fired, cache evicted, session closed) while the record delete runs
//! in the background.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::verification::CredentialVerifier;
use crate::command::{Command, PermissionState};
use crate::events::EventSink;
use crate::infra::AuthCache;
use crate::messages::MessageCatalog;
use crate::reporting::ErrorReporter;
use crate::repository::CredentialRepository;
use crate::session::{Invoker, PlayerSession};
use domain::{lookup_key, AccountUnregistered, VerificationOutcome, PERMISSION_UNREGISTER};

/// Static settings for the unregister command, resolved once at startup.
#[derive(Debug, Clone)]
pub struct UnregisterSettings {
    pub confirm_keyword: String,
    pub permission_state: PermissionState,
    pub messages: MessageCatalog,
}

/// The unregister command.
pub struct UnregisterCommand {
    verifier: Arc<dyn CredentialVerifier>,
    repository: Arc<dyn CredentialRepository>,
    cache: Arc<dyn AuthCache>,
    events: Arc<dyn EventSink>,
    reporter: Arc<dyn ErrorReporter>,
    /// Lower-cased once so comparison is a plain equality
    confirm_keyword: String,
    permission_state: PermissionState,
    messages: MessageCatalog,
}

impl UnregisterCommand {
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        repository: Arc<dyn CredentialRepository>,
        cache: Arc<dyn AuthCache>,
        events: Arc<dyn EventSink>,
        reporter: Arc<dyn ErrorReporter>,
        settings: UnregisterSettings,
    ) -> Self {
        Self {
            verifier,
            repository,
            cache,
            events,
            reporter,
            confirm_keyword: settings.confirm_keyword.to_lowercase(),
            permission_state: settings.permission_state,
            messages: settings.messages,
        }
    }

    /// Run one invocation. Returns the background delete task when the
    /// account was verified and removal started.
    pub async fn run(&self, invoker: &Invoker, args: &[String]) -> Option<JoinHandle<()>> {
        let Some(player) = invoker.as_player() else {
            invoker.send_message(&self.messages.not_player);
            return None;
        };

        // Wrong arity and wrong keyword get the same reply
        let Some(password) = self.confirmed_password(args) else {
            player.send_message(&self.messages.unregister_usage);
            return None;
        };

        let username = player.username().to_string();
        let key = lookup_key(&username);
        let outcome = self.verifier.verify(&key, password).await;
        debug!(key = %key, outcome = outcome.label(), "Unregister verification finished");

        match outcome {
            VerificationOutcome::NotFound => {
                player.send_message(&self.messages.not_registered);
                None
            }
            VerificationOutcome::Passwordless => {
                player.send_message(&self.messages.cracked_command);
                None
            }
            VerificationOutcome::WrongPassword => {
                player.send_message(&self.messages.wrong_password);
                None
            }
            VerificationOutcome::Error(e) => {
                self.reporter.report("unregister verification", &e);
                player.send_message(&self.messages.error_occurred);
                None
            }
            VerificationOutcome::Verified => Some(self.unregister(player, username, key).await),
        }
    }

    fn confirmed_password<'a>(&self, args: &'a [String]) -> Option<&'a str> {
        match args {
            [password, confirmation] if confirmation.to_lowercase() == self.confirm_keyword => {
                Some(password.as_str())
            }
            _ => None,
        }
    }

    async fn unregister(
        &self,
        player: &Arc<dyn PlayerSession>,
        username: String,
        key: String,
    ) -> JoinHandle<()> {
        self.events
            .fire_and_forget(AccountUnregistered::new(username.as_str()));

        let deletion = self.spawn_delete(player.clone(), key.clone());

        // Neither of these waits for the delete
        self.cache.evict(&key).await;
        player.disconnect(&self.messages.unregister_successful);

        info!(username = %username, "Account unregistered");
        deletion
    }

    /// Delete the record in the background. A failure is reported and, if
    /// the player is still around, answered with the generic error notice.
    fn spawn_delete(&self, player: Arc<dyn PlayerSession>, key: String) -> JoinHandle<()> {
        let repository = self.repository.clone();
        let reporter = self.reporter.clone();
        let notice = self.messages.error_occurred.clone();

        tokio::spawn(async move {
            if let Err(e) = repository.delete_by_key(&key).await {
                reporter.report("unregister delete", &e);
                if player.is_connected() {
                    player.send_message(&notice);
                }
            }
        })
    }
}

#[async_trait]
impl Command for UnregisterCommand {
    async fn execute(&self, invoker: &Invoker, args: &[String]) {
        self.run(invoker, args).await;
    }

    fn has_permission(&self, invoker: &Invoker) -> bool {
        self.permission_state
            .has_permission(invoker, PERMISSION_UNREGISTER)
    }
}
