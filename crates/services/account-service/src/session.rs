//! Command invokers as seen by the account service.
//!
//! The transport that owns real connections implements these traits; the
//! service only ever talks to sessions through them.

use std::sync::Arc;

use crate::messages::Message;

/// Anything that can issue a command and receive replies.
pub trait CommandSource: Send + Sync {
    fn send_message(&self, message: &Message);

    fn has_permission(&self, permission: &str) -> bool;
}

/// A connected, authenticated player session.
pub trait PlayerSession: CommandSource {
    /// Display identity as presented by the session
    fn username(&self) -> &str;

    /// Terminate the session, showing `reason` to the player
    fn disconnect(&self, reason: &Message);

    fn is_connected(&self) -> bool;
}

/// Who issued a command.
#[derive(Clone)]
pub enum Invoker {
    /// Console or any other non-player source
    Console(Arc<dyn CommandSource>),
    Player(Arc<dyn PlayerSession>),
}

impl Invoker {
    pub fn send_message(&self, message: &Message) {
        match self {
            Invoker::Console(source) => source.send_message(message),
            Invoker::Player(player) => player.send_message(message),
        }
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        match self {
            Invoker::Console(source) => source.has_permission(permission),
            Invoker::Player(player) => player.has_permission(permission),
        }
    }

    pub fn as_player(&self) -> Option<&Arc<dyn PlayerSession>> {
        match self {
            Invoker::Player(player) => Some(player),
            Invoker::Console(_) => None,
        }
    }

    /// Name used in logs
    pub fn display_name(&self) -> &str {
        match self {
            Invoker::Console(_) => "CONSOLE",
            Invoker::Player(player) => player.username(),
        }
    }
}
