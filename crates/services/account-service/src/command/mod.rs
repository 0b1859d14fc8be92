//! Command registry.
//!
//! Resolves a command name or alias and runs the command only when the
//! invoker is allowed to. A denied invocation never reaches the command.

mod permission;

pub use permission::PermissionState;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::session::Invoker;

/// A command that can be dispatched by name.
#[async_trait]
pub trait Command: Send + Sync {
    async fn execute(&self, invoker: &Invoker, args: &[String]);

    fn has_permission(&self, invoker: &Invoker) -> bool;
}

/// What happened to a dispatched invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Executed,
    Denied,
    Unknown,
}

/// Maps lower-cased names and aliases to commands.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `command` under every name in `names`.
    pub fn register(&mut self, names: &[&str], command: Arc<dyn Command>) {
        for name in names {
            self.commands.insert(name.to_lowercase(), command.clone());
        }
    }

    pub async fn dispatch(&self, invoker: &Invoker, name: &str, args: &[String]) -> Dispatch {
        let Some(command) = self.commands.get(&name.to_lowercase()) else {
            return Dispatch::Unknown;
        };

        if !command.has_permission(invoker) {
            debug!(invoker = invoker.display_name(), command = name, "Command denied");
            return Dispatch::Denied;
        }

        command.execute(invoker, args).await;
        Dispatch::Executed
    }

    /// Split a raw command line (`/name arg arg`) and dispatch it.
    pub async fn dispatch_line(&self, invoker: &Invoker, line: &str) -> Dispatch {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Dispatch::Unknown;
        };
        let args: Vec<String> = tokens.map(str::to_string).collect();

        self.dispatch(invoker, name.trim_start_matches('/'), &args).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::messages::Message;
    use crate::session::CommandSource;

    #[derive(Default)]
    struct Counting {
        allowed: bool,
        runs: AtomicUsize,
        last_args: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Command for Counting {
        async fn execute(&self, _invoker: &Invoker, args: &[String]) {
            self.runs.fetch_add(1, Ordering::SeqCst);
            *self.last_args.lock().unwrap() = args.to_vec();
        }

        fn has_permission(&self, _invoker: &Invoker) -> bool {
            self.allowed
        }
    }

    struct Console;

    impl CommandSource for Console {
        fn send_message(&self, _message: &Message) {}

        fn has_permission(&self, _permission: &str) -> bool {
            true
        }
    }

    fn console() -> Invoker {
        Invoker::Console(Arc::new(Console))
    }

    #[tokio::test]
    async fn test_dispatch_resolves_aliases_case_insensitively() {
        let command = Arc::new(Counting { allowed: true, ..Default::default() });
        let mut registry = CommandRegistry::new();
        registry.register(&["unregister", "unreg"], command.clone());

        assert_eq!(registry.dispatch(&console(), "UNREG", &[]).await, Dispatch::Executed);
        assert_eq!(registry.dispatch(&console(), "unregister", &[]).await, Dispatch::Executed);
        assert_eq!(command.runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_denied_command_is_not_executed() {
        let command = Arc::new(Counting::default());
        let mut registry = CommandRegistry::new();
        registry.register(&["unregister"], command.clone());

        assert_eq!(registry.dispatch(&console(), "unregister", &[]).await, Dispatch::Denied);
        assert_eq!(command.runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_dispatch_line_splits_arguments() {
        let command = Arc::new(Counting { allowed: true, ..Default::default() });
        let mut registry = CommandRegistry::new();
        registry.register(&["unregister"], command.clone());

        let result = registry.dispatch_line(&console(), "/unregister  secret CONFIRM").await;

        assert_eq!(result, Dispatch::Executed);
        assert_eq!(*command.last_args.lock().unwrap(), vec!["secret", "CONFIRM"]);
        assert_eq!(registry.dispatch_line(&console(), "   ").await, Dispatch::Unknown);
        assert_eq!(registry.dispatch_line(&console(), "/login x").await, Dispatch::Unknown);
    }
}
