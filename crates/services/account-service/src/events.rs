//! In-process event bus for account lifecycle events.

use async_trait::async_trait;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{trace, warn};

use domain::AccountUnregistered;

/// Default number of buffered events per subscriber
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Receives domain events without blocking the emitter.
pub trait EventSink: Send + Sync {
    fn fire_and_forget(&self, event: AccountUnregistered);
}

/// Reacts to account removal events delivered by [`EventBus::listen`].
#[async_trait]
pub trait UnregisterListener: Send + Sync + 'static {
    async fn on_unregister(&self, event: AccountUnregistered);
}

/// Broadcast-backed event bus. Every subscriber sees every event.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<AccountUnregistered>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AccountUnregistered> {
        self.sender.subscribe()
    }

    /// Spawn a task that feeds every event to `listener` until the bus closes.
    pub fn listen<L: UnregisterListener>(&self, listener: L) -> JoinHandle<()> {
        let mut receiver = self.subscribe();

        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => listener.on_unregister(event).await,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Unregister listener lagged, {} events skipped", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl EventSink for EventBus {
    fn fire_and_forget(&self, event: AccountUnregistered) {
        // No subscribers is fine
        if self.sender.send(event).is_err() {
            trace!("Unregister event dropped, no listeners");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    struct Collecting(Arc<Mutex<Vec<String>>>);

    #[async_trait]
    impl UnregisterListener for Collecting {
        async fn on_unregister(&self, event: AccountUnregistered) {
            self.0.lock().unwrap().push(event.username);
        }
    }

    #[tokio::test]
    async fn test_subscribers_receive_events() {
        let bus = EventBus::default();
        let mut receiver = bus.subscribe();

        bus.fire_and_forget(AccountUnregistered::new("Alice"));

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.username, "Alice");
    }

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let bus = EventBus::new(4);
        bus.fire_and_forget(AccountUnregistered::new("Nobody"));

        // Late subscribers do not see earlier events
        let mut late = bus.subscribe();
        assert!(late.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_listener_task_sees_events() {
        let bus = EventBus::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let handle = bus.listen(Collecting(seen.clone()));

        bus.fire_and_forget(AccountUnregistered::new("Alice"));
        bus.fire_and_forget(AccountUnregistered::new("Bob"));
        drop(bus);
        handle.await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["Alice".to_string(), "Bob".to_string()]);
    }
}
