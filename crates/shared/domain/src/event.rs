//! Events fired by the account lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fired once when a player removes their own account.
///
/// Carries the display identity as the session presented it, not the
/// lower-cased lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUnregistered {
    pub event_id: Uuid,
    pub username: String,
    pub occurred_at: DateTime<Utc>,
}

impl AccountUnregistered {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            username: username.into(),
            occurred_at: Utc::now(),
        }
    }
}
