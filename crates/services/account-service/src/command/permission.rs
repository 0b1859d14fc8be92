//! Command permission state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::session::Invoker;
use common::AppError;

/// Whether a command is disabled, open to everyone, or gated by a
/// permission node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    /// Nobody may run the command
    False,
    /// Everybody may run the command
    True,
    /// Ask the invoker whether it holds the permission node
    #[default]
    Permission,
}

impl PermissionState {
    pub fn has_permission(&self, invoker: &Invoker, permission: &str) -> bool {
        match self {
            PermissionState::False => false,
            PermissionState::True => true,
            PermissionState::Permission => invoker.has_permission(permission),
        }
    }
}

impl FromStr for PermissionState {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "false" => Ok(PermissionState::False),
            "true" => Ok(PermissionState::True),
            "permission" => Ok(PermissionState::Permission),
            other => Err(AppError::validation(format!(
                "Unknown permission state '{}', expected false, true or permission",
                other
            ))),
        }
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionState::False => write!(f, "false"),
            PermissionState::True => write!(f, "true"),
            PermissionState::Permission => write!(f, "permission"),
        }
    }
}
