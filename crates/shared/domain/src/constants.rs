//! Domain-level constants.
//!
//! These constants define command names, permission nodes and the defaults
//! the unregistration protocol falls back to.

// =============================================================================
// Commands & Permissions
// =============================================================================

/// Primary name of the unregister command
pub const COMMAND_UNREGISTER: &str = "unregister";

/// Short alias for the unregister command
pub const COMMAND_UNREGISTER_ALIAS: &str = "unreg";

/// Permission node checked when the permission state delegates to the invoker
pub const PERMISSION_UNREGISTER: &str = "auth.commands.unregister";

// =============================================================================
// Confirmation
// =============================================================================

/// Default confirmation keyword the user must repeat
pub const DEFAULT_CONFIRM_KEYWORD: &str = "CONFIRM";
