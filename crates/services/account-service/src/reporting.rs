//! Operator-facing error reporting.

use tracing::{error, warn, Level};

use common::AppError;

/// Records failures for operators. Nothing reported here is ever shown to
/// users.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, context: &'static str, error: &AppError);
}

/// Reports through `tracing`. Infrastructure faults log at error level,
/// anything else at warn.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl TracingReporter {
    pub fn level_for(error: &AppError) -> Level {
        if error.is_infrastructure() {
            Level::ERROR
        } else {
            Level::WARN
        }
    }
}

impl ErrorReporter for TracingReporter {
    fn report(&self, context: &'static str, err: &AppError) {
        if Self::level_for(err) == Level::ERROR {
            error!(code = err.code(), context, "{}", err);
        } else {
            warn!(code = err.code(), context, "{}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infrastructure_faults_report_at_error_level() {
        assert_eq!(TracingReporter::level_for(&AppError::timeout("credential lookup")), Level::ERROR);
        assert_eq!(TracingReporter::level_for(&AppError::internal("delete failed")), Level::ERROR);
    }

    #[test]
    fn test_rejected_input_reports_at_warn_level() {
        assert_eq!(TracingReporter::level_for(&AppError::validation("bad state")), Level::WARN);
    }

    #[test]
    fn test_report_does_not_panic_without_subscriber() {
        TracingReporter.report("unregister delete", &AppError::internal("delete failed"));
        TracingReporter.report("unregister verification", &AppError::validation("bad"));
    }
}
