//! Logging macros for the CPM engine with verbosity level control.
//!
//! Events are emitted through `tracing`, so the host application decides where
//! they go. Verbosity gates them before they reach the subscriber:
//! - 0: SILENT (nothing beyond returned errors)
//! - 1: CHANGES (schedule summary, rejected inputs)
//! - 2: CHECKS (ordering and per-task dates)
//! - 3: DEBUG (full pass internals)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at CHANGES level (verbosity >= 1).
///
/// Used for: computed schedule summaries, validation failures.
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHANGES {
            ::tracing::info!($($arg)*);
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
///
/// Used for: topological order, per-task timings.
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            ::tracing::debug!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
///
/// Used for: traversal steps, join/fork aggregation in each pass.
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            ::tracing::trace!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_constants() {
        assert_eq!(VERBOSITY_SILENT, 0);
        assert_eq!(VERBOSITY_CHANGES, 1);
        assert_eq!(VERBOSITY_CHECKS, 2);
        assert_eq!(VERBOSITY_DEBUG, 3);
    }

    #[test]
    fn test_log_macros_with_subscriber() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("trace")
            .with_test_writer()
            .try_init();

        // Every level enabled, macros must expand and not panic
        let verbosity = VERBOSITY_DEBUG;
        log_changes!(verbosity, "test {}", 1);
        log_checks!(verbosity, task = "A", "test {}", 2);
        log_debug!(verbosity, "test {}", 3);

        let silent = VERBOSITY_SILENT;
        log_changes!(silent, "never emitted {}", 1);
    }
}
