use std::time::Duration;

use slotwise_domain::{ErrorKind, LoggingConfig, SlotwiseError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` wins over `config.level`.
///
/// Returns `false` when a subscriber was already installed (tests, embedding).
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    let installed =
        if config.json { builder.json().try_init().is_ok() } else { builder.try_init().is_ok() };

    if installed {
        info!(level = %config.level, json = config.json, "tracing initialised");
    }
    installed
}

/// Log the outcome of a command execution with structured fields.
///
/// `command` should be a stable identifier such as `"bookings::commit"`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error_kind: Option<ErrorKind>) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match error_kind {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(kind) => {
            warn!(command, duration_ms, error_kind = kind_label(kind), "command_execution_failure");
        }
    }
}

#[inline]
pub fn kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Input => "input",
        ErrorKind::Contention => "contention",
        ErrorKind::Infrastructure => "infrastructure",
    }
}

/// Convert a `SlotwiseError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &SlotwiseError) -> &'static str {
    match error {
        SlotwiseError::Database(_) => "database",
        SlotwiseError::Config(_) => "config",
        SlotwiseError::Network(_) => "network",
        SlotwiseError::NotFound(_) => "not_found",
        SlotwiseError::InvalidInput(_) => "invalid_input",
        SlotwiseError::Internal(_) => "internal",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(error_label(&SlotwiseError::Database("x".into())), "database");
        assert_eq!(error_label(&SlotwiseError::NotFound("x".into())), "not_found");
        assert_eq!(kind_label(ErrorKind::Contention), "contention");
    }

    #[test]
    fn second_init_reports_existing_subscriber() {
        let config = LoggingConfig::default();
        init_tracing(&config);
        assert!(!init_tracing(&config));
    }
}
