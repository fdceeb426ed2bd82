//! Tracing subscriber setup.
//!
//! Stdout belongs to the screen, so diagnostics only ever go to the file named by
//! `CELLWRIGHT_LOG`. Without it no subscriber is installed and the `tracing` macros are inert.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::EnvConfig;

/// Keeps the background log writer alive. Dropping it flushes pending lines.
#[derive(Debug)]
pub struct LoggingGuard {
    _guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    fn disabled() -> Self {
        Self { _guard: None }
    }

    pub fn is_active(&self) -> bool {
        self._guard.is_some()
    }
}

/// Filter directive derived from the configuration: the explicit level wins, then the debug
/// flag, then `warn`.
pub fn filter_directive(config: &EnvConfig) -> String {
    match (&config.log_level, config.debug) {
        (Some(level), _) => level.clone(),
        (None, true) => "debug".to_string(),
        (None, false) => "warn".to_string(),
    }
}

/// Installs the global subscriber. A second call, or a call after another subscriber was
/// installed, leaves the existing one in place and returns an inactive guard.
pub fn init_tracing(config: &EnvConfig) -> LoggingGuard {
    let Some(path) = config.log_path.as_deref() else {
        return LoggingGuard::disabled();
    };

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
    {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: failed to open log file {path}: {err}");
            return LoggingGuard::disabled();
        }
    };

    let env_filter = EnvFilter::try_new(filter_directive(config))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let (writer, guard) = tracing_appender::non_blocking(file);

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_names(true)
        .with_ansi(false)
        .with_writer(writer);

    if subscriber.try_init().is_err() {
        return LoggingGuard::disabled();
    }

    tracing::debug!(path, "logging initialized");
    LoggingGuard {
        _guard: Some(guard),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_precedence() {
        let mut config = EnvConfig::default();
        assert_eq!(filter_directive(&config), "warn");
        config.debug = true;
        assert_eq!(filter_directive(&config), "debug");
        config.log_level = Some("cellwright=trace".to_string());
        assert_eq!(filter_directive(&config), "cellwright=trace");
    }

    #[test]
    fn no_log_path_installs_nothing() {
        let guard = init_tracing(&EnvConfig::default());
        assert!(!guard.is_active());
    }
}
