//! Environment configuration.

use std::env;
use std::time::Duration;

use crate::core::text::layout::DEFAULT_TAB_WIDTH;

pub const DEFAULT_CYCLE_MS: u64 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    /// File that receives tracing output. Nothing is logged when unset.
    pub log_path: Option<String>,
    pub log_level: Option<String>,
    pub debug: bool,
    pub cycle_ms: u64,
    pub tab_width: usize,
    pub no_color: bool,
    pub palette256: bool,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: None,
            debug: false,
            cycle_ms: DEFAULT_CYCLE_MS,
            tab_width: DEFAULT_TAB_WIDTH,
            no_color: false,
            palette256: false,
        }
    }
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            log_path: env_string_opt("CELLWRIGHT_LOG"),
            log_level: env_string_opt("CELLWRIGHT_LOG_LEVEL"),
            debug: env_flag("CELLWRIGHT_DEBUG"),
            cycle_ms: env_number("CELLWRIGHT_CYCLE_MS")
                .filter(|ms| *ms > 0)
                .unwrap_or(DEFAULT_CYCLE_MS),
            tab_width: env_number("CELLWRIGHT_TAB_WIDTH")
                .map(|width| width as usize)
                .unwrap_or(DEFAULT_TAB_WIDTH),
            // NO_COLOR only needs to be present, whatever its value.
            no_color: env_flag("CELLWRIGHT_NO_COLOR") || env_string_opt("NO_COLOR").is_some(),
            palette256: env_flag("CELLWRIGHT_PALETTE256"),
        }
    }

    pub fn cycle_frequency(&self) -> Duration {
        Duration::from_millis(self.cycle_ms)
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

fn env_number(key: &str) -> Option<u64> {
    env_string_opt(key).and_then(|value| value.trim().parse().ok())
}
