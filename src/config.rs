//! Configuration constants and utilities for gridcopy
//!
//! Defaults for the copy workflow, overridable through environment
//! variables.

use std::str::FromStr;
use std::time::Duration;

/// Row count above which a copy asks for confirmation first
pub const DEFAULT_CONFIRMATION_THRESHOLD: usize = 10_000;

/// Delay before a finished copy hides its status UI
pub const DEFAULT_HIDE_DELAY_MS: u64 = 3000;

/// Environment variable name for overriding the confirmation threshold
pub const CONFIRMATION_THRESHOLD_ENV_VAR: &str = "GRIDCOPY_CONFIRMATION_THRESHOLD";

/// Environment variable name for overriding the hide delay, in milliseconds
pub const HIDE_DELAY_ENV_VAR: &str = "GRIDCOPY_HIDE_DELAY_MS";

/// Environment variable holding the log filter
pub const LOG_LEVEL_ENV_VAR: &str = "GRIDCOPY_LOG_LEVEL";

/// Settings for a copy handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyConfig {
    pub confirmation_threshold: usize,
    pub hide_delay: Duration,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            confirmation_threshold: DEFAULT_CONFIRMATION_THRESHOLD,
            hide_delay: Duration::from_millis(DEFAULT_HIDE_DELAY_MS),
        }
    }
}

impl CopyConfig {
    /// Defaults, with any environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(threshold) = env_number::<usize>(CONFIRMATION_THRESHOLD_ENV_VAR) {
            config.confirmation_threshold = threshold;
        }
        if let Some(delay) = env_number::<u64>(HIDE_DELAY_ENV_VAR) {
            config.hide_delay = Duration::from_millis(delay);
        }
        config
    }
}

fn env_number<T: FromStr>(name: &str) -> Option<T> {
    let value = std::env::var_os(name).and_then(|val| val.into_string().ok())?;
    match value.trim().parse() {
        Ok(number) => Some(number),
        Err(_) => {
            tracing::warn!("Ignoring {}={:?}: not a number", name, value);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CopyConfig::default();
        assert_eq!(config.confirmation_threshold, 10_000);
        assert_eq!(config.hide_delay, Duration::from_millis(3000));
    }

    #[test]
    fn test_env_var_names() {
        assert_eq!(CONFIRMATION_THRESHOLD_ENV_VAR, "GRIDCOPY_CONFIRMATION_THRESHOLD");
        assert_eq!(HIDE_DELAY_ENV_VAR, "GRIDCOPY_HIDE_DELAY_MS");
    }

    #[test]
    fn test_env_number_parses_full_target_width() {
        let name = "GRIDCOPY_TEST_FULL_WIDTH_NUMBER";
        std::env::set_var(name, usize::MAX.to_string());
        assert_eq!(env_number::<usize>(name), Some(usize::MAX));

        std::env::set_var(name, "-1");
        assert_eq!(env_number::<usize>(name), None);
        std::env::remove_var(name);
    }

    // Both env cases in one test so they never race each other
    #[test]
    fn test_from_env_overrides() {
        let original_threshold = std::env::var_os(CONFIRMATION_THRESHOLD_ENV_VAR);
        let original_delay = std::env::var_os(HIDE_DELAY_ENV_VAR);

        std::env::set_var(CONFIRMATION_THRESHOLD_ENV_VAR, "25");
        std::env::set_var(HIDE_DELAY_ENV_VAR, "not-a-number");
        let config = CopyConfig::from_env();
        assert_eq!(config.confirmation_threshold, 25);
        assert_eq!(config.hide_delay, Duration::from_millis(DEFAULT_HIDE_DELAY_MS));

        std::env::remove_var(CONFIRMATION_THRESHOLD_ENV_VAR);
        std::env::set_var(HIDE_DELAY_ENV_VAR, "750");
        let config = CopyConfig::from_env();
        assert_eq!(config.confirmation_threshold, DEFAULT_CONFIRMATION_THRESHOLD);
        assert_eq!(config.hide_delay, Duration::from_millis(750));

        // Restore original state
        match original_threshold {
            Some(val) => std::env::set_var(CONFIRMATION_THRESHOLD_ENV_VAR, val),
            None => std::env::remove_var(CONFIRMATION_THRESHOLD_ENV_VAR),
        }
        match original_delay {
            Some(val) => std::env::set_var(HIDE_DELAY_ENV_VAR, val),
            None => std::env::remove_var(HIDE_DELAY_ENV_VAR),
        }
    }
}
