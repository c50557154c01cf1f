//! Logging initialisation for the `foodbot` binary.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g., "info", "debug")
    pub log_level: String,
    /// Whether `--verbose` was given; it wins over `RUST_LOG`
    pub verbose: bool,
    /// Enable JSON-formatted logs for structured logging
    pub json_logs: bool,
}

impl ObservabilityConfig {
    /// Default configuration: `info`, plain text.
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            verbose: false,
            json_logs: false,
        }
    }

    /// Build from the CLI flags.
    pub fn from_flags(verbose: bool, json_logs: bool) -> Self {
        Self::new().with_verbose(verbose).with_json_logs(json_logs)
    }

    /// Set the fallback log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Force debug output for FoodBot crates.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }

    /// The filter directive in effect, given the value of `RUST_LOG`.
    pub fn directive(&self, rust_log: Option<&str>) -> String {
        if self.verbose {
            return format!("{},foodbot=debug", self.log_level);
        }
        match rust_log {
            Some(directive) if !directive.trim().is_empty() => directive.to_string(),
            _ => self.log_level.clone(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the filter directive is invalid or a subscriber is
/// already installed.
pub fn init_observability_with_config(
    config: ObservabilityConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = EnvFilter::try_new(config.directive(rust_log.as_deref()))?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_level(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_info() {
        assert_eq!(ObservabilityConfig::default().directive(None), "info");
    }

    #[test]
    fn test_rust_log_overrides_default() {
        let config = ObservabilityConfig::from_flags(false, false);
        assert_eq!(config.directive(Some("warn,foodbot_actions=trace")), "warn,foodbot_actions=trace");
        assert_eq!(config.directive(Some("  ")), "info");
    }

    #[test]
    fn test_verbose_wins_over_rust_log() {
        let config = ObservabilityConfig::from_flags(true, true);
        assert_eq!(config.directive(Some("error")), "info,foodbot=debug");
        assert!(config.json_logs);
    }
}
