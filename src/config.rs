//! Configuration for capture boundaries.
//!
//! # Configuration Precedence
//!
//! Settings are resolved in this order (highest priority first):
//!
//! 1. **Programmatic**: values set via the setters (`catch_panics(false)`)
//! 2. **Environment variables**: values from `OUTCOME_*` env vars
//! 3. **Defaults**: built-in defaults from [`CaptureConfig::default()`]
//!
//! # Supported Environment Variables
//!
//! | Variable | Type | Maps to |
//! |----------|------|---------|
//! | `OUTCOME_CATCH_PANICS` | `bool` | `catch_panics` |
//!
//! Trail trimming is not configurable: a boundary always removes exactly the
//! one frame it recorded itself.

use crate::error::ConfigError;
use crate::tracing_compat::debug;

/// Environment variable name for the panic-capturing toggle.
pub const ENV_CATCH_PANICS: &str = "OUTCOME_CATCH_PANICS";

/// How a capture boundary converts a computation's completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaptureConfig {
    /// Capture panics raised by the computation as failures.
    ///
    /// When off, a panic unwinds through the boundary untouched.
    pub catch_panics: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self { catch_panics: true }
    }
}

impl CaptureConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by whatever `OUTCOME_*` variables are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Sets whether panics are captured as failures.
    #[must_use]
    pub const fn catch_panics(mut self, catch: bool) -> Self {
        self.catch_panics = catch;
        self
    }

    /// Applies environment variable overrides.
    ///
    /// Only variables that are set in the environment are applied. Returns an
    /// error if a variable is set but contains an unparseable value; the
    /// configuration is left untouched in that case.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_with(read_env)
    }

    fn apply_overrides_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut resolved = *self;
        if let Some(val) = lookup(ENV_CATCH_PANICS) {
            resolved.catch_panics = parse_bool(ENV_CATCH_PANICS, &val)?;
        }
        debug!(
            catch_panics = resolved.catch_panics,
            "resolved capture config"
        );
        *self = resolved;
        Ok(())
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn parse_bool(var: &'static str, val: &str) -> Result<bool, ConfigError> {
    match val.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: val.to_string(),
            expected: "bool (true/false/1/0/yes/no)",
        }),
    }
}
