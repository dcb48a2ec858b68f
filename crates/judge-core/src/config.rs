// SPDX-License-Identifier: MIT OR Apache-2.0
//! TOML-backed configuration loading and validation, in the shape of the
//! teacher's `abp-config::BackplaneConfig`: a typed top-level struct, a
//! `ConfigError` taxonomy distinguishing file/parse/validation failures,
//! and advisory `ConfigWarning`s that don't block startup.

use crate::policy::ResourcePolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Errors that can occur while loading or validating a [`JudgeConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The requested configuration file was not found.
    #[error("config file not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: String,
    },
    /// The file could not be parsed as valid TOML.
    #[error("failed to parse config: {reason}")]
    ParseError {
        /// Human-readable parse error detail.
        reason: String,
    },
    /// Semantic validation failed.
    #[error("config validation failed: {reasons:?}")]
    ValidationError {
        /// Individual validation failure messages.
        reasons: Vec<String>,
    },
}

/// Advisory-level issues that do not prevent operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A configured timeout is unusually large and may mask hangs.
    LargeTimeout {
        /// Name of the timeout field.
        field: String,
        /// Configured value in seconds.
        secs: u64,
    },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::LargeTimeout { field, secs } => {
                write!(f, "'{field}' has an unusually large timeout ({secs}s)")
            }
        }
    }
}

/// Top-level runtime configuration overriding [`ResourcePolicy`] defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeConfig {
    /// Log level override (e.g. `"debug"`, `"info"`).
    pub log_level: Option<String>,
    /// `CONTAINER_SANDBOX_ROOT` override (falls back to the env var).
    pub container_sandbox_root: Option<String>,
    /// Resource limit overrides.
    pub policy: TomlResourcePolicy,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            container_sandbox_root: None,
            policy: TomlResourcePolicy::default(),
        }
    }
}

/// TOML-friendly mirror of [`ResourcePolicy`] (durations as seconds, since
/// `toml` has no native duration type).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlResourcePolicy {
    pub memory: String,
    pub cpus: String,
    pub pids_limit: u32,
    pub nofile_limit: u32,
    pub compile_timeout_secs: u64,
    pub execution_timeout_secs: u64,
    pub container_sleep_secs: u64,
    pub max_stdout_bytes: usize,
    pub max_compile_error_bytes: usize,
}

impl Default for TomlResourcePolicy {
    fn default() -> Self {
        let defaults = ResourcePolicy::default();
        Self {
            memory: defaults.memory,
            cpus: defaults.cpus,
            pids_limit: defaults.pids_limit,
            nofile_limit: defaults.nofile_limit,
            compile_timeout_secs: defaults.compile_timeout.as_secs(),
            execution_timeout_secs: defaults.execution_timeout.as_secs(),
            container_sleep_secs: defaults.container_sleep.as_secs(),
            max_stdout_bytes: defaults.max_stdout_bytes,
            max_compile_error_bytes: defaults.max_compile_error_bytes,
        }
    }
}

impl From<TomlResourcePolicy> for ResourcePolicy {
    fn from(value: TomlResourcePolicy) -> Self {
        ResourcePolicy {
            memory: value.memory,
            cpus: value.cpus,
            pids_limit: value.pids_limit,
            nofile_limit: value.nofile_limit,
            compile_timeout: Duration::from_secs(value.compile_timeout_secs),
            execution_timeout: Duration::from_secs(value.execution_timeout_secs),
            container_sleep: Duration::from_secs(value.container_sleep_secs),
            max_stdout_bytes: value.max_stdout_bytes,
            max_compile_error_bytes: value.max_compile_error_bytes,
        }
    }
}

impl JudgeConfig {
    /// Load and validate a config from a TOML file on disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        Self::parse(&raw)
    }

    /// Parse and validate a config from a TOML string.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let config: JudgeConfig = toml::from_str(raw).map_err(|e| ConfigError::ParseError {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut reasons = Vec::new();
        if self.policy.execution_timeout_secs == 0 {
            reasons.push("policy.execution_timeout_secs must be > 0".to_string());
        }
        if self.policy.compile_timeout_secs == 0 {
            reasons.push("policy.compile_timeout_secs must be > 0".to_string());
        }
        if self.policy.container_sleep_secs
            < self.policy.compile_timeout_secs + self.policy.execution_timeout_secs
        {
            reasons.push(
                "policy.container_sleep_secs must exceed compile_timeout_secs + execution_timeout_secs"
                    .to_string(),
            );
        }
        if !reasons.is_empty() {
            return Err(ConfigError::ValidationError { reasons });
        }
        Ok(())
    }

    /// Advisory warnings that don't block startup.
    pub fn warnings(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        if self.policy.execution_timeout_secs > 60 {
            warnings.push(ConfigWarning::LargeTimeout {
                field: "policy.execution_timeout_secs".to_string(),
                secs: self.policy.execution_timeout_secs,
            });
        }
        warnings
    }

    /// Resolve the effective [`ResourcePolicy`].
    pub fn resource_policy(&self) -> ResourcePolicy {
        self.policy.clone().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = JudgeConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let raw = "[policy]\nexecution_timeout_secs = 0\n";
        let err = JudgeConfig::parse(raw).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn sleep_shorter_than_budget_is_rejected() {
        let raw = "[policy]\ncontainer_sleep_secs = 1\ncompile_timeout_secs = 10\nexecution_timeout_secs = 5\n";
        let err = JudgeConfig::parse(raw).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = JudgeConfig::parse("not = [valid").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = JudgeConfig::load(Path::new("/nonexistent/judge.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }
}
