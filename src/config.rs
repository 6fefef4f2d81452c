// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Leeway-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Leeway and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Router configuration.
//!
//! Stored as JSON, e.g.
//! `{"par_limit": 8, "retry": {"kind": "delay", "base_us": 10, "max_us": 1000}}`.

use std::fmt;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::stm::RetryStrategy;

#[derive(Debug)]
pub enum ConfigError {
    ZeroParLimit,
    ZeroDelay,
    DelayRange { base_us: u64, max_us: u64 },
    InvalidRetry { raw: String },
    ThreadPool { message: String },
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroParLimit => write!(f, "par_limit must be at least 1"),
            Self::ZeroDelay => write!(f, "retry delay must be longer than zero"),
            Self::DelayRange { base_us, max_us } => {
                write!(f, "retry delay base {base_us}us exceeds its maximum {max_us}us")
            }
            Self::InvalidRetry { raw } => write!(
                f,
                "invalid retry strategy {raw:?} (expected immediate, yield or delay:<base_us>:<max_us>)"
            ),
            Self::ThreadPool { message } => write!(f, "cannot start worker pool: {message}"),
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Serialized form of [`RetryStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum RetrySetting {
    Immediate,
    #[default]
    Yield,
    Delay { base_us: u64, max_us: u64 },
}

impl RetrySetting {
    /// Parses the command-line form: `immediate`, `yield`, or `delay:<base_us>:<max_us>`.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidRetry { raw: raw.to_owned() };
        let mut parts = raw.split(':');
        let setting = match parts.next() {
            Some("immediate" | "spin") => Self::Immediate,
            Some("yield" | "cede") => Self::Yield,
            Some("delay" | "sleep") => {
                let base_us = parts.next().and_then(|v| v.parse().ok()).ok_or_else(invalid)?;
                let max_us = match parts.next() {
                    Some(v) => v.parse().map_err(|_| invalid())?,
                    None => base_us,
                };
                Self::Delay { base_us, max_us }
            }
            _ => return Err(invalid()),
        };
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(setting)
    }

    pub fn to_strategy(self) -> Result<RetryStrategy, ConfigError> {
        Ok(match self {
            Self::Immediate => RetryStrategy::Immediate,
            Self::Yield => RetryStrategy::Yield,
            Self::Delay { base_us, max_us } => {
                if base_us == 0 {
                    return Err(ConfigError::ZeroDelay);
                }
                if base_us > max_us {
                    return Err(ConfigError::DelayRange { base_us, max_us });
                }
                RetryStrategy::Delay {
                    base: Duration::from_micros(base_us),
                    max: Duration::from_micros(max_us),
                }
            }
        })
    }
}

fn default_par_limit() -> usize {
    std::thread::available_parallelism().map(NonZeroUsize::get).unwrap_or(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Upper bound on routes solved at the same time.
    #[serde(default = "default_par_limit")]
    pub par_limit: usize,
    #[serde(default)]
    pub retry: RetrySetting,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self { par_limit: default_par_limit(), retry: RetrySetting::default() }
    }
}

impl RouterConfig {
    pub fn new(par_limit: usize, retry: RetrySetting) -> Self {
        Self { par_limit, retry }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        serde_json::from_str(&raw)
            .map_err(|source| ConfigError::Json { path: path.to_path_buf(), source })
    }

    pub fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        let par_limit = NonZeroUsize::new(self.par_limit).ok_or(ConfigError::ZeroParLimit)?;
        let retry = self.retry.to_strategy()?;
        Ok(ValidatedConfig { par_limit, retry })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedConfig {
    par_limit: NonZeroUsize,
    retry: RetryStrategy,
}

impl ValidatedConfig {
    pub fn par_limit(&self) -> usize {
        self.par_limit.get()
    }

    pub fn retry(&self) -> RetryStrategy {
        self.retry
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{ConfigError, RetrySetting, RouterConfig};
    use crate::stm::RetryStrategy;

    #[test]
    fn parses_json_with_defaults() {
        let config: RouterConfig = serde_json::from_str(r#"{"par_limit": 3}"#).unwrap();
        assert_eq!(config.par_limit, 3);
        assert_eq!(config.retry, RetrySetting::Yield);

        let config: RouterConfig = serde_json::from_str(
            r#"{"par_limit": 2, "retry": {"kind": "delay", "base_us": 5, "max_us": 40}}"#,
        )
        .unwrap();
        let validated = config.validate().unwrap();
        assert_eq!(
            validated.retry(),
            RetryStrategy::Delay {
                base: Duration::from_micros(5),
                max: Duration::from_micros(40)
            }
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(serde_json::from_str::<RouterConfig>(r#"{"par_limt": 3}"#).is_err());
    }

    #[test]
    fn rejects_non_positive_limits() {
        let config = RouterConfig::new(0, RetrySetting::Yield);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroParLimit)));

        let config = RouterConfig::new(1, RetrySetting::Delay { base_us: 0, max_us: 10 });
        assert!(matches!(config.validate(), Err(ConfigError::ZeroDelay)));

        let config = RouterConfig::new(1, RetrySetting::Delay { base_us: 20, max_us: 10 });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DelayRange { base_us: 20, max_us: 10 })
        ));
    }

    #[test]
    fn parses_command_line_retry_forms() {
        assert_eq!(RetrySetting::parse("spin").unwrap(), RetrySetting::Immediate);
        assert_eq!(RetrySetting::parse("yield").unwrap(), RetrySetting::Yield);
        assert_eq!(
            RetrySetting::parse("delay:10:500").unwrap(),
            RetrySetting::Delay { base_us: 10, max_us: 500 }
        );
        assert_eq!(
            RetrySetting::parse("sleep:25").unwrap(),
            RetrySetting::Delay { base_us: 25, max_us: 25 }
        );
        assert!(matches!(RetrySetting::parse("delay"), Err(ConfigError::InvalidRetry { .. })));
        assert!(matches!(RetrySetting::parse("yield:1"), Err(ConfigError::InvalidRetry { .. })));
        assert!(matches!(RetrySetting::parse("later"), Err(ConfigError::InvalidRetry { .. })));
    }
}
