//! Application configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! command-line overrides applied by `main`.
//!
//! ```toml
//! [lookup]
//! endpoint = "http://localhost:3000/sales-tax"
//! timeout_secs = 10
//!
//! [tips]
//! presets = [0.10, 0.15, 0.20]
//!
//! [logging]
//! level = "info"
//! file = "mysplit.log"
//! console = true
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use split_core::LookupConfig;
use thiserror::Error;
use tracing::debug;

/// File picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "mysplit.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub lookup: LookupConfig,
    pub tips: TipConfig,
    pub logging: LoggingConfig,
}

/// Tip buttons offered on the bill, as fractions (`0.15` is 15%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TipConfig {
    pub presets: Vec<Decimal>,
}

impl Default for TipConfig {
    fn default() -> Self {
        Self {
            presets: vec![Decimal::new(10, 2), Decimal::new(15, 2), Decimal::new(20, 2)],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Bare level or full `EnvFilter` directive. `RUST_LOG` wins when set.
    pub level: String,
    /// Append log records to this file as well.
    pub file: Option<PathBuf>,
    /// Whether log records are echoed to the terminal (stderr).
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            console: true,
        }
    }
}

impl AppConfig {
    /// Parses and validates configuration from TOML text.
    pub fn from_toml_str(
        text: &str,
        origin: &Path,
    ) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads configuration from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading configuration");
        Self::from_toml_str(&text, path)
    }

    /// Reads `path` when given (it must exist). Otherwise reads
    /// [`DEFAULT_CONFIG_FILE`] if present, falling back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.lookup.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("lookup.endpoint is empty".to_string()));
        }
        if let Some(bad) = self.tips.presets.iter().find(|p| **p <= Decimal::ZERO) {
            return Err(ConfigError::Invalid(format!(
                "tips.presets must be positive fractions, got {bad}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn parse(text: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::from_toml_str(text, Path::new("test.toml"))
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse("").unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.lookup.endpoint, "http://localhost:3000/sales-tax");
        assert_eq!(config.lookup.timeout_secs, None);
        assert_eq!(config.tips.presets, vec![dec!(0.10), dec!(0.15), dec!(0.20)]);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.console);
    }

    #[test]
    fn full_file_overrides_every_section() {
        let config = parse(
            r#"
            [lookup]
            endpoint = "https://tax.example.com/sales-tax"
            timeout_secs = 3

            [tips]
            presets = [0.18, 0.22]

            [logging]
            level = "debug"
            file = "split.log"
            console = false
            "#,
        )
        .unwrap();

        assert_eq!(config.lookup.endpoint, "https://tax.example.com/sales-tax");
        assert_eq!(config.lookup.timeout_secs, Some(3));
        assert_eq!(config.tips.presets, vec![dec!(0.18), dec!(0.22)]);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("split.log")));
        assert!(!config.logging.console);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = parse("[lookup]\ntimeout_secs = 7\n").unwrap();

        assert_eq!(config.lookup.endpoint, LookupConfig::DEFAULT_ENDPOINT);
        assert_eq!(config.lookup.timeout_secs, Some(7));
    }

    #[test]
    fn non_positive_preset_is_rejected() {
        let err = parse("[tips]\npresets = [0.15, 0]\n").unwrap_err();

        assert!(matches!(err, ConfigError::Invalid(_)), "got {err:?}");
    }

    #[test]
    fn blank_endpoint_is_rejected() {
        let err = parse("[lookup]\nendpoint = \"\"\n").unwrap_err();

        assert!(matches!(err, ConfigError::Invalid(_)), "got {err:?}");
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = parse("[lookup\nendpoint = 1").unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }), "got {err:?}");
    }

    #[test]
    fn missing_explicit_file_is_read_error() {
        let err = AppConfig::load_or_default(Some(Path::new("/nonexistent/mysplit.toml")))
            .unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }), "got {err:?}");
    }
}
