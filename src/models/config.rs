//! Configuration types.
//!
//! Settings come from `/etc/cview/config.toml`, the user config file,
//! environment variables and finally command-line flags, each layer
//! overriding the previous one.

use std::path::{Path, PathBuf};

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Endpoint of the reference candidates API
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/candidates";

/// Errors that abort loading in strict mode
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid value '{value}' for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: String,
    },
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CviewConfig {
    pub api: ApiConfig,

    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Full URL of the candidates collection endpoint
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ApiConfig {
    /// Parse and check `base_url`
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        validate_api_url(&self.base_url)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Theme name ("dark" or "light")
    pub theme: String,

    /// Maximum length for candidate names before truncation
    pub name_max_length: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            name_max_length: 32,
        }
    }
}

/// Keys set by a single config file. Absent keys leave the previous layer alone.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigLayer {
    api: ApiLayer,
    display: DisplayLayer,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiLayer {
    base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DisplayLayer {
    theme: Option<String>,
    name_max_length: Option<usize>,
}

/// Minimum name column width that still leaves room for the ellipsis
const MIN_NAME_LENGTH: usize = 8;

/// Check that `raw` is an absolute http(s) URL
pub fn validate_api_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        field: "api.base_url",
        value: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

impl CviewConfig {
    /// Get the user config file path, respecting XDG_CONFIG_HOME
    ///
    /// Resolution order:
    /// 1. $XDG_CONFIG_HOME/cview/config.toml (if XDG_CONFIG_HOME is set)
    /// 2. $HOME/.config/cview/config.toml (if HOME is set)
    /// 3. dirs::config_dir()/cview/config.toml
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config.is_empty()
        {
            return Some(PathBuf::from(xdg_config).join("cview/config.toml"));
        }

        if let Some(home) = std::env::var_os("HOME") {
            return Some(PathBuf::from(home).join(".config/cview/config.toml"));
        }

        dirs::config_dir().map(|dir| dir.join("cview/config.toml"))
    }

    /// Load configuration from files and environment.
    ///
    /// Returns the config and any warnings encountered. Problems are only
    /// errors when CVIEW_STRICT_CONFIG is set; otherwise they are reported
    /// as warnings and the offending value falls back to its default.
    pub fn load() -> Result<(Self, Vec<String>), ConfigError> {
        let mut config = Self::default();
        let mut warnings = Vec::new();
        let strict = Self::is_strict_mode();

        config.load_config_file(Path::new("/etc/cview/config.toml"), strict, &mut warnings)?;

        if let Some(user_path) = Self::user_config_path() {
            config.load_config_file(&user_path, strict, &mut warnings)?;
        }

        config.apply_env_overrides();
        warnings.extend(config.validate(strict)?);

        Ok((config, warnings))
    }

    /// Check if strict config mode is enabled via CVIEW_STRICT_CONFIG
    fn is_strict_mode() -> bool {
        std::env::var("CVIEW_STRICT_CONFIG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    /// Merge a config file into `self`. A missing file is not an error.
    fn load_config_file(
        &mut self,
        path: &Path,
        strict: bool,
        warnings: &mut Vec<String>,
    ) -> Result<(), ConfigError> {
        let err = match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<ConfigLayer>(&content) {
                Ok(layer) => {
                    self.merge(layer);
                    return Ok(());
                }
                Err(source) => ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                },
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(source) => ConfigError::Read {
                path: path.to_path_buf(),
                source,
            },
        };

        if strict {
            return Err(err);
        }
        warnings.push(err.to_string());
        Ok(())
    }

    fn merge(&mut self, layer: ConfigLayer) {
        if let Some(base_url) = layer.api.base_url {
            self.api.base_url = base_url;
        }
        if let Some(theme) = layer.display.theme {
            self.display.theme = theme;
        }
        if let Some(len) = layer.display.name_max_length {
            self.display.name_max_length = len;
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("CVIEW_API_URL")
            && !val.is_empty()
        {
            self.api.base_url = val;
        }
        if let Ok(val) = std::env::var("CVIEW_THEME")
            && !val.is_empty()
        {
            self.display.theme = val;
        }
    }

    /// Validate values, correcting them to defaults unless `strict`
    pub fn validate(&mut self, strict: bool) -> Result<Vec<String>, ConfigError> {
        let mut warnings = Vec::new();
        let defaults = Self::default();

        if let Err(err) = self.api.endpoint() {
            if strict {
                return Err(err);
            }
            warnings.push(format!("{} - using default ({})", err, defaults.api.base_url));
            self.api.base_url = defaults.api.base_url;
        }

        if self.display.name_max_length < MIN_NAME_LENGTH {
            let err = ConfigError::InvalidValue {
                field: "display.name_max_length",
                value: self.display.name_max_length.to_string(),
                reason: format!("must be at least {}", MIN_NAME_LENGTH),
            };
            if strict {
                return Err(err);
            }
            warnings.push(format!(
                "{} - using default ({})",
                err, defaults.display.name_max_length
            ));
            self.display.name_max_length = defaults.display.name_max_length;
        }

        Ok(warnings)
    }
}
