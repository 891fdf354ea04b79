use crate::error::{Result, ShambaError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Documented placeholder key values. A key equal to its placeholder
/// means the provider was never configured and its chain tier is skipped
/// without a network attempt.
pub const WEATHERAPI_PLACEHOLDER: &str = "YOUR_WEATHERAPI_KEY";
pub const POSITIONSTACK_PLACEHOLDER: &str = "YOUR_POSITIONSTACK_KEY";
pub const PLANT_ID_PLACEHOLDER: &str = "YOUR_PLANT_ID_KEY";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub weatherapi: ApiKeyConfig,
    #[serde(default)]
    pub positionstack: ApiKeyConfig,
    #[serde(default)]
    pub plant_id: ApiKeyConfig,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct ApiKeyConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Default for ApiKeyConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            enabled: true,
        }
    }
}

impl ApiKeyConfig {
    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            enabled: true,
        }
    }

    /// True when the key is present, enabled, and not a placeholder.
    pub fn is_configured(&self, placeholder: &str) -> bool {
        self.enabled && !self.api_key.is_empty() && self.api_key != placeholder
    }
}

impl std::fmt::Debug for ApiKeyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyConfig")
            .field("api_key", &"[REDACTED]")
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            // Keyless providers and the synthetic tiers still work with
            // an empty config.
            tracing::info!(
                "No config file at {:?} - external keyed providers disabled",
                config_path
            );
            return Ok(Self::from_env());
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| ShambaError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| ShambaError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Build a config purely from environment variables; keys that are
    /// unset stay unconfigured.
    pub fn from_env() -> Self {
        let from_var = |name: &str| ApiKeyConfig {
            api_key: std::env::var(name).unwrap_or_default(),
            enabled: true,
        };
        Self {
            weatherapi: from_var("WEATHERAPI_KEY"),
            positionstack: from_var("POSITIONSTACK_API_KEY"),
            plant_id: from_var("PLANT_ID_API_KEY"),
        }
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        // Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("shamba").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        let default_path = dirs::config_dir()
            .ok_or_else(|| ShambaError::Config("Cannot determine config directory".into()))?
            .join("shamba")
            .join("config.yaml");
        Ok(default_path)
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_key_is_unconfigured() {
        let cfg = ApiKeyConfig::with_key(WEATHERAPI_PLACEHOLDER);
        assert!(!cfg.is_configured(WEATHERAPI_PLACEHOLDER));
    }

    #[test]
    fn empty_key_is_unconfigured() {
        let cfg = ApiKeyConfig::default();
        assert!(!cfg.is_configured(WEATHERAPI_PLACEHOLDER));
    }

    #[test]
    fn real_key_is_configured_unless_disabled() {
        let mut cfg = ApiKeyConfig::with_key("abc123");
        assert!(cfg.is_configured(WEATHERAPI_PLACEHOLDER));
        cfg.enabled = false;
        assert!(!cfg.is_configured(WEATHERAPI_PLACEHOLDER));
    }

    #[test]
    fn debug_redacts_key() {
        let cfg = ApiKeyConfig::with_key("super-secret");
        let rendered = format!("{:?}", cfg);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn yaml_parse_with_defaults() {
        let yaml = "weatherapi:\n  api_key: k1\n";
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.weatherapi.api_key, "k1");
        assert!(cfg.weatherapi.enabled);
        assert!(cfg.plant_id.api_key.is_empty());
    }
}
