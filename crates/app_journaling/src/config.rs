//! Journaling configuration
//!
//! Values come from `JOURNALING_*` environment variables, with `__`
//! separating nested keys:
//!
//! * `JOURNALING_LOG_LEVEL` - trace, debug, info, warn, error (default: info)
//! * `JOURNALING_LOG_FORMAT` - pretty or json (default: pretty)
//! * `JOURNALING_ROUTING__BILATERAL_COUNTRIES` - comma separated (default: DE,DK)
//! * `JOURNALING_ROUTING__BILATERAL_MINOR_AGE` - 1 to 17 (default: 16)

use std::collections::HashMap;

use serde::Deserialize;
use validator::Validate;

use core_kernel::CoreError;
use domain_routing::RoutingConfig;

const ENV_PREFIX: &str = "JOURNALING";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Journaling configuration
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct JournalingConfig {
    pub log_level: String,
    pub log_format: LogFormat,
    #[validate(nested)]
    pub routing: RoutingConfig,
}

impl Default for JournalingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            routing: RoutingConfig::default(),
        }
    }
}

impl JournalingConfig {
    /// Loads configuration from the process environment
    ///
    /// A `.env` file is read first when one is present.
    pub fn from_env() -> Result<Self, CoreError> {
        dotenvy::dotenv().ok();
        Self::load(environment())
    }

    /// Loads configuration from an explicit variable map
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, CoreError> {
        Self::load(environment().source(Some(vars)))
    }

    fn load(source: config::Environment) -> Result<Self, CoreError> {
        let config: JournalingConfig = config::Config::builder()
            .add_source(source)
            .build()
            .and_then(|built| built.try_deserialize())
            .map_err(|e| CoreError::configuration(e.to_string()))?;

        config.validated()
    }

    fn validated(mut self) -> Result<Self, CoreError> {
        self.validate()
            .map_err(|e| CoreError::configuration(e.to_string()))?;
        self.routing = self.routing.validated()?;
        Ok(self)
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("routing.bilateral_countries")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = JournalingConfig::from_vars(HashMap::new()).unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.routing, RoutingConfig::default());
    }

    #[test]
    fn test_nested_routing_values() {
        let config = JournalingConfig::from_vars(vars(&[
            ("JOURNALING_LOG_FORMAT", "json"),
            ("JOURNALING_ROUTING__BILATERAL_COUNTRIES", "de,se"),
            ("JOURNALING_ROUTING__BILATERAL_MINOR_AGE", "15"),
        ]))
        .unwrap();

        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.routing.bilateral_countries, vec!["DE", "SE"]);
        assert_eq!(config.routing.bilateral_minor_age, 15);
    }

    #[test]
    fn test_invalid_minor_age_is_rejected() {
        let err = JournalingConfig::from_vars(vars(&[("JOURNALING_ROUTING__BILATERAL_MINOR_AGE", "30")]))
            .unwrap_err();
        assert!(matches!(err, CoreError::Configuration(_)));
    }

    #[test]
    fn test_log_level_from_environment() {
        let config = JournalingConfig::from_vars(vars(&[("JOURNALING_LOG_LEVEL", "debug")])).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.routing, RoutingConfig::default());
    }
}
