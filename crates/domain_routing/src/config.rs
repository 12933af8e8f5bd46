//! Routing configuration

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use core_kernel::CoreError;

/// Tunable parts of the routing tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RoutingConfig {
    /// Sender countries whose claims use the bilateral age convention
    #[validate(custom(function = "validate_country_codes"))]
    pub bilateral_countries: Vec<String>,

    /// Lower age limit of the disability bracket for bilateral senders
    #[validate(range(min = 1, max = 17))]
    pub bilateral_minor_age: u32,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            bilateral_countries: vec!["DE".to_string(), "DK".to_string()],
            bilateral_minor_age: 16,
        }
    }
}

impl RoutingConfig {
    /// Validates the configuration, normalising country codes to upper case
    pub fn validated(mut self) -> Result<Self, CoreError> {
        self.validate()
            .map_err(|e| CoreError::configuration(format!("invalid routing config: {e}")))?;
        for country in &mut self.bilateral_countries {
            *country = country.trim().to_uppercase();
        }
        Ok(self)
    }
}

fn validate_country_codes(countries: &[String]) -> Result<(), ValidationError> {
    if countries.iter().all(|c| c.trim().len() == 2) {
        Ok(())
    } else {
        Err(ValidationError::new("country_code_length"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = RoutingConfig::default().validated().unwrap();
        assert_eq!(config.bilateral_countries, vec!["DE", "DK"]);
        assert_eq!(config.bilateral_minor_age, 16);
    }

    #[test]
    fn test_minor_age_out_of_range() {
        let config = RoutingConfig {
            bilateral_minor_age: 18,
            ..RoutingConfig::default()
        };
        assert!(matches!(config.validated(), Err(CoreError::Configuration(_))));
    }

    #[test]
    fn test_country_code_length() {
        let config = RoutingConfig {
            bilateral_countries: vec!["DEU".to_string()],
            ..RoutingConfig::default()
        };
        assert!(config.validated().is_err());
    }

    #[test]
    fn test_codes_are_upper_cased() {
        let config = RoutingConfig {
            bilateral_countries: vec!["se".to_string()],
            ..RoutingConfig::default()
        };
        assert_eq!(config.validated().unwrap().bilateral_countries, vec!["SE"]);
    }
}
