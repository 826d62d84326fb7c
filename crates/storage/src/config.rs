use chrono_tz::Tz;
use phasefit_domain as domain;

use crate::rows::{MappingError, parse_time_zone};

/// Settings of a generation run as stored by the client.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GenerationConfig {
    pub max_concurrent_writes: usize,
    /// IANA name of the user's time zone.
    pub time_zone: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let settings = domain::GenerationSettings::default();
        Self {
            max_concurrent_writes: settings.max_concurrent_writes,
            time_zone: "UTC".to_string(),
        }
    }
}

impl GenerationConfig {
    /// Parse a configuration. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GenerationConfig = serde_json::from_str(json)?;
        if config.max_concurrent_writes == 0 {
            return Err(ConfigError::NoConcurrentWrites);
        }
        config.time_zone()?;
        Ok(config)
    }

    pub fn time_zone(&self) -> Result<Tz, MappingError> {
        parse_time_zone(&self.time_zone)
    }
}

impl From<&GenerationConfig> for domain::GenerationSettings {
    fn from(value: &GenerationConfig) -> Self {
        Self {
            max_concurrent_writes: value.max_concurrent_writes,
        }
    }
}

impl From<GenerationConfig> for domain::GenerationSettings {
    fn from(value: GenerationConfig) -> Self {
        Self::from(&value)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("at least one concurrent write is required")]
    NoConcurrentWrites,
    #[error(transparent)]
    InvalidTimeZone(#[from] MappingError),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_generation_config_default() {
        let config = GenerationConfig::from_json("{}").unwrap();
        assert_eq!(config, GenerationConfig::default());
        assert_eq!(config.time_zone(), Ok(Tz::UTC));
        assert_eq!(
            domain::GenerationSettings::from(config),
            domain::GenerationSettings::default()
        );
    }

    #[test]
    fn test_generation_config_from_json() {
        let config = GenerationConfig::from_json(
            r#"{ "max_concurrent_writes": 2, "time_zone": "Europe/Berlin" }"#,
        )
        .unwrap();
        assert_eq!(config.time_zone(), Ok(Tz::Europe__Berlin));
        assert_eq!(
            domain::GenerationSettings::from(&config),
            domain::GenerationSettings {
                max_concurrent_writes: 2
            }
        );
    }

    #[rstest]
    #[case(r#"{ "time_zone": "Atlantis/Capital" }"#, "unknown time zone \"Atlantis/Capital\"")]
    #[case(r#"{ "max_concurrent_writes": 0 }"#, "at least one concurrent write is required")]
    #[case(r#"{ "max_concurrent_writes": -1 }"#, "invalid configuration")]
    #[case("[", "invalid configuration")]
    fn test_generation_config_from_json_invalid(#[case] json: &str, #[case] message: &str) {
        let err = GenerationConfig::from_json(json).unwrap_err();
        assert!(
            err.to_string().starts_with(message),
            "unexpected error: {err}"
        );
    }
}
