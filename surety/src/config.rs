//! FlightSurety configuration with TOML file support.

use crate::logging::LogFormat;
use crate::SuretyError;
use flightsure_types::{PartyId, ProtocolParams};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a FlightSurety deployment.
///
/// Can be loaded from a TOML file via [`SuretyConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuretyConfig {
    /// Owner identity. Holds the operational toggle and the caller grants, and
    /// its airline is admitted as the founding Participant.
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Display name of the owner's airline.
    #[serde(default = "default_owner_airline_name")]
    pub owner_airline_name: String,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub params: ProtocolParams,
}

fn default_owner() -> String {
    "owner".to_string()
}

fn default_owner_airline_name() -> String {
    "Founding Airline".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl SuretyConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SuretyError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SuretyError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, SuretyError> {
        toml::from_str(s).map_err(|e| SuretyError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, SuretyError> {
        toml::to_string_pretty(self).map_err(|e| SuretyError::Config(e.to_string()))
    }

    pub fn owner_id(&self) -> Result<PartyId, SuretyError> {
        Ok(PartyId::parse(&self.owner)?)
    }

    pub fn log_format(&self) -> Result<LogFormat, SuretyError> {
        self.log_format.parse()
    }
}

impl Default for SuretyConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            owner_airline_name: default_owner_airline_name(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            params: ProtocolParams::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightsure_types::Amount;
    use std::io::Write;

    #[test]
    fn default_config_roundtrips_through_toml() {
        let config = SuretyConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed = SuretyConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let config = SuretyConfig::from_toml_str(
            r#"
owner = "0xOwner"
log_format = "json"

[params]
response_quorum = 5
"#,
        )
        .unwrap();
        assert_eq!(config.owner, "0xOwner");
        assert_eq!(config.log_format().unwrap(), LogFormat::Json);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.params.response_quorum, 5);
        assert_eq!(config.params.indices_per_oracle, 3);
        assert_eq!(
            config.params.airline_funding_threshold,
            Amount::from_ether(10)
        );
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(
            SuretyConfig::from_toml_str("").unwrap(),
            SuretyConfig::default()
        );
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = SuretyConfig::from_toml_str("owner = [").unwrap_err();
        assert!(matches!(err, SuretyError::Config(_)));
    }

    #[test]
    fn unknown_log_format_rejected() {
        let config = SuretyConfig {
            log_format: "xml".into(),
            ..SuretyConfig::default()
        };
        assert!(config.log_format().is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "owner = \"0xFile\"").unwrap();
        writeln!(file, "owner_airline_name = \"File Air\"").unwrap();
        let config = SuretyConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.owner_id().unwrap(), PartyId::new("0xFile"));
        assert_eq!(config.owner_airline_name, "File Air");
    }

    #[test]
    fn missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SuretyConfig::from_toml_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, SuretyError::Config(_)));
    }
}
