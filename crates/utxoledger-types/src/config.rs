//! Configuration types for the settlement engine.

use serde::{Deserialize, Serialize};

use crate::{LedgerError, Result, constants};

/// Engine-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Check `pool_after == pool_before - surplus` after every epoch.
    pub audit_supply: bool,
    /// Logging configuration.
    pub log: LogConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            audit_supply: constants::DEFAULT_AUDIT_SUPPLY,
            log: LogConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LedgerError::Configuration(e.to_string()))
    }
}

/// `tracing` subscriber configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `"info"` or `"utxoledger_settlement=debug"`.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: constants::DEFAULT_LOG_FILTER.to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_config_defaults() {
        let cfg = EngineConfig::default();
        assert!(cfg.audit_supply);
        assert_eq!(cfg.log.filter, "info");
        assert!(!cfg.log.json);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = EngineConfig::from_json(r#"{"log":{"json":true}}"#).unwrap();
        assert!(cfg.audit_supply);
        assert!(cfg.log.json);
        assert_eq!(cfg.log.filter, "info");
    }

    #[test]
    fn malformed_json_is_configuration_error() {
        let err = EngineConfig::from_json("{audit_supply: yes").unwrap_err();
        assert!(matches!(err, LedgerError::Configuration(_)));
    }

    #[test]
    fn engine_config_serde_roundtrip() {
        let cfg = EngineConfig {
            audit_supply: false,
            log: LogConfig {
                filter: "debug".into(),
                json: true,
            },
        };
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(EngineConfig::from_json(&json).unwrap(), cfg);
    }
}
