//! Load: config parsing from TOML text or a TOML file.

use std::path::Path;

use super::model::MinerConfig;
use crate::error::{ConfigError, ConfigResult};

impl MinerConfig {
    /// Parse and validate a TOML document. Missing keys fall back to defaults.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let config: MinerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config = Self::from_toml_str(&contents)?;
        tracing::info!(
            path = %path.display(),
            length_ratio = config.length_ratio,
            match_threshold = config.match_threshold,
            preserve_leading_token = config.preserve_leading_token,
            "Loaded miner configuration"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml_str_partial() {
        // Only set match_threshold; rest should use defaults via #[serde(default)]
        let cfg = MinerConfig::from_toml_str("match_threshold = 0.75").expect("Should accept partial TOML");
        assert_eq!(cfg.match_threshold, 0.75);
        assert_eq!(cfg.length_ratio, 2.0);
        assert!(cfg.preserve_leading_token);
    }

    #[test]
    fn test_from_toml_str_empty_is_default() {
        let cfg = MinerConfig::from_toml_str("").expect("Empty TOML should yield defaults");
        assert_eq!(cfg, MinerConfig::default());
    }

    #[test]
    fn test_from_toml_str_rejects_invalid_values() {
        let result = MinerConfig::from_toml_str("length_ratio = 0.2");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_from_toml_str_rejects_malformed_toml() {
        let result = MinerConfig::from_toml_str("length_ratio = = 2");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let cfg = MinerConfig {
            length_ratio: 3.0,
            match_threshold: 0.6,
            preserve_leading_token: false,
        };
        let toml_str = toml::to_string(&cfg).expect("Should serialize to TOML");
        let back = MinerConfig::from_toml_str(&toml_str).expect("Should deserialize from TOML");
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_from_file_round_trip() {
        let path = std::env::temp_dir().join(format!("miner-conf-{}.toml", std::process::id()));
        std::fs::write(&path, "length_ratio = 4.0\npreserve_leading_token = false\n").unwrap();

        let cfg = MinerConfig::from_file(&path).expect("Should load config file");
        std::fs::remove_file(&path).ok();

        assert_eq!(cfg.length_ratio, 4.0);
        assert!(!cfg.preserve_leading_token);
        assert_eq!(cfg.match_threshold, 0.5);
    }

    #[test]
    fn test_from_file_missing() {
        let result = MinerConfig::from_file("/nonexistent/miner/config.toml");
        match result {
            Err(ConfigError::Io { path, .. }) => assert!(path.contains("config.toml")),
            other => panic!("expected Io error, got {:?}", other),
        }
    }
}
