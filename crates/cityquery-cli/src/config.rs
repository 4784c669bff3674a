//! CLI configuration

use cityquery_core::{Error, Result};
use cityquery_query::QueryConfig;
use cityquery_scene::VisibilityConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings loaded from an optional JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Query interpretation
    pub query: QueryConfig,

    /// Visibility sampling
    pub visibility: VisibilityConfig,

    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            query: QueryConfig::default(),
            visibility: VisibilityConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl CliConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON file; missing keys keep their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| Error::Configuration(format!("{}: {}", path.display(), e)))
    }

    /// Builder: set query settings
    pub fn query(mut self, query: QueryConfig) -> Self {
        self.query = query;
        self
    }

    /// Builder: set visibility settings
    pub fn visibility(mut self, visibility: VisibilityConfig) -> Self {
        self.visibility = visibility;
        self
    }

    /// Builder: set log level
    pub fn log_level<S: Into<String>>(mut self, level: S) -> Self {
        self.log_level = level.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.query.high_threshold, 30.0);
        assert_eq!(config.visibility.resolution_ratio, 0.25);
    }

    #[test]
    fn test_builder() {
        let config = CliConfig::new()
            .query(QueryConfig::new().fold_case(true))
            .visibility(VisibilityConfig::new().resolution_ratio(0.5))
            .log_level("debug");
        assert!(config.query.fold_case);
        assert_eq!(config.visibility.resolution_ratio, 0.5);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"query": {{"low_threshold": 10.0}}, "log_level": "warn"}}"#).unwrap();

        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.query.low_threshold, 10.0);
        assert_eq!(config.query.high_threshold, 30.0);
        assert_eq!(config.visibility, VisibilityConfig::default());
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(CliConfig::load(file.path()), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            CliConfig::load("/nonexistent/cityquery.json"),
            Err(Error::Io(_))
        ));
    }
}
