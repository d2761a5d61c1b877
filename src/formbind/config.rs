use crate::error::{FormError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "formbind.json";

/// Binding behavior knobs, stored in `formbind.json`.
///
/// Every field has a default, so a partial file (or no file at all) is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BindConfig {
    /// Report handler-attachment targets that resolve to nothing.
    #[serde(default = "default_true")]
    pub report_unresolved: bool,

    /// Skip value writes whose kind does not fit the attribute type.
    #[serde(default = "default_true")]
    pub strict_value_types: bool,

    /// Emit a debug event with the item count for every dispatch.
    #[serde(default)]
    pub trace_dispatch: bool,
}

fn default_true() -> bool {
    true
}

impl Default for BindConfig {
    fn default() -> Self {
        Self {
            report_unresolved: true,
            strict_value_types: true,
            trace_dispatch: false,
        }
    }
}

impl BindConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(FormError::Io)?;
        let config: BindConfig =
            serde_json::from_str(&content).map_err(FormError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(FormError::Io)?;
        }
        if !config_dir.is_dir() {
            return Err(FormError::Config(format!(
                "{} is not a directory",
                config_dir.display()
            )));
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(FormError::Serialization)?;
        fs::write(config_path, content).map_err(FormError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BindConfig::default();
        assert!(config.report_unresolved);
        assert!(config.strict_value_types);
        assert!(!config.trace_dispatch);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = BindConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config, BindConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("nested");

        let config = BindConfig {
            report_unresolved: false,
            trace_dispatch: true,
            ..Default::default()
        };
        config.save(&nested).unwrap();

        let loaded = BindConfig::load(&nested).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{ "trace_dispatch": true }"#,
        )
        .unwrap();

        let loaded = BindConfig::load(temp_dir.path()).unwrap();
        assert!(loaded.trace_dispatch);
        assert!(loaded.report_unresolved);
        assert!(loaded.strict_value_types);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILENAME), "{ not json").unwrap();

        match BindConfig::load(temp_dir.path()) {
            Err(FormError::Serialization(_)) => {}
            other => panic!("Expected Serialization error, got {:?}", other),
        }
    }

    #[test]
    fn test_save_into_file_path_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("plain.txt");
        fs::write(&file_path, "x").unwrap();

        match BindConfig::default().save(&file_path) {
            Err(FormError::Config(msg)) => assert!(msg.contains("not a directory")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }
}
