//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (JSON/YAML/TOML)
//! - Command-line arguments (layered on by the handlers)

use crate::error::{Error, Result};
use fieldmsg_core::HandlerOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
///
/// Handler options (`messages`, `paths`, `capitalize`, `humanize`) live at the
/// top level of the file so a plain options document is a valid config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Options handed to the error handler
    #[serde(flatten)]
    pub handler: HandlerOptions,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: String,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
        }
    }
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Yaml,
    Toml,
}

impl FileFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;

        let config = match FileFormat::from_path(path) {
            FileFormat::Yaml => serde_yaml::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
            FileFormat::Json => serde_json::from_str(&content)?,
        };

        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to load config");
                    }
                }
            }
        }

        // Return default config if no config file found
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".fieldmsg.yaml"),
            PathBuf::from(".fieldmsg.json"),
            PathBuf::from(".fieldmsg.toml"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let fieldmsg_dir = config_dir.join("fieldmsg");
            paths.push(fieldmsg_dir.join("config.yaml"));
            paths.push(fieldmsg_dir.join("config.json"));
            paths.push(fieldmsg_dir.join("config.toml"));
        }

        paths
    }

    /// Validate settings the handler cannot check itself
    pub fn validate(&self) -> Result<()> {
        if crate::cli::OutputFormat::from_name(&self.output.format).is_none() {
            return Err(Error::config(format!(
                "unknown output format '{}'",
                self.output.format
            )));
        }
        if let Some(paths) = &self.handler.paths {
            if paths.keys().any(|p| p.is_empty()) {
                return Err(Error::config("path rules must name a field path"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_yaml_config() {
        let file = write_temp(
            ".yaml",
            r#"
messages:
  required: "{path} is not empty"
paths:
  name:
    original: true
    kind: required
output:
  format: json
"#,
        );

        let config = Config::from_file(file.path()).unwrap();
        let messages = config.handler.messages.as_ref().unwrap();
        assert_eq!(messages["required"], "{path} is not empty");
        let paths = config.handler.paths.as_ref().unwrap();
        assert!(paths["name"].use_original_message);
        assert_eq!(config.output.format, "json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_toml_config() {
        let file = write_temp(
            ".toml",
            r#"
humanize = true

[messages]
"number.max" = "@{path} must be greater than or equal to {max}"

[paths.email]
useOriginalMessage = true
"#,
        );

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.handler.humanize, Some(true));
        let resolved = config.handler.resolve();
        assert_eq!(
            resolved.messages.get("number.max"),
            Some("@{path} must be greater than or equal to {max}")
        );
        assert!(resolved.paths["email"].use_original_message);
        assert_eq!(config.output.format, "human");
    }

    #[test]
    fn test_load_json_options_document() {
        let file = write_temp(".json", r#"{"messages": {"string": "X"}, "capitalize": false}"#);
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.handler.resolve().messages.get("string"), Some("X"));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_validate_rejects_unknown_output_format() {
        let mut config = Config::default();
        config.output.format = "xml".to_string();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
