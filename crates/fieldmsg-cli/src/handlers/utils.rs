//! Shared utilities for command handlers

use crate::cli::TransformArgs;
use crate::error::{Error, Result};
use fieldmsg_core::{HandlerOptions, PathOverride};
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Read an error document from a file, or stdin for `None` / `-`
pub fn read_document(input: Option<&Path>) -> Result<Value> {
    match input {
        Some(path) if path != Path::new("-") => {
            if !path.exists() {
                return Err(Error::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            let content = fs::read_to_string(path)?;
            let is_yaml = path
                .extension()
                .and_then(|s| s.to_str())
                .map(|s| s == "yaml" || s == "yml")
                .unwrap_or(false);

            if is_yaml {
                serde_yaml::from_str(&content).map_err(|_| Error::InvalidFormat {
                    path: path.to_path_buf(),
                    expected: "YAML".to_string(),
                })
            } else {
                serde_json::from_str(&content).map_err(|_| Error::InvalidFormat {
                    path: path.to_path_buf(),
                    expected: "JSON".to_string(),
                })
            }
        }
        _ => {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            parse_document(&content)
        }
    }
}

/// Parse a document of unknown format, JSON first then YAML
pub fn parse_document(content: &str) -> Result<Value> {
    match serde_json::from_str(content) {
        Ok(value) => Ok(value),
        Err(json_err) => serde_yaml::from_str(content).map_err(|_| Error::InvalidFormat {
            path: "<stdin>".into(),
            expected: format!("JSON or YAML ({})", json_err),
        }),
    }
}

/// Handler options given on the command line
pub fn options_from_args(args: &TransformArgs) -> HandlerOptions {
    let mut options = HandlerOptions::new();
    for (kind, template) in &args.messages {
        options = options.with_message(kind.clone(), template.clone());
    }
    for (path, template) in &args.path_messages {
        options = options.with_path(path.clone(), PathOverride::message(template.clone()));
    }
    for path in &args.original_paths {
        options = options.with_path(path.clone(), PathOverride::original());
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn args() -> TransformArgs {
        TransformArgs {
            input: None,
            messages: vec![("required".to_string(), "{path} is not empty".to_string())],
            original_paths: vec!["email".to_string()],
            path_messages: vec![("name".to_string(), "name is invalid".to_string())],
            explain: false,
        }
    }

    #[test]
    fn test_options_from_args() {
        let resolved = options_from_args(&args()).resolve();
        assert_eq!(resolved.messages.get("required"), Some("{path} is not empty"));
        assert!(resolved.paths["email"].use_original_message);
        assert_eq!(resolved.paths["name"].template(), Some("name is invalid"));
    }

    #[test]
    fn test_original_flag_wins_for_same_path() {
        let mut args = args();
        args.original_paths.push("name".to_string());
        let resolved = options_from_args(&args).resolve();
        assert!(resolved.paths["name"].use_original_message);
    }

    #[test]
    fn test_parse_document_accepts_yaml() {
        let value = parse_document("name: ValidationError\nerrors:\n  age:\n    kind: max\n").unwrap();
        assert_eq!(value["name"], "ValidationError");
        assert_eq!(value["errors"]["age"]["kind"], "max");
    }

    #[test]
    fn test_read_document_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        file.write_all(b"name: SomethingElse\n").unwrap();
        let value = read_document(Some(file.path())).unwrap();
        assert_eq!(value["name"], "SomethingElse");
    }

    #[test]
    fn test_read_document_missing_file() {
        let path = PathBuf::from("/no/such/error.json");
        assert!(matches!(
            read_document(Some(&path)),
            Err(Error::FileNotFound { .. })
        ));
    }
}
