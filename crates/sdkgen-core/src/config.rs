//! Configuration loading
//!
//! # Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Global config: ~/.config/sdkgen/config.toml
//! 3. Project config: ./sdkgen.toml (or an explicit `--config` path)
//! 4. Environment variables: `SDKGEN_TARGET`, `SDKGEN_FORMAT`, `SDKGEN_POLICY`
//! 5. CLI flags (applied by the binary)
//!
//! # Example Config
//!
//! ```toml
//! target = "go"
//! format = "template"
//! policy = "fail-fast"
//! extensions = ["hpp"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{output_format::OutputFormat, target::Target, Error, Result};

/// Project config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "sdkgen.toml";

/// What a batch scan does when a file fails
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Record the failure and continue without logging it
    Silent,
    /// Log the failure and continue
    #[default]
    Warn,
    /// Stop at the first failure
    #[strum(to_string = "fail-fast", serialize = "failfast", serialize = "fail")]
    #[serde(alias = "failfast", alias = "fail")]
    FailFast,
}

/// Effective settings for a scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Config {
    pub target: Target,
    pub format: OutputFormat,
    pub policy: FailurePolicy,
    /// File extensions to scan; empty means every regular file
    pub extensions: Vec<String>,
}

/// A config file; unset keys leave the lower layer alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub target: Option<Target>,
    pub format: Option<OutputFormat>,
    pub policy: Option<FailurePolicy>,
    pub extensions: Option<Vec<String>>,
}

impl Config {
    /// Overlay the keys a config file sets
    #[must_use]
    pub fn merge(self, file: ConfigFile) -> Self {
        Self {
            target: file.target.unwrap_or(self.target),
            format: file.format.unwrap_or(self.format),
            policy: file.policy.unwrap_or(self.policy),
            extensions: file.extensions.unwrap_or(self.extensions),
        }
    }

    /// Apply `SDKGEN_*` overrides read through `lookup`
    pub fn apply_env<F>(self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let target = lookup("SDKGEN_TARGET")
            .map(|v| {
                v.parse::<Target>()
                    .map_err(|_| Error::InvalidConfig(format!("SDKGEN_TARGET: unknown target {v}")))
            })
            .transpose()?
            .unwrap_or(self.target);
        let format = lookup("SDKGEN_FORMAT")
            .map(|v| {
                v.parse::<OutputFormat>()
                    .map_err(|_| Error::InvalidConfig(format!("SDKGEN_FORMAT: unknown format {v}")))
            })
            .transpose()?
            .unwrap_or(self.format);
        let policy = lookup("SDKGEN_POLICY")
            .map(|v| {
                v.parse::<FailurePolicy>().map_err(|_| {
                    Error::InvalidConfig(format!(
                        "SDKGEN_POLICY: unknown policy {v}. Must be one of: silent, warn, fail-fast"
                    ))
                })
            })
            .transpose()?
            .unwrap_or(self.policy);

        Ok(Self {
            target,
            format,
            policy,
            ..self
        })
    }

    /// Whether `path` passes the extension filter
    #[must_use]
    pub fn accepts(&self, path: &Path) -> bool {
        self.extensions.is_empty()
            || path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| self.extensions.iter().any(|e| e.trim_start_matches('.') == ext))
    }
}

/// Load configuration from every layer except CLI flags
///
/// An explicit path must exist; the global and project files are optional.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config = Config::default();

    let config = match global_config_path() {
        Some(path) if path.is_file() => config.merge(load_toml_file(&path)?),
        _ => config,
    };

    let config = match explicit {
        Some(path) => config.merge(load_toml_file(path)?),
        None => {
            let project = project_config_path()?;
            if project.is_file() {
                config.merge(load_toml_file(&project)?)
            } else {
                config
            }
        }
    };

    config.apply_env(|key| std::env::var(key).ok())
}

/// Get path to global config file
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "sdkgen")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Get path to project config file
pub fn project_config_path() -> Result<PathBuf> {
    std::env::current_dir()
        .map(|dir| dir.join(PROJECT_CONFIG_FILE))
        .map_err(|e| Error::io("Failed to get current directory", &e))
}

/// Load a TOML config file
pub fn load_toml_file(path: &Path) -> Result<ConfigFile> {
    if path.is_dir() {
        return Err(Error::InvalidConfig(format!(
            "Config path is a directory, not a file: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read config file {}", path.display()), &e))?;

    tracing::debug!(path = %path.display(), "Loaded config file");

    toml::from_str(&content).map_err(|e| {
        Error::Parse(format!(
            "Failed to parse config file {}: {e}",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_failure_policy_parse_and_display() {
        assert_eq!("fail".parse::<FailurePolicy>().ok(), Some(FailurePolicy::FailFast));
        assert_eq!("WARN".parse::<FailurePolicy>().ok(), Some(FailurePolicy::Warn));
        assert!("retry".parse::<FailurePolicy>().is_err());
        assert_eq!(FailurePolicy::FailFast.to_string(), "fail-fast");
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.target, Target::Python);
        assert_eq!(config.format, OutputFormat::Template);
        assert_eq!(config.policy, FailurePolicy::Warn);
        assert!(config.extensions.is_empty());
    }

    #[test]
    fn test_merge_only_overrides_set_keys() {
        let base = Config {
            policy: FailurePolicy::Silent,
            ..Config::default()
        };
        let merged = base.merge(ConfigFile {
            target: Some(Target::Go),
            ..ConfigFile::default()
        });
        assert_eq!(merged.target, Target::Go);
        assert_eq!(merged.policy, FailurePolicy::Silent);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default()
            .apply_env(env(&[("SDKGEN_TARGET", "dotnet"), ("SDKGEN_POLICY", "fail-fast")]))
            .expect("valid env");
        assert_eq!(config.target, Target::DotNet);
        assert_eq!(config.policy, FailurePolicy::FailFast);
        assert_eq!(config.format, OutputFormat::Template);
    }

    #[test]
    fn test_invalid_env_value_is_rejected() {
        let result = Config::default().apply_env(env(&[("SDKGEN_TARGET", "cobol")]));
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_invalid_env_policy_is_rejected() {
        let result = Config::default().apply_env(env(&[("SDKGEN_POLICY", "retry")]));
        assert!(matches!(result, Err(Error::InvalidConfig(msg)) if msg.contains("retry")));
    }

    #[test]
    fn test_policy_alias_in_toml() -> Result<()> {
        let dir = tempfile::tempdir().map_err(|e| Error::io("tempdir", &e))?;
        let path = dir.path().join("sdkgen.toml");
        std::fs::write(&path, "policy = \"failfast\"\nformat = \"json\"\n")
            .map_err(|e| Error::io("write", &e))?;
        let file = load_toml_file(&path)?;
        assert_eq!(file.policy, Some(FailurePolicy::FailFast));
        assert_eq!(file.format, Some(OutputFormat::Json));
        Ok(())
    }

    #[test]
    fn test_accepts_extension_filter() {
        let all = Config::default();
        assert!(all.accepts(Path::new("a/README")));

        let headers = Config {
            extensions: vec![".hpp".to_string(), "h".to_string()],
            ..Config::default()
        };
        assert!(headers.accepts(Path::new("x/getinfo.hpp")));
        assert!(headers.accepts(Path::new("x/getinfo.h")));
        assert!(!headers.accepts(Path::new("x/getinfo.cpp")));
        assert!(!headers.accepts(Path::new("x/Makefile")));
    }

    #[test]
    fn test_load_toml_file() -> Result<()> {
        let dir = tempfile::tempdir().map_err(|e| Error::io("tempdir", &e))?;
        let path = dir.path().join("sdkgen.toml");
        std::fs::write(
            &path,
            "target = \"go\"\npolicy = \"fail-fast\"\nextensions = [\"hpp\"]\n",
        )
        .map_err(|e| Error::io("write", &e))?;

        let file = load_toml_file(&path)?;
        assert_eq!(file.target, Some(Target::Go));
        assert_eq!(file.policy, Some(FailurePolicy::FailFast));
        assert_eq!(file.format, None);
        assert_eq!(file.extensions, Some(vec!["hpp".to_string()]));
        Ok(())
    }

    #[test]
    fn test_malformed_toml_returns_parse_error() -> Result<()> {
        let dir = tempfile::tempdir().map_err(|e| Error::io("tempdir", &e))?;
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "target = \n [[[").map_err(|e| Error::io("write", &e))?;
        assert!(matches!(load_toml_file(&path), Err(Error::Parse(_))));
        Ok(())
    }

    #[test]
    fn test_unknown_key_is_rejected() -> Result<()> {
        let dir = tempfile::tempdir().map_err(|e| Error::io("tempdir", &e))?;
        let path = dir.path().join("sdkgen.toml");
        std::fs::write(&path, "root = \"include\"\n").map_err(|e| Error::io("write", &e))?;
        assert!(matches!(load_toml_file(&path), Err(Error::Parse(_))));
        Ok(())
    }

    #[test]
    fn test_directory_config_path_is_rejected() -> Result<()> {
        let dir = tempfile::tempdir().map_err(|e| Error::io("tempdir", &e))?;
        assert!(matches!(
            load_toml_file(dir.path()),
            Err(Error::InvalidConfig(_))
        ));
        Ok(())
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let result = load_config(Some(Path::new("/nonexistent/sdkgen.toml")));
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
