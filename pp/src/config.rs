//! Prompt++ configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::template::SubstitutionMode;

/// Main Prompt++ configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// Template catalog sources
    pub catalog: CatalogConfig,

    /// Substitution behavior
    pub substitution: SubstitutionConfig,

    /// Clipboard integration
    pub clipboard: ClipboardConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .promptplus.yml
        let local_config = PathBuf::from(".promptplus.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/promptplus/promptplus.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("promptplus").join("promptplus.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is set up
    ///
    /// Errors are swallowed here; `load` reports them once logging exists.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let candidates = match config_path {
            Some(path) => vec![path.clone()],
            None => {
                let mut paths = vec![PathBuf::from(".promptplus.yml")];
                if let Some(config_dir) = dirs::config_dir() {
                    paths.push(config_dir.join("promptplus").join("promptplus.yml"));
                }
                paths
            }
        };

        candidates
            .iter()
            .filter(|p| p.exists())
            .find_map(|p| Self::load_from_file(p).ok())
            .and_then(|config| config.log_level)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Catalog source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directories to search for catalog files (searched in order)
    pub paths: Vec<String>,

    /// Fail the load when validation finds errors
    pub strict: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            paths: vec![
                "builtin".to_string(),
                "~/.config/promptplus/catalog".to_string(),
                ".promptplus/catalog".to_string(),
            ],
            strict: false,
        }
    }
}

impl CatalogConfig {
    /// Expand paths (resolve ~/ and relative paths)
    pub fn expanded_paths(&self) -> Vec<PathBuf> {
        self.paths
            .iter()
            .filter_map(|p| {
                if p == "builtin" {
                    None // builtin is handled specially
                } else if let Some(rest) = p.strip_prefix("~/") {
                    dirs::home_dir().map(|home| home.join(rest))
                } else {
                    Some(PathBuf::from(p))
                }
            })
            .collect()
    }

    /// Check if the compiled-in catalog should be loaded
    pub fn use_builtin(&self) -> bool {
        self.paths.iter().any(|p| p == "builtin")
    }
}

/// Substitution configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstitutionConfig {
    /// `first` fills only the first occurrence of a token, `all` fills every one
    pub mode: SubstitutionMode,
}

/// Clipboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Command that reads the text to copy on stdin (auto-detected when unset)
    pub command: Option<String>,

    /// How long the copied indicator stays on, in milliseconds
    #[serde(rename = "feedback-ms")]
    pub feedback_ms: u64,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            command: None,
            feedback_ms: 1000,
        }
    }
}

impl ClipboardConfig {
    pub fn feedback(&self) -> Duration {
        Duration::from_millis(self.feedback_ms)
    }

    /// Split the configured command into argv
    pub fn command_argv(&self) -> Option<Vec<String>> {
        let argv: Vec<String> = self.command.as_deref()?.split_whitespace().map(String::from).collect();
        if argv.is_empty() { None } else { Some(argv) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.log_level.is_none());
        assert!(config.catalog.use_builtin());
        assert!(!config.catalog.strict);
        assert_eq!(config.substitution.mode, SubstitutionMode::First);
        assert_eq!(config.clipboard.feedback(), Duration::from_millis(1000));
        assert!(config.clipboard.command_argv().is_none());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
log-level: DEBUG

catalog:
  paths:
    - builtin
    - /opt/prompts
  strict: true

substitution:
  mode: all

clipboard:
  command: "xclip -selection clipboard"
  feedback-ms: 250
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.log_level.as_deref(), Some("DEBUG"));
        assert!(config.catalog.strict);
        assert_eq!(config.catalog.expanded_paths(), vec![PathBuf::from("/opt/prompts")]);
        assert_eq!(config.substitution.mode, SubstitutionMode::All);
        assert_eq!(
            config.clipboard.command_argv(),
            Some(vec!["xclip".to_string(), "-selection".to_string(), "clipboard".to_string()])
        );
        assert_eq!(config.clipboard.feedback_ms, 250);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
substitution:
  mode: all
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        // Specified value
        assert_eq!(config.substitution.mode, SubstitutionMode::All);

        // Defaults for unspecified
        assert_eq!(config.catalog.paths.len(), 3);
        assert_eq!(config.clipboard.feedback_ms, 1000);
    }

    #[test]
    fn test_catalog_without_builtin() {
        let config = CatalogConfig {
            paths: vec!["./mine".to_string()],
            strict: false,
        };
        assert!(!config.use_builtin());
        assert_eq!(config.expanded_paths(), vec![PathBuf::from("./mine")]);
    }

    #[test]
    fn test_blank_clipboard_command() {
        let config = ClipboardConfig {
            command: Some("   ".to_string()),
            feedback_ms: 1000,
        };
        assert!(config.command_argv().is_none());
    }

    #[test]
    fn test_explicit_path_missing_is_error() {
        let missing = PathBuf::from("/definitely/not/here/promptplus.yml");
        assert!(Config::load(Some(&missing)).is_err());
        assert!(Config::load_log_level(Some(&missing)).is_none());
    }

    #[test]
    #[serial]
    fn test_load_project_local_config() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".promptplus.yml"), "log-level: WARN\nsubstitution:\n  mode: all\n").unwrap();

        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(temp.path()).unwrap();
        let config = Config::load(None);
        let level = Config::load_log_level(None);
        std::env::set_current_dir(previous).unwrap();

        let config = config.unwrap();
        assert_eq!(config.substitution.mode, SubstitutionMode::All);
        assert_eq!(level.as_deref(), Some("WARN"));
    }
}
