//! Configuration management for treeprompt
//!
//! Settings come from a TOML file and from command-line arguments.
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Prompt configuration
    #[serde(default)]
    pub prompt: PromptConfig,

    /// History configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Completion menu configuration
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Display configuration
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Prompt configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptConfig {
    /// Text shown before the input, escape sequences allowed
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

/// Command history configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryConfig {
    /// Maximum number of history entries
    #[serde(default = "default_max_history_size")]
    pub max_size: usize,

    /// Path to history file
    #[serde(default = "default_history_file")]
    pub file_path: PathBuf,

    /// Enable history persistence
    #[serde(default = "default_persist_history")]
    pub persist: bool,
}

/// Completion menu configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionConfig {
    /// Menu layout
    #[serde(default)]
    pub menu: MenuStyle,

    /// Accept a single candidate without opening the menu
    #[serde(default)]
    pub quick: bool,

    /// Insert the common prefix of all candidates first
    #[serde(default = "default_partial")]
    pub partial: bool,

    /// Open the menu with the down arrow as well as Tab
    #[serde(default)]
    pub on_down: bool,

    /// List the top-level completions before the first prompt
    #[serde(default = "default_at_start")]
    pub at_start: bool,
}

/// Completion menu layout
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MenuStyle {
    /// Dropdown under the cursor, with descriptions
    #[default]
    Ide,

    /// Grid of candidates below the prompt
    Columnar,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Enable colored output
    #[serde(default = "default_color_output")]
    pub color_output: bool,

    /// Enable syntax highlighting
    #[serde(default = "default_syntax_highlighting")]
    pub syntax_highlighting: bool,

    /// Show history hints after the cursor
    #[serde(default = "default_history_hints")]
    pub history_hints: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Path to log file (None for stderr)
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

// Default value functions
fn default_prefix() -> String {
    "> ".to_string()
}

fn default_max_history_size() -> usize {
    1000
}

fn default_history_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".treeprompt_history")
}

fn default_persist_history() -> bool {
    true
}

fn default_partial() -> bool {
    true
}

fn default_at_start() -> bool {
    true
}

fn default_color_output() -> bool {
    true
}

fn default_syntax_highlighting() -> bool {
    true
}

fn default_history_hints() -> bool {
    true
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    false
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_history_size(),
            file_path: default_history_file(),
            persist: default_persist_history(),
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            menu: MenuStyle::default(),
            quick: false,
            partial: default_partial(),
            on_down: false,
            at_start: default_at_start(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color_output: default_color_output(),
            syntax_highlighting: default_syntax_highlighting(),
            history_hints: default_history_hints(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_path: None,
            timestamps: default_log_timestamps(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file at `path`, or at the default path when `None`.
    ///
    /// A missing default file yields the defaults; a missing explicit
    /// file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::load_from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".treeprompt")
            .join("config.toml")
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Ok if valid, error otherwise
    pub fn validate(&self) -> Result<()> {
        if self.history.max_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history.max_size".to_string(),
                value: "0".to_string(),
            }
            .into());
        }
        if self.prompt.prefix.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "prompt.prefix".to_string(),
                value: String::new(),
            }
            .into());
        }
        Ok(())
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShellError;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.prompt.prefix, "> ");
        assert_eq!(config.completion.menu, MenuStyle::Ide);
        assert!(config.completion.partial);
        assert!(!config.completion.on_down);
        assert!(config.completion.at_start);
        assert!(config.display.color_output);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [prompt]
            prefix = "basket> "

            [completion]
            menu = "columnar"
            on_down = true
            "#,
        )
        .unwrap();

        assert_eq!(config.prompt.prefix, "basket> ");
        assert_eq!(config.completion.menu, MenuStyle::Columnar);
        assert!(config.completion.on_down);
        assert!(config.completion.partial);
        assert_eq!(config.history.max_size, 1000);
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = Config::default();
        config.logging.level = LogLevel::Debug;
        let text = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.history.max_size = 0;
        assert!(matches!(
            config.validate(),
            Err(ShellError::Config(ConfigError::InvalidValue { .. }))
        ));

        let mut config = Config::default();
        config.prompt.prefix.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/treeprompt.toml"))).unwrap_err();
        assert!(matches!(err, ShellError::Config(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("treeprompt-config-test.toml");
        std::fs::write(&path, "[logging]\nlevel = \"trace\"\n").unwrap();
        let config = Config::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.logging.level, LogLevel::Trace);
    }

    #[test]
    fn test_malformed_file() {
        let err = toml::from_str::<Config>("[prompt\nprefix=").map_err(ShellError::from);
        assert!(matches!(err, Err(ShellError::Config(ConfigError::InvalidFormat(_)))));
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Trace.to_tracing_level(), tracing::Level::TRACE);
        assert_eq!(LogLevel::Error.to_tracing_level(), tracing::Level::ERROR);
    }
}
