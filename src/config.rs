use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::wizard::Route;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub ui: UiConfig,
    #[serde(default)]
    pub wizard: WizardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll interval of the terminal loop
    pub tick_rate_ms: u64,
    /// Maximum characters accepted by a text field
    #[serde(default = "default_field_max_length")]
    pub field_max_length: usize,
    /// Character drawn in place of each password character
    #[serde(default = "default_mask")]
    pub mask: String,
}

fn default_field_max_length() -> usize {
    120
}

fn default_mask() -> String {
    "•".to_string()
}

impl UiConfig {
    /// First character of `mask`, `*` when empty
    pub fn mask_char(&self) -> char {
        self.mask.chars().next().unwrap_or('*')
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Require earlier steps to validate before a later route can be entered
    #[serde(default)]
    pub guard_routes: bool,
    /// Route shown when the TUI starts
    #[serde(default = "default_start_route")]
    pub start_route: String,
}

fn default_start_route() -> String {
    Route::Home.path().to_string()
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            guard_routes: false,
            start_route: default_start_route(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for session logs
    pub state: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

impl Config {
    /// User config in ~/.config/student-signup/
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("student-signup").join("config.toml"))
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so the app works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with SIGNUP_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("SIGNUP")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }

    /// Parsed start route
    pub fn start_route(&self) -> Result<Route> {
        Route::parse(&self.wizard.start_route).context("Invalid wizard.start_route")
    }

    /// Get absolute path to state directory
    pub fn state_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.state);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    /// Get absolute path to logs directory
    pub fn logs_path(&self) -> PathBuf {
        self.state_path().join("logs")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui: UiConfig {
                tick_rate_ms: 250,
                field_max_length: default_field_max_length(),
                mask: default_mask(),
            },
            wizard: WizardConfig::default(),
            logging: LoggingConfig::default(),
            paths: PathsConfig {
                state: ".student-signup".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.ui.tick_rate_ms, 250);
        assert_eq!(config.ui.mask_char(), '•');
        assert!(!config.wizard.guard_routes);
        assert_eq!(config.start_route().unwrap(), Route::Home);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_explicit_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "[wizard]\nguard_routes = true\nstart_route = \"/step2\"\n\n[ui]\ntick_rate_ms = 100"
        )
        .unwrap();

        let config = Config::load(Some(file.path().to_str().unwrap())).unwrap();
        assert!(config.wizard.guard_routes);
        assert_eq!(config.start_route().unwrap(), Route::Password);
        assert_eq!(config.ui.tick_rate_ms, 100);
        // Untouched sections keep their defaults
        assert_eq!(config.ui.field_max_length, 120);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_start_route_is_reported() {
        let mut config = Config::default();
        config.wizard.start_route = "/step9".to_string();
        let err = config.start_route().unwrap_err();
        assert!(format!("{err:#}").contains("/step9"));
    }

    #[test]
    fn test_empty_mask_falls_back_to_asterisk() {
        let mut config = Config::default();
        config.ui.mask = String::new();
        assert_eq!(config.ui.mask_char(), '*');
    }

    #[test]
    fn test_toml_roundtrip_of_defaults() {
        let toml_str = Config::default().to_toml().unwrap();
        assert!(toml_str.contains("[wizard]"));
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.paths.state, ".student-signup");
    }

    #[test]
    fn test_logs_path_is_under_state() {
        let config = Config::default();
        assert!(config.logs_path().starts_with(config.state_path()));
        assert!(config.logs_path().ends_with("logs"));
    }
}
