//! Configuration for distla tools
//!
//! Sources, highest priority first:
//! 1. Command-line arguments (applied by the caller)
//! 2. Environment variables
//! 3. Configuration files (.distla.toml, .distla.yaml, ...)
//! 4. Built-in defaults

use anyhow::{Context, Result};
use clap::ValueEnum;
use distla_ffi::SymbolStyle;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DistlaConfig {
    #[serde(default)]
    pub call: CallConfig,
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How wrappers treat their arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallConfig {
    /// Expand matrices, text and work arrays before calling
    #[serde(default = "default_true")]
    pub expand_args: bool,
}

/// Where the native routines come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Base name searched on the system loader path
    #[serde(default = "default_library_name")]
    pub name: String,
    /// Explicit library file; takes precedence over `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Fortran symbol decoration
    #[serde(default)]
    pub symbol_style: SymbolStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
    /// Print log events to stderr
    #[serde(default = "default_true")]
    pub stderr: bool,
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_library_name() -> String {
    "scalapack".to_string()
}

impl Default for CallConfig {
    fn default() -> Self {
        Self { expand_args: true }
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            name: default_library_name(),
            path: None,
            symbol_style: SymbolStyle::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            stderr: true,
        }
    }
}

/// Configuration loader with multiple source support
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<DistlaConfig> {
        let mut config = Self::load_from_files()?;
        Self::apply_environment_variables(&mut config)?;
        Ok(config)
    }

    fn load_from_files() -> Result<DistlaConfig> {
        for path in Self::config_paths() {
            if path.is_dir() {
                info!(
                    "Ignoring config directory path (expected file): {}",
                    path.display()
                );
                continue;
            }
            if path.exists() {
                info!("Loading configuration from: {}", path.display());
                return Self::load_from_file(&path);
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(DistlaConfig::default())
    }

    /// Candidate configuration files, in the order they are tried
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(config_path) = env::var("DISTLA_CONFIG") {
            paths.push(PathBuf::from(config_path));
        }

        if let Ok(current_dir) = env::current_dir() {
            for name in [".distla.toml", ".distla.yaml", ".distla.yml", ".distla.json"] {
                paths.push(current_dir.join(name));
            }
        }

        if let Some(home_dir) = dirs::home_dir() {
            for name in ["config.toml", "config.yaml", "config.json"] {
                paths.push(home_dir.join(".config/distla").join(name));
            }
        }

        #[cfg(unix)]
        paths.push(PathBuf::from("/etc/distla/config.toml"));

        paths
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<DistlaConfig> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?,
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?,
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?,
            _ => {
                // Try auto-detect (prefer TOML for unknown/no extension)
                if let Ok(config) = toml::from_str(&content) {
                    config
                } else if let Ok(config) = serde_yaml::from_str(&content) {
                    config
                } else if let Ok(config) = serde_json::from_str(&content) {
                    config
                } else {
                    return Err(anyhow::anyhow!(
                        "Could not parse config file {} (tried TOML, YAML, JSON)",
                        path.display()
                    ));
                }
            }
        };

        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_environment_variables(config: &mut DistlaConfig) -> Result<()> {
        if let Ok(expand) = env::var("DISTLA_EXPAND_ARGS") {
            match parse_bool(&expand) {
                Some(flag) => config.call.expand_args = flag,
                None => warn!("Ignoring DISTLA_EXPAND_ARGS={expand}: not a boolean"),
            }
        }

        if let Ok(name) = env::var("DISTLA_LIBRARY") {
            let trimmed = name.trim();
            if !trimmed.is_empty() {
                config.library.name = trimmed.to_string();
            }
        }

        if let Ok(path) = env::var("DISTLA_LIBRARY_PATH") {
            let trimmed = path.trim();
            config.library.path = if trimmed.is_empty() {
                None
            } else {
                Some(PathBuf::from(trimmed))
            };
        }

        if let Ok(style) = env::var("DISTLA_SYMBOL_STYLE") {
            match SymbolStyle::parse(&style) {
                Some(style) => config.library.symbol_style = style,
                None => warn!("Ignoring DISTLA_SYMBOL_STYLE={style}: unknown style"),
            }
        }

        if let Ok(log_level) = env::var("DISTLA_LOG_LEVEL") {
            config.logging.level = LogLevel::parse(&log_level).unwrap_or(config.logging.level);
        }

        Ok(())
    }

    /// Save configuration to a file
    pub fn save_to_file(config: &DistlaConfig, path: &Path) -> Result<()> {
        let content = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => {
                serde_yaml::to_string(config).context("Failed to serialize config to YAML")?
            }
            Some("json") => serde_json::to_string_pretty(config)
                .context("Failed to serialize config to JSON")?,
            _ => toml::to_string_pretty(config).context("Failed to serialize config to TOML")?,
        };

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        info!("Configuration saved to: {}", path.display());
        Ok(())
    }

    /// Generate a sample configuration file (TOML)
    pub fn generate_sample_config() -> String {
        let config = DistlaConfig::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| "# Failed to generate config".to_string())
    }
}

/// Parse a boolean value from string with various formats
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "enable" | "enabled" => Some(true),
        "0" | "false" | "no" | "off" | "disable" | "disabled" => Some(false),
        "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use std::sync::Mutex;
    use tempfile::TempDir;

    static ENV_GUARD: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ENV_VARS: [&str; 5] = [
        "DISTLA_EXPAND_ARGS",
        "DISTLA_LIBRARY",
        "DISTLA_LIBRARY_PATH",
        "DISTLA_SYMBOL_STYLE",
        "DISTLA_LOG_LEVEL",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = DistlaConfig::default();
        assert!(config.call.expand_args);
        assert_eq!(config.library.name, "scalapack");
        assert!(config.library.path.is_none());
        assert_eq!(config.library.symbol_style, SymbolStyle::LowerUnderscore);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert!(config.logging.stderr);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: DistlaConfig = toml::from_str(
            r#"
            [library]
            path = "/opt/scalapack/lib/libscalapack.so"
            symbol_style = "upper"
            "#,
        )
        .unwrap();
        assert_eq!(config.library.name, "scalapack");
        assert_eq!(
            config.library.path.as_deref(),
            Some(Path::new("/opt/scalapack/lib/libscalapack.so"))
        );
        assert_eq!(config.library.symbol_style, SymbolStyle::Upper);
        assert!(config.call.expand_args);
    }

    #[test]
    fn test_yaml_serialization() {
        let mut config = DistlaConfig::default();
        config.call.expand_args = false;
        config.logging.level = LogLevel::Debug;
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: DistlaConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_json_file_loading() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(".distla.json");

        let mut config = DistlaConfig::default();
        config.library.name = "mkl_scalapack_lp64".into();
        config.library.symbol_style = SymbolStyle::Lower;

        ConfigLoader::save_to_file(&config, &config_path).unwrap();
        let loaded = ConfigLoader::load_from_file(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_extensionless_file_is_detected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("distla-config");
        fs::write(&config_path, "call:\n  expand_args: false\n").unwrap();
        let loaded = ConfigLoader::load_from_file(&config_path).unwrap();
        assert!(!loaded.call.expand_args);
    }

    #[test]
    fn test_unparseable_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "[call\nexpand_args = ").unwrap();
        let err = ConfigLoader::load_from_file(&config_path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML config"));
    }

    #[test]
    fn test_sample_config_parses_back() {
        let sample = ConfigLoader::generate_sample_config();
        let parsed: DistlaConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed, DistlaConfig::default());
    }

    #[test]
    fn test_bool_parsing() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool(" ON "), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("invalid"), None);
    }

    #[test]
    fn env_overrides_apply() {
        let _lock = ENV_GUARD.lock().unwrap();
        clear_env();
        env::set_var("DISTLA_EXPAND_ARGS", "no");
        env::set_var("DISTLA_LIBRARY", "scalapack-openmpi");
        env::set_var("DISTLA_SYMBOL_STYLE", "upper");
        env::set_var("DISTLA_LOG_LEVEL", "TRACE");

        let mut config = DistlaConfig::default();
        ConfigLoader::apply_environment_variables(&mut config).unwrap();
        assert!(!config.call.expand_args);
        assert_eq!(config.library.name, "scalapack-openmpi");
        assert_eq!(config.library.symbol_style, SymbolStyle::Upper);
        assert_eq!(config.logging.level, LogLevel::Trace);
        clear_env();
    }

    #[test]
    fn invalid_env_values_are_ignored() {
        let _lock = ENV_GUARD.lock().unwrap();
        clear_env();
        env::set_var("DISTLA_EXPAND_ARGS", "maybe");
        env::set_var("DISTLA_SYMBOL_STYLE", "camel");
        env::set_var("DISTLA_LOG_LEVEL", "loud");
        env::set_var("DISTLA_LIBRARY_PATH", "  ");

        let mut config = DistlaConfig::default();
        config.library.path = Some(PathBuf::from("/tmp/libscalapack.so"));
        ConfigLoader::apply_environment_variables(&mut config).unwrap();
        assert!(config.call.expand_args);
        assert_eq!(config.library.symbol_style, SymbolStyle::LowerUnderscore);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert!(config.library.path.is_none());
        clear_env();
    }

    #[test]
    fn config_env_var_is_searched_first() {
        let _lock = ENV_GUARD.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("custom.yaml");
        fs::write(&config_path, "library:\n  name: custom\n").unwrap();
        env::set_var("DISTLA_CONFIG", &config_path);

        assert_eq!(ConfigLoader::config_paths()[0], config_path);
        clear_env();
        let loaded = ConfigLoader::load().unwrap();
        assert_eq!(loaded.library.name, "custom");
        env::remove_var("DISTLA_CONFIG");
    }
}
