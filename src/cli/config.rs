//! Configuration management for sagemath-mcp
//!
//! TOML-based configuration with defaults and validation.
//! Location: ~/.sagemath-mcp/config.toml
//!
//! The engine command is resolved with this precedence:
//! `--sage-cmd` flag, then `SAGE_CMD`, then the file, then `sage`.

use crate::engine::ProcessRunner;
use crate::errors::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the engine executable
pub const SAGE_CMD_ENV: &str = "SAGE_CMD";

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Engine process configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Executable name or path
    pub command: String,
    /// Drain window after killing a timed-out process
    pub kill_grace_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    pub level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command: "sage".to_string(),
            kill_grace_ms: 500,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| BridgeError::ConfigError(format!("Failed to read config {}: {}", path.display(), e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| BridgeError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from the standard location if present, else built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Standard config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".sagemath-mcp").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.engine.command.trim().is_empty() {
            return Err(BridgeError::ConfigError(
                "engine.command must not be empty".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(BridgeError::ConfigError(format!(
                "Invalid log level: {} (expected one of {})",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    /// Load, apply `SAGE_CMD` and the `--sage-cmd` flag, then validate
    pub fn resolve(path: Option<PathBuf>, sage_cmd: Option<String>) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_overrides(sage_cmd);
        config.validate()?;
        Ok(config)
    }

    /// Apply `SAGE_CMD`, then the flag value, which wins
    pub fn apply_overrides(&mut self, sage_cmd: Option<String>) {
        self.apply_env();
        self.apply_sage_cmd(sage_cmd);
    }

    /// Apply `SAGE_CMD` from the process environment
    pub fn apply_env(&mut self) {
        self.apply_sage_cmd(std::env::var(SAGE_CMD_ENV).ok());
    }

    /// Override the engine command when a non-blank value is given
    pub fn apply_sage_cmd(&mut self, command: Option<String>) {
        if let Some(command) = command {
            let command = command.trim();
            if !command.is_empty() {
                self.engine.command = command.to_string();
            }
        }
    }

    /// Drain window after a timeout kill
    pub fn kill_grace(&self) -> Duration {
        Duration::from_millis(self.engine.kill_grace_ms)
    }

    /// Process runner for the configured engine
    pub fn runner(&self) -> ProcessRunner {
        ProcessRunner::new(self.engine.command.clone()).with_kill_grace(self.kill_grace())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| BridgeError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| BridgeError::ConfigError(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| BridgeError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }
}
