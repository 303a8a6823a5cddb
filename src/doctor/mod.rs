//! Doctor command for bridge diagnostics
//!
//! Checks the configuration and whether the Sage executable answers.

use crate::cli::Config;
use crate::engine::{EngineRunner, ExitKind, InvocationRequest};
use crate::errors::Result;
use crate::tools::types::{deadline, VERSION_TIMEOUT_SECS};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass(String),
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
}

impl HealthCheck {
    fn new(name: &str, status: HealthStatus) -> Self {
        Self {
            name: name.to_string(),
            status,
        }
    }
}

/// Doctor diagnostics system
///
/// Takes the configuration as loaded, so a broken file is reported as a
/// failed check instead of aborting the command.
pub struct Doctor {
    config: Result<Config>,
    config_path: Option<PathBuf>,
    runner: Arc<dyn EngineRunner>,
}

impl Doctor {
    pub fn new(config: Result<Config>, config_path: Option<PathBuf>, runner: Arc<dyn EngineRunner>) -> Self {
        Self {
            config,
            config_path,
            runner,
        }
    }

    /// Run all health checks
    pub async fn run_diagnostics(&self) -> Vec<HealthCheck> {
        vec![
            self.check_config_file(),
            self.check_config_values(),
            self.check_engine().await,
        ]
    }

    fn check_config_file(&self) -> HealthCheck {
        let path = self.config_path.clone().or_else(Config::default_path);
        let status = match path {
            Some(path) if path.exists() => HealthStatus::Pass(path.display().to_string()),
            Some(path) => HealthStatus::Warn(format!(
                "{} not found, using built-in defaults",
                path.display()
            )),
            None => HealthStatus::Warn("No home directory, using built-in defaults".to_string()),
        };
        HealthCheck::new("Config File", status)
    }

    fn check_config_values(&self) -> HealthCheck {
        let validated = match &self.config {
            Ok(config) => config.validate().map(|()| config).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        let status = match validated {
            Ok(config) => HealthStatus::Pass(format!(
                "command={} log={}",
                config.engine.command, config.logging.level
            )),
            Err(msg) => HealthStatus::Fail(msg),
        };
        HealthCheck::new("Configuration", status)
    }

    async fn check_engine(&self) -> HealthCheck {
        let outcome = self
            .runner
            .run(InvocationRequest::version(deadline(VERSION_TIMEOUT_SECS)))
            .await;

        let status = match outcome.kind() {
            ExitKind::Success if outcome.stdout().is_empty() => {
                HealthStatus::Warn("Sage answered with no version text".to_string())
            }
            ExitKind::Success => HealthStatus::Pass(outcome.stdout().to_string()),
            ExitKind::NotFound => HealthStatus::Fail(outcome.stderr().to_string()),
            ExitKind::TimedOut => HealthStatus::Fail(format!(
                "{} --version timed out after {}s",
                self.runner.command(),
                VERSION_TIMEOUT_SECS
            )),
            ExitKind::NonZero => HealthStatus::Fail(format!(
                "{} --version exited with code {}",
                self.runner.command(),
                outcome.exit_code()
            )),
        };
        HealthCheck::new("Sage Engine", status)
    }

    /// Display diagnostics results
    pub fn display_results(checks: &[HealthCheck]) {
        println!("\n{}\n", "sagemath-mcp diagnostics".bold());

        for check in checks {
            let (label, detail) = match &check.status {
                HealthStatus::Pass(msg) => ("PASS".green(), msg),
                HealthStatus::Warn(msg) => ("WARN".yellow(), msg),
                HealthStatus::Fail(msg) => ("FAIL".red(), msg),
            };
            println!("{:<16} {} {}", check.name, label, detail.as_str().dimmed());
        }

        println!();
    }

    /// Healthy unless some check failed
    pub fn overall_status(checks: &[HealthCheck]) -> bool {
        !checks.iter().any(|c| matches!(c.status, HealthStatus::Fail(_)))
    }
}
