use crate::error::ConsoleError;

use client_core::config::AppConfig;

use std::path::PathBuf;

use clap::Parser;
use log::info;

const APP_DIR_NAME: &str = "skinscan";
const LOG_DIR_NAME: &str = "logs";

/// Console client for the skin-scan analysis service.
#[derive(Debug, Parser)]
#[command(name = "skinscan", version, about)]
pub struct Cli {
    /// Directory holding config.json and the log directory.
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Service base URL, overriding the config file and environment.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Write the effective configuration back to config.json before starting.
    #[arg(long)]
    pub save_config: bool,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// `--config-dir`, else the platform config directory, else the working directory.
    pub fn config_dir(&self) -> PathBuf {
        match &self.config_dir {
            Some(dir) => dir.clone(),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    pub fn log_dir(&self) -> PathBuf {
        self.config_dir().join(LOG_DIR_NAME)
    }

    /// Save `config` to the config directory when `--save-config` was given.
    ///
    /// Returns whether anything was written.
    pub fn persist(&self, config: &AppConfig) -> Result<bool, ConsoleError> {
        if !self.save_config {
            return Ok(false);
        }

        let config_dir = self.config_dir();
        config.save(&config_dir)?;
        info!("Saved configuration to {}", config_dir.display());
        Ok(true)
    }
}
