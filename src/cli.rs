//! Command line interface.
//!
//! `speedtest-server [PORT] [BASE_PATH]` mirrors the classic launcher
//! arguments; everything else is an optional flag.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{load_config, ConfigError};
use crate::config::validation::validate_config;
use crate::config::ServerConfig;

#[derive(Parser, Debug)]
#[command(name = "speedtest-server")]
#[command(about = "Static file server with network diagnostic endpoints", long_about = None)]
pub struct Cli {
    /// TCP port to listen on [default: 80]
    pub port: Option<u16>,

    /// Directory holding the static assets [default: web]
    pub base_path: Option<PathBuf>,

    /// TOML configuration file; command line values override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Interface to bind [default: 0.0.0.0]
    #[arg(long)]
    pub host: Option<String>,

    /// Log level when RUST_LOG is unset
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Build the effective configuration: defaults, then file, then flags.
    pub fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ServerConfig::default(),
        };

        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(base_path) = self.base_path {
            config.static_files.base_path = base_path;
        }
        if let Some(host) = self.host {
            config.listener.host = host;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}
