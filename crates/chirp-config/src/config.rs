use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::{ArgAction, Args, builder::BoolishValueParser};
use serde::Serialize;
use thiserror::Error;

use crate::database::DatabaseConfig;
use crate::hosts::HostPolicy;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SECRET_KEY must be set when DEBUG is off")]
    MissingSecretKey,
    #[error("ALLOWED_HOSTS must list at least one host when DEBUG is off")]
    NoAllowedHosts,
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Process-wide settings, read from flags or the environment.
#[derive(Debug, Clone, Args, Serialize)]
pub struct AppConfig {
    /// Key used to sign flash cookies.
    #[arg(
        long,
        env = "SECRET_KEY",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    #[serde(skip)]
    pub secret_key: String,

    #[arg(
        long,
        env = "DEBUG",
        action = ArgAction::Set,
        default_value = "false",
        value_parser = BoolishValueParser::new()
    )]
    pub debug: bool,

    /// Comma separated host names; `.example.com` matches subdomains.
    #[arg(long, env = "ALLOWED_HOSTS", value_delimiter = ',')]
    pub allowed_hosts: Vec<String>,

    #[arg(long, env = "MEDIA_ROOT", default_value = "media")]
    pub media_root: PathBuf,

    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = 10 * 1024 * 1024)]
    pub max_upload_bytes: usize,

    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Args, Serialize)]
pub struct ServerConfig {
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Runtime worker threads; defaults to the number of cores.
    #[arg(long, env = "WORKERS")]
    pub workers: Option<usize>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.debug {
            if self.secret_key.is_empty() {
                return Err(ConfigError::MissingSecretKey);
            }
            if self.host_policy().is_empty() {
                return Err(ConfigError::NoAllowedHosts);
            }
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Zero("MAX_UPLOAD_BYTES"));
        }
        if self.database.poll_interval_ms == 0 {
            return Err(ConfigError::Zero("DB_POLL_INTERVAL_MS"));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Zero("DB_MAX_CONNECTIONS"));
        }
        if self.server.workers == Some(0) {
            return Err(ConfigError::Zero("WORKERS"));
        }
        Ok(())
    }

    pub fn host_policy(&self) -> HostPolicy {
        HostPolicy::new(&self.allowed_hosts, self.debug)
    }
}
