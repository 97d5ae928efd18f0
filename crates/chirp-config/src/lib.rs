pub mod config;
pub mod database;
pub mod hosts;

pub use config::{AppConfig, ConfigError, ServerConfig};
pub use database::DatabaseConfig;
pub use hosts::HostPolicy;
