//! Shared plumbing for the `laborrag` and `laborrag-server` binaries.

use std::path::Path;

use anyhow::Context;
use laborrag_core::config::{Config, Settings};
use tracing_subscriber::EnvFilter;

pub mod server;

/// Logs go to stderr; `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

/// Settings from an explicit config file, or from `config.toml` in the
/// working directory when none is given.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let config = match config_path {
        Some(path) => {
            let env_name = std::env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
            Config::load_from(path, &env_name)
        }
        None => Config::load(),
    }
    .context("failed to load configuration")?;
    config.settings()
}
