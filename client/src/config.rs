use anyhow::{ensure, Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::schedule::RefreshIntervals;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TOKEN_FILE: &str = ".ccl-token";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub token_file: PathBuf,
    pub sync_interval_seconds: u64,
    pub task_refresh_interval_seconds: u64,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_url: env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            token_file: env::var("TOKEN_FILE")
                .unwrap_or_else(|_| DEFAULT_TOKEN_FILE.to_string())
                .into(),
            sync_interval_seconds: interval_from_env("SYNC_INTERVAL_SECONDS", 600)?,
            task_refresh_interval_seconds: interval_from_env("TASK_REFRESH_INTERVAL_SECONDS", 3600)?,
        })
    }

    pub fn intervals(&self) -> RefreshIntervals {
        RefreshIntervals {
            sync: Duration::from_secs(self.sync_interval_seconds),
            tasks: Duration::from_secs(self.task_refresh_interval_seconds),
        }
    }
}

fn interval_from_env(name: &str, default: u64) -> Result<u64> {
    let seconds: u64 = match env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{} must be a valid number", name))?,
        Err(_) => default,
    };
    ensure!(seconds > 0, "{} must be greater than zero", name);
    Ok(seconds)
}
