use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Builder configuration loaded from environment variables.
/// Everything has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
    pub save_debounce: Duration,
    pub commit_debounce: Duration,
    pub print_settle: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            data_dir: PathBuf::from(env_or("CV_DATA_DIR", "./.cv-builder")),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            save_debounce: millis_env("SAVE_DEBOUNCE_MS", 500)?,
            commit_debounce: millis_env("COMMIT_DEBOUNCE_MS", 250)?,
            print_settle: millis_env("PRINT_SETTLE_MS", 150)?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn millis_env(key: &str, default: u64) -> Result<Duration> {
    let millis = match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{key} must be a whole number of milliseconds"))?,
        Err(_) => default,
    };
    Ok(Duration::from_millis(millis))
}

#[cfg(test)]
impl Config {
    /// Defaults rooted at `data_dir`, without touching the environment.
    pub fn for_tests(data_dir: PathBuf) -> Self {
        Config {
            data_dir,
            port: 0,
            rust_log: "debug".to_string(),
            save_debounce: Duration::from_millis(500),
            commit_debounce: Duration::from_millis(250),
            print_settle: Duration::from_millis(150),
        }
    }
}
