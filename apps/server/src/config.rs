use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

/// Server settings read from `TIRTA_*` environment variables (and `.env`).
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// `text` or `json`.
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("TIRTA_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid TIRTA_LISTEN_ADDR")?;
        let db_path = std::env::var("TIRTA_DB_PATH").unwrap_or_else(|_| "./db/tirta.db".into());
        let cors_allow = std::env::var("TIRTA_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("TIRTA_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let log_format = std::env::var("TIRTA_LOG_FORMAT").unwrap_or_else(|_| "text".into());
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            log_format,
        })
    }
}
