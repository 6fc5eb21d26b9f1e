//! Configuration module for the bus registry backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// File name of the driver collection inside the data directory.
pub const DRIVERS_FILE: &str = "busDrivers.json";
/// File name of the bus collection inside the data directory.
pub const BUSES_FILE: &str = "buses.json";

const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret for the admin routes (admin routes deny all when unset)
    pub admin_token: Option<String>,
    /// Directory holding the JSON collections
    pub data_dir: PathBuf,
    /// Directory uploaded files are written to
    pub uploads_dir: PathBuf,
    /// Optional directory of client assets served at `/`
    pub static_dir: Option<PathBuf>,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Request body limit, covers multipart uploads
    pub max_upload_bytes: usize,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
}

/// Invalid configuration value.
#[derive(Debug)]
pub struct ConfigError(pub String);

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid configuration: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let admin_token = env::var("BUS_ADMIN_TOKEN").ok().filter(|s| !s.is_empty());

        let data_dir = env::var("BUS_DATA_DIR")
            .unwrap_or_else(|_| "./data".to_string())
            .into();

        let uploads_dir = env::var("BUS_UPLOADS_DIR")
            .unwrap_or_else(|_| "./uploads".to_string())
            .into();

        let static_dir = env::var("BUS_STATIC_DIR").ok().map(PathBuf::from);

        let bind_addr = env::var("BUS_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3001".to_string())
            .parse()
            .map_err(|e| ConfigError(format!("BUS_BIND_ADDR: {}", e)))?;

        let max_upload_bytes = match env::var("BUS_MAX_UPLOAD_BYTES") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| ConfigError(format!("BUS_MAX_UPLOAD_BYTES: {}", e)))?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let log_level = env::var("BUS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_json = env::var("BUS_LOG_JSON")
            .map(|v| matches!(v.as_str(), "1" | "true"))
            .unwrap_or(false);

        Ok(Self {
            admin_token,
            data_dir,
            uploads_dir,
            static_dir,
            bind_addr,
            max_upload_bytes,
            log_level,
            log_json,
        })
    }

    pub fn drivers_path(&self) -> PathBuf {
        self.data_dir.join(DRIVERS_FILE)
    }

    pub fn buses_path(&self) -> PathBuf {
        self.data_dir.join(BUSES_FILE)
    }
}
