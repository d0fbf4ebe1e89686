//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Server Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 5000;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default NCBI E-utilities search endpoint.
pub const DEFAULT_ESEARCH_URL: &str =
    "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";

/// Default NCBI E-utilities detail endpoint.
pub const DEFAULT_EFETCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

/// Default timeout for NCBI requests in seconds.
pub const DEFAULT_NCBI_TIMEOUT_SECS: u64 = 10;

/// Default NCBI FTP host for study file downloads.
pub const DEFAULT_FTP_HOST: &str = "ftp.ncbi.nlm.nih.gov";

/// Default FTP control port.
pub const DEFAULT_FTP_PORT: u16 = 21;

/// Default base directory for downloaded study files.
pub const DEFAULT_BASE_DIR: &str = "./db_scRNAseq";

/// Default CORS allowed origin for local development.
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ncbi: NcbiConfig,
    pub ftp: FtpConfig,
    pub storage: StorageConfig,
    pub cors: CorsConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
}

/// NCBI E-utilities configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NcbiConfig {
    pub esearch_url: String,
    pub efetch_url: String,
    /// Forwarded as the `api_key` query parameter when present. Absent means
    /// requests go out without a credential and NCBI may reject them.
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

/// FTP server configuration for study file downloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

/// Local filesystem configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory under which per-study subdirectories are written
    pub base_dir: PathBuf,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            server: ServerConfig {
                host: std::env::var("GEOFETCH_HOST")
                    .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
                port: std::env::var("GEOFETCH_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_SERVER_PORT),
                shutdown_timeout_secs: std::env::var("GEOFETCH_SHUTDOWN_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
            },
            ncbi: NcbiConfig {
                esearch_url: std::env::var("NCBI_ESEARCH_URL")
                    .unwrap_or_else(|_| DEFAULT_ESEARCH_URL.to_string()),
                efetch_url: std::env::var("NCBI_EFETCH_URL")
                    .unwrap_or_else(|_| DEFAULT_EFETCH_URL.to_string()),
                api_key: std::env::var("NCBI_API_KEY").ok().filter(|k| !k.is_empty()),
                timeout_secs: std::env::var("NCBI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_NCBI_TIMEOUT_SECS),
            },
            ftp: FtpConfig {
                host: std::env::var("GEOFETCH_FTP_HOST")
                    .unwrap_or_else(|_| DEFAULT_FTP_HOST.to_string()),
                port: std::env::var("GEOFETCH_FTP_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_FTP_PORT),
                username: std::env::var("GEOFETCH_FTP_USERNAME")
                    .unwrap_or_else(|_| "anonymous".to_string()),
                password: std::env::var("GEOFETCH_FTP_PASSWORD")
                    .unwrap_or_else(|_| "anonymous@".to_string()),
            },
            storage: StorageConfig {
                base_dir: std::env::var("GEOFETCH_BASE_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_BASE_DIR)),
            },
            cors: CorsConfig {
                allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_CORS_ALLOWED_ORIGIN.to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect(),
                allow_credentials: std::env::var("CORS_ALLOW_CREDENTIALS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(true),
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.ncbi.esearch_url.is_empty() || self.ncbi.efetch_url.is_empty() {
            anyhow::bail!("NCBI endpoint URLs cannot be empty");
        }

        if self.ncbi.timeout_secs == 0 {
            anyhow::bail!("NCBI timeout must be greater than 0");
        }

        if self.ftp.host.is_empty() {
            anyhow::bail!("FTP host cannot be empty");
        }

        if self.storage.base_dir.as_os_str().is_empty() {
            anyhow::bail!("Base directory cannot be empty");
        }

        if self.cors.allowed_origins.is_empty() {
            tracing::warn!("No CORS origins configured - all origins will be allowed");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            },
            ncbi: NcbiConfig {
                esearch_url: DEFAULT_ESEARCH_URL.to_string(),
                efetch_url: DEFAULT_EFETCH_URL.to_string(),
                api_key: None,
                timeout_secs: DEFAULT_NCBI_TIMEOUT_SECS,
            },
            ftp: FtpConfig {
                host: DEFAULT_FTP_HOST.to_string(),
                port: DEFAULT_FTP_PORT,
                username: "anonymous".to_string(),
                password: "anonymous@".to_string(),
            },
            storage: StorageConfig {
                base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            },
            cors: CorsConfig {
                allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGIN.to_string()],
                allow_credentials: true,
            },
        }
    }
}
