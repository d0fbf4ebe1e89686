//! FTP study file retrieval
//!
//! Downloads every file listed at an extracted transfer location into a
//! local study directory. suppaftp only offers a synchronous stream, so the
//! whole transfer for one study runs on the blocking pool.
//!
//! There are no retries: the first connection, login, listing, or transfer
//! failure aborts the request, and any files already written stay on disk.

use std::io::Read;
use std::path::{Path, PathBuf};
use suppaftp::{types::FileType, FtpStream, Mode};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::FtpConfig;

/// Errors raised during study file transfer
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("FTP error: {0}")]
    Ftp(#[from] suppaftp::FtpError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid transfer location: {0}")]
    InvalidLocation(String),
}

/// Downloads study files from the configured FTP server
#[derive(Clone)]
pub struct StudyFetcher {
    config: FtpConfig,
}

impl StudyFetcher {
    pub fn new(config: FtpConfig) -> Self {
        Self { config }
    }

    /// Download every file listed at `location` into `dest`.
    ///
    /// `location` is a full `ftp://host/path` URL as extracted from the
    /// record detail; the host prefix is stripped and the remainder becomes
    /// the remote working directory. Returns the number of files written.
    pub async fn download_study(&self, location: &str, dest: &Path) -> Result<usize, TransferError> {
        let remote_dir = remote_directory(location)?;

        info!(location, dest = %dest.display(), "downloading study files");

        let config = self.config.clone();
        let dest = PathBuf::from(dest);

        tokio::task::spawn_blocking(move || Self::download_study_sync(&config, &remote_dir, &dest))
            .await
            .map_err(|e| {
                TransferError::Io(std::io::Error::other(format!(
                    "FTP download task panicked: {e}"
                )))
            })?
    }

    /// Synchronous transfer of one study directory
    fn download_study_sync(
        config: &FtpConfig,
        remote_dir: &str,
        dest: &Path,
    ) -> Result<usize, TransferError> {
        debug!("Connecting to FTP server: {}:{}", config.host, config.port);

        let mut ftp = FtpStream::connect(format!("{}:{}", config.host, config.port))?;

        // Passive mode for firewall/NAT compatibility
        ftp.set_mode(Mode::Passive);

        ftp.login(&config.username, &config.password)?;
        ftp.transfer_type(FileType::Binary)?;

        debug!("Changing to remote directory: {}", remote_dir);
        ftp.cwd(remote_dir)?;

        let files = ftp.nlst(None)?;
        debug!("Remote listing returned {} entries", files.len());

        std::fs::create_dir_all(dest)?;

        let mut written = 0;
        for file in &files {
            // Some servers list full paths; keep only the final segment for
            // the local file name.
            let name = file.rsplit('/').next().unwrap_or(file);
            if name.is_empty() {
                continue;
            }

            let mut reader = ftp.retr_as_buffer(file)?;
            let mut data = Vec::new();
            reader.read_to_end(&mut data)?;

            let local_path = dest.join(name);
            std::fs::write(&local_path, &data)?;
            info!(file = %local_path.display(), bytes = data.len(), "file downloaded");
            written += 1;
        }

        if let Err(e) = ftp.quit() {
            warn!("Failed to quit FTP session gracefully: {}", e);
        }

        Ok(written)
    }
}

/// Derive the remote working directory from an `ftp://` URL by stripping
/// the scheme and host.
fn remote_directory(location: &str) -> Result<String, TransferError> {
    let without_scheme = location
        .strip_prefix("ftp://")
        .ok_or_else(|| TransferError::InvalidLocation(location.to_string()))?;

    match without_scheme.split_once('/') {
        Some((_host, path)) => Ok(format!("/{path}")),
        // URL names the host only; treat the server root as the directory
        None => Ok("/".to_string()),
    }
}
