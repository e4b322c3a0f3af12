//! Input resolution: drain a path, standard input, or URL into memory.
//!
//! The SAUCE check needs the true end of the document, so every source is
//! read to completion before anything else happens. Art files are small;
//! whole-document buffering is fine.

use crate::error::AnsicatError;
use std::path::PathBuf;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, info};

/// Input string that selects standard input.
pub const STDIN: &str = "-";

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    Local(PathBuf),
    Url(String),
}

impl InputSource {
    /// Classify a user-supplied input string.
    pub fn parse(input: &str) -> Self {
        if input == STDIN {
            InputSource::Stdin
        } else if is_url(input) {
            InputSource::Url(input.to_string())
        } else {
            InputSource::Local(PathBuf::from(input))
        }
    }
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Read the whole document named by `input`.
pub async fn read_input(input: &str, timeout_secs: u64) -> Result<Vec<u8>, AnsicatError> {
    match InputSource::parse(input) {
        InputSource::Stdin => read_all(tokio::io::stdin(), "<stdin>").await,
        InputSource::Local(path) => read_local(path).await,
        InputSource::Url(url) => download_url(&url, timeout_secs).await,
    }
}

/// Drain any async reader into memory.
pub async fn read_all<R>(mut reader: R, label: &str) -> Result<Vec<u8>, AnsicatError>
where
    R: AsyncRead + Unpin,
{
    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .await
        .map_err(|e| AnsicatError::ReadFailed {
            input: label.to_string(),
            source: e,
        })?;
    debug!("Read {} bytes from {}", data.len(), label);
    Ok(data)
}

async fn read_local(path: PathBuf) -> Result<Vec<u8>, AnsicatError> {
    match tokio::fs::read(&path).await {
        Ok(data) => {
            debug!("Read {} bytes from {}", data.len(), path.display());
            Ok(data)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(AnsicatError::FileNotFound { path })
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(AnsicatError::PermissionDenied { path })
        }
        Err(e) => Err(AnsicatError::ReadFailed {
            input: path.display().to_string(),
            source: e,
        }),
    }
}

/// Download a URL into memory.
async fn download_url(url: &str, timeout_secs: u64) -> Result<Vec<u8>, AnsicatError> {
    info!("Downloading art from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| AnsicatError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let map_err = |e: reqwest::Error| {
        if e.is_timeout() {
            AnsicatError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            AnsicatError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    };

    let response = client.get(url).send().await.map_err(map_err)?;

    if !response.status().is_success() {
        return Err(AnsicatError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let bytes = response.bytes().await.map_err(map_err)?;
    info!("Downloaded {} bytes", bytes.len());
    Ok(bytes.to_vec())
}
