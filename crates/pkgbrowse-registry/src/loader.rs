//! Snapshot retrieval from a URL or a local file.

use std::{
    fmt, fs,
    io::{self, Read},
    path::PathBuf,
};

use tracing::debug;
use ureq::http::header::{CACHE_CONTROL, PRAGMA};
use url::Url;

use crate::{
    error::{ErrorContext, RegistryError, Result},
    http_client::SHARED_AGENT,
    snapshot::SnapshotDocument,
};

/// Magic bytes for Zstandard compressed files.
pub const ZST_MAGIC_BYTES: [u8; 4] = [0x28, 0xb5, 0x2f, 0xfd];

/// Anything able to produce a snapshot document.
///
/// The catalog functions are written against this trait so callers can feed
/// them a remote source, a file, or an in-memory document.
pub trait SnapshotLoader {
    fn load(&self) -> Result<SnapshotDocument>;
}

impl SnapshotLoader for SnapshotDocument {
    fn load(&self) -> Result<SnapshotDocument> {
        Ok(self.clone())
    }
}

impl<L: SnapshotLoader + ?Sized> SnapshotLoader for &L {
    fn load(&self) -> Result<SnapshotDocument> {
        (**self).load()
    }
}

/// Where a snapshot lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSource {
    Remote(String),
    File(PathBuf),
}

impl SnapshotSource {
    /// Interprets `location` as a remote source when it carries an http(s)
    /// scheme, and as a file path otherwise.
    pub fn parse(location: &str) -> Result<Self> {
        let location = location.trim();
        if location.is_empty() {
            return Err(RegistryError::Custom(
                "snapshot location is empty".to_string(),
            ));
        }

        if location.starts_with("http://") || location.starts_with("https://") {
            Url::parse(location).map_err(|err| RegistryError::InvalidUrl(err.to_string()))?;
            Ok(Self::Remote(location.to_string()))
        } else {
            Ok(Self::File(PathBuf::from(location)))
        }
    }
}

impl fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl SnapshotLoader for SnapshotSource {
    fn load(&self) -> Result<SnapshotDocument> {
        let content = match self {
            Self::Remote(url) => fetch_remote(url)?,
            Self::File(path) => {
                debug!("Reading snapshot from {}", path.display());
                fs::read(path).with_context(|| format!("reading snapshot {}", path.display()))?
            }
        };

        decode_snapshot(&content)
    }
}

/// Downloads the raw bytes of a remote snapshot.
///
/// A response with a non-success status is a failure; the body is never
/// interpreted in that case.
pub fn fetch_remote(url: &str) -> Result<Vec<u8>> {
    Url::parse(url).map_err(|err| RegistryError::InvalidUrl(err.to_string()))?;

    debug!("Fetching snapshot from {}", url);

    let resp = SHARED_AGENT
        .get(url)
        .header(CACHE_CONTROL, "no-cache")
        .header(PRAGMA, "no-cache")
        .call()
        .map_err(|err| RegistryError::FailedToFetchRemote(err.to_string()))?;

    if !resp.status().is_success() {
        let msg = format!("{} [{}]", url, resp.status());
        return Err(RegistryError::FailedToFetchRemote(msg));
    }

    Ok(resp.into_body().with_config().limit(u64::MAX).read_to_vec()?)
}

/// Parses snapshot bytes, decompressing them first when they carry the
/// zstd magic.
pub fn decode_snapshot(content: &[u8]) -> Result<SnapshotDocument> {
    if content.iter().all(u8::is_ascii_whitespace) {
        return Err(RegistryError::EmptySnapshot);
    }

    if content.len() >= 4 && content[..4] == ZST_MAGIC_BYTES {
        let mut decoder = zstd::Decoder::new(content)
            .map_err(|e| RegistryError::Custom(format!("creating zstd decoder: {e}")))?;
        let mut decoded = Vec::new();
        decoder
            .read_to_end(&mut decoded)
            .map_err(|err: io::Error| {
                RegistryError::IoError {
                    action: "decoding zstd snapshot".to_string(),
                    source: err,
                }
            })?;
        debug!(
            "Decompressed snapshot: {} -> {} bytes",
            content.len(),
            decoded.len()
        );
        return Ok(serde_json::from_slice(&decoded)?);
    }

    Ok(serde_json::from_slice(content)?)
}
