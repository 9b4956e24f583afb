use std::path::PathBuf;

use thiserror::Error;

/// Failures of the catalog pipeline: fetching the remote payload and
/// reading or writing the cached snapshot.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("fetching catalog from {url}: {reason}")]
    FetchFailure { url: String, reason: String },

    #[error("no cached catalog at {}", .0.display())]
    CacheMissing(PathBuf),

    #[error("reading cached catalog {}", .path.display())]
    CacheRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("writing cached catalog {}", .path.display())]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cached catalog {} is not a valid snapshot", .path.display())]
    CacheCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    pub fn fetch(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        CatalogError::FetchFailure {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}
