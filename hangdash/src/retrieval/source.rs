//! Fragment sources
//!
//! A source turns a fragment URL into a parsed [`RawProfile`]. The retrieval
//! flow only sees this trait, so the transport can be swapped without
//! touching normalization.

use crate::domain::RetrievalError;
use crate::profile::RawProfile;
use log::debug;
use std::future::Future;
use std::path::{Path, PathBuf};

pub trait FragmentSource: Send + Sync + 'static {
    /// Fetch and parse the fragment at `url`.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<RawProfile, RetrievalError>> + Send;
}

/// Parse a fetched document, attributing failures to `url`.
///
/// # Errors
/// Returns `ParseFailure` if `body` is not a well-formed fragment.
pub fn parse_fragment(url: &str, body: &[u8]) -> Result<RawProfile, RetrievalError> {
    serde_json::from_slice(body).map_err(|source| RetrievalError::ParseFailure { url: url.to_string(), source })
}

/// Serves fragments from a local mirror of the publishing host.
///
/// A URL maps to the file named by its last path segment inside `root`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, url: &str) -> PathBuf {
        let file_name = url.rsplit('/').next().unwrap_or(url);
        self.root.join(file_name)
    }
}

impl FragmentSource for DirectorySource {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<RawProfile, RetrievalError>> + Send {
        let path = self.path_for(url);
        let url = url.to_string();
        async move {
            debug!("Reading {url} from {}", path.display());
            let body = tokio::fs::read(&path)
                .await
                .map_err(|e| RetrievalError::FetchFailure { url: url.clone(), reason: format!("{}: {e}", path.display()) })?;
            parse_fragment(&url, &body)
        }
    }
}
