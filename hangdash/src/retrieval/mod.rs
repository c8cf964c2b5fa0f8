//! Profile retrieval
//!
//! Fetches the fragments that make up one profile and hands them to the
//! normalizer:
//!
//! ```text
//! profile_url(None) ──► index fragment
//!                          │ isSplit?
//!                          ├─ no  ──► normalize_fragments([index])
//!                          └─ yes ──► one task per thread name (concurrent)
//!                                      profile_url(Some(name)) ──► fragment
//!                                      all succeed ──► normalize_fragments(per-thread fragments)
//! ```
//!
//! The first failed fetch or parse aborts the whole retrieval; a partial
//! profile is never returned.

pub mod source;
pub mod url;

use crate::domain::RetrievalError;
use crate::profile::{normalize_fragments, normalize_split_fragments, Profile, RawProfile, RawThreads};
use log::info;
use std::sync::Arc;

pub use source::{parse_fragment, DirectorySource, FragmentSource};
pub use url::{profile_url, ProfileRequest, DEFAULT_BASE_URL};

/// Retrieve and normalize the profile described by `request`.
///
/// # Errors
/// Returns the first fetch, parse, or normalization failure.
pub async fn retrieve_profile<S: FragmentSource>(
    source: Arc<S>,
    base_url: &str,
    request: &ProfileRequest,
) -> Result<Profile, RetrievalError> {
    let index_url = profile_url(base_url, request, None);
    info!("Retrieving profile from {index_url}");
    let index = source.fetch(&index_url).await?;

    if index.is_split {
        let fragments = fetch_thread_fragments(&source, base_url, request, index).await?;
        Ok(normalize_split_fragments(fragments)?)
    } else {
        Ok(normalize_fragments(vec![index])?)
    }
}

/// Fetch every per-thread fragment listed by a split index, concurrently.
async fn fetch_thread_fragments<S: FragmentSource>(
    source: &Arc<S>,
    base_url: &str,
    request: &ProfileRequest,
    index: RawProfile,
) -> Result<Vec<RawProfile>, RetrievalError> {
    let names = match index.threads {
        RawThreads::Names(names) => names,
        // A split index with no thread list parses as an empty thread array;
        // merging zero fragments then fails with NoFragments.
        RawThreads::Threads(threads) if threads.is_empty() => Vec::new(),
        RawThreads::Threads(_) => {
            return Err(RetrievalError::FetchFailure {
                url: profile_url(base_url, request, None),
                reason: "split profile does not list thread names".to_string(),
            })
        }
    };
    info!("Profile is split across {} thread fragments", names.len());

    let handles: Vec<_> = names
        .iter()
        .map(|name| {
            let source = Arc::clone(source);
            let url = profile_url(base_url, request, Some(name));
            tokio::spawn(async move { source.fetch(&url).await })
        })
        .collect();

    let mut fragments = Vec::with_capacity(handles.len());
    for handle in handles {
        let fragment = handle.await.map_err(|e| RetrievalError::TaskFailed(e.to_string()))??;
        fragments.push(fragment);
    }
    Ok(fragments)
}
