use std::{
    hash::{DefaultHasher, Hash, Hasher},
    path::{Path, PathBuf},
};

use tokio::fs;

use crate::{
    error::Result,
    types::{SummarizeResponse, SummaryLength},
};

/// Cache directory for one transcript summarized by one model.
pub fn get_cache_dir(transcript: &str, model: &str) -> PathBuf {
    get_root_cache_dir().join(cache_key(transcript, model))
}

pub fn get_root_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("kratko")
}

pub fn cache_key(transcript: &str, model: &str) -> String {
    let mut hasher = DefaultHasher::new();
    transcript.hash(&mut hasher);
    model.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

/// Get the path for a cached summary of the given length
pub fn get_response_path(cache_dir: &Path, length: SummaryLength) -> PathBuf {
    cache_dir.join(format!("summary_{}.json", length.name()))
}

/// Load a cached response; `None` when absent or unreadable.
pub async fn load_response(path: &Path) -> Option<SummarizeResponse> {
    let content = fs::read_to_string(path).await.ok()?;
    match serde_json::from_str(&content) {
        Ok(response) => Some(response),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt cache entry");
            None
        }
    }
}

pub async fn save_response(path: &Path, response: &SummarizeResponse) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(response)?;
    fs::write(path, json).await?;
    tracing::debug!(path = %path.display(), "summary cached");
    Ok(())
}
