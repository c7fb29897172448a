/// Generation-result cache — fingerprints and a TTL key/value seam.
///
/// Cache access is advisory. A backend failure never aborts generation:
/// [`cache_get`] treats it as a miss and [`cache_set`] as "not cached".

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::schema::story::Story;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
    #[error("cache payload corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

impl CacheError {
    /// Whether the caller may continue as if the cache were empty.
    ///
    /// Every cache failure is recoverable.
    pub fn is_recoverable(&self) -> bool {
        true
    }
}

/// Fingerprint of normalized generation parameters: 64 lowercase hex chars.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the cache key for `(vocabulary, difficulty, content_type)`.
///
/// Vocabulary order does not matter. Every component is length-prefixed
/// in the canonical form, so no two distinct inputs share one.
pub fn build_cache_key<S: AsRef<str>>(
    vocabulary: &[S],
    difficulty: u8,
    content_type: &str,
) -> CacheKey {
    let mut sorted: Vec<&str> = vocabulary.iter().map(AsRef::as_ref).collect();
    sorted.sort_unstable();

    let mut hasher = Sha256::new();
    hasher.update(format!("v{}:", sorted.len()));
    for word in &sorted {
        hasher.update(format!("{}:", word.len()));
        hasher.update(word.as_bytes());
    }
    hasher.update(format!("|d{}|t{}:", difficulty, content_type.len()));
    hasher.update(content_type.as_bytes());

    CacheKey(format!("{:x}", hasher.finalize()))
}

/// A key/value store with per-entry time-to-live.
///
/// Implementations may be in-process or remote; no locking or
/// transactional guarantee is implied.
pub trait ResultCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError>;

    fn set(&self, key: &CacheKey, payload: &str, ttl: Duration) -> Result<(), CacheError>;
}

/// Read and decode the story stored under `key`.
pub fn get_story(cache: &dyn ResultCache, key: &CacheKey) -> Result<Option<Story>, CacheError> {
    let Some(payload) = cache.get(key)? else {
        return Ok(None);
    };
    Ok(Some(serde_json::from_str(&payload)?))
}

/// Encode `story` and store it under `key` for `ttl`.
pub fn put_story(
    cache: &dyn ResultCache,
    key: &CacheKey,
    story: &Story,
    ttl: Duration,
) -> Result<(), CacheError> {
    let payload = serde_json::to_string(story)?;
    cache.set(key, &payload, ttl)
}

/// Read through the cache, logging and swallowing failures as misses.
///
/// An undecodable payload counts as a failure.
pub fn cache_get(cache: &dyn ResultCache, key: &CacheKey) -> Option<Story> {
    match get_story(cache, key) {
        Ok(Some(story)) => {
            tracing::debug!(%key, "cache hit");
            Some(story)
        }
        Ok(None) => {
            tracing::debug!(%key, "cache miss");
            None
        }
        Err(e) => {
            tracing::warn!(%key, "cache read failed, treating as miss: {}", e);
            None
        }
    }
}

/// Write to the cache; returns whether the entry was stored.
pub fn cache_set(cache: &dyn ResultCache, key: &CacheKey, story: &Story, ttl: Duration) -> bool {
    match put_story(cache, key, story, ttl) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(%key, "cache write failed, continuing uncached: {}", e);
            false
        }
    }
}

/// A stored payload and its expiry instant.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub payload: String,
    pub expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now > self.expires_at
    }
}

/// In-process TTL cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<FxHashMap<CacheKey, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every expired entry; returns how many were removed.
    pub fn purge_expired(&self) -> Result<usize, CacheError> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        Ok(before - entries.len())
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, FxHashMap<CacheKey, CacheEntry>>, CacheError> {
        self.entries
            .lock()
            .map_err(|e| CacheError::Unavailable(format!("lock poisoned: {}", e)))
    }
}

impl ResultCache for MemoryCache {
    fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        match entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.payload.clone())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &CacheKey, payload: &str, ttl: Duration) -> Result<(), CacheError> {
        let expires_at = Instant::now()
            .checked_add(ttl)
            .ok_or_else(|| CacheError::Unavailable(format!("ttl out of range: {:?}", ttl)))?;
        let mut entries = self.lock()?;
        entries.insert(
            key.clone(),
            CacheEntry {
                payload: payload.to_string(),
                expires_at,
            },
        );
        Ok(())
    }
}
