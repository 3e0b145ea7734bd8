// file: src/cache/mod.rs
// description: query-response cache keyed by a normalized bag of words
// reference: semantic caching for RAG pipelines

use crate::error::{AglaError, Result};
use crate::extractor::patterns::CACHE_KEY_PUNCTUATION;
use crate::models::search_result::lenient_query;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CacheOperation {
    Get,
    Set,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, schemars::JsonSchema)]
pub struct CacheRequest {
    /// "get" to look up a cached response, "set" to store one
    pub operation: Option<CacheOperation>,

    /// Query whose normalized form is the cache key
    #[serde(default, deserialize_with = "lenient_query")]
    #[schemars(with = "String")]
    pub query: String,

    /// Response to store (set only)
    #[serde(default)]
    pub response: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LookupMetadata {
    Hit {
        cache_key: String,
        age_seconds: u64,
        hit_count: u64,
    },
    Miss {
        cache_key: String,
        cache_size: usize,
        recommendation: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheLookup {
    pub hit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached_response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub metadata: LookupMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreMetadata {
    pub cache_key: String,
    pub ttl_seconds: u64,
    pub cache_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStore {
    pub message: String,
    pub metadata: StoreMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CacheReply {
    Lookup(CacheLookup),
    Store(CacheStore),
}

#[derive(Debug, Clone)]
struct CacheEntry {
    response: String,
    stored_at: Instant,
    hits: u64,
}

#[derive(Debug)]
pub struct SemanticCache {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
    max_key_len: usize,
}

impl SemanticCache {
    pub fn new(ttl: Duration, max_key_len: usize) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            max_key_len,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lower-case, strip punctuation, then sort the words so that
    /// reordered phrasings share a key.
    pub fn normalize_key(&self, query: &str) -> String {
        let lowered = query.to_lowercase();
        let stripped = CACHE_KEY_PUNCTUATION.replace_all(lowered.trim(), "");
        let mut words: Vec<&str> = stripped.split(' ').collect();
        words.sort_unstable();
        words.join("_").chars().take(self.max_key_len).collect()
    }

    pub fn get(&mut self, query: &str) -> CacheLookup {
        let key = self.normalize_key(query);
        debug!("Cache lookup: {}", key);

        let expired = self
            .entries
            .get(&key)
            .is_some_and(|entry| entry.stored_at.elapsed() >= self.ttl);
        if expired {
            debug!("Evicting expired cache entry: {}", key);
            self.entries.remove(&key);
        }

        match self.entries.get_mut(&key) {
            Some(entry) => {
                entry.hits += 1;
                CacheLookup {
                    hit: true,
                    cached_response: Some(entry.response.clone()),
                    message: None,
                    metadata: LookupMetadata::Hit {
                        cache_key: key,
                        age_seconds: entry.stored_at.elapsed().as_secs(),
                        hit_count: entry.hits,
                    },
                }
            }
            None => CacheLookup {
                hit: false,
                cached_response: None,
                message: Some("No semantically similar query found in cache.".to_string()),
                metadata: LookupMetadata::Miss {
                    cache_key: key,
                    cache_size: self.entries.len(),
                    recommendation: "Proceed with full AGLA pipeline and cache the result.".to_string(),
                },
            },
        }
    }

    pub fn set(&mut self, query: &str, response: &str) -> Result<CacheStore> {
        if response.is_empty() {
            return Err(AglaError::InvalidRequest(
                "No response provided for caching.".to_string(),
            ));
        }

        let key = self.normalize_key(query);
        info!("Caching response for: {}", key);
        self.evict_expired();
        self.entries.insert(
            key.clone(),
            CacheEntry {
                response: response.to_string(),
                stored_at: Instant::now(),
                hits: 0,
            },
        );

        Ok(CacheStore {
            message: "Response successfully cached for future semantic matches.".to_string(),
            metadata: StoreMetadata {
                cache_key: key,
                ttl_seconds: self.ttl.as_secs(),
                cache_size: self.entries.len(),
            },
        })
    }

    fn evict_expired(&mut self) {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        let evicted = before - self.entries.len();
        if evicted > 0 {
            debug!("Evicted {} expired cache entries", evicted);
        }
    }

    pub fn handle(&mut self, request: &CacheRequest) -> Result<CacheReply> {
        info!("Semantic cache {:?}: {:?}", request.operation, request.query);
        match request.operation {
            Some(CacheOperation::Get) => Ok(CacheReply::Lookup(self.get(&request.query))),
            Some(CacheOperation::Set) => {
                let response = request.response.as_deref().unwrap_or("");
                self.set(&request.query, response).map(CacheReply::Store)
            }
            None => Err(AglaError::InvalidRequest(
                "Missing operation. Use 'get' or 'set'.".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    fn cache() -> SemanticCache {
        SemanticCache::new(Duration::from_secs(3600), 100)
    }

    #[test]
    fn test_normalize_key_sorts_words() {
        let cache = cache();
        assert_eq!(cache.normalize_key("  What is AGLA? "), "agla_is_what");
        assert_eq!(
            cache.normalize_key("agla is what"),
            cache.normalize_key("What is AGLA!")
        );
    }

    #[test]
    fn test_normalize_key_keeps_empty_words() {
        // single-space split: double spaces leave an empty word that sorts first
        assert_eq!(cache().normalize_key("b  a"), "_a_b");
    }

    #[test]
    fn test_normalize_key_truncates() {
        let cache = SemanticCache::new(Duration::from_secs(1), 5);
        assert_eq!(cache.normalize_key("zebra apple"), "apple");
    }

    #[test]
    fn test_miss_then_hit() {
        let mut cache = cache();
        let miss = cache.get("what is agla");
        assert!(!miss.hit);

        cache.set("What is AGLA?", "An adaptive retrieval stack").unwrap();
        let first = cache.get("agla is what");
        let second = cache.get("agla is what");

        assert_eq!(first.cached_response.as_deref(), Some("An adaptive retrieval stack"));
        match second.metadata {
            LookupMetadata::Hit { hit_count, .. } => assert_eq!(hit_count, 2),
            other => panic!("expected hit, got {:?}", other),
        }
    }

    #[test]
    fn test_expired_entry_is_evicted() {
        let mut cache = SemanticCache::new(Duration::ZERO, 100);
        cache.set("q", "r").unwrap();
        assert_eq!(cache.len(), 1);

        let lookup = cache.get("q");
        assert!(!lookup.hit);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_sweeps_expired_entries() {
        let mut expiring = SemanticCache::new(Duration::ZERO, 100);
        for i in 0..100 {
            expiring.set(&format!("query {}", i), "r").unwrap();
        }
        // each set clears what came before it; only the newest entry remains
        assert_eq!(expiring.len(), 1);

        let mut live = cache();
        live.set("first", "r").unwrap();
        live.set("second", "r").unwrap();
        assert_eq!(live.len(), 2);
    }

    #[test]
    fn test_non_string_query_reads_as_empty() {
        let request: CacheRequest = serde_json::from_str(r#"{"operation": "get", "query": 42}"#).unwrap();
        assert_eq!(request.query, "");
    }

    #[test]
    fn test_set_requires_response() {
        let err = cache().set("q", "").unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_handle_dispatches_operations() {
        let mut cache = cache();
        let store = cache
            .handle(&CacheRequest {
                operation: Some(CacheOperation::Set),
                query: "rrf fusion".to_string(),
                response: Some("k = 60".to_string()),
            })
            .unwrap();
        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["metadata"]["ttl_seconds"], 3600);
        assert_eq!(json["metadata"]["cache_size"], 1);

        let missing = cache.handle(&CacheRequest::default()).unwrap_err();
        assert!(missing.is_client_error());
    }

    #[tokio::test]
    async fn test_shared_cache_across_tasks() {
        let shared = Arc::new(Mutex::new(cache()));

        let writer = Arc::clone(&shared);
        tokio::spawn(async move {
            writer.lock().await.set("hybrid search", "bm25 + jaccard").unwrap();
        })
        .await
        .unwrap();

        let lookup = shared.lock().await.get("search hybrid");
        assert!(lookup.hit);
    }
}
