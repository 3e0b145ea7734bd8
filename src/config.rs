// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{AglaError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    pub graph: GraphConfig,
    pub grading: GradingConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrievalConfig {
    /// BM25 term-frequency saturation.
    pub k1: f64,
    /// BM25 length normalization.
    pub b: f64,
    /// Fixed average document length used by the BM25 denominator.
    pub avg_doc_len: f64,
    pub rrf_k: usize,
    /// Rank assumed for a document absent from one of the fused lists.
    pub missing_rank: usize,
    pub default_limit: usize,
    pub compact_dimensions: usize,
    pub full_dimensions: usize,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CorpusConfig {
    /// JSON document array; the builtin AGLA corpus is used when unset.
    pub documents_path: Option<PathBuf>,
    /// JSON knowledge graph; the builtin graph is used when unset.
    pub graph_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GraphConfig {
    pub default_depth: usize,
    pub max_depth: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GradingConfig {
    pub max_retries: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    pub ttl_secs: u64,
    pub max_key_len: usize,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("AGLA")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| AglaError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| AglaError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            retrieval: RetrievalConfig {
                k1: 1.2,
                b: 0.75,
                avg_doc_len: 100.0,
                rrf_k: 60,
                missing_rank: 1000,
                default_limit: 10,
                compact_dimensions: 256,
                full_dimensions: 1024,
            },
            corpus: CorpusConfig::default(),
            graph: GraphConfig {
                default_depth: 2,
                max_depth: 5,
            },
            grading: GradingConfig { max_retries: 2 },
            cache: CacheConfig {
                ttl_secs: 3600,
                max_key_len: 100,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        let retrieval = &self.retrieval;

        if retrieval.default_limit == 0 {
            return Err(AglaError::Config(
                "default_limit must be greater than 0".to_string(),
            ));
        }

        if !(retrieval.avg_doc_len > 0.0) {
            return Err(AglaError::Config(
                "avg_doc_len must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&retrieval.b) {
            return Err(AglaError::Config("b must be within [0, 1]".to_string()));
        }

        if !(retrieval.k1 >= 0.0) {
            return Err(AglaError::Config("k1 must not be negative".to_string()));
        }

        if retrieval.rrf_k == 0 {
            return Err(AglaError::Config(
                "rrf_k must be greater than 0".to_string(),
            ));
        }

        if self.graph.default_depth > self.graph.max_depth {
            return Err(AglaError::Config(format!(
                "graph default_depth ({}) exceeds max_depth ({})",
                self.graph.default_depth, self.graph.max_depth
            )));
        }

        if self.cache.max_key_len == 0 {
            return Err(AglaError::Config(
                "cache max_key_len must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
