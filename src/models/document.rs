// file: src/models/document.rs
// description: corpus document model shared by the lexical and similarity scorers
// reference: internal data structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,

    /// Terms matched by the BM25 scorer, in corpus order.
    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default)]
    pub metadata: BTreeMap<String, String>,

    /// Per-document weight applied to the similarity score, in (0, 1].
    #[serde(default = "default_embedding_norm")]
    pub embedding_norm: f64,
}

fn default_embedding_norm() -> f64 {
    1.0
}

impl Document {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            keywords: Vec::new(),
            metadata: BTreeMap::new(),
            embedding_norm: default_embedding_norm(),
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_embedding_norm(mut self, norm: f64) -> Self {
        self.embedding_norm = norm;
        self
    }

    /// Whitespace word count, the `dl` term of BM25.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}
