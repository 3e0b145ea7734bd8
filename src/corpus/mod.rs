// file: src/corpus/mod.rs
// description: immutable document corpus with load-time validation
// reference: internal module structure

mod builtin;

use crate::error::{AglaError, Result};
use crate::models::Document;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Fixed document collection scored by the retrieval module.
///
/// Documents are validated once when the corpus is built and never mutated
/// afterwards, so scoring over a `Corpus` is a pure function of the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    pub fn from_documents(documents: Vec<Document>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(documents.len());

        for (index, doc) in documents.iter().enumerate() {
            if doc.id.trim().is_empty() {
                return Err(AglaError::Corpus(format!(
                    "document at index {} has an empty id",
                    index
                )));
            }

            if !seen.insert(doc.id.as_str()) {
                return Err(AglaError::Corpus(format!("duplicate document id: {}", doc.id)));
            }

            if doc.keywords.iter().any(|kw| kw.trim().is_empty()) {
                return Err(AglaError::Corpus(format!(
                    "document {} has an empty keyword",
                    doc.id
                )));
            }

            if !doc.embedding_norm.is_finite() || doc.embedding_norm <= 0.0 || doc.embedding_norm > 1.0 {
                return Err(AglaError::Corpus(format!(
                    "document {} has embedding_norm {} outside (0, 1]",
                    doc.id, doc.embedding_norm
                )));
            }
        }

        debug!("Corpus validated: {} documents", documents.len());
        Ok(Self { documents })
    }

    /// The eight AGLA reference documents.
    pub fn builtin() -> Self {
        Self {
            documents: builtin::agla_documents(),
        }
    }

    /// Load a JSON array of documents.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| AglaError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;

        let documents: Vec<Document> = serde_json::from_str(&raw).map_err(|e| {
            AglaError::Corpus(format!("failed to parse {}: {}", path.display(), e))
        })?;

        let corpus = Self::from_documents(documents)?;
        info!("Loaded {} documents from {}", corpus.len(), path.display());
        Ok(corpus)
    }

    /// Load from `path` when given, otherwise fall back to the builtin set.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Largest per-document similarity weight, the upper bound of any similarity score.
    pub fn max_embedding_norm(&self) -> f64 {
        self.documents
            .iter()
            .map(|doc| doc.embedding_norm)
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_corpus_passes_validation() {
        let builtin = Corpus::builtin();
        assert_eq!(builtin.len(), 8);
        let revalidated = Corpus::from_documents(builtin.documents().to_vec()).unwrap();
        assert_eq!(revalidated, builtin);
        assert!((builtin.max_embedding_norm() - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let docs = vec![Document::new("a", "one"), Document::new("a", "two")];
        let err = Corpus::from_documents(docs).unwrap_err();
        assert!(err.to_string().contains("duplicate document id"));
    }

    #[test]
    fn test_bad_embedding_norm_rejected() {
        let docs = vec![Document::new("a", "one").with_embedding_norm(1.5)];
        assert!(Corpus::from_documents(docs).is_err());

        let docs = vec![Document::new("a", "one").with_embedding_norm(f64::NAN)];
        assert!(Corpus::from_documents(docs).is_err());
    }

    #[test]
    fn test_empty_corpus_is_valid() {
        let corpus = Corpus::from_documents(vec![]).unwrap();
        assert!(corpus.is_empty());
        assert_eq!(corpus.max_embedding_norm(), 0.0);
    }

    #[test]
    fn test_load_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": "A", "content": "cache with lru eviction", "keywords": ["cache", "lru"]}},
                {{"id": "B", "content": "entity graph", "keywords": ["graph", "entity"], "embedding_norm": 0.9}}
            ]"#
        )
        .unwrap();

        let corpus = Corpus::load(file.path()).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.get("B").unwrap().embedding_norm, 0.9);
    }

    #[test]
    fn test_load_malformed_json_is_corpus_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"content": "missing id"}}]"#).unwrap();

        let err = Corpus::load(file.path()).unwrap_err();
        assert!(matches!(err, AglaError::Corpus(_)));
    }
}
