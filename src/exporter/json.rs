// file: src/exporter/json.rs
// description: json export of hybrid search responses

use crate::error::{AglaError, Result};
use crate::models::{RetrievalMetadata, SearchHit, SearchResponse};
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const MANIFEST_FILE: &str = "manifest.json";
const MAX_SLUG_CHARS: usize = 48;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ExportedSearch<'a> {
    pub query: &'a str,
    pub exported_at: &'a str,
    pub documents: &'a [SearchHit],
    pub retrieval_metadata: &'a RetrievalMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub query: String,
    pub total_documents: usize,
    pub files: Vec<String>,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| AglaError::FileOperation {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write `search_<slug>.json` plus a manifest describing it.
    pub fn export_search(
        &self,
        response: &SearchResponse,
        query: &str,
        pretty: bool,
    ) -> Result<ExportManifest> {
        info!("Starting JSON export to {:?}", self.output_dir);

        let exported_at = Utc::now().to_rfc3339();
        let file_name = format!("search_{}.json", slug(query));

        let export = ExportedSearch {
            query,
            exported_at: &exported_at,
            documents: &response.documents,
            retrieval_metadata: &response.retrieval_metadata,
        };
        self.write(&file_name, &export, pretty)?;

        let manifest = ExportManifest {
            exported_at,
            query: query.to_string(),
            total_documents: response.documents.len(),
            files: vec![file_name],
        };
        self.write(MANIFEST_FILE, &manifest, pretty)?;

        info!(
            "Export complete: {} documents exported",
            manifest.total_documents
        );
        Ok(manifest)
    }

    fn write<T: Serialize>(&self, file_name: &str, value: &T, pretty: bool) -> Result<()> {
        let json = if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        let path = self.output_dir.join(file_name);
        fs::write(&path, json).map_err(|source| AglaError::FileOperation { path, source })
    }
}

/// File-name-safe form of a query: ascii alphanumerics joined by `_`.
fn slug(query: &str) -> String {
    let words: Vec<String> = query
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_lowercase)
        .collect();

    if words.is_empty() {
        return "all".to_string();
    }
    words.join("_").chars().take(MAX_SLUG_CHARS).collect()
}
