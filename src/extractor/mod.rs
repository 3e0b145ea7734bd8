// file: src/extractor/mod.rs
// description: entity extraction module exports
// reference: internal module structure

pub mod entities;
pub mod patterns;

pub use entities::{extract_domain_terms, extract_named_entities};
