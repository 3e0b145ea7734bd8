// file: src/corpus/builtin.rs
// description: reference AGLA document set used when no corpus file is configured

use crate::models::Document;

fn doc(id: &str, source: &str, category: &str, norm: f64, keywords: &[&str], content: &str) -> Document {
    Document::new(id, content)
        .with_keywords(keywords.iter().copied())
        .with_metadata("source", source)
        .with_metadata("category", category)
        .with_embedding_norm(norm)
}

pub fn agla_documents() -> Vec<Document> {
    vec![
        doc(
            "doc_agla_core",
            "system_architecture",
            "core",
            0.95,
            &["agla", "rag", "gentel", "architecture", "lightrag", "bm25", "vector", "rrf", "binary", "quantization"],
            "GenTel implements the Adaptive Graph-Lite Architecture (AGLA), a production-grade RAG system combining semantic routing, LightRAG graph traversal, and hybrid vector+BM25 search with Reciprocal Rank Fusion (RRF). AGLA achieves 90% cost reduction through Binary Quantization while maintaining search quality.",
        ),
        doc(
            "doc_hybrid_search",
            "technical_docs",
            "retrieval",
            0.93,
            &["hybrid", "search", "bm25", "vector", "rrf", "fusion", "semantic", "keyword", "dense", "sparse"],
            "Hybrid search in AGLA combines dense vector embeddings (semantic similarity) with BM25 sparse retrieval (exact keyword matching). Results are fused using Reciprocal Rank Fusion (RRF) which weights results by 1/(k+rank) where k=60. This provides semantic understanding AND precise keyword matching.",
        ),
        doc(
            "doc_semantic_routing",
            "routing_logic",
            "optimization",
            0.91,
            &["routing", "semantic", "fast", "graph", "complex", "classification", "latency", "optimization"],
            "AGLA's semantic router performs 3-way query classification: FAST (simple lookups, hybrid search only), GRAPH (multi-hop reasoning, LightRAG path), and COMPLEX (full pipeline with cross-encoder reranking). Routing reduces latency by 47% by skipping unnecessary components.",
        ),
        doc(
            "doc_flashrank",
            "reranking",
            "retrieval",
            0.89,
            &["flashrank", "rerank", "neural", "cross-encoder", "precision", "accuracy", "fast"],
            "FlashRank is AGLA's fast neural reranker, processing documents in 5-20ms. For complex queries, AGLA switches to cross-encoder reranking (ms-marco-MiniLM-L-12-v2) taking 50-100ms but providing higher accuracy. Reranking improves retrieval precision by 15-25%.",
        ),
        doc(
            "doc_selfrag_crag",
            "quality_assurance",
            "grading",
            0.92,
            &["selfrag", "crag", "grader", "retrieval", "hallucination", "answer", "retry", "validation"],
            "AGLA implements Self-RAG/CRAG grading with three validators: Retrieval Grader (checks document relevance), Hallucination Grader (verifies response claims against evidence), and Answer Grader (ensures completeness). Failed grades trigger retry loop with query reformulation, up to 2 retries before web fallback.",
        ),
        doc(
            "doc_lightrag",
            "lightrag_spec",
            "graph",
            0.94,
            &["lightrag", "graph", "entity", "theme", "micro", "macro", "incremental", "relationship"],
            "LightRAG performs dual-level retrieval: entity-level (micro) extracts specific facts about named entities, while theme-level (macro) synthesizes broader conceptual relationships. The graph index supports incremental updates - new documents are processed and entities/relationships added without full reindexing.",
        ),
        doc(
            "doc_semantic_cache",
            "caching",
            "optimization",
            0.88,
            &["cache", "semantic", "similarity", "cosine", "ttl", "latency", "lru", "optimization"],
            "Semantic caching in AGLA stores query-response pairs with embeddings. New queries are compared against cached queries using cosine similarity (threshold 0.92). Cache hits skip the entire retrieval pipeline, reducing latency from ~500ms to ~10ms. TTL is 1 hour with LRU eviction.",
        ),
        doc(
            "doc_mrl_bq",
            "optimization",
            "embeddings",
            0.90,
            &["mrl", "matryoshka", "binary", "quantization", "bq", "embeddings", "compression", "cost"],
            "AGLA uses Matryoshka Representation Learning (MRL) embeddings supporting flexible dimensionality (256/512/1024). Binary Quantization (BQ) compresses vectors to 1-bit representations, reducing storage by 32x while maintaining 95%+ recall. Combined, MRL+BQ achieve 90% cost reduction.",
        ),
    ]
}
