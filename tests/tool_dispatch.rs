// file: tests/tool_dispatch.rs
// description: JSON dispatch across all tools, including file-backed corpora

use agla_retrieval::{AglaService, Config, dispatch};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::io::Write;
use tempfile::NamedTempFile;

fn builtin_service() -> AglaService {
    AglaService::from_config(&Config::default_config()).unwrap()
}

fn call(service: &AglaService, tool: &str, body: &str) -> (u16, Value) {
    let reply = tokio_test::block_on(dispatch(service, tool, body));
    (reply.status, reply.body)
}

fn json_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_abc_corpus_from_file() {
    let corpus = json_file(
        r#"[
            {"id": "A", "content": "an lru cache evicts the least recently used entry", "keywords": ["cache", "lru"]},
            {"id": "B", "content": "entities connected in a knowledge graph", "keywords": ["graph", "entity"]},
            {"id": "C", "content": "vector search fused with bm25 ranking", "keywords": ["vector", "bm25"]}
        ]"#,
    );
    let mut config = Config::default_config();
    config.corpus.documents_path = Some(corpus.path().to_path_buf());
    let service = AglaService::from_config(&config).unwrap();

    let (status, body) = call(&service, "hybrid_search", r#"{"query": "cache lru"}"#);
    assert_eq!(status, 200);
    assert_eq!(body["ok"], true);
    assert_eq!(body["documents"][0]["id"], "A");
    assert_eq!(body["documents"][0]["ranks"]["lexical"], 1);
    assert_eq!(body["retrieval_metadata"]["total_candidates"], 3);
    assert_eq!(body["retrieval_metadata"]["method"], "hybrid_bm25_vector_rrf");
}

#[test]
fn test_invalid_corpus_file_is_rejected() {
    let corpus = json_file(r#"[{"id": "dup", "content": "x"}, {"id": "dup", "content": "y"}]"#);
    let mut config = Config::default_config();
    config.corpus.documents_path = Some(corpus.path().to_path_buf());

    let err = AglaService::from_config(&config).err().unwrap();
    assert!(err.to_string().contains("dup"));
}

#[test]
fn test_search_envelope_shape() {
    let service = builtin_service();
    let (status, body) = call(
        &service,
        "hybrid_search",
        r#"{"query": "semantic routing", "limit": 2, "use_compact_mode": false}"#,
    );

    assert_eq!(status, 200);
    let documents = body["documents"].as_array().unwrap();
    assert_eq!(documents.len(), 2);
    for doc in documents {
        for field in ["lexical", "similarity", "fused"] {
            assert!(doc["scores"][field].is_number());
        }
        assert!(doc["metadata"].is_object());
    }
    assert_eq!(body["retrieval_metadata"]["embedding_dimensions"], 1024);
}

#[test]
fn test_missing_query_is_lenient() {
    let (status, body) = call(&builtin_service(), "hybrid_search", "{}");
    assert_eq!(status, 200);
    assert_eq!(body["documents"].as_array().unwrap().len(), 8);
}

#[test]
fn test_non_string_query_is_lenient_for_every_tool() {
    let service = builtin_service();
    let cases = [
        ("hybrid_search", r#"{"query": 42}"#),
        ("semantic_route", r#"{"query": 42}"#),
        ("graph_search", r#"{"query": 42}"#),
        ("rerank", r#"{"query": 42, "documents": ["a passage"]}"#),
        ("semantic_cache", r#"{"operation": "get", "query": 42}"#),
        ("grade", r#"{"type": "retrieval", "query": 42, "context": "some retrieved context text"}"#),
    ];

    for (tool, body) in cases {
        let (status, reply) = call(&service, tool, body);
        assert_eq!(status, 200, "{} {}", tool, body);
        assert_eq!(reply["ok"], true);
    }
}

#[test]
fn test_empty_query_scores_are_positive_zero() {
    let (_, body) = call(&builtin_service(), "hybrid_search", r#"{"query": ""}"#);
    for doc in body["documents"].as_array().unwrap() {
        let lexical = doc["scores"]["lexical"].as_f64().unwrap();
        assert!(lexical == 0.0 && lexical.is_sign_positive());
    }
}

#[test]
fn test_error_statuses() {
    let service = builtin_service();
    let cases = [
        ("hybrid_search", "not json", 400),
        ("hybrid_search", r#""a string""#, 400),
        ("hybrid_search", r#"{"limit": -3}"#, 400),
        ("graph_search", r#"{"query": "agla", "depth": 9}"#, 400),
        ("rerank", r#"{"query": "q"}"#, 400),
        ("grade", "{}", 400),
        ("semantic_cache", r#"{"operation": "set", "query": "q"}"#, 400),
        ("semantic_cache", r#"{"operation": "purge"}"#, 400),
        ("index_repository", "{}", 404),
    ];

    for (tool, body, expected) in cases {
        let (status, reply) = call(&service, tool, body);
        assert_eq!(status, expected, "{} {}", tool, body);
        assert_eq!(reply["ok"], false);
        assert!(reply["error"].is_string());
    }
}

#[test]
fn test_agentic_flow() {
    let service = builtin_service();
    let query = "how does lightrag build the knowledge graph";

    let (_, route) = call(&service, "semantic_route", &format!(r#"{{"query": "{}"}}"#, query));
    assert_eq!(route["route"], "graph");
    assert!(
        route["query_analysis"]["recommended_tools"]
            .as_array()
            .unwrap()
            .contains(&Value::from("graph_search"))
    );

    let (_, miss) = call(&service, "semantic_cache", &format!(r#"{{"operation": "get", "query": "{}"}}"#, query));
    assert_eq!(miss["hit"], false);

    let (status, graph) = call(&service, "graph_search", &format!(r#"{{"query": "{}"}}"#, query));
    assert_eq!(status, 200);
    assert!(graph["lightrag_results"]["micro"]["entity_count"].as_u64().unwrap() > 0);

    let (status, grade) = call(
        &service,
        "grade",
        r#"{"type": "hallucination", "response": "LightRAG builds a graph of entities.", "context": "LightRAG builds a graph of entities and relations.", "retry_count": 2}"#,
    );
    assert_eq!(status, 200);
    assert_eq!(grade["grade"], "pass");
    assert_eq!(grade["retry_metadata"]["should_retry"], false);

    let (status, _) = call(
        &service,
        "semantic_cache",
        &format!(r#"{{"operation": "set", "query": "{}", "response": "graph answer"}}"#, query),
    );
    assert_eq!(status, 200);

    let (_, hit) = call(
        &service,
        "semantic_cache",
        r#"{"operation": "get", "query": "How does LightRAG build the knowledge graph?"}"#,
    );
    assert_eq!(hit["hit"], true);
    assert_eq!(hit["metadata"]["hit_count"], 1);
}

#[test]
fn test_rerank_accepts_mixed_passages() {
    let (status, body) = call(
        &builtin_service(),
        "rerank",
        r#"{"query": "semantic cache", "documents": ["unrelated text", {"content": "semantic cache hit"}], "mode": "complex"}"#,
    );
    assert_eq!(status, 200);
    assert_eq!(body["reranked"][0]["original_rank"], 2);
    assert_eq!(body["rerank_metadata"]["mode"], "complex");
}
