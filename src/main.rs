// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use agla_retrieval::utils::logging::{format_error, format_info, format_rank, format_success, format_warning};
use agla_retrieval::{
    AglaService, Config, GradeKind, GradeRequest, GraphSearchRequest, JsonExporter, OperationTimer,
    RerankInput, RerankMode, RerankRequest, RouteRequest, SearchRequest, Validator, dispatch,
    mcp::AglaMcp,
};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use rmcp::ServiceExt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "agla")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Hybrid BM25 + vector retrieval with RRF fusion for RAG agents", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum GradeArg {
    Retrieval,
    Hallucination,
    Answer,
}

impl From<GradeArg> for GradeKind {
    fn from(arg: GradeArg) -> Self {
        match arg {
            GradeArg::Retrieval => GradeKind::Retrieval,
            GradeArg::Hallucination => GradeKind::Hallucination,
            GradeArg::Answer => GradeKind::Answer,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Hybrid search over the corpus
    Search {
        /// Search query text
        query: String,

        #[arg(short, long)]
        limit: Option<usize>,

        /// Report full (1024-dim) instead of compact embedding metadata
        #[arg(long)]
        full: bool,

        /// Print the JSON response instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Classify a query onto a retrieval path
    Route { query: String },

    /// Rerank passages against a query
    Rerank {
        query: String,

        #[arg(required = true, num_args = 1..)]
        documents: Vec<String>,

        #[arg(long)]
        complex: bool,
    },

    /// Knowledge graph search
    Graph {
        query: String,

        #[arg(short, long)]
        depth: Option<usize>,
    },

    /// Grade retrieval, grounding or answer quality
    Grade {
        #[arg(value_enum)]
        kind: GradeArg,

        #[arg(long)]
        query: Option<String>,

        #[arg(long)]
        context: Option<String>,

        #[arg(long)]
        response: Option<String>,

        #[arg(long, default_value_t = 0)]
        retry_count: u32,
    },

    /// Invoke a tool with a raw JSON body and print the reply envelope
    Call {
        /// hybrid_search, semantic_route, rerank, graph_search, grade or semantic_cache
        tool: String,

        #[arg(default_value = "{}")]
        body: String,
    },

    /// Run a search and write the response to JSON files
    Export {
        query: String,

        #[arg(short, long, default_value = "./exports")]
        output: PathBuf,

        #[arg(short, long)]
        limit: Option<usize>,

        #[arg(short, long)]
        pretty: bool,
    },

    /// Check corpus, graph and cache
    Health,

    /// Start MCP (Model Context Protocol) server for agentic tool integration
    Mcp {
        #[arg(long, default_value = "stdio")]
        transport: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    agla_retrieval::utils::logging::init_logger(cli.color, cli.verbose);
    colored::control::set_override(cli.color);

    info!("AGLA hybrid retrieval");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::default_config()
    };

    let service = Arc::new(AglaService::from_config(&config).context("Failed to build AGLA service")?);

    match cli.command {
        Commands::Search {
            query,
            limit,
            full,
            json,
        } => {
            cmd_search(&service, query, limit, !full, json)?;
        }
        Commands::Route { query } => {
            cmd_route(&service, query);
        }
        Commands::Rerank {
            query,
            documents,
            complex,
        } => {
            cmd_rerank(&service, query, documents, complex)?;
        }
        Commands::Graph { query, depth } => {
            cmd_graph(&service, query, depth)?;
        }
        Commands::Grade {
            kind,
            query,
            context,
            response,
            retry_count,
        } => {
            let request = GradeRequest {
                kind: Some(kind.into()),
                query: query.unwrap_or_default(),
                context,
                response,
                retry_count,
            };
            cmd_grade(&service, &request)?;
        }
        Commands::Call { tool, body } => {
            cmd_call(&service, &tool, &body).await?;
        }
        Commands::Export {
            query,
            output,
            limit,
            pretty,
        } => {
            cmd_export(&service, query, output, limit, pretty)?;
        }
        Commands::Health => {
            let report = service.health().await;
            println!("{}", report.format());
        }
        Commands::Mcp { transport } => {
            cmd_mcp(service, &transport).await?;
        }
    }

    Ok(())
}

fn cmd_search(
    service: &AglaService,
    query: String,
    limit: Option<usize>,
    compact: bool,
    json: bool,
) -> Result<()> {
    info!("Searching for: {}", query);

    let mut request = SearchRequest::new(query).with_compact_mode(compact);
    request.limit = limit;
    let response = service.hybrid_search(&request);

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if response.documents.is_empty() {
        println!("{}", format_warning("No documents in corpus"));
        return Ok(());
    }

    let total = response.documents.len();
    for (index, hit) in response.documents.iter().enumerate() {
        println!("{}", format_rank(index + 1, total, &hit.id));
        println!("{}", hit.format_summary(160));
    }

    let metadata = &response.retrieval_metadata;
    println!(
        "{}",
        format_info(&format!(
            "{} of {} candidates via {} (k={}, {} dims) in {:.2}ms",
            total,
            metadata.total_candidates,
            metadata.method,
            metadata.fusion_k,
            metadata.embedding_dimensions,
            metadata.execution_time_ms
        ))
    );

    Ok(())
}

fn cmd_route(service: &AglaService, query: String) {
    let decision = service.semantic_route(&RouteRequest { query });

    println!(
        "{}",
        format_success(&format!(
            "Route: {:?} (confidence {:.2})",
            decision.route, decision.confidence
        ))
    );
    println!("  {}", decision.reasoning);
    println!(
        "  Tools: {}",
        decision.query_analysis.recommended_tools.join(" -> ")
    );
    if !decision.query_analysis.entities_detected.is_empty() {
        println!(
            "  Entities: {}",
            decision.query_analysis.entities_detected.join(", ")
        );
    }
}

fn cmd_rerank(service: &AglaService, query: String, documents: Vec<String>, complex: bool) -> Result<()> {
    let request = RerankRequest {
        query,
        documents: documents.into_iter().map(RerankInput::Text).collect(),
        mode: if complex { RerankMode::Complex } else { RerankMode::Fast },
    };
    let outcome = service.rerank(&request)?;

    let total = outcome.reranked.len();
    for passage in &outcome.reranked {
        println!(
            "{} {:.4} (was #{})\n  {}",
            format_rank(passage.new_rank, total, &passage.confidence),
            passage.relevance_score,
            passage.original_rank,
            passage.content
        );
    }
    println!(
        "{}",
        format_info(&format!(
            "{} passages scored with {}",
            outcome.rerank_metadata.documents_processed, outcome.rerank_metadata.model
        ))
    );

    Ok(())
}

fn cmd_graph(service: &AglaService, query: String, depth: Option<usize>) -> Result<()> {
    let outcome = service.graph_search(&GraphSearchRequest { query, depth })?;
    let results = &outcome.lightrag_results;

    println!(
        "{}",
        format_success(&format!("{} entities", results.micro.entity_count))
    );
    for entity in &results.micro.entities {
        println!(
            "  - {} ({:?}): {}",
            entity.name,
            entity.kind,
            entity.description.as_deref().unwrap_or("")
        );
    }
    for relationship in &outcome.relationships {
        println!(
            "  {} -[{}]-> {} ({:.2})",
            relationship.entity, relationship.relationship, relationship.target, relationship.confidence
        );
    }
    println!("\n{}", results.macro_level.synthesis);
    println!(
        "{}",
        format_info(&format!(
            "{}% of graph visited",
            outcome.graph_metadata.graph_coverage_percent
        ))
    );

    Ok(())
}

fn cmd_grade(service: &AglaService, request: &GradeRequest) -> Result<()> {
    let outcome = service.grade(request)?;
    let line = format!(
        "{:?}: {:?} ({:.3}) {}",
        outcome.kind, outcome.result.grade, outcome.result.score, outcome.result.feedback
    );

    if outcome.result.retry_recommended {
        println!("{}", format_warning(&line));
    } else {
        println!("{}", format_success(&line));
    }
    if let Some(strategy) = &outcome.retry_metadata.retry_strategy {
        println!(
            "  Retry {}/{} with: {}",
            outcome.retry_metadata.current_retry + 1,
            outcome.retry_metadata.max_retries,
            strategy
        );
    }
    println!("{}", serde_json::to_string_pretty(&outcome.result.details)?);

    Ok(())
}

async fn cmd_call(service: &AglaService, tool: &str, body: &str) -> Result<()> {
    let reply = dispatch(service, tool, body).await;
    println!("{}", serde_json::to_string_pretty(&reply.body)?);

    if !reply.is_success() {
        error!("{} returned status {}", tool, reply.status);
        return Err(anyhow::anyhow!("{} failed with status {}", tool, reply.status));
    }
    Ok(())
}

fn cmd_export(
    service: &AglaService,
    query: String,
    output: PathBuf,
    limit: Option<usize>,
    pretty: bool,
) -> Result<()> {
    info!("Initializing JSON export");
    Validator::validate_not_empty("query", &query)?;
    let timer = OperationTimer::new("export");

    let mut request = SearchRequest::new(query.clone());
    request.limit = limit;
    let response = service.hybrid_search(&request);

    let exporter = JsonExporter::new(output)?;
    let manifest = exporter.export_search(&response, &query, pretty)?;
    timer.warn_if_slow(Duration::from_secs(1), "search export");
    timer.finish();
    println!(
        "{}",
        format_success(&format!(
            "Exported {} documents to {}",
            manifest.total_documents,
            exporter.output_dir().display()
        ))
    );

    Ok(())
}

async fn cmd_mcp(service: Arc<AglaService>, transport: &str) -> Result<()> {
    info!("Starting MCP server (transport: {})", transport);

    if transport != "stdio" {
        eprintln!("{}", format_error("Only stdio transport is currently supported"));
        return Err(anyhow::anyhow!("Unsupported transport: {}", transport));
    }

    let mcp_server = AglaMcp::new(service);

    info!("MCP server ready. Available tools:");
    for tool in mcp_server.get_tool_router().list_all() {
        info!(
            "  - {}: {}",
            tool.name,
            tool.description.as_deref().unwrap_or("No description")
        );
    }

    info!("Starting stdio transport...");
    let running = mcp_server
        .serve(rmcp::transport::stdio())
        .await
        .context("Failed to start MCP server")?;
    running.waiting().await?;

    Ok(())
}
