use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use common::{
    types::{ExtractionMethod, RetrievedChunk, Segment, SourceType},
    utils::config::{get_config, AppConfig},
};
use ingestion_pipeline::{utils::chunking::Chunker, IngestionTuning};
use retrieval_pipeline::{assemble, ContextBudgetAllocator, RetrievalTuning};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const PAGE_BREAK: char = '\u{c}';

#[derive(Parser, Debug)]
#[command(name = "main", about = "Chunk course materials and assemble retrieval context")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split an extracted text file into chunks and print them as JSON.
    Chunk {
        input: PathBuf,
        /// Provenance recorded on every segment (page, slide, paragraph, other).
        #[arg(long, default_value = "page")]
        source_type: SourceType,
    },
    /// Select retrieved chunks under a token budget and print the rendered context.
    Context {
        /// JSON array of retrieved chunks, ordered by descending similarity.
        candidates: PathBuf,
        #[arg(long)]
        budget: Option<usize>,
        #[arg(long)]
        cap: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set up tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cli = Cli::parse();
    let config = get_config().context("failed to load configuration")?;

    match cli.command {
        Command::Chunk { input, source_type } => chunk_file(&config, &input, source_type).await,
        Command::Context {
            candidates,
            budget,
            cap,
        } => render_context(&config, &candidates, budget, cap).await,
    }
}

async fn chunk_file(
    config: &AppConfig,
    input: &Path,
    source_type: SourceType,
) -> anyhow::Result<()> {
    let text = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("failed to read {}", input.display()))?;

    let segments = split_pages(&text, source_type);
    let tuning = IngestionTuning::from(config);
    let chunker = Chunker::new(tuning.chunk_token_limit, tuning.chunk_overlap_tokens);
    let chunks = chunker.chunk(&segments);
    info!(
        segments = segments.len(),
        chunks = chunks.len(),
        "chunked {}",
        input.display()
    );

    println!("{}", serde_json::to_string_pretty(&chunks)?);
    Ok(())
}

async fn render_context(
    config: &AppConfig,
    candidates: &Path,
    budget: Option<usize>,
    cap: Option<usize>,
) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(candidates)
        .await
        .with_context(|| format!("failed to read {}", candidates.display()))?;
    let rows: Vec<RetrievedChunk> =
        serde_json::from_str(&raw).context("candidates must be a JSON array of chunks")?;

    let defaults = RetrievalTuning::from(config);
    let allocator = ContextBudgetAllocator::new(
        budget.unwrap_or(defaults.token_budget),
        cap.unwrap_or(defaults.max_chunks_per_material),
    );
    let (selected, stats) = allocator.select_with_stats(rows);
    info!(
        selected = stats.selected,
        tokens_spent = stats.tokens_spent,
        token_budget = stats.token_budget,
        "context selected"
    );

    println!("{}", assemble(&selected));
    Ok(())
}

/// One segment per form-feed separated page, numbered from 1.
fn split_pages(text: &str, source_type: SourceType) -> Vec<Segment> {
    (1u32..)
        .zip(text.split(PAGE_BREAK))
        .map(|(index, page)| {
            Segment::new(page.to_string(), source_type, index, ExtractionMethod::Text)
        })
        .collect()
}
