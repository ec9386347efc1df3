#![allow(clippy::missing_docs_in_private_items)]

pub mod budget;
pub mod context;
pub mod pipeline;
pub mod services;

use std::sync::Arc;

use common::{error::AppError, types::RetrievedChunk};
use tracing::{debug, instrument};

pub use budget::ContextBudgetAllocator;
pub use context::assemble;
pub use pipeline::{RetrievalConfig, RetrievalTuning, SelectionStats};
use services::{ChunkSearch, QueryEmbedder};

/// Context chosen for one query, with the chunks it was rendered from.
#[derive(Debug, Clone)]
pub struct MaterialContext {
    pub chunks: Vec<RetrievedChunk>,
    pub text: String,
    pub stats: SelectionStats,
}

/// Primary orchestrator for grounding a generation request in class materials.
pub struct MaterialRetriever {
    embedder: Arc<dyn QueryEmbedder>,
    search: Arc<dyn ChunkSearch>,
    config: RetrievalConfig,
}

impl MaterialRetriever {
    pub fn new(
        embedder: Arc<dyn QueryEmbedder>,
        search: Arc<dyn ChunkSearch>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            embedder,
            search,
            config,
        }
    }

    pub const fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Rendered context for `query`; empty when nothing relevant fits.
    pub async fn retrieve_context(
        &self,
        class_id: &str,
        query: &str,
        token_budget: Option<usize>,
    ) -> Result<String, AppError> {
        Ok(self
            .retrieve(class_id, query, token_budget)
            .await?
            .text)
    }

    /// Embeds the query, searches the class's chunks and selects within budget.
    ///
    /// Embedding and search failures are returned unchanged; nothing is retried here.
    #[instrument(skip_all, fields(class_id = %class_id))]
    pub async fn retrieve(
        &self,
        class_id: &str,
        query: &str,
        token_budget: Option<usize>,
    ) -> Result<MaterialContext, AppError> {
        let config = match token_budget {
            Some(budget) => self.config.with_token_budget(budget),
            None => self.config.clone(),
        };

        let embeddings = self.embedder.embed(&[query.to_string()]).await?;
        let query_embedding = embeddings
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Embedding("no embedding returned for query".into()))?;

        let candidates = self
            .search
            .match_chunks(class_id, &query_embedding, config.tuning.match_count)
            .await?;
        debug!(candidate_count = candidates.len(), "similarity search returned");

        let allocator = ContextBudgetAllocator::from_tuning(&config.tuning);
        let (chunks, stats) = allocator.select_with_stats(candidates);
        let text = assemble(&chunks);

        Ok(MaterialContext {
            chunks,
            text,
            stats,
        })
    }
}
