use async_trait::async_trait;
use common::{error::AppError, types::RetrievedChunk};

/// Produces embedding vectors, one per input string.
#[async_trait]
pub trait QueryEmbedder: Send + Sync {
    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, AppError>;
}

/// Nearest-neighbour search over stored material chunks.
///
/// Implementations must return rows sorted by descending similarity.
#[async_trait]
pub trait ChunkSearch: Send + Sync {
    async fn match_chunks(
        &self,
        class_id: &str,
        query_embedding: &[f32],
        match_count: usize,
    ) -> Result<Vec<RetrievedChunk>, AppError>;
}
