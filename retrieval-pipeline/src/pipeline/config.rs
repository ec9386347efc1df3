use common::utils::config::AppConfig;
use serde::{Deserialize, Serialize};

/// Tunable parameters for material retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalTuning {
    /// Candidates requested from similarity search.
    pub match_count: usize,
    /// Maximum chunks accepted from a single material.
    pub max_chunks_per_material: usize,
    /// Token ceiling for the assembled context.
    pub token_budget: usize,
}

impl Default for RetrievalTuning {
    fn default() -> Self {
        Self {
            match_count: 20,
            max_chunks_per_material: 4,
            token_budget: 10_000,
        }
    }
}

impl From<&AppConfig> for RetrievalTuning {
    fn from(config: &AppConfig) -> Self {
        Self {
            match_count: config.rag_match_count,
            max_chunks_per_material: config.rag_max_per_material,
            token_budget: config.rag_context_tokens,
        }
    }
}

/// Wrapper containing tuning plus per-request overrides.
#[derive(Debug, Clone, Default)]
pub struct RetrievalConfig {
    pub tuning: RetrievalTuning,
}

impl RetrievalConfig {
    pub fn new(tuning: RetrievalTuning) -> Self {
        Self { tuning }
    }

    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(RetrievalTuning::from(config))
    }

    /// Same tuning with a different token budget, for callers that size context per request.
    #[must_use]
    pub fn with_token_budget(&self, token_budget: usize) -> Self {
        Self {
            tuning: RetrievalTuning {
                token_budget,
                ..self.tuning.clone()
            },
        }
    }
}
