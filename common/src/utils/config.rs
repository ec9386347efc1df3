use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::AppError;

/// Process-wide settings, resolved once at startup and handed to the pipelines as
/// immutable tuning values.
#[derive(Clone, Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_chunk_tokens")]
    pub chunk_tokens: i64,
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: i64,
    #[serde(default = "default_ocr_language")]
    pub ocr_language: String,
    #[serde(default = "default_ocr_max_pdf_pages")]
    pub ocr_max_pdf_pages: usize,
    #[serde(default = "default_rag_match_count")]
    pub rag_match_count: usize,
    #[serde(default = "default_rag_max_per_material")]
    pub rag_max_per_material: usize,
    #[serde(default = "default_rag_context_tokens")]
    pub rag_context_tokens: usize,
    #[serde(default = "default_max_material_bytes")]
    pub max_material_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chunk_tokens: default_chunk_tokens(),
            chunk_overlap: default_chunk_overlap(),
            ocr_language: default_ocr_language(),
            ocr_max_pdf_pages: default_ocr_max_pdf_pages(),
            rag_match_count: default_rag_match_count(),
            rag_max_per_material: default_rag_max_per_material(),
            rag_context_tokens: default_rag_context_tokens(),
            max_material_bytes: default_max_material_bytes(),
        }
    }
}

impl AppConfig {
    /// Chunk ceiling as an unsigned count. Negative values collapse to zero, which
    /// pushes every segment down the word-splitting path.
    pub fn chunk_token_limit(&self) -> usize {
        usize::try_from(self.chunk_tokens).unwrap_or(0)
    }

    /// Overlap as an unsigned count, clamped to zero when misconfigured.
    pub fn chunk_overlap_tokens(&self) -> usize {
        usize::try_from(self.chunk_overlap).unwrap_or(0)
    }
}

const fn default_chunk_tokens() -> i64 {
    1000
}

const fn default_chunk_overlap() -> i64 {
    100
}

fn default_ocr_language() -> String {
    "eng".to_string()
}

const fn default_ocr_max_pdf_pages() -> usize {
    20
}

const fn default_rag_match_count() -> usize {
    20
}

const fn default_rag_max_per_material() -> usize {
    4
}

const fn default_rag_context_tokens() -> usize {
    10_000
}

const fn default_max_material_bytes() -> usize {
    20 * 1024 * 1024
}

pub fn get_config() -> Result<AppConfig, AppError> {
    let config = Config::builder()
        .add_source(File::with_name("config").required(false))
        .add_source(Environment::default().try_parsing(true))
        .build()?;

    Ok(config.try_deserialize()?)
}
