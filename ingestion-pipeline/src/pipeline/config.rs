use common::utils::config::AppConfig;

#[derive(Debug, Clone)]
pub struct IngestionTuning {
    pub chunk_token_limit: usize,
    pub chunk_overlap_tokens: usize,
    pub ocr_language: String,
    pub ocr_max_pdf_pages: usize,
}

impl Default for IngestionTuning {
    fn default() -> Self {
        Self {
            chunk_token_limit: 1_000,
            chunk_overlap_tokens: 100,
            ocr_language: "eng".to_string(),
            ocr_max_pdf_pages: 20,
        }
    }
}

impl From<&AppConfig> for IngestionTuning {
    fn from(config: &AppConfig) -> Self {
        Self {
            chunk_token_limit: config.chunk_token_limit(),
            chunk_overlap_tokens: config.chunk_overlap_tokens(),
            ocr_language: config.ocr_language.clone(),
            ocr_max_pdf_pages: config.ocr_max_pdf_pages,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IngestionConfig {
    pub tuning: IngestionTuning,
}

impl IngestionConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            tuning: IngestionTuning::from(config),
        }
    }
}
