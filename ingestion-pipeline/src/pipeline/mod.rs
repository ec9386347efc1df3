mod config;


use std::sync::Arc;

use common::{
    error::AppError,
    types::{MaterialChunk, Segment},
};
use tracing::{info, instrument};

pub use config::{IngestionConfig, IngestionTuning};

use crate::utils::{
    chunking::Chunker,
    ocr::{run_ocr_on_image, run_ocr_on_pages, OcrDocument, OcrEngine, OcrRecognition},
    ocr_quality::OcrQualityGate,
};

/// Turns extracted material into chunks ready for embedding.
///
/// Limits are fixed at construction, so independent requests can share one pipeline.
pub struct IngestionPipeline {
    config: IngestionConfig,
    chunker: Chunker,
    quality_gate: OcrQualityGate,
    ocr_engine: Arc<dyn OcrEngine>,
}

impl IngestionPipeline {
    pub fn new(config: IngestionConfig, ocr_engine: Arc<dyn OcrEngine>) -> Self {
        Self::with_quality_gate(config, ocr_engine, OcrQualityGate::default())
    }

    pub fn with_quality_gate(
        config: IngestionConfig,
        ocr_engine: Arc<dyn OcrEngine>,
        quality_gate: OcrQualityGate,
    ) -> Self {
        let chunker = Chunker::new(
            config.tuning.chunk_token_limit,
            config.tuning.chunk_overlap_tokens,
        );
        Self {
            config,
            chunker,
            quality_gate,
            ocr_engine,
        }
    }

    pub const fn config(&self) -> &IngestionConfig {
        &self.config
    }

    pub const fn quality_gate(&self) -> &OcrQualityGate {
        &self.quality_gate
    }

    #[instrument(skip_all, fields(segment_count = segments.len()))]
    pub fn prepare_chunks(&self, segments: &[Segment]) -> Vec<MaterialChunk> {
        let chunks = self.chunker.chunk(segments);
        info!(
            chunk_count = chunks.len(),
            token_limit = self.chunker.token_limit(),
            overlap_tokens = self.chunker.overlap_tokens(),
            "prepared material chunks"
        );
        chunks
    }

    /// Recognizes a standalone image and reports whether the result passes the quality gate.
    pub async fn recognize_image(&self, image: &[u8]) -> Result<(OcrRecognition, bool), AppError> {
        let recognition = run_ocr_on_image(self.ocr_engine.as_ref(), image, &self.config.tuning).await?;
        let low_quality = self
            .quality_gate
            .is_low_quality(&recognition.text, recognition.confidence);
        Ok((recognition, low_quality))
    }

    pub async fn ocr_pages(&self, pages: &[Vec<u8>]) -> Result<OcrDocument, AppError> {
        run_ocr_on_pages(
            self.ocr_engine.as_ref(),
            pages,
            &self.config.tuning,
            &self.quality_gate,
        )
        .await
    }

    /// OCRs rendered pages and chunks every page that passes the quality gate.
    #[instrument(skip_all, fields(page_count = pages.len()))]
    pub async fn chunk_scanned_pages(
        &self,
        pages: &[Vec<u8>],
    ) -> Result<Vec<MaterialChunk>, AppError> {
        let document = self.ocr_pages(pages).await?;
        let rejected = document
            .page_count
            .saturating_sub(document.accepted_pages().count());
        if rejected > 0 {
            info!(rejected, "dropping OCR pages that failed the quality gate");
        }
        let segments = document.into_segments();
        Ok(self.prepare_chunks(&segments))
    }
}
