use async_trait::async_trait;
use common::{
    error::AppError,
    types::{ExtractionMethod, Segment, SourceType},
};
use tracing::{debug, warn};

use super::ocr_quality::OcrQualityGate;
use crate::pipeline::IngestionTuning;

/// Text recognized from one image, with the engine's 0-100 confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrRecognition {
    pub text: String,
    pub confidence: f32,
}

/// Backend that turns an image into text. Page rendering happens before this point.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, image: &[u8], language: &str) -> Result<OcrRecognition, AppError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct OcrPage {
    /// 1-based page number within the document.
    pub page_number: u32,
    pub text: String,
    pub confidence: f32,
    pub low_quality: bool,
}

impl OcrPage {
    pub fn is_accepted(&self) -> bool {
        !self.low_quality && !self.text.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OcrDocument {
    pub pages: Vec<OcrPage>,
    /// Pages actually recognized.
    pub page_count: usize,
    /// Pages supplied, before the page cap.
    pub total_pages: usize,
}

impl OcrDocument {
    pub fn accepted_pages(&self) -> impl Iterator<Item = &OcrPage> {
        self.pages.iter().filter(|page| page.is_accepted())
    }

    /// Wraps every accepted page into a segment; low-quality pages are dropped.
    pub fn into_segments(self) -> Vec<Segment> {
        self.pages
            .into_iter()
            .filter(OcrPage::is_accepted)
            .map(|page| {
                Segment::new(
                    page.text,
                    SourceType::Page,
                    page.page_number,
                    ExtractionMethod::Ocr,
                )
                .with_quality_score(quality_score(page.confidence))
            })
            .collect()
    }
}

/// Maps a 0-100 engine confidence onto the 0-1 segment quality scale.
pub fn quality_score(confidence: f32) -> f32 {
    if !confidence.is_finite() {
        return 0.0;
    }
    (confidence / 100.0).clamp(0.0, 1.0)
}

pub async fn run_ocr_on_image(
    engine: &dyn OcrEngine,
    image: &[u8],
    tuning: &IngestionTuning,
) -> Result<OcrRecognition, AppError> {
    engine.recognize(image, &tuning.ocr_language).await
}

/// Recognizes rendered page images in order, stopping at the configured page cap.
pub async fn run_ocr_on_pages(
    engine: &dyn OcrEngine,
    pages: &[Vec<u8>],
    tuning: &IngestionTuning,
    gate: &OcrQualityGate,
) -> Result<OcrDocument, AppError> {
    let total_pages = pages.len();
    let page_limit = total_pages.min(tuning.ocr_max_pdf_pages);
    if page_limit < total_pages {
        warn!(
            total_pages,
            max_pages = tuning.ocr_max_pdf_pages,
            "document exceeds OCR page limit; trailing pages skipped"
        );
    }

    let mut results = Vec::with_capacity(page_limit);
    for (page_number, image) in (1u32..).zip(pages.iter().take(page_limit)) {
        let recognition = engine.recognize(image, &tuning.ocr_language).await?;
        let low_quality = gate.is_low_quality(&recognition.text, recognition.confidence);
        if low_quality {
            warn!(
                page_number,
                confidence = recognition.confidence,
                "OCR output gated as low quality"
            );
        } else {
            debug!(page_number, confidence = recognition.confidence, "OCR page accepted");
        }
        results.push(OcrPage {
            page_number,
            text: recognition.text,
            confidence: recognition.confidence,
            low_quality,
        });
    }

    Ok(OcrDocument {
        page_count: results.len(),
        total_pages,
        pages: results,
    })
}
