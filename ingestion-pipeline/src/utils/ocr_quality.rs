const MIN_TEXT_CHARS: usize = 10;
const SHORT_TEXT_MIN_CONFIDENCE: f32 = 60.0;
const MIN_CONFIDENCE: f32 = 55.0;
const MAX_NOISE_RATIO: f64 = 0.3;

/// Thresholds for [`OcrQualityGate`]. Confidences use the OCR engine's 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OcrQualityThresholds {
    /// Trimmed text shorter than this needs `short_text_min_confidence` to pass.
    pub min_text_chars: usize,
    pub short_text_min_confidence: f32,
    /// Hard floor applied regardless of length.
    pub min_confidence: f32,
    /// Highest tolerated share of characters that are neither alphanumeric nor whitespace.
    pub max_noise_ratio: f64,
}

impl Default for OcrQualityThresholds {
    fn default() -> Self {
        Self {
            min_text_chars: MIN_TEXT_CHARS,
            short_text_min_confidence: SHORT_TEXT_MIN_CONFIDENCE,
            min_confidence: MIN_CONFIDENCE,
            max_noise_ratio: MAX_NOISE_RATIO,
        }
    }
}

/// Decides whether OCR output is trustworthy enough to keep.
#[derive(Debug, Clone, Copy, Default)]
pub struct OcrQualityGate {
    thresholds: OcrQualityThresholds,
}

impl OcrQualityGate {
    pub fn new(thresholds: OcrQualityThresholds) -> Self {
        Self { thresholds }
    }

    pub const fn thresholds(&self) -> &OcrQualityThresholds {
        &self.thresholds
    }

    /// True when `text` recognized at `confidence` (0-100) should be discarded or retried.
    pub fn is_low_quality(&self, text: &str, confidence: f32) -> bool {
        let trimmed = text.trim();
        let t = &self.thresholds;

        if !confidence.is_finite() {
            return true;
        }

        if trimmed.chars().count() < t.min_text_chars && confidence < t.short_text_min_confidence
        {
            return true;
        }

        if confidence < t.min_confidence {
            return true;
        }

        noise_ratio(trimmed) > t.max_noise_ratio
    }
}

/// Share of characters that are neither alphanumeric nor whitespace.
fn noise_ratio(text: &str) -> f64 {
    let mut total = 0usize;
    let mut noisy = 0usize;
    for c in text.chars() {
        total = total.saturating_add(1);
        if !c.is_alphanumeric() && !c.is_whitespace() {
            noisy = noisy.saturating_add(1);
        }
    }
    if total == 0 {
        return 0.0;
    }
    noisy as f64 / total as f64
}
