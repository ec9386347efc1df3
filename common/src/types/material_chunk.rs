use serde::{Deserialize, Serialize};

use super::segment::{ExtractionMethod, Segment, SourceType};

/// A token-bounded slice of one segment's text, ready to be embedded and indexed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialChunk {
    pub text: String,
    pub source_type: SourceType,
    pub source_index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_title: Option<String>,
    pub extraction_method: ExtractionMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f32>,
    pub token_count: usize,
}

impl MaterialChunk {
    /// Builds a chunk carrying `segment`'s provenance unchanged.
    pub fn from_segment(segment: &Segment, text: String, token_count: usize) -> Self {
        Self {
            text,
            source_type: segment.source_type,
            source_index: segment.source_index,
            section_title: segment.section_title.clone(),
            extraction_method: segment.extraction_method,
            quality_score: segment.quality_score,
            token_count,
        }
    }
}
