use std::fmt;

use serde::{Deserialize, Serialize};

/// Where in the source document a segment was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Page,
    Slide,
    Paragraph,
    Other,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SourceType::Page => "page",
            SourceType::Slide => "slide",
            SourceType::Paragraph => "paragraph",
            SourceType::Other => "other",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for SourceType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "page" => Ok(Self::Page),
            "slide" => Ok(Self::Slide),
            "paragraph" => Ok(Self::Paragraph),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown source type '{other}'")),
        }
    }
}

/// How the text of a segment was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMethod {
    Text,
    Ocr,
}

/// A provenance-tagged unit of extracted text, before chunking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub source_type: SourceType,
    /// 1-based position within the source document.
    pub source_index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_title: Option<String>,
    pub extraction_method: ExtractionMethod,
    /// Present only for OCR output, in the range 0..=1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f32>,
}

impl Segment {
    pub fn new(
        text: String,
        source_type: SourceType,
        source_index: u32,
        extraction_method: ExtractionMethod,
    ) -> Self {
        Self {
            text,
            source_type,
            source_index,
            section_title: None,
            extraction_method,
            quality_score: None,
        }
    }

    #[must_use]
    pub fn with_section_title(mut self, title: impl Into<String>) -> Self {
        self.section_title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_quality_score(mut self, score: f32) -> Self {
        self.quality_score = Some(score);
        self
    }
}
