use serde::{Deserialize, Serialize};

use super::segment::SourceType;
use crate::utils::tokens::estimate_tokens;

/// A stored chunk returned by similarity search, annotated with its material and score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedChunk {
    pub id: String,
    pub material_id: String,
    pub material_title: String,
    pub source_type: SourceType,
    pub source_index: u32,
    #[serde(default)]
    pub section_title: Option<String>,
    pub text: String,
    /// Zero or absent when the index does not store a count.
    #[serde(default)]
    pub token_count: Option<usize>,
    pub similarity: f32,
}

impl RetrievedChunk {
    /// Stored token count when present and nonzero, otherwise an estimate from the text.
    pub fn effective_token_count(&self) -> usize {
        match self.token_count {
            Some(count) if count > 0 => count,
            _ => estimate_tokens(&self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str, token_count: Option<usize>) -> RetrievedChunk {
        RetrievedChunk {
            id: "c1".into(),
            material_id: "m1".into(),
            material_title: "Doc".into(),
            source_type: SourceType::Page,
            source_index: 1,
            section_title: None,
            text: text.into(),
            token_count,
            similarity: 0.5,
        }
    }

    #[test]
    fn prefers_stored_token_count() {
        assert_eq!(chunk("abcdefgh", Some(40)).effective_token_count(), 40);
    }

    #[test]
    fn estimates_when_count_is_zero_or_missing() {
        assert_eq!(chunk("abcdefghi", Some(0)).effective_token_count(), 3);
        assert_eq!(chunk("abcdefghi", None).effective_token_count(), 3);
    }

    #[test]
    fn deserializes_search_rows_without_token_count() {
        let row = r#"{
            "id": "c9",
            "material_id": "m2",
            "material_title": "Lab Manual",
            "source_type": "slide",
            "source_index": 3,
            "section_title": null,
            "text": "Beta",
            "similarity": 0.8
        }"#;

        let parsed: RetrievedChunk = serde_json::from_str(row).expect("row should parse");
        assert_eq!(parsed.source_type, SourceType::Slide);
        assert_eq!(parsed.token_count, None);
        assert_eq!(parsed.effective_token_count(), 1);
    }
}
