use common::{
    types::{MaterialChunk, Segment},
    utils::tokens::{estimate_tokens, estimate_tokens_for_chars},
};
use tracing::debug;

/// Splits extracted segments into overlapping, token-bounded chunks.
///
/// Segments that fit under the limit pass through verbatim. Longer segments are packed
/// greedily word by word, and each window after the first starts with trailing words of
/// the previous one, up to `overlap_tokens` worth of text.
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    token_limit: usize,
    overlap_tokens: usize,
}

impl Chunker {
    pub const fn new(token_limit: usize, overlap_tokens: usize) -> Self {
        Self {
            token_limit,
            overlap_tokens,
        }
    }

    pub const fn token_limit(&self) -> usize {
        self.token_limit
    }

    pub const fn overlap_tokens(&self) -> usize {
        self.overlap_tokens
    }

    pub fn chunk(&self, segments: &[Segment]) -> Vec<MaterialChunk> {
        let mut chunks = Vec::new();
        for segment in segments {
            self.chunk_segment(segment, &mut chunks);
        }
        chunks
    }

    fn chunk_segment(&self, segment: &Segment, out: &mut Vec<MaterialChunk>) {
        if segment.text.trim().is_empty() {
            return;
        }

        let token_count = estimate_tokens(&segment.text);
        if token_count <= self.token_limit {
            out.push(MaterialChunk::from_segment(
                segment,
                segment.text.clone(),
                token_count,
            ));
            return;
        }

        let words: Vec<&str> = segment.text.split_whitespace().collect();
        debug!(
            source_index = segment.source_index,
            token_count,
            word_count = words.len(),
            "splitting oversized segment"
        );

        let mut start = 0;
        while let Some(window) = words.get(start..) {
            if window.is_empty() {
                break;
            }

            let packed = self.pack_words(window);
            if packed == 0 {
                // A single word already exceeds the limit; emit it alone and move on.
                if let Some(word) = window.first() {
                    out.push(MaterialChunk::from_segment(
                        segment,
                        (*word).to_string(),
                        estimate_tokens(word),
                    ));
                }
                start = start.saturating_add(1);
                continue;
            }

            let chunk_words = window.get(..packed).unwrap_or(window);
            let text = chunk_words.join(" ");
            let token_count = estimate_tokens(&text);
            out.push(MaterialChunk::from_segment(segment, text, token_count));

            let end = start.saturating_add(packed);
            if end >= words.len() {
                break;
            }

            let overlap = self
                .overlap_words(chunk_words)
                .min(packed.saturating_sub(1));
            start = end.saturating_sub(overlap);
        }
    }

    /// Number of leading words of `window` that fit under the limit when joined by spaces.
    fn pack_words(&self, window: &[&str]) -> usize {
        let mut packed: usize = 0;
        let mut joined_chars: usize = 0;
        for word in window {
            let word_chars = word.chars().count();
            let next_chars = if packed == 0 {
                word_chars
            } else {
                joined_chars.saturating_add(1).saturating_add(word_chars)
            };
            if estimate_tokens_for_chars(next_chars) > self.token_limit {
                break;
            }
            joined_chars = next_chars;
            packed = packed.saturating_add(1);
        }
        packed
    }

    /// Trailing words of `chunk_words` whose joined length first reaches the overlap budget.
    fn overlap_words(&self, chunk_words: &[&str]) -> usize {
        if self.overlap_tokens == 0 {
            return 0;
        }

        let mut overlap_chars: usize = 0;
        let mut overlap_words: usize = 0;
        for word in chunk_words.iter().rev() {
            if overlap_words > 0 {
                overlap_chars = overlap_chars.saturating_add(1);
            }
            overlap_chars = overlap_chars.saturating_add(word.chars().count());
            overlap_words = overlap_words.saturating_add(1);
            if estimate_tokens_for_chars(overlap_chars) >= self.overlap_tokens {
                break;
            }
        }
        overlap_words
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(1_000, 100)
    }
}
