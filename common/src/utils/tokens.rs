/// Characters assumed per model token when estimating without a tokenizer.
pub const CHARS_PER_TOKEN: usize = 4;

/// Approximates the token count of `text` as `ceil(chars / 4)`, floored at one.
///
/// The estimate depends only on the character count, so chunk boundaries stay
/// reproducible across runs and machines.
pub fn estimate_tokens(text: &str) -> usize {
    estimate_tokens_for_chars(text.chars().count())
}

/// Same estimate as [`estimate_tokens`] for a precomputed character count.
pub const fn estimate_tokens_for_chars(chars: usize) -> usize {
    let tokens = chars.div_ceil(CHARS_PER_TOKEN);
    if tokens == 0 {
        1
    } else {
        tokens
    }
}
