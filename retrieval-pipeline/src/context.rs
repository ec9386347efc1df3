use common::types::RetrievedChunk;

pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Renders selected chunks into a single prompt-ready block.
///
/// Entries are numbered from 1 in selection order, each headed by
/// `Source {n} | {material title} | {source type} {source index}`. An empty selection
/// renders to an empty string, meaning no grounding is available.
pub fn assemble(selected: &[RetrievedChunk]) -> String {
    selected
        .iter()
        .enumerate()
        .map(|(idx, chunk)| {
            format!(
                "Source {} | {} | {} {}\n{}",
                idx.saturating_add(1),
                chunk.material_title,
                chunk.source_type,
                chunk.source_index,
                chunk.text
            )
        })
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}
