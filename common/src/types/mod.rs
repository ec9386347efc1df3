pub mod material_chunk;
pub mod retrieved_chunk;
pub mod segment;

pub use material_chunk::MaterialChunk;
pub use retrieved_chunk::RetrievedChunk;
pub use segment::{ExtractionMethod, Segment, SourceType};
