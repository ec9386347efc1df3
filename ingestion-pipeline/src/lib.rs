#![allow(clippy::missing_docs_in_private_items)]

pub mod pipeline;
pub mod utils;

pub use pipeline::{IngestionConfig, IngestionPipeline, IngestionTuning};
