mod config;
mod diagnostics;

pub use config::{RetrievalConfig, RetrievalTuning};
pub use diagnostics::SelectionStats;
