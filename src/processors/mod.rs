//! Data processing modules.

pub mod dedup;
pub mod inspection;

// Re-export key types for convenience
pub use dedup::{remove_sequential_duplicates, DedupError, DuplicateEvent, FilterResult};
pub use inspection::{
    check_paths, inspect_sequence, CheckOutputs, PathCheckReport, SequenceReport, WrittenOutputs,
};
