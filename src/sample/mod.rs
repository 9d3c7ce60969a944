//! Sample sources: where raw log lines for a corpus come from.

pub mod source;

pub use source::{LogDirSource, MemorySource, SampleSource, split_samples};
