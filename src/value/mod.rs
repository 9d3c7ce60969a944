//! Value layer: helpers over `serde_json::Value` shared by extraction and merging.
//!
//! It owns:
//! - emptiness rules (what counts as "no information")
//! - the reserved-key guard and pairwise safe merge

pub mod clean;
pub mod merge;

pub use clean::{clean_empty_values, is_vacant};
pub use merge::{is_unsafe_key, merge, merge_samples};
