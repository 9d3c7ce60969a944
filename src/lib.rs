//! Validation scoring and schema inference for ingest pipeline runs.
//!
//! The core is pure and synchronous:
//! - `value`: empty-value pruning and prototype-safe merging of JSON mappings
//! - `sniff`: fail-fast JSON / NDJSON / OTHER classification of raw samples
//! - `fields`: first-non-empty-wins field catalog over simulate results
//! - `score`: success/failure statistics with bounded failure details
//!
//! `sample`, `simulate` and `validate` wire the core to its collaborators.

pub mod config;
pub mod fields;
pub mod render;
pub mod sample;
pub mod score;
pub mod simulate;
pub mod sniff;
pub mod validate;
pub mod value;

pub type Result<T> = anyhow::Result<T>;
