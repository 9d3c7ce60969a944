//! Scoring of per-sample simulation outcomes.
//!
//! It owns:
//! - `Outcome` (what the execution collaborator reported per sample)
//! - `ValidationReport` (aggregate statistics + bounded failure details)

pub mod report;
pub mod scorer;

pub use report::{FailureDetail, ValidationReport};
pub use scorer::{
    EMPTY_CORPUS_SUCCESS_RATE, MAX_FAILURE_DETAILS, Outcome, UNKNOWN_ERROR, score,
};
