//! Turn positionally aligned outcomes into a `ValidationReport`.

use crate::score::report::{FailureDetail, ValidationReport};

/// Failure details kept per report. Presentation bound only: counts and the
/// success rate always cover every outcome.
pub const MAX_FAILURE_DETAILS: usize = 100;

/// Reason used when the collaborator flags a failure without one.
pub const UNKNOWN_ERROR: &str = "Unknown processing error";

/// Success rate of an empty corpus: nothing ran, so nothing failed.
pub const EMPTY_CORPUS_SUCCESS_RATE: f64 = 100.0;

/// What the execution collaborator reported for one sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure { reason: Option<String> },
}

impl Outcome {
    pub fn failure(reason: impl Into<String>) -> Self {
        Outcome::Failure {
            reason: Some(reason.into()),
        }
    }
}

/// Score `outcomes` against `samples`.
///
/// `samples.len()` is the denominator even when fewer outcomes came back.
/// Outcomes past the end of `samples` are ignored.
pub fn score<S: AsRef<str>>(samples: &[S], outcomes: &[Outcome]) -> ValidationReport {
    let total = samples.len();
    let mut successful = 0usize;
    let mut failed = 0usize;
    let mut failure_details = Vec::new();

    for (sample, outcome) in samples.iter().zip(outcomes) {
        match outcome {
            Outcome::Success => successful += 1,
            Outcome::Failure { reason } => {
                failed += 1;
                if failure_details.len() < MAX_FAILURE_DETAILS {
                    let error = reason
                        .as_deref()
                        .filter(|r| !r.is_empty())
                        .unwrap_or(UNKNOWN_ERROR);
                    failure_details.push(FailureDetail {
                        error: error.to_string(),
                        sample: sample.as_ref().to_string(),
                    });
                }
            }
        }
    }

    ValidationReport {
        total_samples: total,
        successful_samples: successful,
        failed_samples: failed,
        success_rate: success_rate(successful, total),
        failure_details,
        degraded_reason: None,
    }
}

fn success_rate(successful: usize, total: usize) -> f64 {
    if total == 0 {
        return EMPTY_CORPUS_SUCCESS_RATE;
    }
    let pct = successful as f64 / total as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}
