use crate::score::scorer::MAX_FAILURE_DETAILS;

use serde::{Deserialize, Serialize};

/// One failed sample, as shown to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureDetail {
    pub error: String,
    pub sample: String,
}

/// Outcome of scoring one validation run. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub total_samples: usize,
    pub successful_samples: usize,
    pub failed_samples: usize,
    /// Percentage rounded to two decimals.
    pub success_rate: f64,
    /// First `MAX_FAILURE_DETAILS` failures in sample order.
    pub failure_details: Vec<FailureDetail>,
    /// Set when the run itself failed and the report was synthesized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degraded_reason: Option<String>,
}

impl ValidationReport {
    /// Report for a run that could not execute at all: every known sample is
    /// charged with the same `reason`.
    pub fn degraded<S: AsRef<str>>(samples: &[S], reason: impl Into<String>) -> Self {
        let reason = reason.into();
        let failure_details = samples
            .iter()
            .take(MAX_FAILURE_DETAILS)
            .map(|sample| FailureDetail {
                error: reason.clone(),
                sample: sample.as_ref().to_string(),
            })
            .collect();

        Self {
            total_samples: samples.len(),
            successful_samples: 0,
            failed_samples: samples.len(),
            success_rate: 0.0,
            failure_details,
            degraded_reason: Some(reason),
        }
    }

    /// Samples that never received an outcome from the collaborator.
    pub fn not_simulated(&self) -> usize {
        self.total_samples
            .saturating_sub(self.successful_samples + self.failed_samples)
    }

    /// True only when every sample ran and none failed.
    pub fn is_clean(&self) -> bool {
        self.degraded_reason.is_none() && self.failed_samples == 0 && self.not_simulated() == 0
    }

    /// One-line human summary.
    pub fn summary(&self) -> String {
        if let Some(reason) = &self.degraded_reason {
            return format!("Pipeline validation failed: {}", reason);
        }
        match (self.failed_samples, self.not_simulated()) {
            (0, 0) => format!(
                "All {} samples processed successfully!",
                self.total_samples
            ),
            (0, skipped) => format!(
                "{} of {} samples were not simulated. Retry needed.",
                skipped, self.total_samples
            ),
            (failed, 0) => format!(
                "{} out of {} samples failed. Retry needed.",
                failed, self.total_samples
            ),
            (failed, skipped) => format!(
                "{} out of {} samples failed and {} were not simulated. Retry needed.",
                failed, self.total_samples, skipped
            ),
        }
    }
}
