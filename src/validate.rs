//! One validation run: read samples, simulate the pipeline, score the results.
//!
//! Nothing here returns an error. If the samples cannot be read or the
//! simulate call fails, the run carries a degraded report instead.

use crate::Result;
use crate::fields::FieldCatalog;
use crate::sample::SampleSource;
use crate::score::{ValidationReport, score};
use crate::simulate::{SimulateResponse, Simulator, build_docs};

use anyhow::bail;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct ValidationRun {
    pub pipeline: Value,
    pub report: ValidationReport,
    /// Raw collaborator output; `None` when the run was degraded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<SimulateResponse>,
}

impl ValidationRun {
    /// Field catalog of the run, only once every sample went through cleanly.
    pub fn unique_fields(&self) -> Option<FieldCatalog> {
        if !self.report.is_clean() {
            return None;
        }
        let catalog = self.results.as_ref()?.unique_fields();
        tracing::info!(fields = catalog.len(), "extracted unique fields");
        Some(catalog)
    }
}

pub fn validate_pipeline(
    source: &dyn SampleSource,
    simulator: &dyn Simulator,
    corpus_id: &str,
    pipeline: &Value,
) -> ValidationRun {
    match simulate_corpus(source, simulator, corpus_id, pipeline) {
        Ok((samples, response)) => {
            let report = score(&samples, &response.outcomes());
            tracing::info!(
                corpus = corpus_id,
                success_rate = report.success_rate,
                failed = report.failed_samples,
                total = report.total_samples,
                "validation finished"
            );
            ValidationRun {
                pipeline: pipeline.clone(),
                report,
                results: Some(response),
            }
        }
        Err(err) => {
            let reason = format!("Validation error: {:#}", err);
            tracing::warn!(corpus = corpus_id, %reason, "validation degraded");

            let known = source.read_samples(corpus_id).unwrap_or_default();
            ValidationRun {
                pipeline: pipeline.clone(),
                report: ValidationReport::degraded(&known, reason),
                results: None,
            }
        }
    }
}

fn simulate_corpus(
    source: &dyn SampleSource,
    simulator: &dyn Simulator,
    corpus_id: &str,
    pipeline: &Value,
) -> Result<(Vec<String>, SimulateResponse)> {
    let samples = source.read_samples(corpus_id)?;
    if samples.is_empty() {
        bail!("No samples found for corpus: {}", corpus_id);
    }

    let docs = build_docs(&samples);
    tracing::debug!(docs = docs.len(), "simulate start");
    let response = simulator.simulate(pipeline, &docs)?;
    tracing::debug!(results = response.docs.len(), "simulate done");

    Ok((samples, response))
}
