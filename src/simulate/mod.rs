//! Execution collaborator: runs a declared pipeline against wrapped samples.
//!
//! The wire shapes follow the ingest simulate API:
//! request docs are `{"_source": {"message": ..., "original_index": n}}`,
//! response docs carry either `doc._source` or `error.reason`.

pub mod doc;
pub mod recorded;

pub use doc::{
    MAX_SIMULATED_SAMPLES, SampleEnvelope, SimulateDoc, SimulateResponse, SimulateResult,
    build_docs,
};
pub use recorded::RecordedSimulator;

use crate::Result;
use serde_json::Value;

/// Runs `pipeline` over `docs` and returns one result per doc, in order.
///
/// Implementations may return fewer results than docs.
pub trait Simulator {
    fn simulate(&self, pipeline: &Value, docs: &[SimulateDoc]) -> Result<SimulateResponse>;
}
