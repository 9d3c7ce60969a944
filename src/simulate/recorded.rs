use crate::Result;
use crate::simulate::{SimulateDoc, SimulateResponse, Simulator};

use anyhow::Context;
use serde_json::Value;
use std::fs;

/// Replays a previously captured simulate response.
///
/// Results are truncated to the number of docs requested, so positions stay
/// aligned with the samples that were actually sent.
#[derive(Debug, Clone)]
pub struct RecordedSimulator {
    response: SimulateResponse,
}

impl RecordedSimulator {
    pub fn new(response: SimulateResponse) -> Self {
        Self { response }
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read simulate results {}", path))?;
        let response: SimulateResponse = serde_json::from_str(&text)
            .with_context(|| format!("parse simulate results {}", path))?;
        Ok(Self::new(response))
    }
}

impl Simulator for RecordedSimulator {
    fn simulate(&self, _pipeline: &Value, docs: &[SimulateDoc]) -> Result<SimulateResponse> {
        let mut response = self.response.clone();
        response.docs.truncate(docs.len());
        Ok(response)
    }
}
