//! JSON report for a single capability result.

use serde::Serialize;

use super::Metrics;
use crate::capability::{CapabilityInput, ProcessCapability};

/// `{ "input": {...}, "metrics": {...} }`
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport<'a> {
    pub input: &'a CapabilityInput,
    pub metrics: Metrics,
}

impl<'a> JsonReport<'a> {
    pub fn new(result: &'a ProcessCapability) -> Self {
        Self {
            input: result.input(),
            metrics: result.metrics(),
        }
    }
}

/// Pretty-printed JSON report.
pub fn to_json(result: &ProcessCapability) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport::new(result))
}
