//! Presentation of computed capability metrics.
//!
//! [`Metrics`] is the ordered name/value mapping produced by
//! [`ProcessCapability::metrics`](crate::capability::ProcessCapability::metrics).
//! It is consumed by the console table renderer ([`render_table`]) and the
//! JSON report ([`to_json`]), and supplies the metric columns of a CSV batch.

mod json;
mod table;

pub use json::{to_json, JsonReport};
pub use table::{print_table, render_table, write_table, ABSENT};

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A single metric value: either a number or a qualitative label.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Number(f64),
    Label(String),
}

impl MetricValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            MetricValue::Label(_) => None,
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            MetricValue::Number(_) => None,
            MetricValue::Label(s) => Some(s),
        }
    }
}

/// Numbers render to 3 decimal places, labels verbatim.
impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(n) => write!(f, "{n:.3}"),
            MetricValue::Label(s) => f.write_str(s),
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetricValue::Number(n) => serializer.serialize_f64(*n),
            MetricValue::Label(s) => serializer.serialize_str(s),
        }
    }
}

/// Ordered mapping of metric name to optional value.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    entries: Vec<(&'static str, Option<MetricValue>)>,
}

impl Metrics {
    pub const PROCESS_CAPABILITY: &'static str = "Process Capability";
    pub const PROCESS_CAPABILITY_INDEX: &'static str = "Process Capability Index";
    pub const PROCESS_CAPABILITY_UPPER: &'static str = "Process Capability Upper";
    pub const PROCESS_CAPABILITY_LOWER: &'static str = "Process Capability Lower";
    pub const PROCESS_ACCURACY: &'static str = "Process Accuracy";
    pub const PROCESS_SIGMA_LEVEL: &'static str = "Process Sigma Level";
    pub const PROCESS_CAPABILITY_INDEX_RATING: &'static str = "Process Capability Index Rating";
    pub const PROCESS_ACCURACY_RATING: &'static str = "Process Accuracy Rating";

    /// Every metric name, in report order.
    pub const NAMES: [&'static str; 8] = [
        Self::PROCESS_CAPABILITY,
        Self::PROCESS_CAPABILITY_INDEX,
        Self::PROCESS_CAPABILITY_UPPER,
        Self::PROCESS_CAPABILITY_LOWER,
        Self::PROCESS_ACCURACY,
        Self::PROCESS_SIGMA_LEVEL,
        Self::PROCESS_CAPABILITY_INDEX_RATING,
        Self::PROCESS_ACCURACY_RATING,
    ];

    pub fn from_entries(entries: Vec<(&'static str, Option<MetricValue>)>) -> Self {
        Self { entries }
    }

    /// Looks up a metric by name. Returns `None` for unknown names and for
    /// metrics that are absent.
    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, v)| v.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&MetricValue>)> + '_ {
        self.entries.iter().map(|(n, v)| (*n, v.as_ref()))
    }

    pub fn entries(&self) -> &[(&'static str, Option<MetricValue>)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Renders the aligned console table.
impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_table(&self.entries))
    }
}

/// Serializes as a JSON object in report order, absent values as `null`.
impl Serialize for Metrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Metrics {
        Metrics::from_entries(vec![
            (Metrics::PROCESS_CAPABILITY, None),
            (Metrics::PROCESS_CAPABILITY_INDEX, Some(MetricValue::Number(1.0))),
            (
                Metrics::PROCESS_CAPABILITY_INDEX_RATING,
                Some(MetricValue::Label("Low".to_string())),
            ),
        ])
    }

    #[test]
    fn get_distinguishes_absent_and_present() {
        let m = sample();
        assert_eq!(m.get(Metrics::PROCESS_CAPABILITY), None);
        assert_eq!(
            m.get(Metrics::PROCESS_CAPABILITY_INDEX),
            Some(&MetricValue::Number(1.0))
        );
        assert_eq!(m.get("Unknown"), None);
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn metric_value_display() {
        assert_eq!(MetricValue::Number(1.0).to_string(), "1.000");
        assert_eq!(MetricValue::Number(-0.16666).to_string(), "-0.167");
        assert_eq!(MetricValue::Label("Level A".into()).to_string(), "Level A");
    }

    #[test]
    fn metric_value_accessors() {
        assert_eq!(MetricValue::Number(2.5).as_number(), Some(2.5));
        assert_eq!(MetricValue::Number(2.5).as_label(), None);
        assert_eq!(MetricValue::Label("Poor".into()).as_label(), Some("Poor"));
    }

    #[test]
    fn serializes_in_order_with_nulls() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"Process Capability":null,"Process Capability Index":1.0,"Process Capability Index Rating":"Low"}"#
        );
    }
}
