//! Process capability indices (Cp, Cpu, Cpl, Cpk, Cpa) and their ratings.
//!
//! Indices are computed from an already-known process mean and standard
//! deviation. One-sided specifications are first-class: indices that need
//! both limits are absent rather than approximated.
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.,
//!   Chapter 8.
//! - Kane (1986), "Process Capability Indices", *Journal of Quality Technology*
//!   18(1), pp. 41--52.

use serde::Serialize;
use tracing::debug;

use super::input::CapabilityInput;
use super::rating::{CpaRating, CpkRating};
use super::sigma_level::{sigma_from_cpk, SigmaLevel};
use crate::error::Result;
use crate::report::{MetricValue, Metrics};

/// Computed capability snapshot.
///
/// Built once from a validated [`CapabilityInput`] and never mutated.
/// Fields are `Option` because not every index exists for a one-sided
/// specification.
///
/// # Index interpretation
///
/// | Index | Value | Interpretation |
/// |-------|-------|----------------|
/// | Cp | >= 1.33 | Spread fits the tolerance |
/// | Cpk | >= 1.33 | Process is capable and centered |
/// | Cpa | ~ 0 | Mean sits on the specification midpoint |
///
/// # Examples
///
/// ```
/// use cpk_metrics::capability::{CpkRating, ProcessCapability};
///
/// let pc = ProcessCapability::new(10.0, 1.0, Some(13.0), Some(7.0)).unwrap();
/// assert_eq!(pc.process_capability(), Some(1.0));
/// assert_eq!(pc.process_capability_index(), Some(1.0));
/// assert_eq!(pc.process_capability_index_rating(), Some(CpkRating::Low));
///
/// // Upper limit only: Cp and Cpa need both limits.
/// let pc = ProcessCapability::new(10.0, 1.0, Some(13.0), None).unwrap();
/// assert!(pc.process_capability().is_none());
/// assert!(pc.process_accuracy().is_none());
/// assert_eq!(pc.process_capability_index(), Some(1.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessCapability {
    input: CapabilityInput,
    /// Cp = (USL - LSL) / (6 * sigma). Requires both limits.
    cp: Option<f64>,
    /// Cpu = (USL - mean) / (3 * sigma). Requires USL.
    cpu: Option<f64>,
    /// Cpl = (mean - LSL) / (3 * sigma). Requires LSL.
    cpl: Option<f64>,
    /// Cpk = min(Cpu, Cpl) over whichever are present.
    cpk: Option<f64>,
    /// Cpa = (mean - midpoint) / (USL - LSL). Requires both limits.
    cpa: Option<f64>,
    /// Cpk * 3.
    sigma_level: Option<f64>,
    cpk_rating: Option<CpkRating>,
    cpa_rating: Option<CpaRating>,
}

impl ProcessCapability {
    /// Validates the inputs and computes every applicable index.
    ///
    /// # Errors
    ///
    /// Any validation failure from [`CapabilityInput::new`].
    pub fn new(mean: f64, std_dev: f64, usl: Option<f64>, lsl: Option<f64>) -> Result<Self> {
        CapabilityInput::new(mean, std_dev, usl, lsl).map(Self::from_input)
    }

    /// Computes every applicable index from validated input.
    pub fn from_input(input: CapabilityInput) -> Self {
        let mean = input.mean();
        let sigma = input.std_dev();

        let cpu = input.usl().map(|u| (u - mean) / (3.0 * sigma));
        let cpl = input.lsl().map(|l| (mean - l) / (3.0 * sigma));
        let cpk = match (cpu, cpl) {
            (Some(u), Some(l)) => Some(u.min(l)),
            (Some(u), None) => Some(u),
            (None, Some(l)) => Some(l),
            (None, None) => None,
        };

        let (cp, cpa) = match (input.usl(), input.lsl()) {
            (Some(u), Some(l)) => {
                let spec_range = u - l;
                let midpoint = (u + l) / 2.0;
                (
                    Some(spec_range / (6.0 * sigma)),
                    Some((mean - midpoint) / spec_range),
                )
            }
            _ => (None, None),
        };

        let result = Self {
            input,
            cp,
            cpu,
            cpl,
            cpk,
            cpa,
            sigma_level: cpk.map(sigma_from_cpk),
            cpk_rating: cpk.map(CpkRating::classify),
            cpa_rating: cpa.map(CpaRating::classify),
        };
        debug!(
            mean,
            std_dev = sigma,
            usl = ?input.usl(),
            lsl = ?input.lsl(),
            cpk = ?result.cpk,
            "computed process capability"
        );
        result
    }

    /// The validated input this snapshot was computed from.
    pub fn input(&self) -> &CapabilityInput {
        &self.input
    }

    /// **Cp**, process capability (also called process potential).
    pub fn process_capability(&self) -> Option<f64> {
        self.cp
    }

    /// **Cpu**, upper one-sided capability.
    pub fn process_capability_upper(&self) -> Option<f64> {
        self.cpu
    }

    /// **Cpl**, lower one-sided capability.
    pub fn process_capability_lower(&self) -> Option<f64> {
        self.cpl
    }

    /// **Cpk**, the binding one-sided capability.
    pub fn process_capability_index(&self) -> Option<f64> {
        self.cpk
    }

    /// **Cpa**, process accuracy.
    ///
    /// 0 is perfect centering and ±0.5 puts the mean on a limit. Negative
    /// values lean toward the LSL, positive toward the USL.
    pub fn process_accuracy(&self) -> Option<f64> {
        self.cpa
    }

    /// Numeric sigma level, `Cpk * 3`.
    pub fn sigma_level(&self) -> Option<f64> {
        self.sigma_level
    }

    /// Sigma level display band.
    pub fn sigma_level_display(&self) -> Option<SigmaLevel> {
        self.sigma_level.map(SigmaLevel::classify)
    }

    pub fn process_capability_index_rating(&self) -> Option<CpkRating> {
        self.cpk_rating
    }

    pub fn process_accuracy_rating(&self) -> Option<CpaRating> {
        self.cpa_rating
    }

    pub fn cp(&self) -> Option<f64> {
        self.cp
    }

    pub fn cpu(&self) -> Option<f64> {
        self.cpu
    }

    pub fn cpl(&self) -> Option<f64> {
        self.cpl
    }

    pub fn cpk(&self) -> Option<f64> {
        self.cpk
    }

    pub fn cpa(&self) -> Option<f64> {
        self.cpa
    }

    /// All metrics and ratings as an ordered name/value mapping.
    ///
    /// ```
    /// use cpk_metrics::capability::ProcessCapability;
    /// use cpk_metrics::report::MetricValue;
    ///
    /// let pc = ProcessCapability::new(10.0, 1.0, Some(14.0), Some(6.0)).unwrap();
    /// let metrics = pc.metrics();
    /// assert_eq!(metrics.len(), 8);
    /// assert_eq!(
    ///     metrics.get("Process Accuracy Rating"),
    ///     Some(&MetricValue::Label("Level A".into()))
    /// );
    /// ```
    pub fn metrics(&self) -> Metrics {
        let number = |v: Option<f64>| v.map(MetricValue::Number);
        let label = |v: Option<String>| v.map(MetricValue::Label);

        Metrics::from_entries(vec![
            (Metrics::PROCESS_CAPABILITY, number(self.cp)),
            (Metrics::PROCESS_CAPABILITY_INDEX, number(self.cpk)),
            (Metrics::PROCESS_CAPABILITY_UPPER, number(self.cpu)),
            (Metrics::PROCESS_CAPABILITY_LOWER, number(self.cpl)),
            (Metrics::PROCESS_ACCURACY, number(self.cpa)),
            (
                Metrics::PROCESS_SIGMA_LEVEL,
                label(self.sigma_level_display().map(|s| s.to_string())),
            ),
            (
                Metrics::PROCESS_CAPABILITY_INDEX_RATING,
                label(self.cpk_rating.map(|r| r.as_str().to_string())),
            ),
            (
                Metrics::PROCESS_ACCURACY_RATING,
                label(self.cpa_rating.map(|r| r.as_str().to_string())),
            ),
        ])
    }
}
