//! Validated process statistics and specification limits.
//!
//! A [`CapabilityInput`] can only be obtained through its validating
//! constructors, so every downstream computation may assume a positive,
//! finite standard deviation and at least one well-ordered limit.

use std::fmt;

use serde::Serialize;

use crate::error::{CapabilityError, Result};

/// Identifies an input field in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Field {
    Mean,
    StdDev,
    Usl,
    Lsl,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Mean => "mean",
            Field::StdDev => "standard deviation",
            Field::Usl => "USL",
            Field::Lsl => "LSL",
        };
        f.write_str(name)
    }
}

/// Process mean, standard deviation, and one or two specification limits.
///
/// # Invariants
///
/// - `mean` and `std_dev` are finite, `std_dev > 0`
/// - at least one of `usl` / `lsl` is present, and present limits are finite
/// - if both limits are present, `usl > lsl`
///
/// # Examples
///
/// ```
/// use cpk_metrics::capability::CapabilityInput;
///
/// let input = CapabilityInput::new(10.0, 1.0, Some(13.0), Some(7.0)).unwrap();
/// assert_eq!(input.usl(), Some(13.0));
///
/// // One-sided specification
/// assert!(CapabilityInput::new(10.0, 1.0, None, Some(7.0)).is_ok());
///
/// // No limits at all
/// assert!(CapabilityInput::new(10.0, 1.0, None, None).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CapabilityInput {
    mean: f64,
    #[serde(rename = "stddev")]
    std_dev: f64,
    usl: Option<f64>,
    lsl: Option<f64>,
}

impl CapabilityInput {
    /// Validates the four scalar inputs.
    ///
    /// # Errors
    ///
    /// Checks run in this order and the first failure is returned:
    /// - [`CapabilityError::InvalidType`] if `mean` or `std_dev` is non-finite
    /// - [`CapabilityError::InvalidStdDev`] if `std_dev <= 0`
    /// - [`CapabilityError::InvalidType`] if a present limit is non-finite
    /// - [`CapabilityError::MissingLimits`] if both limits are `None`
    /// - [`CapabilityError::EqualLimits`] if `usl == lsl`
    /// - [`CapabilityError::InvertedLimits`] if `lsl > usl`
    /// - [`CapabilityError::InvalidType`] if the values are finite but an
    ///   index derived from them would overflow to infinity or NaN
    pub fn new(mean: f64, std_dev: f64, usl: Option<f64>, lsl: Option<f64>) -> Result<Self> {
        require_finite(Field::Mean, mean)?;
        require_finite(Field::StdDev, std_dev)?;
        if std_dev <= 0.0 {
            return Err(CapabilityError::InvalidStdDev { value: std_dev });
        }
        if let Some(u) = usl {
            require_finite(Field::Usl, u)?;
        }
        if let Some(l) = lsl {
            require_finite(Field::Lsl, l)?;
        }
        match (usl, lsl) {
            (None, None) => return Err(CapabilityError::MissingLimits),
            (Some(u), Some(l)) if u == l => {
                return Err(CapabilityError::EqualLimits { value: u });
            }
            (Some(u), Some(l)) if l > u => {
                return Err(CapabilityError::InvertedLimits { usl: u, lsl: l });
            }
            _ => {}
        }
        require_representable(mean, std_dev, usl, lsl)?;

        Ok(Self {
            mean,
            std_dev,
            usl,
            lsl,
        })
    }

    /// Parses and validates textual inputs, as read from a command line or
    /// a CSV cell.
    ///
    /// Blank limit text (empty or whitespace only) means the limit is absent.
    /// Validation order matches [`CapabilityInput::new`], with unparseable text
    /// reported as [`CapabilityError::InvalidType`] at the point its field is
    /// checked.
    ///
    /// ```
    /// use cpk_metrics::capability::CapabilityInput;
    /// use cpk_metrics::CapabilityError;
    ///
    /// let input = CapabilityInput::parse("10", "1", Some("13"), Some("")).unwrap();
    /// assert_eq!(input.lsl(), None);
    ///
    /// let err = CapabilityInput::parse("ten", "1", Some("13"), None).unwrap_err();
    /// assert!(matches!(err, CapabilityError::InvalidType { .. }));
    /// ```
    pub fn parse(mean: &str, std_dev: &str, usl: Option<&str>, lsl: Option<&str>) -> Result<Self> {
        let mean = parse_number(Field::Mean, mean)?;
        let std_dev = parse_number(Field::StdDev, std_dev)?;
        if std_dev <= 0.0 {
            return Err(CapabilityError::InvalidStdDev { value: std_dev });
        }
        let usl = parse_limit(Field::Usl, usl)?;
        let lsl = parse_limit(Field::Lsl, lsl)?;
        Self::new(mean, std_dev, usl, lsl)
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    pub fn usl(&self) -> Option<f64> {
        self.usl
    }

    pub fn lsl(&self) -> Option<f64> {
        self.lsl
    }
}

fn require_finite(field: Field, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CapabilityError::invalid_type(field, value.to_string()))
    }
}

/// Every index and the sigma level must stay finite for the inputs.
fn require_representable(
    mean: f64,
    std_dev: f64,
    usl: Option<f64>,
    lsl: Option<f64>,
) -> Result<()> {
    let three_sigma = 3.0 * std_dev;
    let six_sigma = 6.0 * std_dev;
    if !six_sigma.is_finite() {
        return Err(overflow(Field::StdDev, std_dev, "6 * standard deviation"));
    }
    if let Some(u) = usl {
        let cpu = (u - mean) / three_sigma;
        if !(cpu * 3.0).is_finite() {
            return Err(overflow(Field::Usl, u, "Cpu"));
        }
    }
    if let Some(l) = lsl {
        let cpl = (mean - l) / three_sigma;
        if !(cpl * 3.0).is_finite() {
            return Err(overflow(Field::Lsl, l, "Cpl"));
        }
    }
    if let (Some(u), Some(l)) = (usl, lsl) {
        let spec_range = u - l;
        let cp = spec_range / six_sigma;
        let cpa = (mean - (u + l) / 2.0) / spec_range;
        if !(cp.is_finite() && cpa.is_finite()) {
            return Err(overflow(Field::Usl, u, "Cp / Cpa"));
        }
    }
    Ok(())
}

fn overflow(field: Field, value: f64, index: &str) -> CapabilityError {
    CapabilityError::invalid_type(field, format!("{value} (overflows {index})"))
}

fn parse_number(field: Field, text: &str) -> Result<f64> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CapabilityError::invalid_type(field, text)),
    }
}

fn parse_limit(field: Field, text: Option<&str>) -> Result<Option<f64>> {
    match text.map(str::trim) {
        None | Some("") => Ok(None),
        Some(t) => parse_number(field, t).map(Some),
    }
}
