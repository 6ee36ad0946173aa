//! Sigma quality level display bands.
//!
//! The numeric sigma level is `Cpk * 3`: the number of standard deviations
//! that fit between the process mean and the nearest specification limit.
//! For display it is floored to a whole sigma count:
//!
//! | Sigma value | Display |
//! |-------------|---------|
//! | <= 0 | Completely out of specification |
//! | (0, 9] | `floor(value)σ` |
//! | > 9 | Abnormally High |
//!
//! So a Cpk in `[1, 1.33)` reads as 3σ, `[1.33, 1.67)` as 4σ, and so on.

use std::fmt;

use serde::{Serialize, Serializer};

/// Largest sigma level rendered as a count.
pub const MAX_DISPLAYED_SIGMA: f64 = 9.0;

/// Converts a Cpk value to its numeric sigma level.
///
/// ```
/// use cpk_metrics::capability::sigma_from_cpk;
///
/// assert_eq!(sigma_from_cpk(1.0), 3.0);
/// ```
pub fn sigma_from_cpk(cpk: f64) -> f64 {
    cpk * 3.0
}

/// Displayable sigma level band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SigmaLevel {
    /// Sigma value at or below zero: the mean sits on or beyond a limit.
    OutOfSpecification,
    /// Whole number of sigmas, `0..=9`.
    Sigma(u8),
    /// Sigma value above nine.
    AbnormallyHigh,
}

impl SigmaLevel {
    /// Classifies a numeric sigma level (`Cpk * 3`).
    ///
    /// ```
    /// use cpk_metrics::capability::SigmaLevel;
    ///
    /// assert_eq!(SigmaLevel::classify(4.02), SigmaLevel::Sigma(4));
    /// assert_eq!(SigmaLevel::classify(9.0).to_string(), "9σ");
    /// assert_eq!(SigmaLevel::classify(9.99), SigmaLevel::AbnormallyHigh);
    /// ```
    pub fn classify(value: f64) -> Self {
        if value <= 0.0 {
            SigmaLevel::OutOfSpecification
        } else if value <= MAX_DISPLAYED_SIGMA {
            // value is in (0, 9], so the floor fits in a u8
            SigmaLevel::Sigma(value.floor() as u8)
        } else {
            SigmaLevel::AbnormallyHigh
        }
    }

    /// Classifies directly from a Cpk value.
    pub fn from_cpk(cpk: f64) -> Self {
        Self::classify(sigma_from_cpk(cpk))
    }
}

impl fmt::Display for SigmaLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SigmaLevel::OutOfSpecification => f.write_str("Completely out of specification"),
            SigmaLevel::Sigma(n) => write!(f, "{n}\u{03c3}"),
            SigmaLevel::AbnormallyHigh => f.write_str("Abnormally High"),
        }
    }
}

impl Serialize for SigmaLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Cpk inputs with the sigma label they should produce.
    #[test]
    fn sigma_display_from_cpk() {
        let cases = [
            (-0.5, "Completely out of specification"),
            (0.0, "Completely out of specification"),
            (0.34, "1σ"),
            (0.67, "2σ"),
            (1.0, "3σ"),
            (1.34, "4σ"),
            (1.67, "5σ"),
            (2.0, "6σ"),
            (2.34, "7σ"),
            (2.67, "8σ"),
            (3.0, "9σ"),
            (3.33, "Abnormally High"),
        ];
        for (cpk, expected) in cases {
            assert_eq!(
                SigmaLevel::from_cpk(cpk).to_string(),
                expected,
                "Cpk = {cpk}"
            );
        }
    }

    #[test]
    fn fractional_sigma_below_one_floors_to_zero() {
        assert_eq!(SigmaLevel::classify(0.5), SigmaLevel::Sigma(0));
        assert_eq!(SigmaLevel::classify(0.5).to_string(), "0σ");
    }

    #[test]
    fn boundary_values() {
        assert_eq!(SigmaLevel::classify(9.0), SigmaLevel::Sigma(9));
        assert_eq!(SigmaLevel::classify(9.000_001), SigmaLevel::AbnormallyHigh);
        assert_eq!(SigmaLevel::classify(-1e-12), SigmaLevel::OutOfSpecification);
    }

    #[test]
    fn serializes_as_display_string() {
        assert_eq!(
            serde_json::to_string(&SigmaLevel::Sigma(6)).unwrap(),
            "\"6σ\""
        );
    }
}
