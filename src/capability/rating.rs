//! Qualitative rating bands for Cpk and Cpa.
//!
//! # Cpk bands
//!
//! Lower bound exclusive, upper bound inclusive:
//!
//! | Cpk | Rating |
//! |-----|--------|
//! | <= 0 | Abnormally Poor |
//! | (0, 0.5] | Poor |
//! | (0.5, 1] | Low |
//! | (1, 1.33] | Good |
//! | (1.33, 1.67] | Great |
//! | (1.67, 2] | Excellent |
//! | > 2 | Abnormally High |
//!
//! # Cpa bands
//!
//! Applied to `|Cpa|`, lower bound inclusive, upper bound exclusive:
//!
//! | \|Cpa\| | Rating |
//! |-------|--------|
//! | < 0.125 | Level A |
//! | [0.125, 0.25) | Level B |
//! | [0.25, 0.5) | Level C |
//! | >= 0.5 | Level D |

use std::fmt;

use serde::{Serialize, Serializer};

/// Upper (inclusive) bounds of the finite Cpk bands, in ascending order.
const CPK_BOUNDS: [(f64, CpkRating); 6] = [
    (0.0, CpkRating::AbnormallyPoor),
    (0.5, CpkRating::Poor),
    (1.0, CpkRating::Low),
    (1.33, CpkRating::Good),
    (1.67, CpkRating::Great),
    (2.0, CpkRating::Excellent),
];

/// Upper (exclusive) bounds of the finite |Cpa| bands, in ascending order.
const CPA_BOUNDS: [(f64, CpaRating); 3] = [
    (0.125, CpaRating::LevelA),
    (0.25, CpaRating::LevelB),
    (0.5, CpaRating::LevelC),
];

/// Rating of the process capability index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CpkRating {
    AbnormallyPoor,
    Poor,
    Low,
    Good,
    Great,
    Excellent,
    AbnormallyHigh,
}

impl CpkRating {
    /// Classifies a (signed) Cpk value.
    ///
    /// ```
    /// use cpk_metrics::capability::CpkRating;
    ///
    /// assert_eq!(CpkRating::classify(1.0), CpkRating::Low);
    /// assert_eq!(CpkRating::classify(1.2), CpkRating::Good);
    /// ```
    pub fn classify(cpk: f64) -> Self {
        CPK_BOUNDS
            .iter()
            .find(|(upper, _)| cpk <= *upper)
            .map_or(CpkRating::AbnormallyHigh, |&(_, rating)| rating)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CpkRating::AbnormallyPoor => "Abnormally Poor",
            CpkRating::Poor => "Poor",
            CpkRating::Low => "Low",
            CpkRating::Good => "Good",
            CpkRating::Great => "Great",
            CpkRating::Excellent => "Excellent",
            CpkRating::AbnormallyHigh => "Abnormally High",
        }
    }
}

/// Rating of process accuracy (centering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CpaRating {
    LevelA,
    LevelB,
    LevelC,
    LevelD,
}

impl CpaRating {
    /// Classifies a signed Cpa value by its magnitude.
    ///
    /// ```
    /// use cpk_metrics::capability::CpaRating;
    ///
    /// assert_eq!(CpaRating::classify(-0.2), CpaRating::LevelB);
    /// assert_eq!(CpaRating::classify(0.125), CpaRating::LevelB);
    /// ```
    pub fn classify(cpa: f64) -> Self {
        let magnitude = cpa.abs();
        CPA_BOUNDS
            .iter()
            .find(|(upper, _)| magnitude < *upper)
            .map_or(CpaRating::LevelD, |&(_, rating)| rating)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CpaRating::LevelA => "Level A",
            CpaRating::LevelB => "Level B",
            CpaRating::LevelC => "Level C",
            CpaRating::LevelD => "Level D",
        }
    }
}

impl fmt::Display for CpkRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CpaRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CpkRating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl Serialize for CpaRating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
