//! Process capability analysis.
//!
//! Computes standard capability indices from a known process mean and
//! standard deviation, and classifies them into qualitative bands.
//!
//! # Indices
//!
//! - **Cp**: Potential capability (spread vs tolerance)
//! - **Cpu**, **Cpl**: One-sided capability against each limit
//! - **Cpk**: Actual capability (the worse of Cpu and Cpl)
//! - **Cpa**: Accuracy (offset of the mean from the specification midpoint)
//!
//! # Ratings
//!
//! - [`CpkRating`]: seven bands from "Abnormally Poor" to "Abnormally High"
//! - [`CpaRating`]: Level A (centered) to Level D
//! - [`SigmaLevel`]: `Cpk * 3` floored to a whole sigma count

mod indices;
mod input;
mod rating;
mod sigma_level;

pub use indices::ProcessCapability;
pub use input::{CapabilityInput, Field};
pub use rating::{CpaRating, CpkRating};
pub use sigma_level::{sigma_from_cpk, SigmaLevel, MAX_DISPLAYED_SIGMA};
