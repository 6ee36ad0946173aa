//! # cpk-metrics
//!
//! Process capability metrics (Cp, Cpk, Cpu, Cpl, Cpa, sigma level) from a
//! process mean, standard deviation, and one or two specification limits,
//! with qualitative ratings for Cpk and Cpa.
//!
//! Inputs are already-computed statistics: no estimation from raw samples
//! is performed.
//!
//! ## Modules
//!
//! - [`capability`]: Input validation, index derivation, rating bands
//! - [`report`]: Ordered metric mapping, console table, JSON report
//! - [`batch`]: Per-row evaluation of CSV files
//!
//! ## Example
//!
//! ```
//! use cpk_metrics::ProcessCapability;
//!
//! let pc = ProcessCapability::new(10.0, 1.0, Some(14.0), Some(6.0)).unwrap();
//! assert!((pc.cpk().unwrap() - 1.333).abs() < 1e-3);
//!
//! // Rendering is a separate, explicit step.
//! let table = pc.metrics().to_string();
//! assert!(table.starts_with("| Metric"));
//! ```

pub mod batch;
pub mod capability;
pub mod cli;
pub mod config;
pub mod error;
pub mod report;

pub use capability::{CapabilityInput, CpaRating, CpkRating, ProcessCapability, SigmaLevel};
pub use config::{BatchConfig, OutputFormat};
pub use error::{BatchError, CapabilityError, Result};
