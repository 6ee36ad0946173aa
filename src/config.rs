//! Configuration for batch evaluation and output rendering.

use clap::ValueEnum;

/// How a single result is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned console table (default)
    #[default]
    Table,
    /// Pretty-printed JSON document
    Json,
}

/// Options for evaluating a CSV batch.
///
/// Column names are matched case-insensitively against the header row.
/// The mean and standard deviation columns are required; a limit column
/// missing from the header is treated as absent for every row.
///
/// # Examples
///
/// ```
/// use cpk_metrics::BatchConfig;
///
/// let config = BatchConfig::default()
///     .with_mean_column("avg")
///     .with_skip_invalid(true);
/// assert_eq!(config.mean_column, "avg");
/// assert_eq!(config.std_dev_column, "stddev");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Default: `mean`.
    pub mean_column: String,
    /// Default: `stddev`.
    pub std_dev_column: String,
    /// Default: `USL`.
    pub usl_column: String,
    /// Default: `LSL`.
    pub lsl_column: String,
    /// Keep going past rows that fail validation, leaving their metric
    /// cells empty. Default: `false` (the first invalid row aborts).
    pub skip_invalid: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            mean_column: "mean".to_string(),
            std_dev_column: "stddev".to_string(),
            usl_column: "USL".to_string(),
            lsl_column: "LSL".to_string(),
            skip_invalid: false,
        }
    }
}

impl BatchConfig {
    pub fn with_mean_column(mut self, name: impl Into<String>) -> Self {
        self.mean_column = name.into();
        self
    }

    pub fn with_std_dev_column(mut self, name: impl Into<String>) -> Self {
        self.std_dev_column = name.into();
        self
    }

    pub fn with_usl_column(mut self, name: impl Into<String>) -> Self {
        self.usl_column = name.into();
        self
    }

    pub fn with_lsl_column(mut self, name: impl Into<String>) -> Self {
        self.lsl_column = name.into();
        self
    }

    pub fn with_skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }
}
