//! Batch evaluation of tabular process statistics.
//!
//! Each CSV row supplies a mean, a standard deviation, and optional limits.
//! The calculator runs once per row and the eight metric columns are
//! appended to the original columns on output.
//!
//! # Example
//!
//! ```
//! use cpk_metrics::batch;
//! use cpk_metrics::BatchConfig;
//!
//! let input = "part,mean,stddev,USL,LSL\nA,10,1,13,7\nB,10,1,13,\n";
//! let mut output = Vec::new();
//! let summary = batch::run(input.as_bytes(), &mut output, &BatchConfig::default()).unwrap();
//!
//! assert_eq!(summary.computed, 2);
//! let text = String::from_utf8(output).unwrap();
//! assert!(text.starts_with("part,mean,stddev,USL,LSL,Process Capability,"));
//! ```

mod csv;

pub use self::csv::{escape_field, parse_line, read_csv, write_record, CsvRow, CsvTable};

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::capability::{CapabilityInput, ProcessCapability};
use crate::config::BatchConfig;
use crate::error::{BatchError, CapabilityError};
use crate::report::Metrics;

/// Positions of the input columns within the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    mean: usize,
    std_dev: usize,
    usl: Option<usize>,
    lsl: Option<usize>,
}

impl Columns {
    fn locate(header: &[String], config: &BatchConfig) -> Result<Self, BatchError> {
        let find = |name: &str| {
            header
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| BatchError::MissingColumn {
                name: name.to_string(),
            })
        };

        Ok(Self {
            mean: require(&config.mean_column)?,
            std_dev: require(&config.std_dev_column)?,
            usl: find(&config.usl_column),
            lsl: find(&config.lsl_column),
        })
    }
}

/// Parsed batch input with its input columns located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    table: CsvTable,
    columns: Columns,
}

impl Batch {
    pub fn header(&self) -> &[String] {
        &self.table.header
    }

    pub fn rows(&self) -> &[CsvRow] {
        &self.table.rows
    }

    pub fn len(&self) -> usize {
        self.table.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.rows.is_empty()
    }

    fn input_for(&self, row: &CsvRow) -> Result<CapabilityInput, CapabilityError> {
        let cell = |idx: usize| row.fields[idx].as_str();
        CapabilityInput::parse(
            cell(self.columns.mean),
            cell(self.columns.std_dev),
            self.columns.usl.map(cell),
            self.columns.lsl.map(cell),
        )
    }
}

/// Result of evaluating one row.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Computed(ProcessCapability),
    Invalid(CapabilityError),
}

impl BatchOutcome {
    pub fn result(&self) -> Option<&ProcessCapability> {
        match self {
            BatchOutcome::Computed(pc) => Some(pc),
            BatchOutcome::Invalid(_) => None,
        }
    }
}

/// Row counts from a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub rows: usize,
    pub computed: usize,
    pub skipped: usize,
}

/// Reads CSV input and locates the configured columns.
///
/// # Errors
///
/// [`BatchError::Parse`] for malformed CSV, [`BatchError::MissingColumn`]
/// if the mean or standard deviation column is not in the header.
pub fn read_rows<R: BufRead>(reader: R, config: &BatchConfig) -> Result<Batch, BatchError> {
    let table = read_csv(reader)?;
    let columns = Columns::locate(&table.header, config)?;
    Ok(Batch { table, columns })
}

/// Runs the calculator once per row.
///
/// # Errors
///
/// [`BatchError::InvalidRow`] for the first row that fails validation,
/// unless `config.skip_invalid` is set.
pub fn evaluate(batch: &Batch, config: &BatchConfig) -> Result<Vec<BatchOutcome>, BatchError> {
    batch
        .rows()
        .iter()
        .map(|row| match batch.input_for(row) {
            Ok(input) => Ok(BatchOutcome::Computed(ProcessCapability::from_input(input))),
            Err(source) if config.skip_invalid => {
                warn!(line = row.line, error = %source, "skipping invalid row");
                Ok(BatchOutcome::Invalid(source))
            }
            Err(source) => Err(BatchError::InvalidRow {
                line: row.line,
                source,
            }),
        })
        .collect()
}

/// Writes the original columns followed by the metric columns.
///
/// Numbers are written at full precision, labels verbatim, and absent
/// metrics (including every metric of an invalid row) as empty cells.
pub fn write_results<W: Write>(
    mut writer: W,
    batch: &Batch,
    outcomes: &[BatchOutcome],
) -> Result<(), BatchError> {
    let header = batch
        .header()
        .iter()
        .map(String::as_str)
        .chain(Metrics::NAMES);
    write_record(&mut writer, header)?;

    for (row, outcome) in batch.rows().iter().zip(outcomes) {
        let metric_cells: Vec<String> = match outcome.result() {
            Some(pc) => pc
                .metrics()
                .iter()
                .map(|(_, value)| value.map(csv_cell).unwrap_or_default())
                .collect(),
            None => vec![String::new(); Metrics::NAMES.len()],
        };
        let record = row
            .fields
            .iter()
            .map(String::as_str)
            .chain(metric_cells.iter().map(String::as_str));
        write_record(&mut writer, record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads, evaluates, and writes a batch in one pass.
pub fn run<R: BufRead, W: Write>(
    reader: R,
    writer: W,
    config: &BatchConfig,
) -> Result<BatchSummary, BatchError> {
    let batch = read_rows(reader, config)?;
    let outcomes = evaluate(&batch, config)?;
    write_results(writer, &batch, &outcomes)?;
    Ok(summarize(&outcomes))
}

/// Runs a batch from `input`, writing to `output` or stdout.
///
/// The output file is only created once every row has been read and
/// evaluated, so a failed batch leaves an existing file untouched.
pub fn run_file(
    input: &Path,
    output: Option<&Path>,
    config: &BatchConfig,
) -> Result<BatchSummary, BatchError> {
    let batch = read_rows(BufReader::new(File::open(input)?), config)?;
    let outcomes = evaluate(&batch, config)?;
    match output {
        Some(path) => write_results(BufWriter::new(File::create(path)?), &batch, &outcomes)?,
        None => write_results(io::stdout().lock(), &batch, &outcomes)?,
    }
    Ok(summarize(&outcomes))
}

fn summarize(outcomes: &[BatchOutcome]) -> BatchSummary {
    let computed = outcomes.iter().filter(|o| o.result().is_some()).count();
    let summary = BatchSummary {
        rows: outcomes.len(),
        computed,
        skipped: outcomes.len() - computed,
    };
    info!(
        rows = summary.rows,
        computed = summary.computed,
        skipped = summary.skipped,
        "batch complete"
    );
    summary
}

/// Numbers use the shortest round-trip form, so `1.0` is written as `1`.
fn csv_cell(value: &crate::report::MetricValue) -> String {
    match value.as_number() {
        Some(n) => n.to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
part,mean,stddev,USL,LSL
A,10,1,13,7
B,10,1,13,
C,9,0.2,12,8
";

    fn run_to_string(input: &str, config: &BatchConfig) -> Result<(BatchSummary, String), BatchError> {
        let mut out = Vec::new();
        let summary = run(input.as_bytes(), &mut out, config)?;
        Ok((summary, String::from_utf8(out).unwrap()))
    }

    // -----------------------------------------------------------------------
    // Reading
    // -----------------------------------------------------------------------

    #[test]
    fn locates_columns_case_insensitively() {
        let batch = read_rows("MEAN,StdDev,usl\n10,1,13\n".as_bytes(), &BatchConfig::default())
            .unwrap();
        assert_eq!(batch.len(), 1);
        let outcomes = evaluate(&batch, &BatchConfig::default()).unwrap();
        let pc = outcomes[0].result().unwrap();
        assert_eq!(pc.cpu(), Some(1.0));
        assert_eq!(pc.cpl(), None);
    }

    #[test]
    fn missing_required_column() {
        let err = read_rows("mean,USL\n10,13\n".as_bytes(), &BatchConfig::default()).unwrap_err();
        assert!(matches!(err, BatchError::MissingColumn { ref name } if name == "stddev"));
    }

    #[test]
    fn custom_column_names() {
        let config = BatchConfig::default()
            .with_mean_column("avg")
            .with_std_dev_column("sigma")
            .with_lsl_column("lower");
        let batch = read_rows("avg,sigma,lower\n10,1,7\n".as_bytes(), &config).unwrap();
        let outcomes = evaluate(&batch, &config).unwrap();
        assert_eq!(outcomes[0].result().unwrap().cpl(), Some(1.0));
    }

    // -----------------------------------------------------------------------
    // Evaluation
    // -----------------------------------------------------------------------

    #[test]
    fn evaluates_every_row() {
        let config = BatchConfig::default();
        let batch = read_rows(SAMPLE.as_bytes(), &config).unwrap();
        let outcomes = evaluate(&batch, &config).unwrap();

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].result().unwrap().cp(), Some(1.0));
        assert_eq!(outcomes[1].result().unwrap().cp(), None);
        assert_eq!(
            outcomes[2].result().unwrap().cpk(),
            outcomes[2].result().unwrap().cpl()
        );
    }

    #[test]
    fn invalid_row_aborts_by_default() {
        let input = "mean,stddev,USL,LSL\n10,1,13,7\n10,0,13,7\n";
        let err = run_to_string(input, &BatchConfig::default()).unwrap_err();
        match err {
            BatchError::InvalidRow { line, source } => {
                assert_eq!(line, 3);
                assert_eq!(source, CapabilityError::InvalidStdDev { value: 0.0 });
            }
            other => panic!("expected InvalidRow, got {other:?}"),
        }
    }

    #[test]
    fn invalid_rows_skipped_when_configured() {
        let input = "mean,stddev,USL,LSL\n10,1,13,7\n10,1,,\nx,1,13,7\n";
        let config = BatchConfig::default().with_skip_invalid(true);
        let (summary, text) = run_to_string(input, &config).unwrap();

        assert_eq!(
            summary,
            BatchSummary {
                rows: 3,
                computed: 1,
                skipped: 2
            }
        );
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2], "10,1,,,,,,,,,,");
        assert_eq!(lines[3], "x,1,13,7,,,,,,,,");
    }

    // -----------------------------------------------------------------------
    // Writing
    // -----------------------------------------------------------------------

    #[test]
    fn output_appends_metric_columns() {
        let (summary, text) = run_to_string(SAMPLE, &BatchConfig::default()).unwrap();
        assert_eq!(summary.computed, 3);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "part,mean,stddev,USL,LSL,Process Capability,Process Capability Index,\
             Process Capability Upper,Process Capability Lower,Process Accuracy,\
             Process Sigma Level,Process Capability Index Rating,Process Accuracy Rating"
        );
        assert_eq!(lines[1], "A,10,1,13,7,1,1,1,1,0,3σ,Low,Level A");
        assert_eq!(lines[2], "B,10,1,13,,,1,1,,,3σ,Low,");
    }

    #[test]
    fn original_fields_are_re_escaped() {
        let input = "part,mean,stddev,USL\n\"left, upper\",10,1,13\n";
        let (_, text) = run_to_string(input, &BatchConfig::default()).unwrap();
        assert!(text.lines().nth(1).unwrap().starts_with("\"left, upper\",10,1,13,"));
    }

    #[test]
    fn run_file_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(&input, SAMPLE).unwrap();

        let summary = run_file(&input, Some(&output), &BatchConfig::default()).unwrap();
        assert_eq!(summary.rows, 3);

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written.lines().count(), 4);
    }

    #[test]
    fn run_file_reports_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_file(&dir.path().join("nope.csv"), None, &BatchConfig::default())
            .unwrap_err();
        assert!(matches!(err, BatchError::Io(_)));
    }

    #[test]
    fn failed_batch_leaves_existing_output_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");
        std::fs::write(&output, "previous results\n").unwrap();

        let invalid = dir.path().join("invalid.csv");
        std::fs::write(&invalid, "mean,stddev,USL,LSL\n10,0,13,7\n").unwrap();
        let err = run_file(&invalid, Some(&output), &BatchConfig::default()).unwrap_err();
        assert!(matches!(err, BatchError::InvalidRow { line: 2, .. }), "{err:?}");
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous results\n");

        let no_mean = dir.path().join("no_mean.csv");
        std::fs::write(&no_mean, "avg,stddev,USL\n10,1,13\n").unwrap();
        let err = run_file(&no_mean, Some(&output), &BatchConfig::default()).unwrap_err();
        assert!(matches!(err, BatchError::MissingColumn { .. }), "{err:?}");
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous results\n");
    }
}
