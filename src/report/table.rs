//! Two-column aligned console table.
//!
//! ```text
//! | Metric                   | Value |
//! |----------------------------------|
//! | Process Capability       | 1.000 |
//! | Process Capability Index | None  |
//! ```

use std::io::{self, Write};

use super::MetricValue;

const HEADER: [&str; 2] = ["Metric", "Value"];

/// Text shown for an absent metric.
pub const ABSENT: &str = "None";

/// Renders `entries` as an aligned table, one line per entry after the
/// header and divider. Every line ends with `\n`.
///
/// ```
/// use cpk_metrics::report::{render_table, MetricValue};
///
/// let table = render_table(&[("Cp", Some(MetricValue::Number(1.0)))]);
/// assert_eq!(table, "| Metric | Value |\n|----------------|\n| Cp     | 1.000 |\n");
/// ```
pub fn render_table<K: AsRef<str>>(entries: &[(K, Option<MetricValue>)]) -> String {
    let rows: Vec<(&str, String)> = entries
        .iter()
        .map(|(name, value)| {
            let cell = value
                .as_ref()
                .map_or_else(|| ABSENT.to_string(), MetricValue::to_string);
            (name.as_ref(), cell)
        })
        .collect();

    let name_width = rows
        .iter()
        .map(|(name, _)| display_width(name))
        .chain(std::iter::once(display_width(HEADER[0])))
        .max()
        .unwrap_or(0);
    let value_width = rows
        .iter()
        .map(|(_, value)| display_width(value))
        .chain(std::iter::once(display_width(HEADER[1])))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    push_row(&mut out, HEADER[0], HEADER[1], name_width, value_width);
    out.push('|');
    out.push_str(&"-".repeat(name_width + value_width + 5));
    out.push_str("|\n");
    for (name, value) in &rows {
        push_row(&mut out, name, value, name_width, value_width);
    }
    out
}

/// Writes the rendered table to `writer`.
pub fn write_table<W: Write, K: AsRef<str>>(
    writer: &mut W,
    entries: &[(K, Option<MetricValue>)],
) -> io::Result<()> {
    writer.write_all(render_table(entries).as_bytes())
}

/// Prints the rendered table to stdout.
///
/// Unlike `print!`, a closed stdout is reported as an error instead of a panic.
pub fn print_table<K: AsRef<str>>(entries: &[(K, Option<MetricValue>)]) -> io::Result<()> {
    write_table(&mut io::stdout().lock(), entries)
}

// `{:<w}` pads by char count, so widths are measured the same way.
fn display_width(s: &str) -> usize {
    s.chars().count()
}

fn push_row(out: &mut String, name: &str, value: &str, name_width: usize, value_width: usize) {
    out.push_str(&format!(
        "| {name:<name_width$} | {value:<value_width$} |\n"
    ));
}
