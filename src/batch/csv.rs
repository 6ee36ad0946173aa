//! Minimal CSV reading and writing for batch evaluation.
//!
//! Supports the subset of RFC 4180 that spreadsheet exports produce:
//! comma separators, double-quoted fields, and `""` escapes inside quotes.
//! Quoted fields may not span lines.

use std::io::{BufRead, Write};

use crate::error::BatchError;

/// A data row together with its 1-indexed source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Header plus data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTable {
    pub header: Vec<String>,
    pub rows: Vec<CsvRow>,
}

/// Reads a CSV document whose first non-blank line is the header.
///
/// Blank lines are skipped. A data row whose field count differs from the
/// header's is a parse error.
pub fn read_csv<R: BufRead>(reader: R) -> Result<CsvTable, BatchError> {
    let mut header: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for (idx, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line_num = idx + 1;
        let line = line.trim_end_matches('\r');

        if line.trim().is_empty() {
            continue;
        }

        let fields = parse_line(line, line_num)?;
        match &header {
            None => header = Some(fields),
            Some(h) if h.len() != fields.len() => {
                return Err(BatchError::parse(
                    line_num,
                    format!("expected {} fields, got {}", h.len(), fields.len()),
                ));
            }
            Some(_) => rows.push(CsvRow {
                line: line_num,
                fields,
            }),
        }
    }

    let header = header.ok_or_else(|| BatchError::parse(1, "missing header row"))?;
    Ok(CsvTable { header, rows })
}

/// Splits one CSV line into fields.
pub fn parse_line(line: &str, line_num: usize) -> Result<Vec<String>, BatchError> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
        } else {
            match c {
                '"' if field.is_empty() => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                _ => field.push(c),
            }
        }
    }

    if in_quotes {
        return Err(BatchError::parse(line_num, "unterminated quoted field"));
    }
    fields.push(field);
    Ok(fields)
}

/// Quotes a field if it contains a comma, quote, or newline.
pub fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Writes one record followed by `\n`.
pub fn write_record<W, I, S>(writer: &mut W, fields: I) -> std::io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let line = fields
        .into_iter()
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(writer, "{line}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_header_and_rows() {
        let input = "mean,stddev,USL,LSL\n10,1,13,7\n\n9,0.2,12,\n";
        let table = read_csv(input.as_bytes()).unwrap();

        assert_eq!(table.header, ["mean", "stddev", "USL", "LSL"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].line, 2);
        assert_eq!(table.rows[1].line, 4);
        assert_eq!(table.rows[1].fields, ["9", "0.2", "12", ""]);
    }

    #[test]
    fn handles_crlf_line_endings() {
        let table = read_csv("a,b\r\n1,2\r\n".as_bytes()).unwrap();
        assert_eq!(table.header, ["a", "b"]);
        assert_eq!(table.rows[0].fields, ["1", "2"]);
    }

    #[test]
    fn quoted_fields() {
        let fields = parse_line(r#""part, left","say ""hi""",3"#, 1).unwrap();
        assert_eq!(fields, ["part, left", r#"say "hi""#, "3"]);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        let err = parse_line(r#""open,1"#, 7).unwrap_err();
        assert!(matches!(err, BatchError::Parse { line: 7, .. }));
    }

    #[test]
    fn ragged_row_is_an_error() {
        let err = read_csv("a,b\n1,2,3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, BatchError::Parse { line: 2, .. }));
    }

    #[test]
    fn empty_input_has_no_header() {
        let err = read_csv("\n\n".as_bytes()).unwrap_err();
        assert!(matches!(err, BatchError::Parse { .. }));
    }

    #[test]
    fn escape_round_trips_through_parse() {
        let original = ["plain", "with,comma", "with \"quote\""];
        let mut buf = Vec::new();
        write_record(&mut buf, original).unwrap();
        let line = String::from_utf8(buf).unwrap();

        assert_eq!(
            line,
            "plain,\"with,comma\",\"with \"\"quote\"\"\"\n"
        );
        assert_eq!(parse_line(line.trim_end(), 1).unwrap(), original);
    }
}
