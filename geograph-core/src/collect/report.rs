//! Whitespace-separated text reports.
//!
//! A report starts with a parameter line of `name = value` triples, followed
//! by a line of column names and one row per sample. Columns are separated
//! by single spaces.

use std::fmt;
use std::io::{self, Write};

use super::StatsCollector;

/// Parameter line written at the top of a report.
///
/// # Examples
/// ```
/// use geograph_core::ReportHeader;
///
/// let header = ReportHeader::new().with("n", 10_000).with("seed", 7);
/// assert_eq!(header.to_string(), "n = 10000 seed = 7");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportHeader {
    entries: Vec<(String, String)>,
}

impl ReportHeader {
    /// Creates an empty header.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter. Names must not contain whitespace for the line to
    /// parse back.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.entries.push((name.into(), value.to_string()));
        self
    }

    /// Returns the parameters in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }
}

impl fmt::Display for ReportHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (name, value)) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name} = {value}")?;
        }
        Ok(())
    }
}

/// Writes `header` followed by the collector's column line and rows.
///
/// # Errors
///
/// Propagates any I/O failure from `out`.
pub fn write_report(
    header: &ReportHeader,
    collector: &dyn StatsCollector,
    out: &mut dyn Write,
) -> io::Result<()> {
    writeln!(out, "{header}")?;
    collector.write_report(out)
}

/// Writes one row of space-separated values.
pub(super) fn write_row<I>(out: &mut dyn Write, values: I) -> io::Result<()>
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    let mut first = true;
    for value in values {
        if first {
            first = false;
        } else {
            out.write_all(b" ")?;
        }
        write!(out, "{value}")?;
    }
    out.write_all(b"\n")
}

/// Column names for a `dimension`-dimensional point following a leading `n`.
pub(super) fn point_columns(dimension: usize) -> Vec<String> {
    let mut columns = vec!["n".to_owned()];
    match dimension {
        2 => columns.extend(["x", "y"].map(str::to_owned)),
        3 => columns.extend(["x", "y", "z"].map(str::to_owned)),
        _ => columns.extend((0..dimension).map(|axis| format!("x{axis}"))),
    }
    columns
}
