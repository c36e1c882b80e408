//! CSV export implementation.
//!
//! Exports the computed order in CSV format for spreadsheet use.

use super::{Exporter, OrderReport};
use std::io::{self, Write};

/// CSV exporter implementation.
pub struct CsvExporter;

impl CsvExporter {
    /// Escape a field value for CSV format.
    ///
    /// Wraps the value in quotes if it contains commas, quotes, or newlines.
    fn escape_field(value: &str) -> String {
        if value.contains(',') || value.contains('"') || value.contains('\n') {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

impl Exporter for CsvExporter {
    fn export<W: Write>(&self, report: &OrderReport, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "position,name,component,in_cycle")?;

        for unit in &report.order {
            writeln!(
                writer,
                "{},{},{},{}",
                unit.position,
                Self::escape_field(&unit.name),
                unit.component,
                unit.in_cycle
            )?;
        }

        Ok(())
    }
}
