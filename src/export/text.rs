//! Plain text export implementation.
//!
//! Writes one unit per line in processing order, so the output can be piped
//! straight into shell loops.

use super::{Exporter, OrderReport};
use std::io::{self, Write};

/// Plain text exporter implementation.
pub struct TextExporter;

impl Exporter for TextExporter {
    fn export<W: Write>(&self, report: &OrderReport, writer: &mut W) -> io::Result<()> {
        for unit in &report.order {
            writeln!(writer, "{}", unit.name)?;
        }
        Ok(())
    }
}
