//! Markdown export implementation.
//!
//! Exports ordering results in Markdown format for documentation and reporting.

use super::{Exporter, OrderReport};
use std::io::{self, Write};

/// Markdown exporter implementation.
pub struct MarkdownExporter;

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, report: &OrderReport, writer: &mut W) -> io::Result<()> {
        // Title
        writeln!(writer, "# Dependency Order Report")?;
        writeln!(writer)?;
        writeln!(writer, "**Project:** {}", report.project_name)?;
        if let Some(anchor) = &report.anchor {
            writeln!(writer)?;
            writeln!(writer, "**Anchor:** `{}`", anchor)?;
        }
        writeln!(writer)?;

        // Summary section
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Value |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(writer, "| Units | {} |", report.order.len())?;
        writeln!(writer, "| Components | {} |", report.component_count)?;
        writeln!(
            writer,
            "| Cyclic Components | {} |",
            report.cyclic_components.len()
        )?;
        writeln!(
            writer,
            "| Acyclic | {} |",
            if report.acyclic { "yes" } else { "no" }
        )?;
        writeln!(writer)?;

        // Order table
        writeln!(writer, "## Order")?;
        writeln!(writer)?;
        writeln!(writer, "| # | Unit | Component |")?;
        writeln!(writer, "|---|------|-----------|")?;
        for unit in &report.order {
            let marker = if unit.in_cycle { " (cycle)" } else { "" };
            writeln!(
                writer,
                "| {} | {}{} | {} |",
                unit.position + 1,
                unit.name,
                marker,
                unit.component
            )?;
        }
        writeln!(writer)?;

        // Circular dependencies
        if let Some(witness) = &report.witness {
            writeln!(writer, "## Circular Dependencies")?;
            writeln!(writer)?;
            writeln!(writer, "Example cycle: `{}`", witness.cycle_path())?;
            writeln!(writer)?;
            writeln!(writer, "Components forming cycles:")?;
            writeln!(writer)?;
            for (i, component) in report.cyclic_components.iter().enumerate() {
                writeln!(writer, "{}. {}", i + 1, component.join(", "))?;
            }
            writeln!(writer)?;
        }

        // Footer
        writeln!(writer, "---")?;
        writeln!(writer, "*Generated by deporder*")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::report_of;

    fn render(report: &OrderReport) -> String {
        let mut output = Vec::new();
        MarkdownExporter.export(report, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_markdown_export_basic() {
        let md_str = render(&report_of(&[("app", &["core"]), ("core", &[])]));

        assert!(md_str.contains("# Dependency Order Report"));
        assert!(md_str.contains("**Project:** test-project"));
        assert!(md_str.contains("| Units | 2 |"));
        assert!(md_str.contains("| Acyclic | yes |"));
        assert!(!md_str.contains("**Anchor:**"));
    }

    #[test]
    fn test_markdown_export_order_table() {
        let md_str = render(&report_of(&[("app", &["core"]), ("core", &[])]));

        assert!(md_str.contains("| 1 | core | 0 |"));
        assert!(md_str.contains("| 2 | app | 1 |"));
    }

    #[test]
    fn test_markdown_export_with_cycles() {
        let md_str = render(&report_of(&[("a", &["b"]), ("b", &["a"])]));

        assert!(md_str.contains("## Circular Dependencies"));
        assert!(md_str.contains("Example cycle: `a -> b -> a`"));
        assert!(md_str.contains("1. b, a"));
        assert!(md_str.contains("| 1 | b (cycle) | 0 |"));
    }

    #[test]
    fn test_markdown_export_no_cycle_section_when_acyclic() {
        let md_str = render(&report_of(&[("x", &[])]));

        assert!(!md_str.contains("## Circular Dependencies"));
        assert!(md_str.contains("*Generated by deporder*"));
    }
}
