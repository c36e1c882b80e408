//! Export functionality for ordering results.
//!
//! This module provides exporters for writing a computed dependency order
//! in various formats: plain text, JSON, CSV, and Markdown.

pub mod csv;
pub mod json;
pub mod markdown;
pub mod text;

use crate::graph::Orderer;
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Plain text - one unit per line, for shells and scripts
    #[default]
    Text,
    /// JSON format - machine-readable, full data
    Json,
    /// CSV format - spreadsheet-friendly
    Csv,
    /// Markdown format - documentation/reporting
    Markdown,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: text, json, csv, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// A unit placed in the computed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedUnit {
    /// Unit name
    pub name: String,
    /// Position in the overall order (0 = processed first)
    pub position: usize,
    /// Topological rank of the unit's component
    pub component: usize,
    /// Whether the unit is part of a cycle
    pub in_cycle: bool,
}

/// Information about a detected circular dependency.
///
/// Contains the unit names forming the cycle; each depends on the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleInfo {
    /// The unit names in the cycle (the last connects back to the first)
    pub nodes: Vec<String>,
}

impl CycleInfo {
    /// Returns a formatted string representation of the cycle path.
    ///
    /// For example: "a -> b -> c -> a"
    pub fn cycle_path(&self) -> String {
        let Some(first) = self.nodes.first() else {
            return String::new();
        };
        format!("{} -> {}", self.nodes.join(" -> "), first)
    }

    /// Returns the number of units in the cycle.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the cycle is empty (should not happen in practice).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Data container for export operations.
///
/// Holds everything an exporter needs, detached from the orderer.
#[derive(Debug, Clone)]
pub struct OrderReport {
    /// Project name
    pub project_name: String,
    /// Anchor used for the traversal, if any
    pub anchor: Option<String>,
    /// Whether the graph is free of cycles
    pub acyclic: bool,
    /// Units in computed order
    pub order: Vec<OrderedUnit>,
    /// Number of strongly connected components
    pub component_count: usize,
    /// One concrete cycle, when the graph is cyclic
    pub witness: Option<CycleInfo>,
    /// Every component that forms a cycle
    pub cyclic_components: Vec<Vec<String>>,
}

impl OrderReport {
    /// Create a report from a finished orderer.
    pub fn new(project_name: impl Into<String>, orderer: &Orderer<String>) -> Self {
        let order = orderer
            .ranked_nodes()
            .map(|(name, rank)| OrderedUnit {
                name: name.clone(),
                position: rank.position,
                component: rank.component,
                in_cycle: orderer.is_cyclic_component(rank.component),
            })
            .collect();

        Self {
            project_name: project_name.into(),
            anchor: orderer.anchor().cloned(),
            acyclic: orderer.is_acyclic(),
            order,
            component_count: orderer.component_count(),
            witness: orderer.cycle_witness().map(|nodes| CycleInfo { nodes }),
            cyclic_components: orderer.cyclic_components(),
        }
    }

    /// Number of units that sit on a cycle
    pub fn cyclic_unit_count(&self) -> usize {
        self.order.iter().filter(|u| u.in_cycle).count()
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the report to the given writer.
    fn export<W: Write>(&self, report: &OrderReport, writer: &mut W) -> io::Result<()>;
}

/// Export a report in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    report: &OrderReport,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Text => text::TextExporter.export(report, writer),
        ExportFormat::Json => json::JsonExporter.export(report, writer),
        ExportFormat::Csv => csv::CsvExporter.export(report, writer),
        ExportFormat::Markdown => markdown::MarkdownExporter.export(report, writer),
    }
}

/// Export a report to a string.
pub fn export_to_string(format: ExportFormat, report: &OrderReport) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, report, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
