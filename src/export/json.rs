//! JSON export implementation.
//!
//! Exports ordering results in JSON format for machine-readable output.

use super::{Exporter, OrderReport};
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Serializable unit for JSON output.
#[derive(Serialize)]
struct JsonUnit<'a> {
    name: &'a str,
    position: usize,
    component: usize,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    in_cycle: bool,
}

/// Serializable cycle witness for JSON output.
#[derive(Serialize)]
struct JsonCycle<'a> {
    units: &'a [String],
    path: String,
}

/// Summary statistics for JSON output.
#[derive(Serialize)]
struct JsonSummary {
    total_units: usize,
    components: usize,
    cyclic_components: usize,
    units_in_cycles: usize,
    acyclic: bool,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport<'a> {
    project: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    anchor: Option<&'a str>,
    summary: JsonSummary,
    order: Vec<JsonUnit<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cycle: Option<JsonCycle<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cyclic_components: Vec<&'a [String]>,
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, report: &OrderReport, writer: &mut W) -> io::Result<()> {
        let order = report
            .order
            .iter()
            .map(|u| JsonUnit {
                name: &u.name,
                position: u.position,
                component: u.component,
                in_cycle: u.in_cycle,
            })
            .collect();

        let export = JsonExport {
            project: &report.project_name,
            anchor: report.anchor.as_deref(),
            summary: JsonSummary {
                total_units: report.order.len(),
                components: report.component_count,
                cyclic_components: report.cyclic_components.len(),
                units_in_cycles: report.cyclic_unit_count(),
                acyclic: report.acyclic,
            },
            order,
            cycle: report.witness.as_ref().map(|c| JsonCycle {
                units: &c.nodes,
                path: c.cycle_path(),
            }),
            cyclic_components: report
                .cyclic_components
                .iter()
                .map(Vec::as_slice)
                .collect(),
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}
