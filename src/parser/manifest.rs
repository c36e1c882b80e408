//! Parser for JSON dependency manifests.
//!
//! This module reads manifest files and checks that they describe a
//! usable set of units before they are turned into a graph.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::types::Manifest;

/// Errors that can occur during manifest parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse JSON content.
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The manifest structure is invalid.
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a manifest file from a file path.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use deporder::parser::manifest::parse_file;
///
/// let manifest = parse_file(Path::new("units.json")).unwrap();
/// println!("Units: {}", manifest.node_count());
/// ```
pub fn parse_file(path: &Path) -> ParseResult<Manifest> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parses a manifest from a string.
///
/// # Example
///
/// ```
/// use deporder::parser::manifest::parse_str;
///
/// let json = r#"{"name": "app", "nodes": [{"name": "core"}]}"#;
/// let manifest = parse_str(json).unwrap();
/// assert_eq!(manifest.name, Some("app".to_string()));
/// ```
pub fn parse_str(content: &str) -> ParseResult<Manifest> {
    let manifest: Manifest = serde_json::from_str(content)?;
    Ok(manifest)
}

/// Validates a parsed manifest.
///
/// A manifest must declare at least one unit, every unit needs a non-empty
/// name, and the anchor (when set) must name a declared unit. Dangling
/// dependencies and duplicate names are reported by the graph view when the
/// manifest is turned into a graph.
pub fn validate(manifest: &Manifest) -> ParseResult<()> {
    if manifest.nodes.is_empty() {
        return Err(ParseError::InvalidManifest(
            "manifest declares no nodes".to_string(),
        ));
    }

    if let Some(pos) = manifest.nodes.iter().position(|n| n.name.trim().is_empty()) {
        return Err(ParseError::InvalidManifest(format!(
            "node #{} has an empty name",
            pos + 1
        )));
    }

    if let Some(anchor) = &manifest.anchor {
        let names: HashSet<&str> = manifest.names().collect();
        if !names.contains(anchor.as_str()) {
            return Err(ParseError::InvalidManifest(format!(
                "anchor '{}' is not a declared node",
                anchor
            )));
        }
    }

    Ok(())
}

/// Reads, parses and validates a manifest file.
pub fn load(path: &Path) -> ParseResult<Manifest> {
    let manifest = parse_file(path)?;
    validate(&manifest)?;
    tracing::debug!(
        path = %path.display(),
        nodes = manifest.node_count(),
        edges = manifest.edge_count(),
        "manifest loaded"
    );
    Ok(manifest)
}
