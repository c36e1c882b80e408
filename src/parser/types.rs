//! Shared types for dependency manifests.
//!
//! A manifest lists the units to order and what each of them depends on.
//! It is the configuration input of the `deporder` binary and a convenient
//! way to build a [`GraphView`] from data.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::graph::{GraphResult, GraphView};

/// Represents the structure of a dependency manifest file.
///
/// # Example
///
/// ```
/// use deporder::parser::types::Manifest;
///
/// let json = r#"{
///     "name": "services",
///     "anchor": "api",
///     "nodes": [
///         {"name": "api", "depends_on": ["db"]},
///         {"name": "db"}
///     ]
/// }"#;
/// let manifest: Manifest = serde_json::from_str(json).unwrap();
/// assert_eq!(manifest.node_count(), 2);
/// assert_eq!(manifest.edge_count(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Name of the project the units belong to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Unit to start the traversal from, for an enumeration-independent order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,

    /// Units in enumeration order.
    #[serde(default)]
    pub nodes: Vec<UnitSpec>,
}

impl Manifest {
    /// Returns the number of declared units.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the total number of declared dependencies.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.depends_on.len()).sum()
    }

    /// Returns the unit names in enumeration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.name.as_str())
    }

    /// Returns the project name, or a placeholder when none is set.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }

    /// Builds a graph view over the unit names.
    ///
    /// # Errors
    ///
    /// Fails with [`GraphError::DanglingEdge`](crate::graph::GraphError::DanglingEdge)
    /// when a unit depends on an undeclared name, and with
    /// [`GraphError::DuplicateNode`](crate::graph::GraphError::DuplicateNode)
    /// when a name is declared twice.
    pub fn to_graph(&self) -> GraphResult<GraphView<String>> {
        let deps: HashMap<&str, &[String]> = self
            .nodes
            .iter()
            .map(|n| (n.name.as_str(), n.depends_on.as_slice()))
            .collect();

        GraphView::new(self.names().map(str::to_string), |name| {
            deps.get(name.as_str())
                .map(|d| d.to_vec())
                .unwrap_or_default()
        })
    }
}

/// A single unit and the units it depends on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnitSpec {
    /// The unit name (e.g., "core", "http-server").
    pub name: String,

    /// Names of the units this unit depends on, in declaration order.
    #[serde(default, alias = "dependsOn")]
    pub depends_on: Vec<String>,
}

impl UnitSpec {
    /// Creates a new unit with the given dependencies.
    pub fn new<I, S>(name: impl Into<String>, depends_on: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            depends_on: depends_on.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the unit has no dependencies.
    pub fn is_leaf(&self) -> bool {
        self.depends_on.is_empty()
    }
}

impl fmt::Display for UnitSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.depends_on.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} -> [{}]", self.name, self.depends_on.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphError;

    fn manifest(nodes: Vec<UnitSpec>) -> Manifest {
        Manifest {
            name: Some("test".to_string()),
            anchor: None,
            nodes,
        }
    }

    #[test]
    fn test_unit_spec_new() {
        let unit = UnitSpec::new("api", ["db", "cache"]);
        assert_eq!(unit.name, "api");
        assert_eq!(unit.depends_on, vec!["db", "cache"]);
        assert!(!unit.is_leaf());
    }

    #[test]
    fn test_unit_spec_display() {
        assert_eq!(UnitSpec::new("db", Vec::<String>::new()).to_string(), "db");
        assert_eq!(
            UnitSpec::new("api", ["db", "cache"]).to_string(),
            "api -> [db, cache]"
        );
    }

    #[test]
    fn test_manifest_default() {
        let m = Manifest::default();
        assert!(m.name.is_none());
        assert_eq!(m.node_count(), 0);
        assert_eq!(m.display_name(), "unnamed");
    }

    #[test]
    fn test_to_graph() {
        let m = manifest(vec![
            UnitSpec::new("api", ["db"]),
            UnitSpec::new("db", Vec::<String>::new()),
        ]);
        let view = m.to_graph().unwrap();
        assert_eq!(view.len(), 2);
        assert_eq!(view.edge_count(), 1);
        let deps: Vec<_> = view.successors(&"api".to_string()).unwrap().collect();
        assert_eq!(deps, vec!["db"]);
    }

    #[test]
    fn test_to_graph_dangling_reference() {
        let m = manifest(vec![UnitSpec::new("api", ["missing"])]);
        assert!(matches!(
            m.to_graph(),
            Err(GraphError::DanglingEdge { .. })
        ));
    }

    #[test]
    fn test_depends_on_camel_case_alias() {
        let json = r#"{"nodes": [{"name": "a", "dependsOn": ["b"]}, {"name": "b"}]}"#;
        let m: Manifest = serde_json::from_str(json).unwrap();
        assert_eq!(m.nodes[0].depends_on, vec!["b"]);
        assert!(m.nodes[1].is_leaf());
    }
}
