//! Error types for graph construction and ordering queries.
//!
//! A cyclic graph is not an error: cycles are reported through
//! [`Orderer::is_acyclic`](super::Orderer::is_acyclic) and
//! [`Orderer::cycle_witness`](super::Orderer::cycle_witness). The variants
//! here cover malformed input and misuse of the ordering API.

use thiserror::Error;

/// Result type alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur while building or querying a dependency ordering.
///
/// Nodes are rendered with their `Debug` representation so the error type
/// stays independent of the caller's node type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A node declares a dependency on something outside the node set.
    #[error("Node {node} depends on {dependency}, which is not part of the graph")]
    DanglingEdge {
        /// The node that declared the dependency
        node: String,
        /// The missing dependency
        dependency: String,
    },

    /// The same node was enumerated more than once.
    #[error("Node {node} appears more than once in the node enumeration")]
    DuplicateNode {
        /// The duplicated node
        node: String,
    },

    /// A node passed to a query is not part of the graph.
    #[error("Node {node} is not part of the graph")]
    UnknownNode {
        /// The unknown node
        node: String,
    },

    /// An anchored comparator was requested from an orderer built without an anchor.
    #[error("Anchored ordering requested, but no anchor node was supplied")]
    NoAnchor,

    /// The anchor did not reach every node, so the anchored order would
    /// still depend on the node enumeration.
    #[error("Anchor {anchor} reaches only {reached} of {total} nodes")]
    NotReachableFromAnchor {
        /// The anchor node
        anchor: String,
        /// Number of nodes discovered from the anchor
        reached: usize,
        /// Total number of nodes in the graph
        total: usize,
    },
}

impl GraphError {
    pub(crate) fn unknown_node(node: &impl std::fmt::Debug) -> Self {
        Self::UnknownNode {
            node: format!("{node:?}"),
        }
    }
}
