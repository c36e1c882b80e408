//! Read-only graph view over caller-owned nodes.
//!
//! The view is the single place where the caller's "depends-on" relation is
//! turned into graph edges. Edges are **not** inverted: the successors of a
//! node are exactly the nodes it depends on, so a topological sort over the
//! view ranks nodes without dependencies first.

use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use super::error::{GraphError, GraphResult};

/// An immutable snapshot of nodes and their dependencies.
///
/// Nodes keep the caller's enumeration order, and each node's successors keep
/// the order in which the caller declared them. Both orders feed into the
/// tie-breaking of [`Orderer`](super::Orderer), so they are preserved exactly.
///
/// Internally every node gets a dense index at build time; all bookkeeping
/// downstream is keyed by that index, so node hashing is paid once here.
///
/// # Example
///
/// ```rust
/// use deporder::graph::GraphView;
///
/// let deps = [("app", vec!["core", "log"]), ("core", vec!["log"]), ("log", vec![])];
/// let view = GraphView::new(deps.iter().map(|(n, _)| *n), |node| {
///     deps.iter()
///         .find(|(n, _)| n == node)
///         .map(|(_, d)| d.clone())
///         .unwrap_or_default()
/// })
/// .unwrap();
///
/// assert_eq!(view.len(), 3);
/// assert_eq!(view.edge_count(), 3);
/// let app_deps: Vec<_> = view.successors(&"app").unwrap().collect();
/// assert_eq!(app_deps, vec![&"core", &"log"]);
/// ```
#[derive(Debug, Clone)]
pub struct GraphView<N> {
    /// Nodes in enumeration order; position is the node's dense index
    nodes: Vec<N>,
    /// Maps each node to its dense index for O(1) lookup
    indices: HashMap<N, usize>,
    /// Successor (dependency) indices per node, in declaration order
    successors: Vec<Vec<usize>>,
    edge_count: usize,
}

impl<N> GraphView<N>
where
    N: Clone + Eq + Hash + Debug,
{
    /// Builds a view from a node enumeration and a dependency function.
    ///
    /// `dependencies_of` is called once per node, in enumeration order, and
    /// must only return nodes that are themselves part of `nodes`.
    ///
    /// # Errors
    ///
    /// - [`GraphError::DuplicateNode`] if a node is enumerated twice.
    /// - [`GraphError::DanglingEdge`] if a dependency is not in the node set.
    pub fn new<I, F, S>(nodes: I, mut dependencies_of: F) -> GraphResult<Self>
    where
        I: IntoIterator<Item = N>,
        F: FnMut(&N) -> S,
        S: IntoIterator<Item = N>,
    {
        let nodes: Vec<N> = nodes.into_iter().collect();
        let indices = index_nodes(&nodes)?;

        let mut successors = Vec::with_capacity(nodes.len());
        for node in &nodes {
            let mut targets = Vec::new();
            for dependency in dependencies_of(node) {
                let Some(&idx) = indices.get(&dependency) else {
                    return Err(GraphError::DanglingEdge {
                        node: format!("{node:?}"),
                        dependency: format!("{dependency:?}"),
                    });
                };
                targets.push(idx);
            }
            successors.push(targets);
        }

        Ok(Self::assemble(nodes, indices, successors))
    }

    /// Builds a view from a petgraph graph whose edges point from the
    /// dependent node to its dependency.
    ///
    /// Node weights become the nodes, in node-index order. Outgoing edges
    /// keep the order in which they were added to the graph.
    ///
    /// # Errors
    ///
    /// [`GraphError::DuplicateNode`] if two node weights compare equal.
    ///
    /// # Example
    ///
    /// ```rust
    /// use deporder::graph::GraphView;
    /// use petgraph::graph::DiGraph;
    ///
    /// let mut g = DiGraph::<&str, ()>::new();
    /// let app = g.add_node("app");
    /// let core = g.add_node("core");
    /// g.add_edge(app, core, ());
    ///
    /// let view = GraphView::from_digraph(&g).unwrap();
    /// assert_eq!(view.successors(&"app").unwrap().collect::<Vec<_>>(), vec![&"core"]);
    /// ```
    pub fn from_digraph<E>(graph: &DiGraph<N, E>) -> GraphResult<Self> {
        let nodes: Vec<N> = graph.node_weights().cloned().collect();
        let indices = index_nodes(&nodes)?;

        let successors = graph
            .node_indices()
            .map(|idx| {
                // petgraph yields outgoing edges newest first
                let mut targets: Vec<usize> =
                    graph.edges(idx).map(|edge| edge.target().index()).collect();
                targets.reverse();
                targets
            })
            .collect();

        Ok(Self::assemble(nodes, indices, successors))
    }

    fn assemble(nodes: Vec<N>, indices: HashMap<N, usize>, successors: Vec<Vec<usize>>) -> Self {
        let edge_count = successors.iter().map(Vec::len).sum();
        Self {
            nodes,
            indices,
            successors,
            edge_count,
        }
    }

    /// Returns all nodes in enumeration order.
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Returns the dependencies of `node` in declaration order, or `None`
    /// if the node is not part of the view.
    pub fn successors(&self, node: &N) -> Option<impl Iterator<Item = &N> + '_> {
        let idx = self.index_of(node)?;
        Some(self.successors[idx].iter().map(|&s| &self.nodes[s]))
    }

    /// Returns the dense index assigned to `node`.
    pub fn index_of(&self, node: &N) -> Option<usize> {
        self.indices.get(node).copied()
    }

    /// Returns the node with the given dense index.
    pub fn node(&self, index: usize) -> Option<&N> {
        self.nodes.get(index)
    }

    /// Checks if a node exists in the view.
    pub fn contains(&self, node: &N) -> bool {
        self.indices.contains_key(node)
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Checks if the view has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of dependency edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub(crate) fn successor_indices(&self, index: usize) -> &[usize] {
        &self.successors[index]
    }
}

fn index_nodes<N>(nodes: &[N]) -> GraphResult<HashMap<N, usize>>
where
    N: Clone + Eq + Hash + Debug,
{
    let mut indices = HashMap::with_capacity(nodes.len());
    for (idx, node) in nodes.iter().enumerate() {
        if indices.insert(node.clone(), idx).is_some() {
            return Err(GraphError::DuplicateNode {
                node: format!("{node:?}"),
            });
        }
    }
    Ok(indices)
}
