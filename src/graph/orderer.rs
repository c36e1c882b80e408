//! Dependency orderer: strongly connected components, topological ranks and
//! cycle witnesses over a [`GraphView`].
//!
//! The analysis runs eagerly when the [`Orderer`] is constructed. It is an
//! iterative Tarjan traversal driven by an explicit frame stack, so graphs
//! with very long dependency chains never touch the native call stack.
//!
//! Ranking rules:
//!
//! - Components are ranked in the order Tarjan finishes them. Because the
//!   successors of a node are its dependencies, a component only ever
//!   depends on components with a strictly lower rank.
//! - Inside a cyclic component, members are ranked in reverse discovery
//!   order: the member discovered last sorts first.
//!
//! Roots are visited in a fixed order: the anchor first (if any), then every
//! still-unvisited node in the view's enumeration order.

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

use super::error::{GraphError, GraphResult};
use super::ordering::NodeOrdering;
use super::view::GraphView;

const UNVISITED: usize = usize::MAX;

/// Final per-node numbering, written once at the end of construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rank {
    /// Topological rank of the node's component
    pub component: usize,
    /// Position of the node inside its component
    pub intra: usize,
    /// Position of the node in the overall order
    pub position: usize,
}

/// Computes and holds a deterministic total order over a dependency graph.
///
/// # Example
///
/// ```rust
/// use deporder::graph::{GraphView, Orderer};
///
/// // app depends on core, core depends on log
/// let view = GraphView::new(["app", "core", "log"], |node| match *node {
///     "app" => vec!["core"],
///     "core" => vec!["log"],
///     _ => vec![],
/// })
/// .unwrap();
///
/// let orderer = Orderer::new(view);
/// assert!(orderer.is_acyclic());
/// assert_eq!(orderer.sorted_nodes(), vec!["log", "core", "app"]);
/// ```
#[derive(Debug, Clone)]
pub struct Orderer<N> {
    graph: GraphView<N>,
    anchor: Option<usize>,
    /// Number of nodes discovered from the anchor root
    anchor_reach: usize,
    ranks: Vec<Rank>,
    /// Node indices per component, by component rank then intra rank
    components: Vec<Vec<usize>>,
    /// Node indices in overall order
    order: Vec<usize>,
    /// Component ranks of components that form a cycle
    cyclic: Vec<usize>,
    witness: Option<Vec<usize>>,
}

impl<N> Orderer<N>
where
    N: Clone + Eq + Hash + Debug,
{
    /// Runs the analysis without an anchor.
    ///
    /// Roots are taken in the view's enumeration order, so the result is
    /// deterministic for a fixed enumeration.
    pub fn new(graph: GraphView<N>) -> Self {
        Self::build(graph, None)
    }

    /// Runs the analysis starting from `anchor`.
    ///
    /// When every node is reachable from the anchor, the resulting order does
    /// not depend on the enumeration order of the view at all.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownNode`] if the anchor is not part of the graph.
    pub fn with_anchor(graph: GraphView<N>, anchor: &N) -> GraphResult<Self> {
        let idx = graph
            .index_of(anchor)
            .ok_or_else(|| GraphError::unknown_node(anchor))?;
        Ok(Self::build(graph, Some(idx)))
    }

    fn build(graph: GraphView<N>, anchor: Option<usize>) -> Self {
        let mut tarjan = Tarjan::new(&graph);

        let mut anchor_reach = 0;
        if let Some(root) = anchor {
            tarjan.run_from(root);
            anchor_reach = tarjan.discovered;
        }
        for root in 0..graph.len() {
            tarjan.run_from(root);
        }

        let components = tarjan.components;
        let mut ranks = vec![
            Rank {
                component: 0,
                intra: 0,
                position: 0,
            };
            graph.len()
        ];
        let mut order = Vec::with_capacity(graph.len());
        let mut cyclic = Vec::new();

        for (component_rank, members) in components.iter().enumerate() {
            for (intra, &node) in members.iter().enumerate() {
                ranks[node] = Rank {
                    component: component_rank,
                    intra,
                    position: order.len(),
                };
                order.push(node);
            }
            let self_loop =
                members.len() == 1 && graph.successor_indices(members[0]).contains(&members[0]);
            if members.len() > 1 || self_loop {
                tracing::trace!(
                    component = component_rank,
                    size = members.len(),
                    "cyclic component"
                );
                cyclic.push(component_rank);
            }
        }

        let witness = cyclic
            .first()
            .map(|&component| find_cycle(&graph, &ranks, &components[component]));

        tracing::debug!(
            nodes = graph.len(),
            edges = graph.edge_count(),
            components = components.len(),
            cyclic_components = cyclic.len(),
            anchored = anchor.is_some(),
            "dependency order computed"
        );

        Self {
            graph,
            anchor,
            anchor_reach,
            ranks,
            components,
            order,
            cyclic,
            witness,
        }
    }

    /// Returns the graph view the order was computed from.
    pub fn graph(&self) -> &GraphView<N> {
        &self.graph
    }

    /// Returns true if no component has more than one node and no node
    /// depends on itself.
    pub fn is_acyclic(&self) -> bool {
        self.cyclic.is_empty()
    }

    /// Returns one cycle present in the graph, or `None` if it is acyclic.
    ///
    /// Each node in the returned path depends on the next one, and the last
    /// depends on the first. The cycle is a shortest cycle through its first
    /// node, taken from the lowest-ranked cyclic component.
    pub fn cycle_witness(&self) -> Option<Vec<N>> {
        self.witness
            .as_ref()
            .map(|path| path.iter().map(|&idx| self.node_at_index(idx).clone()).collect())
    }

    /// Returns one dependency edge `(from, to)` that lies on a cycle.
    ///
    /// `from` depends on `to`, and `to` transitively depends back on `from`.
    /// For a self-loop both elements are the same node.
    pub fn circular_dependency(&self) -> Option<(N, N)> {
        let path = self.witness.as_ref()?;
        let from = path[0];
        let to = path[1 % path.len()];
        Some((self.node_at_index(from).clone(), self.node_at_index(to).clone()))
    }

    /// Returns a comparator over the order computed at construction.
    pub fn comparator(&self) -> NodeOrdering<'_, N> {
        NodeOrdering::new(self)
    }

    /// Returns a comparator that is guaranteed not to depend on the node
    /// enumeration order.
    ///
    /// # Errors
    ///
    /// - [`GraphError::NoAnchor`] if the orderer was built without an anchor.
    /// - [`GraphError::NotReachableFromAnchor`] if some node was not
    ///   discovered from the anchor.
    pub fn anchored_comparator(&self) -> GraphResult<NodeOrdering<'_, N>> {
        let anchor = self.anchor.ok_or(GraphError::NoAnchor)?;
        if !self.explored_from_anchor() {
            return Err(GraphError::NotReachableFromAnchor {
                anchor: format!("{:?}", self.node_at_index(anchor)),
                reached: self.anchor_reach,
                total: self.graph.len(),
            });
        }
        Ok(NodeOrdering::new(self))
    }

    /// Returns the anchor node, if one was supplied.
    pub fn anchor(&self) -> Option<&N> {
        self.anchor.map(|idx| self.node_at_index(idx))
    }

    /// Returns true if an anchor was supplied and it reaches every node.
    pub fn explored_from_anchor(&self) -> bool {
        self.anchor.is_some() && self.anchor_reach == self.graph.len()
    }

    /// Returns all nodes in order: dependencies before their dependents.
    pub fn sorted_nodes(&self) -> Vec<N> {
        self.order
            .iter()
            .map(|&idx| self.node_at_index(idx).clone())
            .collect()
    }

    /// Returns the number of strongly connected components.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Returns every component by rank, members in order.
    pub fn components(&self) -> impl Iterator<Item = Vec<N>> + '_ {
        self.components.iter().map(|members| self.members(members))
    }

    /// Returns only the components that form a cycle.
    pub fn cyclic_components(&self) -> Vec<Vec<N>> {
        self.cyclic
            .iter()
            .map(|&component| self.members(&self.components[component]))
            .collect()
    }

    /// Returns the node at `position` in the overall order.
    pub fn node_at(&self, position: usize) -> Option<&N> {
        self.order.get(position).map(|&idx| self.node_at_index(idx))
    }

    /// Returns the position of `node` in the overall order.
    pub fn position_of(&self, node: &N) -> Option<usize> {
        self.rank_of(node).map(|rank| rank.position)
    }

    /// Returns true if `node` sits on a cycle. Unknown nodes are not.
    pub fn is_in_cycle(&self, node: &N) -> bool {
        self.rank_of(node)
            .is_some_and(|rank| self.is_cyclic_component(rank.component))
    }

    /// Nodes in overall order, paired with their final numbering.
    pub(crate) fn ranked_nodes(&self) -> impl Iterator<Item = (&N, Rank)> + '_ {
        self.order
            .iter()
            .map(|&idx| (self.node_at_index(idx), self.ranks[idx]))
    }

    /// `cyclic` is filled in rank order, so it is sorted.
    pub(crate) fn is_cyclic_component(&self, component: usize) -> bool {
        self.cyclic.binary_search(&component).is_ok()
    }

    pub(crate) fn rank_of(&self, node: &N) -> Option<Rank> {
        self.graph.index_of(node).map(|idx| self.ranks[idx])
    }

    pub(crate) fn component_members(&self, component: usize) -> Vec<N> {
        self.members(&self.components[component])
    }

    fn members(&self, indices: &[usize]) -> Vec<N> {
        indices
            .iter()
            .map(|&idx| self.node_at_index(idx).clone())
            .collect()
    }

    fn node_at_index(&self, idx: usize) -> &N {
        &self.graph.nodes()[idx]
    }
}

/// Resumable DFS frame: the node and the next successor to look at.
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: usize,
    next: usize,
}

/// Tarjan bookkeeping, indexed by dense node index.
struct Tarjan<'g, N> {
    graph: &'g GraphView<N>,
    discovery: Vec<usize>,
    low_link: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    frames: Vec<Frame>,
    discovered: usize,
    /// Finished components in finishing order
    components: Vec<Vec<usize>>,
}

impl<'g, N> Tarjan<'g, N>
where
    N: Clone + Eq + Hash + Debug,
{
    fn new(graph: &'g GraphView<N>) -> Self {
        let n = graph.len();
        Self {
            graph,
            discovery: vec![UNVISITED; n],
            low_link: vec![UNVISITED; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            frames: Vec::new(),
            discovered: 0,
            components: Vec::new(),
        }
    }

    fn discover(&mut self, node: usize) {
        self.discovery[node] = self.discovered;
        self.low_link[node] = self.discovered;
        self.discovered += 1;
        self.stack.push(node);
        self.on_stack[node] = true;
        self.frames.push(Frame { node, next: 0 });
    }

    fn run_from(&mut self, root: usize) {
        if self.discovery[root] != UNVISITED {
            return;
        }
        self.discover(root);

        while let Some(top) = self.frames.len().checked_sub(1) {
            let Frame { node, next } = self.frames[top];

            if let Some(succ) = self.graph.successor_indices(node).get(next).copied() {
                self.frames[top].next += 1;
                if self.discovery[succ] == UNVISITED {
                    self.discover(succ);
                } else if self.on_stack[succ] {
                    self.low_link[node] = self.low_link[node].min(self.discovery[succ]);
                }
                continue;
            }

            self.frames.pop();
            if let Some(parent) = self.frames.last() {
                let parent = parent.node;
                self.low_link[parent] = self.low_link[parent].min(self.low_link[node]);
            }
            if self.low_link[node] == self.discovery[node] {
                self.finish_component(node);
            }
        }
    }

    /// Pops the component rooted at `root`. The stack top is the member
    /// discovered last, so pop order is already the intra-component order.
    fn finish_component(&mut self, root: usize) {
        let mut members = Vec::new();
        while let Some(member) = self.stack.pop() {
            self.on_stack[member] = false;
            members.push(member);
            if member == root {
                break;
            }
        }
        self.components.push(members);
    }
}

/// Finds a shortest cycle through the first-discovered member of a cyclic
/// component, searching breadth-first inside the component only.
fn find_cycle<N>(graph: &GraphView<N>, ranks: &[Rank], members: &[usize]) -> Vec<usize>
where
    N: Clone + Eq + Hash + Debug,
{
    // Members are in reverse discovery order; the last one is the SCC root.
    let start = members[members.len() - 1];
    let component = ranks[start].component;
    let in_component = |idx: usize| ranks[idx].component == component;

    let mut parent = vec![UNVISITED; graph.len()];
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(node) = queue.pop_front() {
        for &succ in graph.successor_indices(node) {
            if succ == start {
                let mut path = vec![node];
                let mut current = node;
                while current != start {
                    current = parent[current];
                    path.push(current);
                }
                // path runs node -> .. -> start
                path.pop();
                path.reverse();
                path.insert(0, start);
                return path;
            }
            if in_component(succ) && parent[succ] == UNVISITED {
                parent[succ] = node;
                queue.push_back(succ);
            }
        }
    }

    // A cyclic component always contains a cycle through its root.
    vec![start]
}
