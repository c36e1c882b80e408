//! Comparator facade over an [`Orderer`]'s final numbering.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

use super::error::{GraphError, GraphResult};
use super::orderer::{Orderer, Rank};

/// A read-only view of the total order computed by an [`Orderer`].
///
/// Comparison is lexicographic on (component rank, rank inside the
/// component), so two nodes compare equal only if they are the same node.
/// Nothing is recomputed: every query reads the orderer's tables, which makes
/// the facade cheap to copy and safe to share across threads.
///
/// # Example
///
/// ```rust
/// use deporder::graph::{GraphView, Orderer};
///
/// let view = GraphView::new(["app", "core"], |node| match *node {
///     "app" => vec!["core"],
///     _ => vec![],
/// })
/// .unwrap();
/// let orderer = Orderer::new(view);
/// let ordering = orderer.comparator();
///
/// let mut units = vec!["app", "core"];
/// ordering.sort(&mut units);
/// assert_eq!(units, vec!["core", "app"]);
/// assert!(ordering.is_before(&"core", &"app"));
/// ```
#[derive(Debug)]
pub struct NodeOrdering<'a, N> {
    orderer: &'a Orderer<N>,
}

impl<N> Clone for NodeOrdering<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for NodeOrdering<'_, N> {}

impl<'a, N> NodeOrdering<'a, N>
where
    N: Clone + Eq + Hash + Debug,
{
    pub(crate) fn new(orderer: &'a Orderer<N>) -> Self {
        Self { orderer }
    }

    /// Compares two nodes of the original graph.
    ///
    /// # Panics
    ///
    /// Panics if either node is not part of the graph. Use
    /// [`try_compare`](Self::try_compare) to get an error instead.
    pub fn compare(&self, a: &N, b: &N) -> Ordering {
        self.try_compare(a, b).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Compares two nodes, reporting nodes outside the graph as an error.
    pub fn try_compare(&self, a: &N, b: &N) -> GraphResult<Ordering> {
        let a = self.rank(a)?;
        let b = self.rank(b)?;
        Ok((a.component, a.intra).cmp(&(b.component, b.intra)))
    }

    /// Returns true if `a` comes strictly before `b`.
    ///
    /// # Panics
    ///
    /// Panics if either node is not part of the graph.
    pub fn is_before(&self, a: &N, b: &N) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// Returns the position of `node` in the overall order.
    pub fn rank_of(&self, node: &N) -> Option<usize> {
        self.orderer.position_of(node)
    }

    /// Returns the topological rank of the component containing `node`.
    pub fn component_rank_of(&self, node: &N) -> Option<usize> {
        self.orderer.rank_of(node).map(|rank| rank.component)
    }

    /// Returns all members of the component containing `node`, in order.
    pub fn component_of(&self, node: &N) -> Option<Vec<N>> {
        self.orderer
            .rank_of(node)
            .map(|rank| self.orderer.component_members(rank.component))
    }

    /// Sorts a slice of graph nodes in place.
    ///
    /// # Panics
    ///
    /// Panics if the slice contains a node that is not part of the graph.
    pub fn sort(&self, nodes: &mut [N]) {
        nodes.sort_by(|a, b| self.compare(a, b));
    }

    /// Returns the comparator as a closure, for use with `sort_by` and friends.
    pub fn as_fn(&self) -> impl Fn(&N, &N) -> Ordering + 'a {
        let ordering = *self;
        move |a, b| ordering.compare(a, b)
    }

    fn rank(&self, node: &N) -> GraphResult<Rank> {
        self.orderer
            .rank_of(node)
            .ok_or_else(|| GraphError::unknown_node(node))
    }
}
