//! Graph module for dependency ordering.
//!
//! - [`GraphView`] wraps the caller's nodes and "depends-on" relation.
//! - [`Orderer`] finds strongly connected components, a cycle witness and a
//!   deterministic total order in which dependencies come first.
//! - [`NodeOrdering`] is the comparator facade over that order.
//!
//! # Example
//!
//! ```rust
//! use deporder::graph::{GraphView, Orderer};
//!
//! let view = GraphView::new(["a", "b"], |node| match *node {
//!     "a" => vec!["b"],
//!     _ => vec!["a"],
//! })
//! .unwrap();
//!
//! let orderer = Orderer::new(view);
//! assert!(!orderer.is_acyclic());
//! assert_eq!(orderer.cycle_witness(), Some(vec!["a", "b"]));
//! ```

mod error;
mod orderer;
mod ordering;
mod view;

pub use error::{GraphError, GraphResult};
pub use orderer::Orderer;
pub use ordering::NodeOrdering;
pub use view::GraphView;
