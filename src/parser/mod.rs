//! Parser module for deporder.
//!
//! This module loads dependency manifests: JSON documents listing units in
//! enumeration order together with the units each one depends on.
//!
//! # Example
//!
//! ```
//! use deporder::graph::Orderer;
//! use deporder::parser::parse_str;
//!
//! let manifest = parse_str(r#"{
//!     "nodes": [
//!         {"name": "app", "depends_on": ["core"]},
//!         {"name": "core"}
//!     ]
//! }"#).unwrap();
//!
//! let orderer = Orderer::new(manifest.to_graph().unwrap());
//! assert_eq!(orderer.sorted_nodes(), vec!["core", "app"]);
//! ```

pub mod manifest;
pub mod types;

// Re-export commonly used types for convenience
pub use manifest::{load, parse_file, parse_str, validate, ParseError, ParseResult};

pub use types::{Manifest, UnitSpec};
