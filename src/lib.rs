//! deporder - deterministic dependency ordering with cycle detection
//!
//! This crate orders interdependent units (build modules, plugins, service
//! initializers) so that every unit comes after the units it depends on,
//! reports cycles with a concrete witness, and still yields a reproducible
//! order when cycles exist.

pub mod export;
pub mod graph;
pub mod parser;
