//! Dispositor chain analysis.
//!
//! Builds the functional dispositor graph of a chart ([`graph`]), labels its
//! nodes as sinks, convergences, valves, loop members and engines
//! ([`classify`]), derives occupation, aspect and critical paths ([`paths`]),
//! and summarises where the chart's weight drains ([`summary`]).

pub mod classify;
pub mod error;
pub mod graph;
pub mod paths;
pub mod report;
pub mod summary;

pub use classify::{Classification, classify};
pub use error::ChainError;
pub use graph::{DispositorGraph, build_dispositor_graph};
pub use report::{ChainReport, analyze};
