//! Exception-flow and call-site analysis passes.
//!
//! The passes run in a fixed causal order per run: every method of every assembly is scanned
//! first ([`regions`] and [`callsites`] share one linear pass over the unit sequence), then
//! the global target [`resolution`] pass runs once over the complete model. The
//! [`AnalysisContext`] drives this and owns the resulting entity graph; [`ModelStats`]
//! aggregates it on demand.

mod callsites;
mod context;
mod regions;
mod resolution;
mod stats;

pub use context::AnalysisContext;
pub use stats::ModelStats;
