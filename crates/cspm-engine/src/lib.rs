//! # cspm-engine — Result Aggregation
//!
//! Runs rules over a cache snapshot and assembles their findings into one
//! ordered, report-ready list.
//!
//! ## Guarantees
//!
//! - Each region is evaluated independently against the shared read-only
//!   snapshot. A fault (error or panic) in one region becomes a single
//!   `UNKNOWN` finding for that region and never suppresses the others.
//! - Output is partitioned by region in sorted region order; within a
//!   region, findings keep the order the rule produced them.
//! - Sequential and concurrent runs produce identical output.
//!
//! ## Entry Points
//!
//! - [`run()`] — one rule.
//! - [`run_registry()`] — every rule in a [`RuleRegistry`](cspm_rules::RuleRegistry).

pub mod aggregator;
pub mod options;

pub use aggregator::{evaluation_regions, run, run_registry, RuleReport};
pub use options::RunOptions;
