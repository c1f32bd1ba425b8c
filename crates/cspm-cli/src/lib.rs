//! # cspm-cli — Command-Line Interface
//!
//! Provides the `cspm` binary over the rule engine.
//!
//! ## Subcommands
//!
//! - `cspm run` — Evaluate rules against a collector snapshot.
//! - `cspm rules` — List available rules and the API calls they read.
//!
//! ```bash
//! cspm run --cache snapshot.json --rule accessKeysRotation --pretty
//! cspm run --cache snapshot.json --config cspm.yaml --concurrent
//! cspm rules
//! ```
//!
//! Findings go to stdout as JSON; logs go to stderr.

pub mod config;
pub mod rules;
pub mod run;
