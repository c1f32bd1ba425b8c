//! # Rule Errors
//!
//! Faults raised while a rule evaluates one region. The aggregator turns
//! each of these into a single `UNKNOWN` finding for that region; they
//! never abort a run.

use thiserror::Error;

use cspm_core::CspmError;

/// A fault in a rule's evaluation step.
#[derive(Error, Debug)]
pub enum RuleError {
    /// The rule was handed settings it cannot use.
    #[error("rule settings rejected: {0}")]
    Settings(#[from] CspmError),

    /// The rule hit a condition it cannot express as a finding.
    ///
    /// Built-in rules report every data problem as a finding and never
    /// raise this. It is the fault channel for rules registered from
    /// outside this crate through [`RuleRegistry::register`](crate::RuleRegistry::register);
    /// the engine turns it into one `UNKNOWN` finding for the region.
    #[error("rule {rule} failed in {region}: {reason}")]
    Fault {
        /// Rule identifier.
        rule: String,
        /// Region being evaluated.
        region: String,
        /// What went wrong.
        reason: String,
    },
}
