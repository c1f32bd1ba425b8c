//! # Rule Contract
//!
//! Defines the [`Rule`] trait every compliance check implements and the
//! [`EvaluationContext`] handed to it.

use std::fmt;

use cspm_cache::{CacheSnapshot, ServiceCall};
use cspm_core::{Finding, Region, Timestamp};

use crate::error::RuleError;
use crate::metadata::RuleMetadata;
use crate::settings::Settings;

/// Inputs shared by every region evaluation in one run.
#[derive(Debug, Clone)]
pub struct EvaluationContext {
    /// The evaluation instant. Ages are measured against it.
    pub now: Timestamp,
    /// Rule tunables.
    pub settings: Settings,
}

impl EvaluationContext {
    /// Context evaluated at `now` with the given settings.
    pub fn new(now: Timestamp, settings: Settings) -> Self {
        Self { now, settings }
    }
}

impl Default for EvaluationContext {
    fn default() -> Self {
        Self::new(Timestamp::now(), Settings::default())
    }
}

/// A compliance check over a cache snapshot.
///
/// Implementations must be pure with respect to the snapshot: the same
/// snapshot, region, and context always produce the same findings, and
/// separate regions may be evaluated concurrently.
pub trait Rule: Send + Sync + fmt::Debug {
    /// Static description of the rule.
    fn metadata(&self) -> &RuleMetadata;

    /// The call whose region keys define which regions this rule covers.
    fn scope_call(&self) -> ServiceCall;

    /// Evaluate one region.
    ///
    /// Returns findings in the order the rule walked its subjects.
    fn evaluate(
        &self,
        cache: &CacheSnapshot,
        region: &Region,
        ctx: &EvaluationContext,
    ) -> Result<Vec<Finding>, RuleError>;
}
