//! # Run Options
//!
//! Caller-controlled inputs for one run: where to evaluate, when, how, and
//! with which rule settings.

use serde::{Deserialize, Serialize};

use cspm_core::{CspmError, Region, Timestamp};
use cspm_rules::{EvaluationContext, Settings};

/// Options for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunOptions {
    /// Region evaluated when the snapshot names none for a rule.
    pub default_region: Region,
    /// Evaluation instant. `None` means the moment the run starts.
    pub as_of: Option<Timestamp>,
    /// Evaluate regions on separate threads.
    pub concurrent: bool,
    /// Rule tunables.
    pub settings: Settings,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            default_region: Region::default(),
            as_of: None,
            concurrent: false,
            settings: Settings::default(),
        }
    }
}

impl RunOptions {
    /// Validate the options and fix the evaluation instant.
    pub fn context(&self) -> Result<EvaluationContext, CspmError> {
        if let Err(e) = self.settings.validate() {
            tracing::warn!(error = %e, "rejected rule settings");
            return Err(e);
        }
        let now = self.as_of.unwrap_or_else(Timestamp::now);
        Ok(EvaluationContext::new(now, self.settings.clone()))
    }
}
