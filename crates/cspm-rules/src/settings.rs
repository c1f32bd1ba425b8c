//! # Rule Settings
//!
//! Tunables shared across rules. Loaded from YAML or CLI flags by the
//! binary; every field has a default so an empty config is valid.

use serde::{Deserialize, Serialize};

use cspm_core::CspmError;

/// Default rotation window for access keys, in days.
pub const DEFAULT_ROTATION_INTERVAL_DAYS: u32 = 90;

/// Largest accepted rotation window (at most four digits).
const MAX_ROTATION_INTERVAL_DAYS: u32 = 9_999;

/// Rule tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Maximum age, in days, of an active RAM access key.
    pub ram_access_keys_rotation_interval: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ram_access_keys_rotation_interval: DEFAULT_ROTATION_INTERVAL_DAYS,
        }
    }
}

impl Settings {
    /// Check every setting against its accepted range.
    pub fn validate(&self) -> Result<(), CspmError> {
        self.rotation_policy().map(|_| ())
    }

    /// The access-key rotation policy these settings describe.
    pub fn rotation_policy(&self) -> Result<RotationPolicy, CspmError> {
        RotationPolicy::new(self.ram_access_keys_rotation_interval)
    }
}

/// The access-key rotation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    max_age_days: u32,
}

impl RotationPolicy {
    /// Create a policy.
    ///
    /// # Errors
    ///
    /// The window must be between 1 and 9999 days.
    pub fn new(max_age_days: u32) -> Result<Self, CspmError> {
        if !(1..=MAX_ROTATION_INTERVAL_DAYS).contains(&max_age_days) {
            return Err(CspmError::InvalidSetting {
                name: "ram_access_keys_rotation_interval".into(),
                value: max_age_days.to_string(),
                reason: format!("must be between 1 and {MAX_ROTATION_INTERVAL_DAYS} days"),
            });
        }
        Ok(Self { max_age_days })
    }

    /// The window in days.
    pub fn max_age_days(&self) -> u32 {
        self.max_age_days
    }

    /// Strictly older than the window.
    pub fn is_violated_by(&self, age_days: i64) -> bool {
        age_days > i64::from(self.max_age_days)
    }
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_age_days: DEFAULT_ROTATION_INTERVAL_DAYS,
        }
    }
}
