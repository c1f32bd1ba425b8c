//! # Rule Metadata
//!
//! Static description of a rule, shown by `cspm rules` and attached to
//! reports by downstream consumers.

use serde::Serialize;

/// Static description of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleMetadata {
    /// Stable identifier (e.g., `accessKeysRotation`).
    pub id: &'static str,
    /// Human-readable title.
    pub title: &'static str,
    /// Provider service category (e.g., `RAM`).
    pub category: &'static str,
    /// Security domain the rule belongs to.
    pub domain: &'static str,
    /// One-line description of the policy.
    pub description: &'static str,
    /// Why the policy matters.
    pub more_info: &'static str,
    /// Provider documentation link.
    pub link: &'static str,
    /// Remediation guidance.
    pub recommended_action: &'static str,
    /// API calls the rule reads from the cache, permission style.
    pub apis: &'static [&'static str],
}
