//! # Access Keys Rotation
//!
//! No active RAM access key may be older than the rotation window
//! (`ram_access_keys_rotation_interval`, 90 days by default).
//!
//! ## Evaluation Logic
//!
//! 1. Read `ram.ListUsers` for the region. Unavailable → one `UNKNOWN`
//!    finding for the region; stop.
//! 2. Empty listing → one `OK` finding for the region; stop.
//! 3. For each user, in listing order, read `ram.ListAccessKeys` keyed by
//!    user name and report exactly one finding for that user:
//!    - listing unavailable (including an empty error marker) → `UNKNOWN`
//!    - no active keys → `OK`
//!    - oldest active key older than the window → `FAIL`, else `OK`
//!
//! Ages are whole days between the evaluation instant and `CreateDate`.

use cspm_cache::{CacheSnapshot, ServiceCall};
use cspm_core::{days_between, Arn, Finding, FindingLog, Region, Status, Timestamp};

use crate::error::RuleError;
use crate::metadata::RuleMetadata;
use crate::ram::models::{AccessKey, AccessKeyListing, CallerIdentity, User};
use crate::rule::{EvaluationContext, Rule};
use crate::settings::RotationPolicy;

static METADATA: RuleMetadata = RuleMetadata {
    id: "accessKeysRotation",
    title: "Access Keys Rotation",
    category: "RAM",
    domain: "Identity and Access Management",
    description: "Ensure that RAM user access keys are rotated after regular interval of time.",
    more_info: "Access keys should be rotated to avoid having them accidentally exposed.",
    link: "https://www.alibabacloud.com/help/doc-detail/152682.htm",
    recommended_action: "To rotate an access key, first create a new access key, replace the \
        access key in your code with the new access key, and then delete the old access key.",
    apis: &["RAM:ListUsers", "RAM:ListAccessKeys", "STS:GetCallerIdentity"],
};

/// The access-key rotation check.
#[derive(Debug, Clone, Default)]
pub struct AccessKeysRotation {
    _private: (),
}

/// The active key that decides a user's outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DecisiveKey<'a> {
    key_id: &'a str,
    age_days: i64,
}

impl AccessKeysRotation {
    /// Create the rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate one user. Always yields exactly one outcome.
    fn evaluate_user(
        &self,
        cache: &CacheSnapshot,
        region: &Region,
        user: &User,
        policy: &RotationPolicy,
        now: &Timestamp,
    ) -> (Status, String) {
        let listing: AccessKeyListing = match cache.fetch(
            &ServiceCall::RAM_LIST_ACCESS_KEYS,
            region,
            Some(user.user_name.as_str()),
        ) {
            Ok(listing) => listing,
            Err(reason) => {
                return (
                    Status::Unknown,
                    format!("Unable to query user access keys: {reason}"),
                );
            }
        };

        let active: Vec<&AccessKey> = listing
            .access_keys
            .access_key
            .iter()
            .filter(|key| key.is_active())
            .collect();

        if active.is_empty() {
            return (
                Status::Ok,
                "RAM user does not have any active access keys".to_string(),
            );
        }

        let decisive = match oldest_key(&active, now) {
            Ok(decisive) => decisive,
            Err(message) => return (Status::Unknown, message),
        };

        tracing::trace!(
            region = %region,
            user = %user.user_name,
            key = decisive.key_id,
            age_days = decisive.age_days,
            "decisive access key"
        );

        let max = policy.max_age_days();
        if policy.is_violated_by(decisive.age_days) {
            (
                Status::Fail,
                format!(
                    "RAM user access key was last rotated {} days ago which is greater than {max} (AccessKeyId: {})",
                    decisive.age_days, decisive.key_id
                ),
            )
        } else {
            (
                Status::Ok,
                format!(
                    "RAM user access key was last rotated {} days ago which is equal to or less than {max} (AccessKeyId: {})",
                    decisive.age_days, decisive.key_id
                ),
            )
        }
    }
}

impl Rule for AccessKeysRotation {
    fn metadata(&self) -> &RuleMetadata {
        &METADATA
    }

    fn scope_call(&self) -> ServiceCall {
        ServiceCall::RAM_LIST_USERS
    }

    fn evaluate(
        &self,
        cache: &CacheSnapshot,
        region: &Region,
        ctx: &EvaluationContext,
    ) -> Result<Vec<Finding>, RuleError> {
        let policy = ctx.settings.rotation_policy()?;
        let mut log = FindingLog::new(region.clone());

        let users: Vec<User> = match cache.fetch(&ServiceCall::RAM_LIST_USERS, region, None) {
            Ok(users) => users,
            Err(reason) => {
                log.add(
                    Status::Unknown,
                    format!("Unable to query RAM users: {reason}"),
                    None,
                );
                return Ok(log.into_findings());
            }
        };

        if users.is_empty() {
            log.add(Status::Ok, "No RAM users found", None);
            return Ok(log.into_findings());
        }

        let account_id = caller_account_id(cache, region);

        for user in &users {
            let (status, message) = self.evaluate_user(cache, region, user, &policy, &ctx.now);
            let resource = account_id
                .as_deref()
                .map(|account| Arn::global("ram", account, "user", &user.user_name).to_string());
            log.add(status, message, resource.as_deref());
        }

        tracing::debug!(
            rule = METADATA.id,
            region = %region,
            users = users.len(),
            worst = ?log.worst(),
            "evaluated region"
        );
        Ok(log.into_findings())
    }
}

/// Pick the oldest active key. Ties keep the first key in listing order.
///
/// Fails with an explanatory message when any active key's creation date
/// cannot be read.
fn oldest_key<'a>(active: &[&'a AccessKey], now: &Timestamp) -> Result<DecisiveKey<'a>, String> {
    let mut decisive: Option<DecisiveKey<'a>> = None;
    for key in active {
        let created = Timestamp::parse(&key.create_date).map_err(|e| {
            format!(
                "Unable to determine access key age for {}: {e}",
                key.access_key_id
            )
        })?;
        let age_days = days_between(now, &created);
        if decisive.as_ref().map_or(true, |d| age_days > d.age_days) {
            decisive = Some(DecisiveKey {
                key_id: &key.access_key_id,
                age_days,
            });
        }
    }
    decisive.ok_or_else(|| "Unable to determine access key age".to_string())
}

/// Account id from `sts.GetCallerIdentity`, if the collector recorded it.
fn caller_account_id(cache: &CacheSnapshot, region: &Region) -> Option<String> {
    cache
        .fetch::<CallerIdentity>(&ServiceCall::STS_GET_CALLER_IDENTITY, region, None)
        .ok()
        .map(|identity| identity.account_id)
        .filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ram::models::AccessKeyStatus;

    fn key(id: &str, status: AccessKeyStatus, created: &str) -> AccessKey {
        AccessKey {
            status,
            access_key_id: id.to_string(),
            create_date: created.to_string(),
        }
    }

    #[test]
    fn oldest_key_wins() {
        let now = Timestamp::parse("2021-06-01T00:00:00Z").unwrap();
        let recent = key("recent", AccessKeyStatus::Active, "2021-05-11T16:37:58Z");
        let stale = key("stale", AccessKeyStatus::Active, "2021-01-11T16:37:58Z");
        let decisive = oldest_key(&[&recent, &stale], &now).unwrap();
        assert_eq!(decisive.key_id, "stale");
        assert_eq!(decisive.age_days, 140);
    }

    #[test]
    fn tie_keeps_first_in_listing_order() {
        let now = Timestamp::parse("2021-06-01T00:00:00Z").unwrap();
        let a = key("a", AccessKeyStatus::Active, "2021-01-11T00:00:00Z");
        let b = key("b", AccessKeyStatus::Active, "2021-01-11T00:00:00Z");
        assert_eq!(oldest_key(&[&a, &b], &now).unwrap().key_id, "a");
    }

    #[test]
    fn unreadable_date_is_reported() {
        let now = Timestamp::parse("2021-06-01T00:00:00Z").unwrap();
        let broken = key("broken", AccessKeyStatus::Active, "yesterday");
        let message = oldest_key(&[&broken], &now).unwrap_err();
        assert!(message.contains("Unable to determine access key age for broken"));
    }

    #[test]
    fn metadata_lists_cache_calls() {
        let rule = AccessKeysRotation::new();
        assert_eq!(rule.metadata().id, "accessKeysRotation");
        assert!(rule.metadata().apis.contains(&"RAM:ListAccessKeys"));
        assert_eq!(rule.scope_call(), ServiceCall::RAM_LIST_USERS);
    }
}
