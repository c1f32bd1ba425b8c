//! # RAM Payload Models
//!
//! Typed views of the collector payloads the RAM rules read. Field names
//! follow the provider's PascalCase response shape.

use serde::{Deserialize, Serialize};

/// One entry of a `ListUsers` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    /// Login name, unique within a snapshot. Keys the access-key listing.
    pub user_name: String,
    /// Provider user id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// A `ListAccessKeys` response for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccessKeyListing {
    /// Wrapper object; its absence makes the payload unusable.
    pub access_keys: AccessKeys,
}

/// The `AccessKeys` wrapper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccessKeys {
    /// Keys in provider order.
    #[serde(default)]
    pub access_key: Vec<AccessKey>,
}

/// One credential belonging to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccessKey {
    /// Whether the key can be used.
    pub status: AccessKeyStatus,
    /// Provider key id.
    pub access_key_id: String,
    /// Creation time, RFC 3339.
    pub create_date: String,
}

impl AccessKey {
    /// Whether the key can currently authenticate.
    pub fn is_active(&self) -> bool {
        self.status == AccessKeyStatus::Active
    }
}

/// Access key status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessKeyStatus {
    /// Usable.
    Active,
    /// Disabled.
    Inactive,
    /// Any status this crate does not recognise. Treated as not active.
    #[serde(other)]
    Other,
}

/// A `GetCallerIdentity` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallerIdentity {
    /// Account the collector ran as.
    pub account_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_provider_shape() {
        let listing: AccessKeyListing = serde_json::from_value(json!({
            "AccessKeys": {
                "AccessKey": [{
                    "Status": "Active",
                    "AccessKeyId": "LTAI5tD6ekrSssrWq5rNa4JQ",
                    "CreateDate": "2021-01-11T16:37:58Z"
                }]
            }
        }))
        .unwrap();
        assert_eq!(listing.access_keys.access_key.len(), 1);
        assert!(listing.access_keys.access_key[0].is_active());
    }

    #[test]
    fn missing_wrapper_is_rejected() {
        assert!(serde_json::from_value::<AccessKeyListing>(json!({})).is_err());
    }

    #[test]
    fn empty_key_list_is_accepted() {
        let listing: AccessKeyListing =
            serde_json::from_value(json!({"AccessKeys": {"AccessKey": []}})).unwrap();
        assert!(listing.access_keys.access_key.is_empty());
        let listing: AccessKeyListing = serde_json::from_value(json!({"AccessKeys": {}})).unwrap();
        assert!(listing.access_keys.access_key.is_empty());
    }

    #[test]
    fn unrecognised_status_is_not_active() {
        let key: AccessKey = serde_json::from_value(json!({
            "Status": "PendingDeletion",
            "AccessKeyId": "k",
            "CreateDate": "2021-01-11T16:37:58Z"
        }))
        .unwrap();
        assert_eq!(key.status, AccessKeyStatus::Other);
        assert!(!key.is_active());
    }

    #[test]
    fn user_id_is_optional() {
        let user: User = serde_json::from_value(json!({"UserName": "aqua"})).unwrap();
        assert_eq!(user.user_name, "aqua");
        assert_eq!(user.user_id, None);
    }
}
