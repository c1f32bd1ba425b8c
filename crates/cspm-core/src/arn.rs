//! # Resource Names
//!
//! Alibaba Cloud Resource Names identify the resource a finding is about:
//!
//! ```text
//! acs:{service}:{region}:{account}:{resource_type}/{resource_id}
//! ```
//!
//! Global services such as RAM leave the region segment empty.

use std::fmt;

/// A resource name in the `acs:` scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Arn {
    service: String,
    region: String,
    account_id: String,
    resource_type: String,
    resource_id: String,
}

impl Arn {
    /// Name a regional resource.
    pub fn new(
        service: impl Into<String>,
        region: impl Into<String>,
        account_id: impl Into<String>,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            region: region.into(),
            account_id: account_id.into(),
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
        }
    }

    /// Name a resource of a global service (empty region segment).
    pub fn global(
        service: impl Into<String>,
        account_id: impl Into<String>,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        Self::new(service, "", account_id, resource_type, resource_id)
    }
}

impl fmt::Display for Arn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "acs:{}:{}:{}:{}/{}",
            self.service, self.region, self.account_id, self.resource_type, self.resource_id
        )
    }
}
