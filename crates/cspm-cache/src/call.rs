//! # Service Call Keys
//!
//! The first component of a cache key: which provider API produced the
//! entry. Stored as `(service, call)`, e.g. `("ram", "ListUsers")`.
//!
//! Calls the rules read declare their [`Keying`], so the snapshot loader
//! never has to guess from the keys a collector node happens to contain.

use std::borrow::Cow;
use std::fmt;

/// How a call's entries are keyed below the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keying {
    /// One entry per region.
    Region,
    /// One entry per region and call parameter (e.g. user name).
    RegionAndParameter,
}

/// A provider API call, e.g. `ram` / `ListUsers`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceCall {
    service: Cow<'static, str>,
    call: Cow<'static, str>,
}

impl ServiceCall {
    /// RAM user listing, keyed by region.
    pub const RAM_LIST_USERS: ServiceCall = ServiceCall::from_static("ram", "ListUsers");
    /// RAM access-key listing, keyed by region and user name.
    pub const RAM_LIST_ACCESS_KEYS: ServiceCall = ServiceCall::from_static("ram", "ListAccessKeys");
    /// Caller identity, keyed by region. Carries the account id.
    pub const STS_GET_CALLER_IDENTITY: ServiceCall =
        ServiceCall::from_static("sts", "GetCallerIdentity");

    /// Build a key from static names.
    pub const fn from_static(service: &'static str, call: &'static str) -> Self {
        Self {
            service: Cow::Borrowed(service),
            call: Cow::Borrowed(call),
        }
    }

    /// Build a key from owned names (snapshot loading).
    pub fn new(service: impl Into<String>, call: impl Into<String>) -> Self {
        Self {
            service: Cow::Owned(service.into()),
            call: Cow::Owned(call.into()),
        }
    }

    /// Service namespace as it appears in the snapshot (`ram`).
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Call name as it appears in the snapshot (`ListUsers`).
    pub fn call(&self) -> &str {
        &self.call
    }

    /// Declared keying for known calls; `None` for calls no rule reads.
    pub fn keying(&self) -> Option<Keying> {
        match (self.service(), self.call()) {
            ("ram", "ListUsers") | ("sts", "GetCallerIdentity") => Some(Keying::Region),
            ("ram", "ListAccessKeys") => Some(Keying::RegionAndParameter),
            _ => None,
        }
    }
}

/// Renders the permission-style name, e.g. `RAM:ListUsers`.
impl fmt::Display for ServiceCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.service.to_ascii_uppercase(), self.call)
    }
}
