//! # Region Identifier
//!
//! Regions partition both the cache snapshot and the findings list. A
//! [`Region`] is a validated newtype so a user name or API call name cannot
//! be passed where a region key is expected.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CspmError;

/// Region evaluated when the snapshot names none.
pub const DEFAULT_REGION: &str = "cn-hangzhou";

/// A cloud region identifier (e.g., `cn-hangzhou`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Region(String);

impl Region {
    /// Create a region identifier.
    ///
    /// # Errors
    ///
    /// Rejects empty identifiers and identifiers containing whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, CspmError> {
        let id = id.into();
        if id.is_empty() {
            return Err(CspmError::InvalidRegion("region must not be empty".into()));
        }
        if id.chars().any(char::is_whitespace) {
            return Err(CspmError::InvalidRegion(format!(
                "region must not contain whitespace: {id:?}"
            )));
        }
        Ok(Self(id))
    }

    /// Access the region identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Region {
    fn default() -> Self {
        Self(DEFAULT_REGION.to_string())
    }
}

impl TryFrom<String> for Region {
    type Error = CspmError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.0
    }
}

impl Borrow<str> for Region {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
