//! # Status Taxonomy
//!
//! Defines [`Status`], the fixed severity set every rule draws from.
//! It is a pure value set with no transitions.
//!
//! ## Ordering
//!
//! ```text
//! Ordering (least → most cautious): Ok < Fail < Warn < Unknown
//!
//! worst(a, b) = max(a, b)    (pessimistic composition)
//! ```
//!
//! The ordering is by caution, not by numeric code. The numeric codes
//! (`Ok=0`, `Warn=1`, `Fail=2`, `Unknown=3`) are the wire values the
//! reporting consumer reads and must never change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CspmError;

/// The outcome severity of one finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Status {
    /// Predicate satisfied, or vacuously satisfied (no subjects).
    Ok,
    /// Partial or soft violation. Not produced by every rule.
    Warn,
    /// Predicate violated.
    Fail,
    /// Required cache data was unavailable; the predicate was not evaluated.
    Unknown,
}

impl Status {
    /// All statuses, least cautious first.
    pub const ALL: [Status; 4] = [Status::Ok, Status::Fail, Status::Warn, Status::Unknown];

    /// Wire code read by the reporting consumer.
    pub fn code(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::Warn => 1,
            Self::Fail => 2,
            Self::Unknown => 3,
        }
    }

    /// Resolve a wire code back to a status.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Ok),
            1 => Some(Self::Warn),
            2 => Some(Self::Fail),
            3 => Some(Self::Unknown),
            _ => None,
        }
    }

    /// Caution rank. Higher is more cautious.
    fn caution(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::Fail => 1,
            Self::Warn => 2,
            Self::Unknown => 3,
        }
    }

    /// Pessimistic composition: the more cautious of the two statuses.
    pub fn worst(self, other: Self) -> Self {
        if self.caution() >= other.caution() {
            self
        } else {
            other
        }
    }

    /// Upper-case label (`OK`, `WARN`, `FAIL`, `UNKNOWN`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warn => "WARN",
            Self::Fail => "FAIL",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Whether this status represents a pass.
    pub fn is_passing(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl PartialOrd for Status {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Status {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.caution().cmp(&other.caution())
    }
}

impl From<Status> for u8 {
    fn from(status: Status) -> Self {
        status.code()
    }
}

impl TryFrom<u8> for Status {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Status::from_code(code).ok_or_else(|| format!("unknown status code {code}"))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = CspmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OK" | "PASS" => Ok(Self::Ok),
            "WARN" => Ok(Self::Warn),
            "FAIL" => Ok(Self::Fail),
            "UNKNOWN" => Ok(Self::Unknown),
            _ => Err(CspmError::InvalidSetting {
                name: "status".into(),
                value: s.into(),
                reason: "expected one of OK, WARN, FAIL, UNKNOWN".into(),
            }),
        }
    }
}
