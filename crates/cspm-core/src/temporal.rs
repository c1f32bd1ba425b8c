//! # Temporal Types — Evaluation Instants and Key Ages
//!
//! [`Timestamp`] is the instant a run evaluates at and the creation time of
//! a credential. [`days_between`] is the only age arithmetic rules use.
//!
//! ## Invariant
//!
//! Every `Timestamp` is UTC with whole-second precision, however it was
//! built: clock, RFC 3339 text, or serde (which goes through
//! [`Timestamp::parse`]). Provider offsets such as `+08:00` are converted
//! to UTC; no other timezone normalization happens.

use std::fmt;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CspmError;

const SECONDS_PER_DAY: i64 = 86_400;

/// A UTC instant with whole-second precision.
///
/// Serialized as `YYYY-MM-DDTHH:MM:SSZ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current instant.
    pub fn now() -> Self {
        Self(Utc::now().trunc_subsecs(0))
    }

    /// Parse RFC 3339 text with any offset.
    ///
    /// # Errors
    ///
    /// Returns [`CspmError::InvalidTimestamp`] for anything that is not
    /// RFC 3339, including bare dates.
    pub fn parse(s: &str) -> Result<Self, CspmError> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc).trunc_subsecs(0)))
            .map_err(|e| CspmError::InvalidTimestamp(format!("{s:?}: {e}")))
    }

    /// Seconds since the Unix epoch.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%SZ"))
    }
}

impl TryFrom<String> for Timestamp {
    type Error = CspmError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.to_string()
    }
}

/// Whole days between two instants, truncated toward zero.
///
/// Symmetric: the order of the arguments does not matter.
pub fn days_between(a: &Timestamp, b: &Timestamp) -> i64 {
    (a.epoch_secs() - b.epoch_secs()).abs() / SECONDS_PER_DAY
}

#[cfg(test)]
fn at_epoch(secs: i64) -> Timestamp {
    Timestamp(DateTime::from_timestamp(secs, 0).unwrap())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Day arithmetic never goes negative and never depends on argument order.
        #[test]
        fn days_between_symmetric_non_negative(a in 0i64..4_000_000_000, b in 0i64..4_000_000_000) {
            let (ta, tb) = (at_epoch(a), at_epoch(b));
            prop_assert!(days_between(&ta, &tb) >= 0);
            prop_assert_eq!(days_between(&ta, &tb), days_between(&tb, &ta));
        }

        /// Adding whole days plus a sub-day remainder yields exactly those days.
        #[test]
        fn days_between_counts_whole_days(start in 0i64..2_000_000_000, days in 0i64..5000, rem in 0i64..86_400) {
            let later = at_epoch(start + days * SECONDS_PER_DAY + rem);
            prop_assert_eq!(days_between(&later, &at_epoch(start)), days);
        }
    }
}
