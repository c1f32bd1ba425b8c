//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types shared by every crate in the workspace. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Errors are reserved for catastrophic invocation failures: a snapshot
//!   that is not shaped like a cache, a setting outside its accepted range.
//! - Upstream data problems (an errored or empty API response) are never
//!   errors. Rules report them as `UNKNOWN` findings instead.

use thiserror::Error;

/// Top-level error type for the rule engine.
#[derive(Error, Debug)]
pub enum CspmError {
    /// The cache snapshot is not shaped like a collector snapshot.
    #[error("malformed cache snapshot at {path}: {reason}")]
    MalformedSnapshot {
        /// Dotted path of the offending node (e.g., `ram.ListUsers`).
        path: String,
        /// What was expected at that node.
        reason: String,
    },

    /// A rule setting was outside its accepted range.
    #[error("invalid setting {name}={value}: {reason}")]
    InvalidSetting {
        /// Setting name.
        name: String,
        /// The rejected value, rendered as text.
        value: String,
        /// Reason the value was rejected.
        reason: String,
    },

    /// A region identifier failed validation.
    #[error("invalid region: {0}")]
    InvalidRegion(String),

    /// A timestamp could not be parsed.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
