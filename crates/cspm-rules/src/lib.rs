//! # cspm-rules — Compliance Rules
//!
//! Each rule reads previously collected API responses from a
//! [`CacheSnapshot`](cspm_cache::CacheSnapshot), applies one policy
//! predicate, and reports one or more [`Finding`](cspm_core::Finding)s per
//! region it is asked to evaluate.
//!
//! ## Contract
//!
//! - A rule never performs I/O. Everything it needs is already in the cache.
//! - Unavailable upstream data becomes an `UNKNOWN` finding, never an error.
//! - [`RuleError`] is reserved for faults in the evaluation step itself.
//!
//! ## Rules
//!
//! | Id | Category | Predicate |
//! |----|----------|-----------|
//! | `accessKeysRotation` | RAM | No active access key is older than the rotation window |

pub mod error;
pub mod metadata;
pub mod ram;
pub mod registry;
pub mod rule;
pub mod settings;

pub use error::RuleError;
pub use metadata::RuleMetadata;
pub use ram::AccessKeysRotation;
pub use registry::RuleRegistry;
pub use rule::{EvaluationContext, Rule};
pub use settings::{RotationPolicy, Settings, DEFAULT_ROTATION_INTERVAL_DAYS};
