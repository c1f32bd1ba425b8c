//! # cspm-core — Foundational Types for the Rule Engine
//!
//! Every other crate in the workspace depends on `cspm-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **One status taxonomy.** [`Status`] is the single severity set shared by
//!    every rule. Its numeric codes are the reporting consumer's wire shape.
//!
//! 2. **Findings are append-only values.** A [`Finding`] is built once and
//!    never rewritten; [`FindingLog`] only appends.
//!
//! 3. **Newtype wrappers for scope identifiers.** [`Region`] is validated at
//!    construction. No bare strings for region keys.
//!
//! 4. **UTC-only timestamps.** [`Timestamp`] normalizes to UTC with seconds
//!    precision; [`days_between`] is the only age arithmetic rules use.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cspm-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod arn;
pub mod error;
pub mod finding;
pub mod region;
pub mod status;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use arn::Arn;
pub use error::CspmError;
pub use finding::{Finding, FindingLog};
pub use region::{Region, DEFAULT_REGION};
pub use status::Status;
pub use temporal::{days_between, Timestamp};
