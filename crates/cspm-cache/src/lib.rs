//! # cspm-cache — Cache Snapshot Contract
//!
//! An external collector calls the provider APIs and writes every response
//! into a snapshot keyed by `(service call, region, parameter)`. Rules only
//! ever read that snapshot; this crate is the read contract.
//!
//! ## Failure Equivalence
//!
//! A missing entry, an entry carrying an error marker, and an entry with no
//! payload are all "unavailable". [`CacheEntry::payload()`] and
//! [`CacheSnapshot::fetch()`] fold them into a single [`Unavailable`] value.
//! Rules decide *that* data is unavailable; the variant only feeds logging.
//!
//! ## Error Markers
//!
//! [`ErrorMarker`] is a distinct type. An entry whose `err` is present is
//! errored regardless of the marker's content, including an empty array.
//! Emptiness is never inspected.

pub mod call;
pub mod entry;
pub mod snapshot;

pub use call::{Keying, ServiceCall};
pub use entry::{CacheEntry, ErrorMarker, Unavailable};
pub use snapshot::CacheSnapshot;
