//! # Cache Snapshot
//!
//! The complete set of pre-fetched responses available to one evaluation
//! run. Built once (by the collector's JSON output or in code), then shared
//! read-only by every rule and every region worker.
//!
//! ## Collector Layout
//!
//! ```text
//! { "ram": { "ListUsers":      { "cn-hangzhou": { "data": [...], "err": null } },
//!            "ListAccessKeys": { "cn-hangzhou": { "aqua": { "data": {...}, "err": null } } } } }
//! ```
//!
//! Whether a region node is one entry or a map from call parameter to entry
//! comes from the call's declared [`Keying`]. Calls without a declared
//! keying are read as an entry only when the node holds nothing but `data`
//! and `err` keys.

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use cspm_core::{CspmError, Region};

use crate::call::{Keying, ServiceCall};
use crate::entry::{CacheEntry, Unavailable};

/// The per-region slot of a service call.
#[derive(Debug, Clone, PartialEq)]
enum Slot {
    /// Call keyed by region only.
    Entry(CacheEntry),
    /// Call keyed by region and a parameter (e.g. user name).
    Parameterized(BTreeMap<String, CacheEntry>),
}

/// Immutable snapshot of collected API responses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheSnapshot {
    calls: BTreeMap<ServiceCall, BTreeMap<Region, Slot>>,
}

impl CacheSnapshot {
    /// An empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the region-keyed entry for `call`.
    pub fn insert(&mut self, call: ServiceCall, region: Region, entry: CacheEntry) -> &mut Self {
        self.calls
            .entry(call)
            .or_default()
            .insert(region, Slot::Entry(entry));
        self
    }

    /// Record the entry for `call` in `region` under `parameter`.
    ///
    /// Replaces a region-keyed entry previously recorded for the same slot.
    pub fn insert_param(
        &mut self,
        call: ServiceCall,
        region: Region,
        parameter: impl Into<String>,
        entry: CacheEntry,
    ) -> &mut Self {
        let slot = self
            .calls
            .entry(call)
            .or_default()
            .entry(region)
            .or_insert_with(|| Slot::Parameterized(BTreeMap::new()));
        if let Slot::Entry(_) = slot {
            *slot = Slot::Parameterized(BTreeMap::new());
        }
        if let Slot::Parameterized(params) = slot {
            params.insert(parameter.into(), entry);
        }
        self
    }

    /// Look up an entry.
    ///
    /// Returns `None` when the key is absent, including when a parameter is
    /// supplied for a region-keyed call or omitted for a parameterised one.
    pub fn lookup(
        &self,
        call: &ServiceCall,
        region: &Region,
        parameter: Option<&str>,
    ) -> Option<&CacheEntry> {
        let slot = self.calls.get(call)?.get(region)?;
        match (slot, parameter) {
            (Slot::Entry(entry), None) => Some(entry),
            (Slot::Parameterized(params), Some(p)) => params.get(p),
            _ => None,
        }
    }

    /// Look up and decode an entry, folding every failure into [`Unavailable`].
    pub fn fetch<T: DeserializeOwned>(
        &self,
        call: &ServiceCall,
        region: &Region,
        parameter: Option<&str>,
    ) -> Result<T, Unavailable> {
        let result = self
            .lookup(call, region, parameter)
            .ok_or(Unavailable::Missing)
            .and_then(|entry| entry.decode());
        if let Err(reason) = &result {
            tracing::debug!(
                call = %call,
                region = %region,
                parameter = parameter.unwrap_or(""),
                %reason,
                "cache lookup unavailable"
            );
        }
        result
    }

    /// Regions recorded for `call`, in sorted order.
    pub fn regions<'a>(&'a self, call: &ServiceCall) -> impl Iterator<Item = &'a Region> + 'a {
        self.calls.get(call).into_iter().flat_map(|regions| regions.keys())
    }

    /// Service calls recorded in the snapshot.
    pub fn calls(&self) -> impl Iterator<Item = &ServiceCall> {
        self.calls.keys()
    }

    /// Whether the snapshot holds no calls at all.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Build a snapshot from the collector's JSON layout.
    ///
    /// Nodes that are not shaped like cache data (a non-object where a map
    /// is required, an invalid region key, an unreadable entry) are skipped
    /// with a warning. Lookups under a skipped node report
    /// [`Unavailable::Missing`], so rules see them as `UNKNOWN`.
    ///
    /// # Errors
    ///
    /// Returns [`CspmError::MalformedSnapshot`] only when the document root
    /// is not an object.
    pub fn from_json(value: &Value) -> Result<Self, CspmError> {
        let services = value.as_object().ok_or_else(|| CspmError::MalformedSnapshot {
            path: "$".to_string(),
            reason: format!("expected object, found {}", json_kind(value)),
        })?;
        let mut snapshot = Self::new();
        let mut skipped = 0usize;

        for (service, calls) in services {
            let Some(calls) = object_or_skip(calls, service, &mut skipped) else {
                continue;
            };
            for (call_name, regions) in calls {
                let path = format!("{service}.{call_name}");
                let call = ServiceCall::new(service.as_str(), call_name.as_str());
                let Some(regions) = object_or_skip(regions, &path, &mut skipped) else {
                    continue;
                };
                for (region_id, node) in regions {
                    let region_path = format!("{path}.{region_id}");
                    let region = match Region::new(region_id.as_str()) {
                        Ok(region) => region,
                        Err(e) => {
                            skip(&region_path, &e.to_string(), &mut skipped);
                            continue;
                        }
                    };
                    let Some(node) = object_or_skip(node, &region_path, &mut skipped) else {
                        continue;
                    };

                    if is_entry_node(&call, node) {
                        match read_entry(node) {
                            Ok(entry) => {
                                snapshot.insert(call.clone(), region, entry);
                            }
                            Err(reason) => skip(&region_path, &reason, &mut skipped),
                        }
                        continue;
                    }

                    let mut params = BTreeMap::new();
                    for (parameter, entry_node) in node {
                        let entry_path = format!("{region_path}.{parameter}");
                        let Some(entry_node) =
                            object_or_skip(entry_node, &entry_path, &mut skipped)
                        else {
                            continue;
                        };
                        match read_entry(entry_node) {
                            Ok(entry) => {
                                params.insert(parameter.clone(), entry);
                            }
                            Err(reason) => skip(&entry_path, &reason, &mut skipped),
                        }
                    }
                    snapshot
                        .calls
                        .entry(call.clone())
                        .or_default()
                        .insert(region, Slot::Parameterized(params));
                }
            }
        }

        tracing::debug!(
            calls = snapshot.calls.len(),
            skipped,
            "loaded cache snapshot"
        );
        Ok(snapshot)
    }

    /// Parse a snapshot from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, CspmError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json(&value)
    }

    /// Load a snapshot file written by the collector.
    pub fn load(path: &Path) -> Result<Self, CspmError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Whether a region node is a single entry rather than a parameter map.
///
/// Declared keying wins. For undeclared calls a node is an entry only when
/// every key is `data` or `err`, so a parameter named `data` cannot turn a
/// parameter map into an entry.
fn is_entry_node(call: &ServiceCall, node: &Map<String, Value>) -> bool {
    match call.keying() {
        Some(Keying::Region) => true,
        Some(Keying::RegionAndParameter) => false,
        None => !node.is_empty() && node.keys().all(|key| key == "data" || key == "err"),
    }
}

fn object_or_skip<'a>(
    value: &'a Value,
    path: &str,
    skipped: &mut usize,
) -> Option<&'a Map<String, Value>> {
    let object = value.as_object();
    if object.is_none() {
        skip(path, &format!("expected object, found {}", json_kind(value)), skipped);
    }
    object
}

fn skip(path: &str, reason: &str, skipped: &mut usize) {
    *skipped += 1;
    tracing::warn!(path, reason, "skipping malformed cache node");
}

fn read_entry(node: &Map<String, Value>) -> Result<CacheEntry, String> {
    serde_json::from_value(Value::Object(node.clone())).map_err(|e| e.to_string())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
