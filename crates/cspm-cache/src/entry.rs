//! # Cache Entries
//!
//! One upstream API response slot: an optional payload and an optional
//! error marker. A present marker takes precedence over any payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marker left by the collector when an API call failed.
///
/// The content is whatever the collector recorded (an error object, a
/// string, or even an empty array). Its presence alone is the signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMarker(pub serde_json::Value);

impl ErrorMarker {
    /// A marker carrying a message.
    pub fn message(msg: impl Into<String>) -> Self {
        Self(serde_json::Value::String(msg.into()))
    }

    /// Short rendering for logs.
    pub fn summary(&self) -> String {
        match &self.0 {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Why a lookup produced no usable payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    /// No entry exists for the key.
    #[error("no cache entry")]
    Missing,
    /// The collector recorded an error for the call.
    #[error("collector error: {0}")]
    Errored(String),
    /// The entry exists but holds no payload.
    #[error("entry has no data")]
    NoData,
    /// The payload does not have the expected shape.
    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// One upstream API response slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Response payload, if the call returned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Error marker, if the call failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err: Option<ErrorMarker>,
}

impl CacheEntry {
    /// A successful response.
    pub fn ok(data: serde_json::Value) -> Self {
        Self {
            data: Some(data),
            err: None,
        }
    }

    /// A failed response.
    pub fn errored(marker: ErrorMarker) -> Self {
        Self {
            data: None,
            err: Some(marker),
        }
    }

    /// An entry with neither payload nor error.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The payload, if the entry is usable.
    ///
    /// An error marker wins over a payload.
    pub fn payload(&self) -> Result<&serde_json::Value, Unavailable> {
        if let Some(marker) = &self.err {
            return Err(Unavailable::Errored(marker.summary()));
        }
        match &self.data {
            Some(serde_json::Value::Null) | None => Err(Unavailable::NoData),
            Some(data) => Ok(data),
        }
    }

    /// Decode the payload into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, Unavailable> {
        let data = self.payload()?;
        T::deserialize(data).map_err(|e| Unavailable::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_entry_yields_payload() {
        let entry = CacheEntry::ok(json!([{"UserName": "aqua"}]));
        assert!(entry.payload().is_ok());
    }

    #[test]
    fn error_marker_wins_over_payload() {
        let entry = CacheEntry {
            data: Some(json!([])),
            err: Some(ErrorMarker::message("throttled")),
        };
        assert_eq!(entry.payload(), Err(Unavailable::Errored("throttled".into())));
    }

    #[test]
    fn empty_array_marker_is_still_an_error() {
        let entry: CacheEntry = serde_json::from_value(json!({"data": null, "err": []})).unwrap();
        assert!(entry.err.is_some());
        assert!(matches!(entry.payload(), Err(Unavailable::Errored(_))));
    }

    #[test]
    fn null_err_is_absent() {
        let entry: CacheEntry = serde_json::from_value(json!({"data": [], "err": null})).unwrap();
        assert!(entry.err.is_none());
        assert_eq!(entry.payload().unwrap(), &json!([]));
    }

    #[test]
    fn absent_data_is_unavailable() {
        assert_eq!(CacheEntry::empty().payload(), Err(Unavailable::NoData));
        let entry: CacheEntry = serde_json::from_value(json!({"data": null})).unwrap();
        assert_eq!(entry.payload(), Err(Unavailable::NoData));
    }

    #[test]
    fn decode_reports_shape_mismatch() {
        let entry = CacheEntry::ok(json!({"not": "a list"}));
        let decoded: Result<Vec<String>, _> = entry.decode();
        assert!(matches!(decoded, Err(Unavailable::Malformed(_))));
    }
}
