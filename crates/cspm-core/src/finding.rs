//! # Findings
//!
//! A [`Finding`] is one reported outcome of a rule for one scope unit: a
//! whole region, or a single resource within it. [`FindingLog`] is the
//! append-only list a rule writes into while it evaluates one region.

use serde::{Deserialize, Serialize};

use crate::region::Region;
use crate::status::Status;

/// One reported outcome.
///
/// Wire shape: `{status, message, region[, resource]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Outcome severity.
    pub status: Status,
    /// Human-readable explanation.
    pub message: String,
    /// Region the finding was evaluated in.
    pub region: Region,
    /// Resource identifier, when the finding is scoped to one resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

impl Finding {
    /// Create a region-scoped finding.
    pub fn new(status: Status, message: impl Into<String>, region: Region) -> Self {
        Self {
            status,
            message: message.into(),
            region,
            resource: None,
        }
    }

    /// Scope the finding to a resource.
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }
}

/// Append-only finding list for a single region.
///
/// Every finding pushed through the log is stamped with the log's region,
/// so a rule cannot accidentally report into another partition.
#[derive(Debug, Clone)]
pub struct FindingLog {
    region: Region,
    findings: Vec<Finding>,
}

impl FindingLog {
    /// Start an empty log for `region`.
    pub fn new(region: Region) -> Self {
        Self {
            region,
            findings: Vec::new(),
        }
    }

    /// The region this log collects for.
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Append a finding, optionally scoped to a resource.
    pub fn add(&mut self, status: Status, message: impl Into<String>, resource: Option<&str>) {
        let mut finding = Finding::new(status, message, self.region.clone());
        finding.resource = resource.map(str::to_owned);
        self.findings.push(finding);
    }

    /// Number of findings recorded so far.
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Most cautious status recorded, if any.
    pub fn worst(&self) -> Option<Status> {
        self.findings.iter().map(|f| f.status).reduce(Status::worst)
    }

    /// Consume the log, yielding findings in insertion order.
    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}
