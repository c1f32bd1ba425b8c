//! # Aggregation Tests
//!
//! Region discovery, ordering, and per-region fault isolation.

use cspm_cache::{CacheEntry, CacheSnapshot, ServiceCall};
use cspm_core::{Finding, Region, Status, Timestamp};
use cspm_engine::{evaluation_regions, run, run_registry, RunOptions};
use cspm_rules::{
    AccessKeysRotation, EvaluationContext, Rule, RuleError, RuleMetadata, RuleRegistry, Settings,
};
use serde_json::json;

fn region(id: &str) -> Region {
    Region::new(id).unwrap()
}

fn options() -> RunOptions {
    RunOptions {
        as_of: Some(Timestamp::parse("2021-06-01T00:00:00Z").unwrap()),
        ..RunOptions::default()
    }
}

/// Three regions: one healthy, one with no users, one whose listing failed.
fn multi_region_snapshot() -> CacheSnapshot {
    let mut snapshot = CacheSnapshot::new();
    snapshot.insert(
        ServiceCall::RAM_LIST_USERS,
        region("cn-hangzhou"),
        CacheEntry::ok(json!([{"UserName": "aqua"}, {"UserName": "cloudsploit"}])),
    );
    snapshot.insert_param(
        ServiceCall::RAM_LIST_ACCESS_KEYS,
        region("cn-hangzhou"),
        "aqua",
        CacheEntry::ok(json!({"AccessKeys": {"AccessKey": [
            {"Status": "Active", "AccessKeyId": "k1", "CreateDate": "2021-01-11T16:37:58Z"}
        ]}})),
    );
    snapshot.insert_param(
        ServiceCall::RAM_LIST_ACCESS_KEYS,
        region("cn-hangzhou"),
        "cloudsploit",
        CacheEntry::ok(json!({"AccessKeys": {"AccessKey": []}})),
    );
    snapshot.insert(
        ServiceCall::RAM_LIST_USERS,
        region("cn-beijing"),
        CacheEntry::ok(json!([])),
    );
    snapshot.insert(
        ServiceCall::RAM_LIST_USERS,
        region("us-west-1"),
        CacheEntry::empty(),
    );
    snapshot
}

static FAULTY_METADATA: RuleMetadata = RuleMetadata {
    id: "faulty",
    title: "Faulty",
    category: "TEST",
    domain: "Testing",
    description: "Fails in selected regions.",
    more_info: "",
    link: "",
    recommended_action: "",
    apis: &["RAM:ListUsers"],
};

#[derive(Debug)]
enum Fault {
    Error,
    Panic,
}

/// Reports OK everywhere except `bad_region`, where it faults.
#[derive(Debug)]
struct FaultyRule {
    bad_region: &'static str,
    fault: Fault,
}

impl Rule for FaultyRule {
    fn metadata(&self) -> &RuleMetadata {
        &FAULTY_METADATA
    }

    fn scope_call(&self) -> ServiceCall {
        ServiceCall::RAM_LIST_USERS
    }

    fn evaluate(
        &self,
        _cache: &CacheSnapshot,
        region: &Region,
        _ctx: &EvaluationContext,
    ) -> Result<Vec<Finding>, RuleError> {
        if region.as_str() == self.bad_region {
            match self.fault {
                Fault::Error => {
                    return Err(RuleError::Fault {
                        rule: "faulty".into(),
                        region: region.to_string(),
                        reason: "synthetic".into(),
                    })
                }
                Fault::Panic => panic!("synthetic panic"),
            }
        }
        Ok(vec![Finding::new(Status::Ok, "fine", region.clone())])
    }
}

#[test]
fn regions_come_from_scope_call_in_sorted_order() {
    let snapshot = multi_region_snapshot();
    let regions = evaluation_regions(&AccessKeysRotation::new(), &snapshot, &Region::default());
    let ids: Vec<&str> = regions.iter().map(Region::as_str).collect();
    assert_eq!(ids, ["cn-beijing", "cn-hangzhou", "us-west-1"]);
}

#[test]
fn empty_snapshot_falls_back_to_default_region() {
    let findings = run(&AccessKeysRotation::new(), &CacheSnapshot::new(), &options()).unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].status, Status::Unknown);
    assert!(findings[0].message.contains("Unable to query RAM users"));
    assert_eq!(findings[0].region.as_str(), "cn-hangzhou");
}

#[test]
fn findings_are_partitioned_by_region() {
    let findings = run(&AccessKeysRotation::new(), &multi_region_snapshot(), &options()).unwrap();
    let summary: Vec<(&str, Status)> = findings
        .iter()
        .map(|f| (f.region.as_str(), f.status))
        .collect();
    assert_eq!(
        summary,
        [
            ("cn-beijing", Status::Ok),
            ("cn-hangzhou", Status::Fail),
            ("cn-hangzhou", Status::Ok),
            ("us-west-1", Status::Unknown),
        ]
    );
}

#[test]
fn concurrent_run_matches_sequential_run() {
    let snapshot = multi_region_snapshot();
    let sequential = run(&AccessKeysRotation::new(), &snapshot, &options()).unwrap();
    let concurrent = run(
        &AccessKeysRotation::new(),
        &snapshot,
        &RunOptions {
            concurrent: true,
            ..options()
        },
    )
    .unwrap();
    assert_eq!(sequential, concurrent);
}

#[test]
fn rule_error_is_isolated_to_its_region() {
    let rule = FaultyRule {
        bad_region: "cn-hangzhou",
        fault: Fault::Error,
    };
    let findings = run(&rule, &multi_region_snapshot(), &options()).unwrap();
    assert_eq!(findings.len(), 3);
    assert_eq!(findings[0].status, Status::Ok);
    assert_eq!(findings[1].status, Status::Unknown);
    assert_eq!(findings[1].region.as_str(), "cn-hangzhou");
    assert!(findings[1].message.contains("Unable to evaluate rule"));
    assert_eq!(findings[2].status, Status::Ok);
}

#[test]
fn panicking_region_is_isolated_in_both_modes() {
    for concurrent in [false, true] {
        let rule = FaultyRule {
            bad_region: "cn-beijing",
            fault: Fault::Panic,
        };
        let findings = run(
            &rule,
            &multi_region_snapshot(),
            &RunOptions {
                concurrent,
                ..options()
            },
        )
        .unwrap();
        assert_eq!(findings.len(), 3, "concurrent={concurrent}");
        assert_eq!(findings[0].status, Status::Unknown);
        assert!(findings[0].message.contains("synthetic panic"));
        assert!(findings[1..].iter().all(|f| f.status == Status::Ok));
    }
}

#[test]
fn invalid_settings_fail_the_whole_run() {
    let bad = RunOptions {
        settings: Settings {
            ram_access_keys_rotation_interval: 0,
        },
        ..options()
    };
    assert!(run(&AccessKeysRotation::new(), &multi_region_snapshot(), &bad).is_err());
}

#[test]
fn registry_run_reports_each_rule() {
    let reports = run_registry(&RuleRegistry::builtin(), &multi_region_snapshot(), &options())
        .unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].rule, "accessKeysRotation");
    assert_eq!(reports[0].findings.len(), 4);

    let json = serde_json::to_value(&reports[0]).unwrap();
    assert_eq!(json["findings"][1]["status"], 2);
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Concurrency never changes output, whatever the region layout.
        #[test]
        fn concurrent_equals_sequential(layout in prop::collection::btree_map(
            "[a-z]{2}-[a-z]{3,8}",
            prop_oneof![Just(0u8), Just(1u8), Just(2u8)],
            1..6,
        )) {
            let mut snapshot = CacheSnapshot::new();
            for (id, kind) in &layout {
                let entry = match kind {
                    0 => CacheEntry::ok(json!([])),
                    1 => CacheEntry::empty(),
                    _ => CacheEntry::ok(json!([{"UserName": "aqua"}])),
                };
                snapshot.insert(ServiceCall::RAM_LIST_USERS, region(id), entry);
            }
            let sequential = run(&AccessKeysRotation::new(), &snapshot, &options()).unwrap();
            let concurrent = run(
                &AccessKeysRotation::new(),
                &snapshot,
                &RunOptions { concurrent: true, ..options() },
            ).unwrap();
            prop_assert_eq!(&sequential, &concurrent);
            prop_assert_eq!(sequential.len(), layout.len());
        }
    }
}
