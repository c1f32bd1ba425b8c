//! # Aggregator
//!
//! Invokes a rule once per region and concatenates the results.
//!
//! ## Region Discovery
//!
//! The regions a rule covers are the region keys of its scope call in the
//! snapshot (e.g. every region `ram.ListUsers` was collected for). When the
//! snapshot has none, the default region is evaluated alone so the rule can
//! still report that its data is unavailable.

use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;

use cspm_cache::CacheSnapshot;
use cspm_core::{CspmError, Finding, Region, Status};
use cspm_rules::{EvaluationContext, Rule, RuleRegistry};

use crate::options::RunOptions;

/// Findings of one rule across every region it covered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleReport {
    /// Rule identifier.
    pub rule: &'static str,
    /// Findings, partitioned by region in region order.
    pub findings: Vec<Finding>,
}

/// Regions `rule` is evaluated in for `cache`.
pub fn evaluation_regions(rule: &dyn Rule, cache: &CacheSnapshot, default: &Region) -> Vec<Region> {
    let scope = rule.scope_call();
    let regions: Vec<Region> = cache.regions(&scope).cloned().collect();
    if regions.is_empty() {
        tracing::debug!(
            rule = rule.metadata().id,
            call = %scope,
            region = %default,
            "no regions collected; evaluating default region"
        );
        return vec![default.clone()];
    }
    regions
}

/// Run one rule over every region it covers.
///
/// # Errors
///
/// Only invalid run options are errors. Per-region faults are reported as
/// `UNKNOWN` findings.
pub fn run(
    rule: &dyn Rule,
    cache: &CacheSnapshot,
    options: &RunOptions,
) -> Result<Vec<Finding>, CspmError> {
    let ctx = options.context()?;
    let regions = evaluation_regions(rule, cache, &options.default_region);

    let partitions = if options.concurrent && regions.len() > 1 {
        evaluate_concurrently(rule, cache, &regions, &ctx)
    } else {
        regions
            .iter()
            .map(|region| (region.clone(), evaluate_isolated(rule, cache, region, &ctx)))
            .collect()
    };

    let findings: Vec<Finding> = partitions.into_values().flatten().collect();
    tracing::info!(
        rule = rule.metadata().id,
        regions = regions.len(),
        findings = findings.len(),
        "rule run complete"
    );
    Ok(findings)
}

/// Run every registered rule, in registry order.
pub fn run_registry(
    registry: &RuleRegistry,
    cache: &CacheSnapshot,
    options: &RunOptions,
) -> Result<Vec<RuleReport>, CspmError> {
    registry
        .iter()
        .map(|rule| {
            Ok(RuleReport {
                rule: rule.metadata().id,
                findings: run(rule.as_ref(), cache, options)?,
            })
        })
        .collect()
}

/// One thread per region, each with its own finding list, merged by region.
fn evaluate_concurrently(
    rule: &dyn Rule,
    cache: &CacheSnapshot,
    regions: &[Region],
    ctx: &EvaluationContext,
) -> BTreeMap<Region, Vec<Finding>> {
    std::thread::scope(|scope| {
        let handles: Vec<_> = regions
            .iter()
            .map(|region| {
                let handle = scope.spawn(move || evaluate_isolated(rule, cache, region, ctx));
                (region, handle)
            })
            .collect();

        handles
            .into_iter()
            .map(|(region, handle)| {
                let findings = handle.join().unwrap_or_else(|_| {
                    fault_finding(rule, region, "region worker terminated unexpectedly")
                });
                (region.clone(), findings)
            })
            .collect()
    })
}

/// Evaluate one region, converting errors and panics into a single finding.
fn evaluate_isolated(
    rule: &dyn Rule,
    cache: &CacheSnapshot,
    region: &Region,
    ctx: &EvaluationContext,
) -> Vec<Finding> {
    match panic::catch_unwind(AssertUnwindSafe(|| rule.evaluate(cache, region, ctx))) {
        Ok(Ok(findings)) => findings,
        Ok(Err(e)) => fault_finding(rule, region, &e.to_string()),
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "evaluation panicked".to_string());
            fault_finding(rule, region, &reason)
        }
    }
}

fn fault_finding(rule: &dyn Rule, region: &Region, reason: &str) -> Vec<Finding> {
    tracing::warn!(
        rule = rule.metadata().id,
        region = %region,
        reason,
        "region evaluation failed; reporting UNKNOWN"
    );
    vec![Finding::new(
        Status::Unknown,
        format!("Unable to evaluate rule: {reason}"),
        region.clone(),
    )]
}
