//! # Run Subcommand
//!
//! Loads a collector snapshot, layers flags over the configured run options,
//! evaluates rules, and prints the findings as JSON.
//!
//! With `--rule`, the output is that rule's findings array (the wire shape
//! the reporting consumer reads). Without it, every built-in rule runs and
//! the output is an array of `{rule, findings}` reports.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Args;

use cspm_cache::CacheSnapshot;
use cspm_core::{Region, Timestamp};
use cspm_engine::RunOptions;
use cspm_rules::RuleRegistry;

use crate::config::load_options;

/// Arguments for `cspm run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Collector snapshot (JSON).
    #[arg(long)]
    pub cache: PathBuf,

    /// Run a single rule by id (e.g., accessKeysRotation).
    #[arg(long)]
    pub rule: Option<String>,

    /// Maximum access-key age in days before the rotation check fails.
    #[arg(long)]
    pub max_age_days: Option<u32>,

    /// Region evaluated when the snapshot names none.
    #[arg(long)]
    pub region: Option<String>,

    /// Evaluation instant (RFC 3339). Defaults to now.
    #[arg(long, value_parser = Timestamp::parse)]
    pub as_of: Option<Timestamp>,

    /// Evaluate regions concurrently.
    #[arg(long)]
    pub concurrent: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

impl RunArgs {
    /// Apply command-line overrides on top of `options`.
    pub fn apply(&self, mut options: RunOptions) -> Result<RunOptions> {
        if let Some(days) = self.max_age_days {
            options.settings.ram_access_keys_rotation_interval = days;
        }
        if let Some(region) = &self.region {
            options.default_region = Region::new(region.as_str())?;
        }
        if let Some(as_of) = self.as_of {
            options.as_of = Some(as_of);
        }
        if self.concurrent {
            options.concurrent = true;
        }
        Ok(options)
    }
}

/// Execute `cspm run`, writing findings to `out`.
pub fn run_run(args: &RunArgs, config: Option<&Path>, out: &mut impl Write) -> Result<u8> {
    let options = args.apply(load_options(config)?)?;
    let snapshot = CacheSnapshot::load(&args.cache)
        .with_context(|| format!("loading cache snapshot {}", args.cache.display()))?;
    let registry = RuleRegistry::builtin();

    tracing::info!(
        cache = %args.cache.display(),
        rule = args.rule.as_deref().unwrap_or("*"),
        concurrent = options.concurrent,
        "starting run"
    );

    match &args.rule {
        Some(id) => {
            let rule = registry
                .get(id)
                .ok_or_else(|| anyhow!("unknown rule {id:?}; see `cspm rules`"))?;
            let findings = cspm_engine::run(rule.as_ref(), &snapshot, &options)?;
            write_json(out, &findings, args.pretty)?;
        }
        None => {
            let reports = cspm_engine::run_registry(&registry, &snapshot, &options)?;
            write_json(out, &reports, args.pretty)?;
        }
    }
    Ok(0)
}

fn write_json(out: &mut impl Write, value: &impl serde::Serialize, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
