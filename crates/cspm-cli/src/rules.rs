//! # Rules Subcommand
//!
//! Lists the built-in rules with their metadata.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use cspm_rules::{RuleMetadata, RuleRegistry};

/// Arguments for `cspm rules`.
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Print full metadata as JSON instead of a summary table.
    #[arg(long)]
    pub json: bool,
}

/// Execute `cspm rules`, writing to `out`.
pub fn run_rules(args: &RulesArgs, out: &mut impl Write) -> Result<u8> {
    let registry = RuleRegistry::builtin();
    let metadata: Vec<&RuleMetadata> = registry.iter().map(|rule| rule.metadata()).collect();

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &metadata)?;
        writeln!(out)?;
    } else {
        for meta in metadata {
            writeln!(
                out,
                "{:<24} {:<6} {}  [{}]",
                meta.id,
                meta.category,
                meta.title,
                meta.apis.join(", ")
            )?;
        }
    }
    Ok(0)
}
