//! # Rules Subcommand
//!
//! `jform rules <SCHEMA>` prints the rule set compiled from a schema. The
//! output can be edited and passed back to `jform validate --rules`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use jform_core::FormConfig;
use jform_validate::{compile_bounded, RuleSet};

use crate::io::{load_schema, print_json};

/// Arguments for the `jform rules` subcommand.
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Schema file (JSON or YAML).
    pub schema: PathBuf,
}

/// Compile the rules for the schema named in `args`.
pub fn compile_file(args: &RulesArgs, config: &FormConfig) -> Result<RuleSet> {
    let schema = load_schema(&args.schema)?;
    compile_bounded(&schema, config)
        .with_context(|| format!("cannot compile rules for {}", args.schema.display()))
}

/// Execute the rules subcommand.
pub fn run_rules(args: &RulesArgs, config: &FormConfig) -> Result<u8> {
    let rules = compile_file(args, config)?;
    tracing::info!(fields = rules.len(), "compiled rules");
    print_json(&rules)?;
    Ok(0)
}
