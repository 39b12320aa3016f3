//! # Validate Subcommand
//!
//! `jform validate <SCHEMA> <INPUTS> [--rules FILE]` checks a flat
//! submission with the built-in rule engine and prints the result. Rules
//! are compiled from the schema unless a rule file is given.
//!
//! Exit codes: 0 when the submission passes, 1 when any rule fails or the
//! files cannot be loaded.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use jform_core::FormConfig;
use jform_validate::{SchemaValidator, ValidationResult};

use crate::io::{load_inputs, load_rules, load_schema, print_json};

/// Arguments for the `jform validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema file (JSON or YAML).
    pub schema: PathBuf,

    /// Flat submission file (JSON or YAML object).
    pub inputs: PathBuf,

    /// Precomputed rule set; compiled from the schema when omitted.
    #[arg(long)]
    pub rules: Option<PathBuf>,
}

/// Validate the files named in `args`.
pub fn validate_files(args: &ValidateArgs, config: &FormConfig) -> Result<ValidationResult> {
    let schema = load_schema(&args.schema)?;
    let inputs = load_inputs(&args.inputs)?;
    let rules = args.rules.as_deref().map(load_rules).transpose()?;

    SchemaValidator::basic()
        .with_config(*config)
        .validate(&schema, &inputs, rules.as_ref())
        .with_context(|| format!("cannot validate against {}", args.schema.display()))
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, config: &FormConfig) -> Result<u8> {
    let result = validate_files(args, config)?;
    print_json(&result)?;
    if result.passed {
        tracing::info!(inputs = %args.inputs.display(), "submission passed");
        Ok(0)
    } else {
        tracing::info!(
            inputs = %args.inputs.display(),
            messages = result.errors.message_count(),
            "submission failed validation"
        );
        Ok(1)
    }
}
