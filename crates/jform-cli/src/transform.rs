//! # Transform Subcommand
//!
//! `jform transform <SCHEMA> <INPUTS>` validates a flat submission and, if
//! it passes, prints the nested native-typed value tree. A failing
//! submission prints its validation result instead and exits 1.
//!
//! `--skip-validation` transforms unconditionally. Conversion is
//! best-effort, so unvalidated values may come through as submitted.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use jform_core::FormConfig;
use jform_transform::{SchemaTransformer, Transformed};
use jform_validate::{SchemaValidator, ValidationResult};

use crate::io::{load_inputs, load_schema, print_json};

/// Arguments for the `jform transform` subcommand.
#[derive(Args, Debug)]
pub struct TransformArgs {
    /// Schema file (JSON or YAML).
    pub schema: PathBuf,

    /// Flat submission file (JSON or YAML object).
    pub inputs: PathBuf,

    /// Transform without validating first.
    #[arg(long)]
    pub skip_validation: bool,
}

/// What the transform subcommand produced.
#[derive(Debug)]
pub enum TransformOutcome {
    /// Validation failed; nothing was transformed.
    Rejected(ValidationResult),
    Transformed(Transformed),
}

/// Validate, then transform, the files named in `args`.
pub fn transform_files(args: &TransformArgs, config: &FormConfig) -> Result<TransformOutcome> {
    let schema = load_schema(&args.schema)?;
    let inputs = load_inputs(&args.inputs)?;

    if !args.skip_validation {
        let result = SchemaValidator::basic()
            .with_config(*config)
            .validate(&schema, &inputs, None)
            .with_context(|| format!("cannot validate against {}", args.schema.display()))?;
        if !result.passed {
            return Ok(TransformOutcome::Rejected(result));
        }
    }

    let transformed = SchemaTransformer::with_config(*config)
        .transform(&schema, &inputs)
        .with_context(|| format!("cannot transform against {}", args.schema.display()))?;
    Ok(TransformOutcome::Transformed(transformed))
}

/// Execute the transform subcommand.
pub fn run_transform(args: &TransformArgs, config: &FormConfig) -> Result<u8> {
    match transform_files(args, config)? {
        TransformOutcome::Rejected(result) => {
            tracing::warn!(
                inputs = %args.inputs.display(),
                "submission failed validation; not transformed"
            );
            print_json(&result)?;
            Ok(1)
        }
        TransformOutcome::Transformed(transformed) => {
            print_json(&transformed.values)?;
            Ok(0)
        }
    }
}
