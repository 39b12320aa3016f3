//! # Lint Subcommand
//!
//! `jform lint <SCHEMA>` reports schema problems that the pipeline would
//! otherwise tolerate: duplicate sibling ids, ids that make flat keys
//! ambiguous, and fieldsets without children. Exits 1 when anything is
//! found.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use jform_core::Diagnostic;

use crate::io::{load_schema, print_json};

/// Arguments for the `jform lint` subcommand.
#[derive(Args, Debug)]
pub struct LintArgs {
    /// Schema file (JSON or YAML).
    pub schema: PathBuf,
}

/// Lint the schema named in `args`.
pub fn lint_file(args: &LintArgs) -> Result<Vec<Diagnostic>> {
    Ok(load_schema(&args.schema)?.lint())
}

/// Execute the lint subcommand.
pub fn run_lint(args: &LintArgs) -> Result<u8> {
    let diagnostics = lint_file(args)?;
    for diagnostic in &diagnostics {
        tracing::warn!(kind = ?diagnostic.kind, "{diagnostic}");
    }
    print_json(&diagnostics)?;
    Ok(u8::from(!diagnostics.is_empty()))
}
