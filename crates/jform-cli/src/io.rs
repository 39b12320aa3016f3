//! File loading shared by every subcommand.
//!
//! The format of each file is picked from its extension (`.yaml`/`.yml`
//! for YAML, JSON otherwise).

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use jform_core::{parse_document, FlatInputs, FormConfig, Format, Schema};
use jform_validate::RuleSet;

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Load a form schema.
pub fn load_schema(path: &Path) -> Result<Schema> {
    let text = read(path)?;
    Schema::from_document(&text, Format::from_path(path))
        .with_context(|| format!("invalid schema in {}", path.display()))
}

/// Load a flat submission.
pub fn load_inputs(path: &Path) -> Result<FlatInputs> {
    let text = read(path)?;
    let value = parse_document(&text, Format::from_path(path), "inputs")?;
    FlatInputs::from_value(value).with_context(|| format!("invalid inputs in {}", path.display()))
}

/// Load a precomputed rule set.
pub fn load_rules(path: &Path) -> Result<RuleSet> {
    let text = read(path)?;
    let value = parse_document(&text, Format::from_path(path), "rules")?;
    serde_json::from_value(value).with_context(|| format!("invalid rules in {}", path.display()))
}

/// Load the pipeline configuration, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<FormConfig> {
    let Some(path) = path else {
        return Ok(FormConfig::default());
    };
    let text = read(path)?;
    let config = FormConfig::from_document(&text, Format::from_path(path))
        .with_context(|| format!("invalid config in {}", path.display()))?;
    tracing::debug!(path = %path.display(), max_depth = config.max_depth, "loaded config");
    Ok(config)
}

/// Print `value` to stdout as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}
