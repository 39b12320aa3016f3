//! # jform-cli — Command-Line Front End
//!
//! Provides the `jform` binary, which runs the form pipeline over schema
//! and submission files. Every subcommand prints JSON to stdout and logs
//! through `tracing` to stderr.
//!
//! ## Subcommands
//!
//! - `jform rules` — Compile the rule set for a schema.
//! - `jform validate` — Validate a flat submission.
//! - `jform transform` — Validate, then rebuild the nested value tree.
//! - `jform lint` — Report schema problems.
//!
//! ```bash
//! jform rules household.yaml
//! jform validate household.yaml submission.json --rules rules.json
//! jform -v transform household.yaml submission.json
//! ```

pub mod io;
pub mod lint;
pub mod rules;
pub mod transform;
pub mod validate;

#[cfg(test)]
mod tests {
    use super::*;
    use jform_core::FormConfig;

    #[test]
    fn rules_subcommand_compiles_and_bounds_depth() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("schema.json");
        std::fs::write(
            &schema,
            r#"[{ "id": "pets", "type": "fieldset", "field_options": { "fields": [
                  { "id": "name", "type": "text", "required": true }
               ]}}]"#,
        )
        .unwrap();
        let args = rules::RulesArgs { schema };

        let compiled = rules::compile_file(&args, &FormConfig::default()).unwrap();
        assert_eq!(
            serde_json::to_value(&compiled).unwrap(),
            serde_json::json!({ "pets": { "name": ["required"] } })
        );
        assert_eq!(rules::run_rules(&args, &FormConfig::default()).unwrap(), 0);

        let err = rules::compile_file(&args, &FormConfig { max_depth: 0 }).unwrap_err();
        assert!(format!("{err:#}").contains("maximum depth of 0"));
    }
}
