//! # jform CLI entry point
//!
//! Parses command-line arguments, sets up logging, loads the optional
//! configuration file, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jform_cli::io::load_config;
use jform_cli::lint::{run_lint, LintArgs};
use jform_cli::rules::{run_rules, RulesArgs};
use jform_cli::transform::{run_transform, TransformArgs};
use jform_cli::validate::{run_validate, ValidateArgs};

/// Schema-driven form pipeline.
///
/// Compiles validation rules from a form schema, validates flat
/// submissions with repeated fieldsets, and rebuilds them as nested,
/// natively typed values.
#[derive(Parser, Debug)]
#[command(name = "jform", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (JSON or YAML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the rule set compiled from a schema.
    Rules(RulesArgs),

    /// Validate a flat submission against a schema.
    Validate(ValidateArgs),

    /// Validate a flat submission, then print its nested value tree.
    Transform(TransformArgs),

    /// Report duplicate ids, ambiguous keys, and empty fieldsets.
    Lint(LintArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "jform starting");

    let result = load_config(cli.config.as_deref()).and_then(|config| match &cli.command {
        Commands::Rules(args) => run_rules(args, &config),
        Commands::Validate(args) => run_validate(args, &config),
        Commands::Transform(args) => run_transform(args, &config),
        Commands::Lint(args) => run_lint(args),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_rules() {
        let cli = Cli::try_parse_from(["jform", "rules", "schema.json"]).unwrap();
        if let Commands::Rules(args) = cli.command {
            assert_eq!(args.schema, PathBuf::from("schema.json"));
        } else {
            panic!("expected rules subcommand");
        }
    }

    #[test]
    fn cli_parse_validate_without_rules() {
        let cli = Cli::try_parse_from(["jform", "validate", "schema.yaml", "inputs.json"]).unwrap();
        if let Commands::Validate(args) = cli.command {
            assert_eq!(args.schema, PathBuf::from("schema.yaml"));
            assert_eq!(args.inputs, PathBuf::from("inputs.json"));
            assert!(args.rules.is_none());
        } else {
            panic!("expected validate subcommand");
        }
    }

    #[test]
    fn cli_parse_validate_with_rules() {
        let cli = Cli::try_parse_from([
            "jform",
            "validate",
            "schema.json",
            "inputs.json",
            "--rules",
            "rules.json",
        ])
        .unwrap();
        if let Commands::Validate(args) = cli.command {
            assert_eq!(args.rules, Some(PathBuf::from("rules.json")));
        }
    }

    #[test]
    fn cli_parse_transform_skip_validation() {
        let cli = Cli::try_parse_from([
            "jform",
            "transform",
            "schema.json",
            "inputs.json",
            "--skip-validation",
        ])
        .unwrap();
        if let Commands::Transform(args) = cli.command {
            assert!(args.skip_validation);
        } else {
            panic!("expected transform subcommand");
        }
    }

    #[test]
    fn cli_parse_transform_defaults_to_validating() {
        let cli = Cli::try_parse_from(["jform", "transform", "s.json", "i.json"]).unwrap();
        if let Commands::Transform(args) = cli.command {
            assert!(!args.skip_validation);
        }
    }

    #[test]
    fn cli_parse_lint() {
        let cli = Cli::try_parse_from(["jform", "lint", "schema.yml"]).unwrap();
        assert!(matches!(cli.command, Commands::Lint(_)));
    }

    #[test]
    fn cli_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "jform",
            "lint",
            "schema.json",
            "-vv",
            "--config",
            "jform.yaml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("jform.yaml")));
    }

    #[test]
    fn cli_parse_validate_requires_inputs() {
        assert!(Cli::try_parse_from(["jform", "validate", "schema.json"]).is_err());
    }

    #[test]
    fn cli_parse_unknown_subcommand_fails() {
        assert!(Cli::try_parse_from(["jform", "submit"]).is_err());
    }
}
