//! # jform-validate — Rule Compilation & Validation
//!
//! Turns a form schema into rule descriptors and validates flat submissions
//! against them, recursing into fieldsets so that every submitted
//! repetition is checked against the fieldset's child schema.
//!
//! ## Entry Points
//!
//! - [`compile_rules`] — schema to [`RuleSet`]; pure and infallible.
//!   [`compile_bounded`] is the depth-limited form.
//! - [`validate`] — schema + inputs (+ optional precomputed rules) to a
//!   [`ValidationResult`], using the bundled [`BasicRuleEngine`].
//! - [`SchemaValidator`] — the same with an injected [`RuleEngine`] and a
//!   custom [`FormConfig`](jform_core::FormConfig).
//!
//! ## Crate Policy
//!
//! - Depends only on `jform-core` internally.
//! - Invalid user input is never an `Err`; only contract violations are.
//! - The validator never mutates the schema or the inputs.

pub mod compile;
pub mod engine;
pub mod report;
pub mod rule;
pub mod validator;

pub use compile::{compile, compile_bounded, handler_for, rule_key, RuleEntry, RuleHandler, RuleSet};
pub use engine::{BasicRuleEngine, FlatRules, RuleEngine, RuleOutcome};
pub use report::{ErrorEntry, ErrorTree, ValidationResult};
pub use rule::Rule;
pub use validator::{validate, SchemaValidator};

use jform_core::FieldDescriptor;

/// Compiles the rule set of a schema.
pub fn compile_rules(schema: &[FieldDescriptor]) -> RuleSet {
    compile(schema)
}
