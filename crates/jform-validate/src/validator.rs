//! # Schema Validator
//!
//! Validates a flat submission against a schema, one level at a time:
//!
//! 1. Rules are split into flat rules and fieldset rules.
//! 2. The flat rules are checked in a single engine run.
//! 3. For each fieldset, in schema order, the repetition count is read from
//!    the first child's input array. Each repetition gets its own flat input
//!    map (`offspring_age[i]` becomes `age`) and is validated recursively
//!    against the child schema and the fieldset's nested rules.
//!
//! Each recursive call returns its own [`ValidationResult`]; the caller ANDs
//! the pass flags and stores the error trees, in repetition order, under the
//! fieldset id.
//!
//! ## Contract Violations
//!
//! A fieldset without children, nested rules for a key that is not a
//! fieldset of the schema, and flat rules for a fieldset are caller mistakes.
//! They are returned as [`FormError`]s instead of being skipped, since
//! skipping would silently drop submitted data from validation.

use std::collections::HashSet;

use serde_json::Value;

use jform_core::schema::{find_fieldset, fieldsets};
use jform_core::{FieldDescriptor, FlatInputs, FormConfig, FormError, KeyPath};

use crate::compile::{compile_bounded, RuleEntry, RuleSet};
use crate::engine::{BasicRuleEngine, FlatRules, RuleEngine};
use crate::report::{ErrorTree, ValidationResult};

/// Validates submissions with an injected rule engine.
#[derive(Debug, Clone, Default)]
pub struct SchemaValidator<E> {
    engine: E,
    config: FormConfig,
}

impl SchemaValidator<BasicRuleEngine> {
    /// A validator backed by [`BasicRuleEngine`].
    pub fn basic() -> Self {
        Self::new(BasicRuleEngine)
    }
}

impl<E: RuleEngine> SchemaValidator<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            config: FormConfig::default(),
        }
    }

    pub fn with_config(mut self, config: FormConfig) -> Self {
        self.config = config;
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Validates `inputs` against `schema`.
    ///
    /// When `rules` is `None` they are compiled from the schema.
    ///
    /// # Errors
    ///
    /// Returns a [`FormError`] only for contract violations; failing user
    /// input is reported through [`ValidationResult::passed`] and
    /// [`ValidationResult::errors`].
    pub fn validate(
        &self,
        schema: &[FieldDescriptor],
        inputs: &FlatInputs,
        rules: Option<&RuleSet>,
    ) -> Result<ValidationResult, FormError> {
        let compiled;
        let rules = match rules {
            Some(rules) => rules,
            None => {
                compiled = compile_bounded(schema, &self.config)?;
                &compiled
            }
        };
        let result = self.validate_level(schema, inputs, rules, &KeyPath::root())?;
        tracing::debug!(
            passed = result.passed,
            messages = result.errors.message_count(),
            "validated submission"
        );
        Ok(result)
    }

    fn validate_level(
        &self,
        schema: &[FieldDescriptor],
        inputs: &FlatInputs,
        rules: &RuleSet,
        path: &KeyPath,
    ) -> Result<ValidationResult, FormError> {
        let fieldset_ids: HashSet<&str> = fieldsets(schema).map(|f| f.id.as_str()).collect();

        let mut flat_rules = FlatRules::new();
        for (key, entry) in rules.iter() {
            match (fieldset_ids.contains(key.as_str()), entry) {
                (false, RuleEntry::Rules(list)) => {
                    flat_rules.insert(key.clone(), list.clone());
                }
                (false, RuleEntry::Nested(_)) => {
                    return Err(FormError::UnknownFieldset {
                        key: path.child(key.as_str()).encode(),
                    });
                }
                (true, RuleEntry::Rules(_)) => {
                    return Err(FormError::RuleShapeMismatch {
                        key: path.child(key.as_str()).encode(),
                    });
                }
                (true, RuleEntry::Nested(_)) => {}
            }
        }

        let outcome = self.engine.check(inputs, &flat_rules);
        let mut passed = outcome.passes;
        let mut errors = ErrorTree::from(outcome.messages);

        for fieldset in fieldsets(schema) {
            let Some(child_rules) = rules.nested(&fieldset.id) else {
                continue;
            };
            let (fieldset_passed, repetitions) =
                self.validate_fieldset(schema, &fieldset.id, inputs, child_rules, path)?;
            passed = passed && fieldset_passed;
            errors.merge_repetitions(fieldset.id.clone(), repetitions);
        }

        Ok(ValidationResult { passed, errors })
    }

    /// Validates every submitted repetition of one fieldset.
    fn validate_fieldset(
        &self,
        schema: &[FieldDescriptor],
        fieldset_id: &str,
        inputs: &FlatInputs,
        child_rules: &RuleSet,
        parent: &KeyPath,
    ) -> Result<(bool, Vec<ErrorTree>), FormError> {
        let fieldset_path = parent.child(fieldset_id);
        let fieldset = find_fieldset(schema, fieldset_id).ok_or_else(|| FormError::UnknownFieldset {
            key: fieldset_path.encode(),
        })?;
        self.config.check_depth(&fieldset_path)?;

        let children = fieldset.children();
        let first = fieldset.first_child().ok_or_else(|| FormError::EmptyFieldset {
            path: fieldset_path.encode(),
        })?;
        let probe = KeyPath::new([fieldset_id, first.id.as_str()]).encode();
        let count = inputs.repetitions(&probe).unwrap_or(0);

        tracing::debug!(fieldset = %fieldset_path, repetitions = count, "validating fieldset");

        let mut passed = true;
        let mut repetitions = Vec::with_capacity(count);
        for index in 0..count {
            let child_inputs = repetition_inputs(fieldset_id, children, inputs, index);
            let result = self.validate_level(children, &child_inputs, child_rules, &fieldset_path)?;
            passed = passed && result.passed;
            repetitions.push(result.errors);
        }
        Ok((passed, repetitions))
    }
}

/// The flat inputs of one repetition, keyed by plain child id.
///
/// A child without a value at `index` gets `null`.
fn repetition_inputs(
    fieldset_id: &str,
    children: &[FieldDescriptor],
    inputs: &FlatInputs,
    index: usize,
) -> FlatInputs {
    children
        .iter()
        .map(|child| {
            let key = KeyPath::new([fieldset_id, child.id.as_str()]).encode();
            let value = inputs.element(&key, index).cloned().unwrap_or(Value::Null);
            (child.id.clone(), value)
        })
        .collect()
}

/// Validates with [`BasicRuleEngine`] and the default configuration.
pub fn validate(
    schema: &[FieldDescriptor],
    inputs: &FlatInputs,
    rules: Option<&RuleSet>,
) -> Result<ValidationResult, FormError> {
    SchemaValidator::basic().validate(schema, inputs, rules)
}
