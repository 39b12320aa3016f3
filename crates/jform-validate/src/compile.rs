//! # Rule Compilation
//!
//! Walks a schema and derives the rule descriptors that apply to each field.
//! Fieldsets produce a nested [`RuleSet`] under their own id; their children
//! are never merged into the parent level.
//!
//! ## Key Naming
//!
//! Dropdowns submit their value as an array (`colors[]=red&colors[]=blue`),
//! so their rules are keyed `id[]` to tell the rule engine to expect one.
//! Every other field, and every fieldset, is keyed by its plain id.

use std::collections::BTreeMap;
use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use jform_core::{FieldDescriptor, FieldType, FormConfig, FormError, KeyPath};

use crate::rule::Rule;

/// Suffix appended to the rule key of array-valued fields.
pub const ARRAY_KEY_SUFFIX: &str = "[]";

/// Rules for one schema level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet(BTreeMap<String, RuleEntry>);

/// Rules for one key: a flat rule list for a field, or a nested set for a
/// fieldset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleEntry {
    Rules(Vec<Rule>),
    Nested(RuleSet),
}

impl RuleSet {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&RuleEntry> {
        self.0.get(key)
    }

    /// Rules of a leaf key, if that key holds a flat list.
    pub fn rules(&self, key: &str) -> Option<&[Rule]> {
        match self.0.get(key) {
            Some(RuleEntry::Rules(rules)) => Some(rules),
            _ => None,
        }
    }

    /// Nested rules of a fieldset key.
    pub fn nested(&self, key: &str) -> Option<&RuleSet> {
        match self.0.get(key) {
            Some(RuleEntry::Nested(set)) => Some(set),
            _ => None,
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: RuleEntry) -> Option<RuleEntry> {
        self.0.insert(key.into(), entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RuleEntry)> {
        self.0.iter()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, RuleEntry)> for RuleSet {
    fn from_iter<T: IntoIterator<Item = (String, RuleEntry)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A type-specific rule function.
pub type RuleHandler = fn(&FieldDescriptor) -> Vec<Rule>;

/// Resolves the rule function for a field type.
///
/// Types without specific rules, including unknown ones, resolve to
/// [`no_type_rules`].
pub fn handler_for(kind: &FieldType) -> RuleHandler {
    match kind {
        FieldType::Number => number_rules,
        FieldType::Email => email_rules,
        FieldType::Date => date_rules,
        FieldType::Dropdown | FieldType::Radio => choice_rules,
        FieldType::Text
        | FieldType::Checkbox
        | FieldType::Fieldset
        | FieldType::Other(_) => no_type_rules,
    }
}

/// `integer` for integer-only numbers, `numeric` otherwise.
pub fn number_rules(field: &FieldDescriptor) -> Vec<Rule> {
    if field.is_integer_only() {
        vec![Rule::Integer]
    } else {
        vec![Rule::Numeric]
    }
}

pub fn email_rules(_field: &FieldDescriptor) -> Vec<Rule> {
    vec![Rule::Email]
}

pub fn date_rules(_field: &FieldDescriptor) -> Vec<Rule> {
    vec![Rule::Date]
}

/// `in:<values>` over the declared choices, or nothing when the field
/// declares none.
pub fn choice_rules(field: &FieldDescriptor) -> Vec<Rule> {
    match field.choice_values() {
        Some(values) => vec![Rule::one_of(values)],
        None => Vec::new(),
    }
}

/// Fallback for types without type-specific rules.
pub fn no_type_rules(_field: &FieldDescriptor) -> Vec<Rule> {
    Vec::new()
}

/// The rule-set key of a field.
pub fn rule_key(field: &FieldDescriptor) -> String {
    if field.kind == FieldType::Dropdown {
        format!("{}{ARRAY_KEY_SUFFIX}", field.id)
    } else {
        field.id.clone()
    }
}

/// The flat rules of a non-fieldset field: `required` first if set, then
/// the type's rules.
pub fn field_rules(field: &FieldDescriptor) -> Vec<Rule> {
    let mut rules = Vec::new();
    if field.is_required() {
        rules.push(Rule::Required);
    }
    rules.extend(handler_for(&field.kind)(field));
    rules
}

/// Compiles the rules of a schema level and all nested fieldsets.
///
/// Recursion follows the schema without a depth limit; use
/// [`compile_bounded`] for schemas built from untrusted input.
pub fn compile(fields: &[FieldDescriptor]) -> RuleSet {
    let unbounded = |_: &KeyPath| Ok::<(), Infallible>(());
    match compile_level(fields, &KeyPath::root(), &unbounded) {
        Ok(rules) => rules,
        Err(never) => match never {},
    }
}

/// Like [`compile`], but fails once fieldsets nest deeper than
/// `config.max_depth`.
pub fn compile_bounded(fields: &[FieldDescriptor], config: &FormConfig) -> Result<RuleSet, FormError> {
    compile_level(fields, &KeyPath::root(), &|path: &KeyPath| config.check_depth(path))
}

fn compile_level<E, F>(fields: &[FieldDescriptor], parent: &KeyPath, enter: &F) -> Result<RuleSet, E>
where
    F: Fn(&KeyPath) -> Result<(), E>,
{
    fields
        .iter()
        .map(|field| {
            let entry = if field.is_fieldset() {
                let path = parent.child(field.id.as_str());
                enter(&path)?;
                RuleEntry::Nested(compile_level(field.children(), &path, enter)?)
            } else {
                RuleEntry::Rules(field_rules(field))
            };
            Ok((rule_key(field), entry))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jform_core::{ChoiceOption, Schema};
    use serde_json::json;

    #[test]
    fn number_rules_follow_integer_only() {
        let price = FieldDescriptor::new("price", "number").required();
        assert_eq!(number_rules(&price), [Rule::Numeric]);
        let age = FieldDescriptor::new("age", "number").required().integer_only();
        assert_eq!(number_rules(&age), [Rule::Integer]);
    }

    #[test]
    fn dropdown_without_values_uses_labels() {
        let field = FieldDescriptor::new("foods", "dropdown").required().with_choices(vec![
            ChoiceOption::labelled("National ID"),
            ChoiceOption::labelled("Alien ID"),
        ]);
        let rules = choice_rules(&field);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].to_string(), "in:National ID,Alien ID");
    }

    #[test]
    fn dropdown_with_values_uses_values() {
        let field = FieldDescriptor::new("foods", "dropdown").with_choices(vec![
            ChoiceOption {
                label: "National ID".into(),
                value: Some("national_id".into()),
            },
            ChoiceOption {
                label: "Alien ID".into(),
                value: Some("alien_id".into()),
            },
        ]);
        assert_eq!(choice_rules(&field)[0].to_string(), "in:national_id,alien_id");
    }

    #[test]
    fn choices_absent_means_no_constraint() {
        let field = FieldDescriptor::new("gender", "radio");
        assert!(choice_rules(&field).is_empty());
        assert!(field_rules(&field).is_empty());
    }

    #[test]
    fn unknown_types_get_only_required() {
        let field = FieldDescriptor::new("photo", "file").required();
        assert_eq!(field_rules(&field), [Rule::Required]);
        let checkbox = FieldDescriptor::new("foods", "checkbox")
            .with_choices(vec![ChoiceOption::labelled("Ugali")]);
        assert!(field_rules(&checkbox).is_empty());
    }

    #[test]
    fn required_comes_first() {
        let field = FieldDescriptor::new("dob", "date").required();
        assert_eq!(field_rules(&field), [Rule::Required, Rule::Date]);
        let email = FieldDescriptor::new("email", "email");
        assert_eq!(field_rules(&email), [Rule::Email]);
    }

    #[test]
    fn dropdown_keys_get_brackets() {
        let schema = Schema::new(vec![
            FieldDescriptor::new("age", "number").required(),
            FieldDescriptor::new("colors", "dropdown").required().with_choices(vec![
                ChoiceOption::labelled("red"),
                ChoiceOption::labelled("blue"),
            ]),
        ]);
        let rules = compile(&schema);
        assert!(rules.contains_key("colors[]"));
        assert!(rules.contains_key("age"));
        assert!(!rules.contains_key("colors"));
    }

    #[test]
    fn fieldsets_nest_under_plain_id() {
        let schema = Schema::from_value(json!([
            { "id": "age", "type": "number", "required": true,
              "field_options": { "integer_only": true } },
            { "id": "offspring", "type": "fieldset", "required": true,
              "field_options": { "fields": [
                  { "id": "name", "type": "text", "required": "true", "field_options": [] },
                  { "id": "age", "type": "number", "required": "true",
                    "field_options": { "integer_only": true } },
                  { "id": "colors", "type": "dropdown" }
              ]}}
        ]))
        .unwrap();

        let rules = compile(&schema);
        assert_eq!(
            serde_json::to_value(&rules).unwrap(),
            json!({
                "age": ["required", "integer"],
                "offspring": {
                    "name": ["required"],
                    "age": ["required", "integer"],
                    "colors[]": []
                }
            })
        );
        assert!(rules.nested("offspring").is_some());
        assert!(rules.rules("offspring").is_none());
    }

    fn nested(depth: usize) -> Vec<FieldDescriptor> {
        (0..depth).fold(vec![FieldDescriptor::new("leaf", "text")], |inner, level| {
            vec![FieldDescriptor::fieldset(format!("level{level}"), inner)]
        })
    }

    #[test]
    fn bounded_compile_enforces_depth_limit() {
        let schema = nested(3);
        let err = compile_bounded(&schema, &FormConfig { max_depth: 2 }).unwrap_err();
        assert!(matches!(
            err,
            FormError::DepthExceeded { limit: 2, ref path } if path == "level2_level1_level0"
        ));

        let rules = compile_bounded(&schema, &FormConfig { max_depth: 3 }).unwrap();
        assert_eq!(rules, compile(&schema));
    }

    #[test]
    fn rule_sets_deserialize_from_json() {
        let rules: RuleSet = serde_json::from_value(json!({
            "name": ["required"],
            "offspring": { "gender": ["required", "in:Male,Female"] }
        }))
        .unwrap();
        assert_eq!(rules.rules("name"), Some(&[Rule::Required][..]));
        let nested = rules.nested("offspring").unwrap();
        assert_eq!(
            nested.rules("gender"),
            Some(&[Rule::Required, Rule::one_of(["Male", "Female"])][..])
        );
    }
}
