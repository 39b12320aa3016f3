//! # Validation Reports
//!
//! The error tree mirrors the schema: a leaf key maps to its messages, a
//! fieldset key maps to one sub-tree per submitted repetition. A repetition
//! without errors is an empty tree, which serializes as `{}` so that the
//! array stays index-aligned with the submitted groups:
//!
//! ```json
//! { "age": ["validation.integer"],
//!   "offspring": [ {}, { "gender": ["validation.in"] } ] }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Errors for one schema level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorTree(BTreeMap<String, ErrorEntry>);

/// Errors for one key.
///
/// On the wire both variants are arrays. `Repetitions` is tried first, so
/// `[]` reads back as a fieldset with no repetitions; a leaf is never
/// recorded with an empty message list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorEntry {
    /// One tree per fieldset repetition, in repetition order.
    Repetitions(Vec<ErrorTree>),
    /// Messages of a leaf field.
    Messages(Vec<String>),
}

impl ErrorTree {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&ErrorEntry> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ErrorEntry)> {
        self.0.iter()
    }

    /// Messages recorded for a leaf key.
    pub fn messages(&self, key: &str) -> Option<&[String]> {
        match self.0.get(key) {
            Some(ErrorEntry::Messages(messages)) => Some(messages),
            _ => None,
        }
    }

    /// Per-repetition trees recorded for a fieldset key.
    pub fn repetitions(&self, key: &str) -> Option<&[ErrorTree]> {
        match self.0.get(key) {
            Some(ErrorEntry::Repetitions(trees)) => Some(trees),
            _ => None,
        }
    }

    /// Appends leaf messages under `key`. An empty list records nothing.
    pub fn add_messages(&mut self, key: impl Into<String>, messages: Vec<String>) {
        if messages.is_empty() {
            return;
        }
        match self.0.entry(key.into()).or_insert_with(|| ErrorEntry::Messages(Vec::new())) {
            ErrorEntry::Messages(existing) => existing.extend(messages),
            other => *other = ErrorEntry::Messages(messages),
        }
    }

    /// Records the per-repetition trees of a fieldset under `key`, after any
    /// repetitions already recorded there. Other keys are left untouched.
    pub fn merge_repetitions(&mut self, key: impl Into<String>, trees: Vec<ErrorTree>) {
        match self.0.entry(key.into()).or_insert_with(|| ErrorEntry::Repetitions(Vec::new())) {
            ErrorEntry::Repetitions(existing) => existing.extend(trees),
            other => *other = ErrorEntry::Repetitions(trees),
        }
    }

    /// Total number of leaf messages in the tree, at any depth.
    pub fn message_count(&self) -> usize {
        self.0
            .values()
            .map(|entry| match entry {
                ErrorEntry::Messages(messages) => messages.len(),
                ErrorEntry::Repetitions(trees) => trees.iter().map(ErrorTree::message_count).sum(),
            })
            .sum()
    }
}

impl From<BTreeMap<String, Vec<String>>> for ErrorTree {
    fn from(messages: BTreeMap<String, Vec<String>>) -> Self {
        Self(
            messages
                .into_iter()
                .filter(|(_, list)| !list.is_empty())
                .map(|(key, list)| (key, ErrorEntry::Messages(list)))
                .collect(),
        )
    }
}

/// Outcome of validating one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True when no rule failed anywhere in the tree.
    pub passed: bool,
    /// Failure messages, shaped like the schema.
    pub errors: ErrorTree,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn leaf(messages: &[&str]) -> Vec<String> {
        messages.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn empty_repetition_serializes_as_object() {
        let mut gender = ErrorTree::new();
        gender.add_messages("gender", leaf(&["validation.in"]));

        let mut tree = ErrorTree::new();
        tree.add_messages("age", leaf(&["validation.integer"]));
        tree.merge_repetitions("offspring", vec![ErrorTree::new(), gender]);

        assert_eq!(
            serde_json::to_value(&tree).unwrap(),
            json!({
                "age": ["validation.integer"],
                "offspring": [{}, { "gender": ["validation.in"] }]
            })
        );
        assert_eq!(tree.message_count(), 2);
    }

    #[test]
    fn merge_keeps_unrelated_keys() {
        let mut tree = ErrorTree::new();
        tree.add_messages("name", leaf(&["validation.required"]));
        tree.merge_repetitions("offspring", vec![ErrorTree::new()]);
        tree.merge_repetitions("offspring", vec![ErrorTree::new()]);
        assert_eq!(tree.messages("name").map(<[String]>::len), Some(1));
        assert_eq!(tree.repetitions("offspring").map(<[ErrorTree]>::len), Some(2));
    }

    #[test]
    fn deserializes_nested_shape() {
        let tree: ErrorTree = serde_json::from_value(json!({
            "age": ["validation.integer"],
            "offspring": [{}, { "gender": ["validation.in"] }]
        }))
        .unwrap();
        let reps = tree.repetitions("offspring").unwrap();
        assert!(reps[0].is_empty());
        assert_eq!(reps[1].messages("gender"), Some(&["validation.in".to_string()][..]));
    }

    #[test]
    fn zero_repetitions_survive_json() {
        let mut errors = ErrorTree::new();
        errors.merge_repetitions("offspring", Vec::new());
        let result = ValidationResult { passed: true, errors };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, json!({ "passed": true, "errors": { "offspring": [] } }));

        let back: ValidationResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
        assert_eq!(back.errors.repetitions("offspring"), Some(&[][..]));
    }

    #[test]
    fn empty_message_lists_are_not_recorded() {
        let mut flat = BTreeMap::new();
        flat.insert("age".to_string(), Vec::new());
        assert!(ErrorTree::from(flat).is_empty());

        let mut tree = ErrorTree::new();
        tree.add_messages("name", Vec::new());
        assert!(tree.is_empty());
    }

    #[test]
    fn converts_flat_messages() {
        let mut flat = BTreeMap::new();
        flat.insert("age".to_string(), leaf(&["validation.integer"]));
        let tree = ErrorTree::from(flat);
        assert_eq!(tree.messages("age"), Some(&["validation.integer".to_string()][..]));
    }
}
