//! # Rule Engines
//!
//! The validator decides *which* rules apply to *which* inputs; checking a
//! value against a rule is delegated to a [`RuleEngine`]. Any closure with
//! the right signature is an engine, which keeps test doubles trivial.
//!
//! [`BasicRuleEngine`] is the bundled implementation. It follows the usual
//! form-framework conventions:
//!
//! - a key `id[]` checks input `id`, element by element when it is an array;
//! - `required` fails on absent, null, blank strings, and empty arrays;
//! - every other rule is skipped when no value was supplied;
//! - messages are untranslated keys such as `validation.integer`.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use jform_core::FlatInputs;

use crate::compile::ARRAY_KEY_SUFFIX;
use crate::rule::Rule;

/// Flat rules handed to an engine: key to rule list.
pub type FlatRules = BTreeMap<String, Vec<Rule>>;

/// Result of one engine run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    /// True when every rule of every key passed.
    pub passes: bool,
    /// Failure messages by rule key; keys without failures are omitted.
    pub messages: BTreeMap<String, Vec<String>>,
}

impl RuleOutcome {
    pub fn passed() -> Self {
        Self {
            passes: true,
            messages: BTreeMap::new(),
        }
    }
}

/// Checks flat inputs against flat rules.
pub trait RuleEngine {
    fn check(&self, values: &FlatInputs, rules: &FlatRules) -> RuleOutcome;
}

impl<F> RuleEngine for F
where
    F: Fn(&FlatInputs, &FlatRules) -> RuleOutcome,
{
    fn check(&self, values: &FlatInputs, rules: &FlatRules) -> RuleOutcome {
        self(values, rules)
    }
}

/// Prefix of every message produced by [`BasicRuleEngine`].
pub const MESSAGE_PREFIX: &str = "validation.";

/// Date layouts accepted by the `date` rule, besides RFC 3339.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// The bundled rule engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicRuleEngine;

impl BasicRuleEngine {
    pub fn new() -> Self {
        Self
    }

    /// Rules failed by a single key's value, in rule order.
    pub fn failures<'r>(&self, value: Option<&Value>, rules: &'r [Rule]) -> Vec<&'r Rule> {
        let supplied = is_supplied(value);
        rules
            .iter()
            .filter(|rule| match rule {
                Rule::Required => !supplied,
                _ if !supplied => false,
                other => !value.is_some_and(|v| each_value(v, |item| check_value(other, item))),
            })
            .collect()
    }
}

impl RuleEngine for BasicRuleEngine {
    fn check(&self, values: &FlatInputs, rules: &FlatRules) -> RuleOutcome {
        let mut outcome = RuleOutcome::passed();
        for (key, key_rules) in rules {
            let input_key = key.strip_suffix(ARRAY_KEY_SUFFIX).unwrap_or(key);
            let failed = self.failures(values.get(input_key), key_rules);
            if failed.is_empty() {
                continue;
            }
            outcome.passes = false;
            outcome.messages.insert(
                key.clone(),
                failed
                    .into_iter()
                    .map(|rule| format!("{MESSAGE_PREFIX}{}", rule.name()))
                    .collect(),
            );
        }
        outcome
    }
}

/// Whether a value counts as supplied for `required`.
///
/// Unlike the transformer's presence table, `"0"` and `false` are supplied.
pub fn is_supplied(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

fn each_value(value: &Value, check: impl Fn(&Value) -> bool) -> bool {
    match value {
        Value::Array(items) => items.iter().all(check),
        scalar => check(scalar),
    }
}

fn check_value(rule: &Rule, value: &Value) -> bool {
    match rule {
        Rule::Required => is_supplied(Some(value)),
        Rule::Numeric => is_numeric(value),
        Rule::Integer => is_integer(value),
        Rule::Email => value.as_str().is_some_and(is_email),
        Rule::Date => value.as_str().is_some_and(is_date),
        Rule::In(allowed) => scalar_text(value).is_some_and(|text| allowed.iter().any(|a| *a == text)),
        Rule::Custom(_) => true,
    }
}

fn is_numeric(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => s.trim().parse::<f64>().is_ok_and(f64::is_finite),
        _ => false,
    }
}

/// Optional sign and decimal digits, no leading zeros, fits in an `i64`.
fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64(),
        Value::String(s) => {
            let s = s.trim();
            let digits = s.strip_prefix(&['+', '-'][..]).unwrap_or(s);
            !digits.is_empty()
                && digits.bytes().all(|b| b.is_ascii_digit())
                && (digits == "0" || !digits.starts_with('0'))
                && s.parse::<i64>().is_ok()
        }
        _ => false,
    }
}

fn email_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").ok())
        .as_ref()
}

fn is_email(text: &str) -> bool {
    email_pattern().is_some_and(|pattern| pattern.is_match(text))
}

fn is_date(text: &str) -> bool {
    let text = text.trim();
    DateTime::parse_from_rfc3339(text).is_ok()
        || DATE_FORMATS
            .iter()
            .any(|format| NaiveDate::parse_from_str(text, format).is_ok())
        || DATETIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(text, format).is_ok())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some(String::new()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
