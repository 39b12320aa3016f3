//! # Field Descriptors
//!
//! One node of a form schema. Scalar fields carry a type and type-specific
//! options; fieldsets carry a child schema that repeats once per submitted
//! group.
//!
//! ## Wire Format
//!
//! Descriptors are read from the JSON produced by form builders:
//!
//! ```json
//! { "id": "age", "type": "number", "required": "true",
//!   "field_options": { "integer_only": true } }
//! ```
//!
//! Builders are loose about booleans (`true`, `"true"`, `1`) and sometimes
//! emit `"field_options": []` for "no options". Both are normalized here so
//! the rest of the pipeline only ever sees a [`Flag`] and a [`FieldOptions`].

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The declared type of a field.
///
/// Unknown type names are kept verbatim in [`FieldType::Other`] so that
/// schemas using newer widgets still load and round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Text,
    Number,
    Date,
    Dropdown,
    Radio,
    Checkbox,
    Email,
    Fieldset,
    Other(String),
}

impl FieldType {
    /// The wire name of this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Dropdown => "dropdown",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Email => "email",
            Self::Fieldset => "fieldset",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "text" => Self::Text,
            "number" => Self::Number,
            "date" => Self::Date,
            "dropdown" => Self::Dropdown,
            "radio" => Self::Radio,
            "checkbox" => Self::Checkbox,
            "email" => Self::Email,
            "fieldset" => Self::Fieldset,
            _ => Self::Other(name),
        }
    }
}

impl From<&str> for FieldType {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<FieldType> for String {
    fn from(kind: FieldType) -> Self {
        match kind {
            FieldType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A boolean schema attribute that may be encoded loosely.
///
/// `true`, `"true"` (any case), `"1"` and non-zero numbers are set; anything
/// else, including `"false"`, `"0"`, `""` and `null`, is unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value", into = "bool")]
pub struct Flag(bool);

impl Flag {
    pub const SET: Flag = Flag(true);
    pub const UNSET: Flag = Flag(false);

    pub fn is_set(self) -> bool {
        self.0
    }

    pub fn is_unset(&self) -> bool {
        !self.0
    }
}

impl From<bool> for Flag {
    fn from(b: bool) -> Self {
        Self(b)
    }
}

impl From<Flag> for bool {
    fn from(flag: Flag) -> Self {
        flag.0
    }
}

impl From<Value> for Flag {
    fn from(value: Value) -> Self {
        let set = match value {
            Value::Bool(b) => b,
            Value::String(s) => {
                let s = s.trim();
                s.eq_ignore_ascii_case("true") || s == "1"
            }
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::Null | Value::Array(_) | Value::Object(_) => false,
        };
        Self(set)
    }
}

/// One choice of a dropdown, radio, or checkbox field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Text shown to the user.
    pub label: String,
    /// Submitted value; defaults to the label when absent.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "scalar_as_string"
    )]
    pub value: Option<String>,
}

impl ChoiceOption {
    /// An option whose submitted value is its label.
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: None,
        }
    }

    /// The value a client submits for this option.
    pub fn effective_value(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.label)
    }
}

/// Type-specific configuration of a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldOptions {
    /// `number` only: restrict to integers.
    #[serde(default, alias = "integerOnly", skip_serializing_if = "Flag::is_unset")]
    pub integer_only: Flag,

    /// `dropdown`/`radio`/`checkbox`: the allowed choices, in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ChoiceOption>>,

    /// `fieldset` only: the child schema repeated per group.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDescriptor>,

    /// Options this crate does not interpret, kept for round-tripping.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One schema node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Identifier, unique among siblings.
    pub id: String,

    /// Declared field type.
    #[serde(rename = "type")]
    pub kind: FieldType,

    /// Whether a value must be submitted.
    #[serde(default)]
    pub required: Flag,

    /// Type-specific configuration.
    #[serde(
        default,
        rename = "field_options",
        alias = "fieldOptions",
        deserialize_with = "lenient_options"
    )]
    pub options: FieldOptions,
}

impl FieldDescriptor {
    /// A non-required field with no options.
    pub fn new(id: impl Into<String>, kind: impl Into<FieldType>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            required: Flag::UNSET,
            options: FieldOptions::default(),
        }
    }

    /// A fieldset over the given child schema.
    pub fn fieldset(id: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        let mut field = Self::new(id, FieldType::Fieldset);
        field.options.fields = fields;
        field
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = Flag::SET;
        self
    }

    /// Restricts a number field to integers.
    pub fn integer_only(mut self) -> Self {
        self.options.integer_only = Flag::SET;
        self
    }

    /// Sets the choices of a dropdown, radio, or checkbox field.
    pub fn with_choices(mut self, choices: Vec<ChoiceOption>) -> Self {
        self.options.options = Some(choices);
        self
    }

    pub fn is_fieldset(&self) -> bool {
        self.kind == FieldType::Fieldset
    }

    pub fn is_required(&self) -> bool {
        self.required.is_set()
    }

    pub fn is_integer_only(&self) -> bool {
        self.options.integer_only.is_set()
    }

    /// Child schema of a fieldset; empty for every other type.
    pub fn children(&self) -> &[FieldDescriptor] {
        &self.options.fields
    }

    /// The child whose input array length decides the repetition count.
    pub fn first_child(&self) -> Option<&FieldDescriptor> {
        self.options.fields.first()
    }

    /// Effective values of the declared choices, in order, or `None` when
    /// the field declares no choices.
    pub fn choice_values(&self) -> Option<Vec<&str>> {
        self.options
            .options
            .as_ref()
            .map(|choices| choices.iter().map(ChoiceOption::effective_value).collect())
    }
}

/// Accepts an options object, `null`, or the `[]` that some builders emit
/// for an empty options map.
fn lenient_options<'de, D>(deserializer: D) -> Result<FieldOptions, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    match raw {
        Value::Null => Ok(FieldOptions::default()),
        Value::Array(items) if items.is_empty() => Ok(FieldOptions::default()),
        other => serde_json::from_value(other).map_err(serde::de::Error::custom),
    }
}

/// Option values are strings on the wire, but numeric ones show up too.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "option value must be a scalar, got {other}"
        ))),
    }
}
