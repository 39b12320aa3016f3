//! # Schema Transformer
//!
//! Rebuilds the nested value tree from flat inputs. Top-level fields read
//! `inputs[id]`; a field inside fieldset `F` reads element `i` of
//! `inputs["F_id"]` for repetition `i`. The number of repetitions is the
//! length of the fieldset's first child array.
//!
//! Inputs whose flat key is not [`Presence::Filled`](jform_core::Presence)
//! are left out of the tree. So are blank values (`null` or a string of
//! whitespace), which covers missing or blank elements of one repetition:
//! an optional field left empty in one group is omitted from that group
//! rather than converted. A fieldset whose first child array is absent or
//! empty is left out too.
//!
//! Deeper fieldsets join every ancestor id into the flat key
//! (`household_members_age`) but index only by the innermost repetition;
//! see [`KeyPath`] for the encoding's limits.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use jform_core::{
    Diagnostic, DiagnosticKind, DiagnosticSink, FieldDescriptor, FlatInputs, FormConfig, FormError,
    KeyPath, TracingSink,
};

use crate::convert::convert_to_native;

/// Nested, natively typed values keyed by field id.
pub type ValueTree = Map<String, Value>;

/// Output of [`SchemaTransformer::transform`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transformed {
    pub values: ValueTree,
    /// Non-fatal schema findings, e.g. skipped empty fieldsets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

/// Transforms flat submissions into nested value trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaTransformer {
    config: FormConfig,
}

impl SchemaTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FormConfig) -> Self {
        Self { config }
    }

    /// Transforms `inputs`, collecting diagnostics in the result and
    /// logging each one at WARN.
    pub fn transform(
        &self,
        schema: &[FieldDescriptor],
        inputs: &FlatInputs,
    ) -> Result<Transformed, FormError> {
        let mut diagnostics = Vec::new();
        let values = self.transform_with(schema, inputs, &mut diagnostics)?;
        for diagnostic in &diagnostics {
            TracingSink.report(diagnostic.clone());
        }
        Ok(Transformed { values, diagnostics })
    }

    /// Transforms `inputs`, reporting diagnostics to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::DepthExceeded`] when fieldsets nest deeper than
    /// the configured limit.
    pub fn transform_with(
        &self,
        schema: &[FieldDescriptor],
        inputs: &FlatInputs,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<ValueTree, FormError> {
        self.transform_level(schema, inputs, 0, &KeyPath::root(), sink)
    }

    fn transform_level(
        &self,
        schema: &[FieldDescriptor],
        inputs: &FlatInputs,
        repetition: usize,
        parent: &KeyPath,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<ValueTree, FormError> {
        let mut values = ValueTree::new();
        for field in schema {
            let path = parent.child(field.id.as_str());
            if field.is_fieldset() {
                if let Some(groups) = self.transform_fieldset(field, inputs, &path, sink)? {
                    values.insert(field.id.clone(), Value::Array(groups));
                }
                continue;
            }

            let key = path.encode();
            if !inputs.presence(&key).is_filled() {
                continue;
            }
            let raw = if parent.is_root() {
                inputs.get(&key)
            } else {
                inputs.element(&key, repetition)
            };
            match raw {
                Some(raw) if !is_blank(raw) => {
                    values.insert(field.id.clone(), convert_to_native(field, raw));
                }
                _ => {}
            }
        }
        Ok(values)
    }

    /// One value tree per repetition, or `None` when the fieldset
    /// contributes nothing.
    fn transform_fieldset(
        &self,
        fieldset: &FieldDescriptor,
        inputs: &FlatInputs,
        path: &KeyPath,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Option<Vec<Value>>, FormError> {
        self.config.check_depth(path)?;

        let Some(first) = fieldset.first_child() else {
            sink.report(Diagnostic::new(DiagnosticKind::EmptyFieldset, path.clone()));
            return Ok(None);
        };
        let probe = path.child(first.id.as_str()).encode();
        let count = match inputs.repetitions(&probe) {
            Some(count) if count > 0 => count,
            _ => return Ok(None),
        };

        tracing::debug!(fieldset = %path, repetitions = count, "transforming fieldset");

        (0..count)
            .map(|index| {
                self.transform_level(fieldset.children(), inputs, index, path, sink)
                    .map(Value::Object)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Transforms with the default configuration.
pub fn transform(schema: &[FieldDescriptor], inputs: &FlatInputs) -> Result<Transformed, FormError> {
    SchemaTransformer::new().transform(schema, inputs)
}
