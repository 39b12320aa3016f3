//! # Schema
//!
//! An ordered list of [`FieldDescriptor`]s. A fieldset's children are
//! themselves a schema, so most of the pipeline works on plain
//! `&[FieldDescriptor]` slices; [`Schema`] is the owned, loadable top level.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::document::{parse_document, Format};
use crate::error::FormError;
use crate::field::FieldDescriptor;
use crate::inputs::kind_name;
use crate::path::{KeyPath, SEPARATOR};

/// A top-level form schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema(Vec<FieldDescriptor>);

impl Schema {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self(fields)
    }

    /// Builds a schema from a JSON array of descriptors.
    pub fn from_value(value: Value) -> Result<Self, FormError> {
        if !value.is_array() {
            return Err(FormError::load(
                "schema",
                format!("expected an array of fields, got {}", kind_name(&value)),
            ));
        }
        serde_json::from_value(value).map_err(|e| FormError::load("schema", e))
    }

    /// Parses a schema document.
    pub fn from_document(text: &str, format: Format) -> Result<Self, FormError> {
        Self::from_value(parse_document(text, format, "schema")?)
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.0
    }

    /// Runs [`lint`] over the whole schema and collects the findings.
    pub fn lint(&self) -> Vec<Diagnostic> {
        let mut found = Vec::new();
        lint(&self.0, &mut found);
        found
    }
}

impl Deref for Schema {
    type Target = [FieldDescriptor];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<FieldDescriptor>> for Schema {
    fn from(fields: Vec<FieldDescriptor>) -> Self {
        Self(fields)
    }
}

/// Fieldsets of a schema level, in schema order.
pub fn fieldsets(fields: &[FieldDescriptor]) -> impl Iterator<Item = &FieldDescriptor> {
    fields.iter().filter(|f| f.is_fieldset())
}

/// Non-fieldset fields of a schema level, in schema order.
pub fn scalars(fields: &[FieldDescriptor]) -> impl Iterator<Item = &FieldDescriptor> {
    fields.iter().filter(|f| !f.is_fieldset())
}

/// Finds the fieldset with the given id on one schema level.
pub fn find_fieldset<'a>(fields: &'a [FieldDescriptor], id: &str) -> Option<&'a FieldDescriptor> {
    fieldsets(fields).find(|f| f.id == id)
}

/// Reports authoring problems in `fields` and every nested fieldset.
///
/// Checks for empty fieldsets, duplicate sibling ids, and leaf fields whose
/// flat key is ambiguous: an id inside a fieldset that contains the
/// separator, or a flat key that another leaf at a different path already
/// encodes to (`offspring_name` next to fieldset `offspring` > `name`).
pub fn lint(fields: &[FieldDescriptor], sink: &mut dyn DiagnosticSink) {
    let mut flat_keys = HashMap::new();
    lint_level(fields, &KeyPath::root(), &mut flat_keys, sink);
}

fn lint_level(
    fields: &[FieldDescriptor],
    parent: &KeyPath,
    flat_keys: &mut HashMap<String, KeyPath>,
    sink: &mut dyn DiagnosticSink,
) {
    let mut seen = HashSet::new();
    for field in fields {
        let path = parent.child(field.id.as_str());
        if !seen.insert(field.id.as_str()) {
            sink.report(Diagnostic::new(DiagnosticKind::DuplicateId, path.clone()));
        }
        if field.is_fieldset() {
            if field.children().is_empty() {
                sink.report(Diagnostic::new(DiagnosticKind::EmptyFieldset, path));
            } else {
                lint_level(field.children(), &path, flat_keys, sink);
            }
            continue;
        }

        let separator_in_id = !parent.is_root() && field.id.contains(SEPARATOR);
        let collides = match flat_keys.entry(path.encode()) {
            Entry::Occupied(existing) => existing.get() != &path,
            Entry::Vacant(slot) => {
                slot.insert(path.clone());
                false
            }
        };
        if separator_in_id || collides {
            sink.report(Diagnostic::new(DiagnosticKind::AmbiguousKey, path));
        }
    }
}
