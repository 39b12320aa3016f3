//! # Diagnostics
//!
//! Non-fatal findings about a schema, such as a fieldset with no children.
//! They are handed to a [`DiagnosticSink`] chosen by the caller rather than
//! written to a global logger, so that library users decide whether they are
//! collected, logged, or dropped.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::path::KeyPath;

/// What a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A fieldset without child fields; it is skipped.
    EmptyFieldset,
    /// Two siblings share an id; the later one shadows the earlier.
    DuplicateId,
    /// A field id inside a fieldset contains the flat-key separator.
    AmbiguousKey,
}

/// A single schema finding, located by key path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub path: KeyPath,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, path: KeyPath) -> Self {
        Self { kind, path }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::EmptyFieldset => {
                write!(f, "fieldset without child fields: '{}'", self.path)
            }
            DiagnosticKind::DuplicateId => write!(f, "duplicate field id: '{}'", self.path),
            DiagnosticKind::AmbiguousKey => write!(
                f,
                "field id contains '_' inside a fieldset, flat key '{}' is ambiguous",
                self.path
            ),
        }
    }
}

/// Receiver of diagnostics.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Logs every diagnostic as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(
            kind = ?diagnostic.kind,
            path = %diagnostic.path,
            "{diagnostic}"
        );
    }
}

/// Drops every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_collects_in_order() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        sink.report(Diagnostic::new(DiagnosticKind::EmptyFieldset, KeyPath::new(["a"])));
        sink.report(Diagnostic::new(DiagnosticKind::DuplicateId, KeyPath::new(["b"])));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0].kind, DiagnosticKind::EmptyFieldset);
    }

    #[test]
    fn display_names_the_path() {
        let d = Diagnostic::new(DiagnosticKind::EmptyFieldset, KeyPath::new(["household", "pets"]));
        assert_eq!(d.to_string(), "fieldset without child fields: 'household_pets'");
    }

    #[test]
    fn serializes_kind_in_snake_case() {
        let d = Diagnostic::new(DiagnosticKind::AmbiguousKey, KeyPath::new(["a", "b_c"]));
        let value = serde_json::to_value(&d).unwrap();
        assert_eq!(value["kind"], "ambiguous_key");
        assert_eq!(value["path"], serde_json::json!(["a", "b_c"]));
    }
}
