//! # jform-core — Foundational Types
//!
//! Shared vocabulary for the jform pipeline: the schema model, the flat input
//! map and its key paths, the presence model for submitted values, schema
//! diagnostics, configuration, and the error type. Every other crate in the
//! workspace depends on `jform-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Loose wire, strict model.** Form builders emit `"true"` for `true`
//!    and `[]` for an empty options map. Those quirks are absorbed while
//!    deserializing ([`Flag`], [`FieldOptions`]) and never leak further.
//!
//! 2. **One flat-key encoding.** [`KeyPath`] is the only code that joins or
//!    splits flat keys. The underscore ambiguity is a documented limitation
//!    ([`KeyPath::is_ambiguous`]), not something to rediscover downstream.
//!
//! 3. **One presence table.** [`Presence`] decides what counts as "nothing
//!    entered"; no other code inspects values for truthiness.
//!
//! 4. **Diagnostics go to a sink.** Non-fatal schema problems are reported to
//!    a caller-supplied [`DiagnosticSink`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `jform-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod diagnostic;
pub mod document;
pub mod error;
pub mod field;
pub mod inputs;
pub mod path;
pub mod presence;
pub mod schema;

pub use config::FormConfig;
pub use diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSink, NullSink, TracingSink};
pub use document::{parse_document, Format};
pub use error::FormError;
pub use field::{ChoiceOption, FieldDescriptor, FieldOptions, FieldType, Flag};
pub use inputs::FlatInputs;
pub use path::KeyPath;
pub use presence::Presence;
pub use schema::Schema;
