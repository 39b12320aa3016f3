//! # Error Types
//!
//! Errors that can cross the library boundary. All of them describe caller
//! or schema-author mistakes; problems with submitted user data are never
//! reported here, they end up in a validation result instead.
//!
//! ## Design
//!
//! - Schema load failures carry the source format and the parser's reason.
//! - Contract violations carry the flat key path of the offending field so
//!   the schema author can find it.

use thiserror::Error;

/// Top-level error type for jform.
#[derive(Error, Debug)]
pub enum FormError {
    /// A schema, input map, or rule set document could not be parsed.
    #[error("{what} load error: {reason}")]
    Load {
        /// What was being loaded ("schema", "inputs", "rules", "config").
        what: &'static str,
        /// Parser-provided reason.
        reason: String,
    },

    /// A fieldset has no child fields, so its repetition count cannot be
    /// inferred.
    #[error("fieldset '{path}' has no child fields")]
    EmptyFieldset {
        /// Flat key path of the fieldset.
        path: String,
    },

    /// A nested rule entry refers to a fieldset the schema does not define.
    #[error("rules reference fieldset '{key}' which is not present in the schema")]
    UnknownFieldset {
        /// The rule key that could not be resolved.
        key: String,
    },

    /// A fieldset was paired with a flat rule list instead of nested rules.
    #[error("fieldset '{key}' has flat rules; expected a nested rule set")]
    RuleShapeMismatch {
        /// The fieldset id.
        key: String,
    },

    /// Schema nesting exceeded the configured recursion limit.
    #[error("schema nesting exceeds the maximum depth of {limit} at '{path}'")]
    DepthExceeded {
        /// Configured limit.
        limit: usize,
        /// Flat key path where the limit was hit.
        path: String,
    },
}

impl FormError {
    /// Shorthand for a [`FormError::Load`].
    pub fn load(what: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::Load {
            what,
            reason: reason.to_string(),
        }
    }

    /// Returns true for errors caused by inconsistent schema/rules usage
    /// rather than unreadable documents.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::EmptyFieldset { .. }
                | Self::UnknownFieldset { .. }
                | Self::RuleShapeMismatch { .. }
                | Self::DepthExceeded { .. }
        )
    }
}
