//! # Configuration
//!
//! Limits shared by the validator and the transformer. Every field has a
//! default, so an empty document is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::document::{parse_document, Format};
use crate::error::FormError;
use crate::path::KeyPath;

/// Default maximum fieldset nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Maximum number of nested fieldsets a schema may descend through.
    pub max_depth: usize,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl FormConfig {
    /// Parses a configuration document.
    pub fn from_document(text: &str, format: Format) -> Result<Self, FormError> {
        let value = parse_document(text, format, "config")?;
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value).map_err(|e| FormError::load("config", e))
    }

    /// Fails once `fieldset_path` nests deeper than `max_depth` fieldsets.
    pub fn check_depth(&self, fieldset_path: &KeyPath) -> Result<(), FormError> {
        if fieldset_path.depth() > self.max_depth {
            return Err(FormError::DepthExceeded {
                limit: self.max_depth,
                path: fieldset_path.encode(),
            });
        }
        Ok(())
    }
}
