//! # Flat Key Paths
//!
//! Submitted form data is flat: a child `age` of fieldset `offspring` arrives
//! under the key `offspring_age`. [`KeyPath`] keeps the id segments as a
//! sequence and owns the one place where they are joined into, or split out
//! of, that flat key.
//!
//! ## Known Limitation
//!
//! The separator is a plain underscore, so a segment that itself contains an
//! underscore (`mobile_number` inside `contacts`) cannot be told apart from
//! a deeper path on decode: `contacts_mobile_number` decodes to three
//! segments. Encoding is unaffected. [`KeyPath::is_ambiguous`] flags paths
//! whose encoding does not decode back to the same segments.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between segments of a flat key.
pub const SEPARATOR: char = '_';

/// An ordered sequence of field ids from the schema root to a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// The empty path (schema root).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Builds a path from segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Returns a new path with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Last segment, i.e. the field's own id.
    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Joins the segments into the flat key used in submitted inputs.
    pub fn encode(&self) -> String {
        let mut key = String::new();
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                key.push(SEPARATOR);
            }
            key.push_str(segment);
        }
        key
    }

    /// Splits a flat key on every separator.
    ///
    /// This is the naive inverse of [`encode`](Self::encode); it is exact only
    /// when no segment of the original path contained an underscore.
    pub fn decode(flat: &str) -> Self {
        if flat.is_empty() {
            return Self::root();
        }
        Self(flat.split(SEPARATOR).map(str::to_string).collect())
    }

    /// True when [`decode`](Self::decode) of the encoded key would not give
    /// back this path.
    pub fn is_ambiguous(&self) -> bool {
        self.0
            .iter()
            .any(|segment| segment.is_empty() || segment.contains(SEPARATOR))
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_joins_with_underscore() {
        assert_eq!(KeyPath::new(["name"]).encode(), "name");
        assert_eq!(KeyPath::new(["offspring", "age"]).encode(), "offspring_age");
        assert_eq!(KeyPath::root().encode(), "");
    }

    #[test]
    fn child_does_not_mutate_parent() {
        let parent = KeyPath::new(["offspring"]);
        let child = parent.child("age");
        assert_eq!(parent.depth(), 1);
        assert_eq!(child.depth(), 2);
        assert_eq!(child.leaf(), Some("age"));
    }

    #[test]
    fn decode_inverts_encode_without_underscores_in_ids() {
        let path = KeyPath::new(["household", "members", "age"]);
        assert!(!path.is_ambiguous());
        assert_eq!(KeyPath::decode(&path.encode()), path);
    }

    #[test]
    fn underscore_in_id_is_ambiguous() {
        let path = KeyPath::new(["contacts", "mobile_number"]);
        assert!(path.is_ambiguous());
        assert_eq!(path.encode(), "contacts_mobile_number");
        let decoded = KeyPath::decode(&path.encode());
        assert_eq!(decoded.segments(), ["contacts", "mobile", "number"]);
        assert_ne!(decoded, path);
    }

    #[test]
    fn decode_empty_is_root() {
        assert!(KeyPath::decode("").is_root());
    }
}
