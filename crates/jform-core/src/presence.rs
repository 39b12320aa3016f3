//! # Input Presence
//!
//! Form submissions do not distinguish "not sent" from "sent blank" very
//! well: an untouched text box posts `""`, an unticked group posts nothing,
//! a zero select posts `"0"`. [`Presence`] sorts every submitted value into
//! one of three states and is the only place that decides which of them
//! count as "nothing was entered".
//!
//! | value                                          | presence |
//! |------------------------------------------------|----------|
//! | missing key, `null`                            | Absent   |
//! | `""`, `"0"`, `[]`, `{}`, `false`, `0`, `0.0`   | Empty    |
//! | anything else (`" "`, `"0.0"`, `"false"`, ...) | Filled   |

use serde_json::Value;

/// Three-way classification of a submitted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presence {
    /// No value was submitted.
    Absent,
    /// A value was submitted but carries nothing.
    Empty,
    /// A value worth processing.
    Filled,
}

impl Presence {
    /// Classifies an optional input value.
    pub fn of(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Absent,
            Some(Value::Bool(b)) => {
                if *b {
                    Self::Filled
                } else {
                    Self::Empty
                }
            }
            Some(Value::Number(n)) => {
                if n.as_f64().is_some_and(|f| f == 0.0) {
                    Self::Empty
                } else {
                    Self::Filled
                }
            }
            Some(Value::String(s)) => {
                if s.is_empty() || s == "0" {
                    Self::Empty
                } else {
                    Self::Filled
                }
            }
            Some(Value::Array(items)) => {
                if items.is_empty() {
                    Self::Empty
                } else {
                    Self::Filled
                }
            }
            Some(Value::Object(map)) => {
                if map.is_empty() {
                    Self::Empty
                } else {
                    Self::Filled
                }
            }
        }
    }

    pub fn is_filled(self) -> bool {
        self == Self::Filled
    }

    pub fn is_absent(self) -> bool {
        self == Self::Absent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn presence_table() {
        let cases = [
            (None, Presence::Absent),
            (Some(json!(null)), Presence::Absent),
            (Some(json!("")), Presence::Empty),
            (Some(json!("0")), Presence::Empty),
            (Some(json!([])), Presence::Empty),
            (Some(json!({})), Presence::Empty),
            (Some(json!(false)), Presence::Empty),
            (Some(json!(0)), Presence::Empty),
            (Some(json!(0.0)), Presence::Empty),
            (Some(json!(" ")), Presence::Filled),
            (Some(json!("0.0")), Presence::Filled),
            (Some(json!("false")), Presence::Filled),
            (Some(json!("John")), Presence::Filled),
            (Some(json!(true)), Presence::Filled),
            (Some(json!(-1)), Presence::Filled),
            (Some(json!([""])), Presence::Filled),
            (Some(json!({ "a": 1 })), Presence::Filled),
        ];
        for (value, expected) in cases {
            assert_eq!(Presence::of(value.as_ref()), expected, "value {value:?}");
        }
    }

    #[test]
    fn helpers() {
        assert!(Presence::Filled.is_filled());
        assert!(!Presence::Empty.is_filled());
        assert!(Presence::Absent.is_absent());
        assert!(!Presence::Empty.is_absent());
    }
}
