//! # Rule Descriptors
//!
//! A rule descriptor is the token a rule engine understands: `required`,
//! `numeric`, `integer`, `email`, `date`, or `in:<comma-separated values>`.
//! [`Rule`] is the typed form; it converts to and from the token losslessly
//! except for `in` values that themselves contain a comma, which the token
//! syntax cannot express.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Rule {
    /// A value must be supplied.
    Required,
    /// The value must be a number.
    Numeric,
    /// The value must be an integer.
    Integer,
    /// The value must be an email address.
    Email,
    /// The value must be a date.
    Date,
    /// The value must be one of the listed values.
    In(Vec<String>),
    /// Any token this crate does not model. Engines may ignore it.
    Custom(String),
}

impl Rule {
    /// Builds an `in` rule from the allowed values.
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::In(values.into_iter().map(Into::into).collect())
    }

    /// The rule name without parameters (`in` for `in:a,b`).
    pub fn name(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::Numeric => "numeric",
            Self::Integer => "integer",
            Self::Email => "email",
            Self::Date => "date",
            Self::In(_) => "in",
            Self::Custom(token) => token.split_once(':').map_or(token.as_str(), |(name, _)| name),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In(values) => write!(f, "in:{}", values.join(",")),
            Self::Custom(token) => f.write_str(token),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for Rule {
    type Err = Infallible;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let rule = match token {
            "required" => Self::Required,
            "numeric" => Self::Numeric,
            "integer" => Self::Integer,
            "email" => Self::Email,
            "date" => Self::Date,
            _ => match token.strip_prefix("in:") {
                Some(list) => Self::In(list.split(',').map(str::to_string).collect()),
                None => Self::Custom(token.to_string()),
            },
        };
        Ok(rule)
    }
}

impl From<String> for Rule {
    fn from(token: String) -> Self {
        match token.parse() {
            Ok(rule) => rule,
            Err(never) => match never {},
        }
    }
}

impl From<Rule> for String {
    fn from(rule: Rule) -> Self {
        rule.to_string()
    }
}
