//! # Document Loading
//!
//! Schemas, inputs, rule sets, and configuration may be authored as JSON or
//! YAML. Everything is normalized to a `serde_json::Value` first so that the
//! rest of the crate deals with one value model.

use std::path::Path;

use serde_json::{Map, Number, Value};

use crate::error::FormError;

/// Source format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Picks the format from a file extension; anything other than
    /// `.yaml`/`.yml` is treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Parses `text` in the given format into a JSON value.
///
/// `what` names the document in error messages ("schema", "inputs", ...).
pub fn parse_document(text: &str, format: Format, what: &'static str) -> Result<Value, FormError> {
    match format {
        Format::Json => serde_json::from_str(text)
            .map_err(|e| FormError::load(what, format!("invalid JSON: {e}"))),
        Format::Yaml => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(text)
                .map_err(|e| FormError::load(what, format!("invalid YAML: {e}")))?;
            yaml_to_json(yaml, "$").map_err(|e| FormError::load(what, format!("invalid YAML: {e}")))
        }
    }
}

/// Lowers a YAML document into the JSON value model.
///
/// Form documents only ever key maps by field id or flat key, so map keys
/// must be strings; `1: x` is rejected rather than silently stringified.
/// Tags are dropped. `at` is the location used in error messages.
fn yaml_to_json(yaml: serde_yaml::Value, at: &str) -> Result<Value, String> {
    use serde_yaml::Value as Yaml;

    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::String(s) => Value::String(s),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(|| format!("{at}: number {n} has no JSON representation"))?
            }
        }
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| yaml_to_json(item, &format!("{at}[{i}]")))
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(map) => {
            let mut object = Map::with_capacity(map.len());
            for (key, value) in map {
                let key = match key {
                    Yaml::String(key) => key,
                    other => return Err(format!("{at}: map keys must be strings, found {other:?}")),
                };
                let value = yaml_to_json(value, &format!("{at}.{key}"))?;
                object.insert(key, value);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value, at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("form.yaml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("form.yml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("form.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("form")), Format::Json);
    }

    #[test]
    fn yaml_schema_converts_to_json() {
        let yaml = r#"
- id: age
  type: number
  required: "true"
  field_options:
    integer_only: true
- id: score
  type: number
  field_options:
    max: 2.5
"#;
        let value = parse_document(yaml, Format::Yaml, "schema").unwrap();
        assert_eq!(value[0]["id"], "age");
        assert_eq!(value[0]["required"], "true");
        assert_eq!(value[0]["field_options"]["integer_only"], true);
        assert_eq!(value[1]["field_options"]["max"], json!(2.5));
    }

    #[test]
    fn yaml_map_keys_must_be_strings() {
        let err = parse_document("- id: age\n  field_options:\n    1: x\n", Format::Yaml, "schema")
            .unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("schema load error: invalid YAML"), "{message}");
        assert!(message.contains("$[0].field_options"), "{message}");
    }

    #[test]
    fn yaml_non_finite_floats_are_rejected() {
        let err = parse_document("weight: .inf\n", Format::Yaml, "inputs").unwrap_err();
        assert!(err.to_string().contains("$.weight"));
    }

    #[test]
    fn invalid_json_names_the_document() {
        let err = parse_document("{", Format::Json, "inputs").unwrap_err();
        assert!(err.to_string().starts_with("inputs load error: invalid JSON"));
    }
}
