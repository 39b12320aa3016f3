//! Property tests for transformation: determinism, idempotent conversion,
//! key omission, and repetition counts.

use jform_core::{FieldDescriptor, FlatInputs, Presence};
use jform_transform::{convert_to_native, transform};
use proptest::prelude::*;
use serde_json::{json, Value};

fn scalar_input() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(json!("")),
        Just(json!("0")),
        any::<i32>().prop_map(|n| json!(n.to_string())),
        any::<i32>().prop_map(|n| json!(n)),
        (-1.0e6f64..1.0e6).prop_map(|f| json!(f.to_string())),
        (-1.0e6f64..1.0e6).prop_map(|f| json!(f)),
        "[a-zA-Z ]{0,12}".prop_map(Value::String),
    ]
}

fn field() -> impl Strategy<Value = FieldDescriptor> {
    prop_oneof![
        Just(FieldDescriptor::new("f", "number").integer_only()),
        Just(FieldDescriptor::new("f", "number")),
        Just(FieldDescriptor::new("f", "text")),
        Just(FieldDescriptor::new("f", "date")),
    ]
}

proptest! {
    /// Same field and value always convert to the same output.
    #[test]
    fn conversion_is_deterministic(field in field(), raw in scalar_input()) {
        prop_assert_eq!(convert_to_native(&field, &raw), convert_to_native(&field, &raw));
    }

    /// Converting an already-converted value changes nothing.
    #[test]
    fn conversion_is_idempotent(field in field(), raw in scalar_input()) {
        let once = convert_to_native(&field, &raw);
        let twice = convert_to_native(&field, &once);
        prop_assert_eq!(once, twice);
    }

    /// Without fieldsets, output keys are exactly the schema ids whose
    /// input is filled and not whitespace.
    #[test]
    fn flat_output_keys_are_filled_schema_ids(
        values in prop::collection::vec(scalar_input(), 4),
    ) {
        let ids = ["a", "b", "c", "d"];
        let schema: Vec<_> = ids.iter().map(|id| FieldDescriptor::new(*id, "text")).collect();
        let inputs: FlatInputs = ids
            .iter()
            .zip(&values)
            .map(|(id, v)| (id.to_string(), v.clone()))
            .chain(std::iter::once(("zzz".to_string(), json!("extra"))))
            .collect();

        let out = transform(&schema, &inputs).unwrap();
        for (id, value) in ids.iter().zip(&values) {
            let blank = value.as_str().is_some_and(|s| s.trim().is_empty());
            let filled = Presence::of(Some(value)).is_filled() && !blank;
            prop_assert_eq!(out.values.contains_key(*id), filled);
        }
        prop_assert!(!out.values.contains_key("zzz"));
    }

    /// N aligned entries produce exactly N repetition objects, in order.
    #[test]
    fn fieldset_repetition_count_matches_probe(names in prop::collection::vec("[a-z]{1,8}", 1..10)) {
        let schema = vec![FieldDescriptor::fieldset(
            "kids",
            vec![FieldDescriptor::new("name", "text")],
        )];
        let inputs = FlatInputs::new().with("kids_name", json!(names));
        let out = transform(&schema, &inputs).unwrap();
        let kids = out.values["kids"].as_array().unwrap();
        prop_assert_eq!(kids.len(), names.len());
        for (kid, name) in kids.iter().zip(&names) {
            prop_assert_eq!(&kid["name"], &json!(name));
        }
    }
}
