//! Property tests for the scalar decoders and the idempotence guarantee.

extern crate proptest;

use proptest::prelude::*;
use treebind::{Bind, Field, FieldTable, Value, decode_value};

#[derive(Default, Debug, PartialEq, Clone)]
struct Sample {
    flag: bool,
    count: i64,
    label: String,
}

impl FieldTable for Sample {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::new("flag", self.flag.slot()),
            Field::new("count", self.count.slot()),
            Field::new("label", self.label.slot()),
        ]
    }
}
treebind::bind_mapping!(Sample);

proptest! {
    #[test]
    fn bool_leaves_decode_losslessly(v in any::<bool>()) {
        let mut dest = false;
        let report = decode_value(&Value::Bool(v), &mut dest);
        prop_assert!(report.is_empty());
        prop_assert_eq!(dest, v);
    }

    #[test]
    fn int_leaves_decode_losslessly(v in any::<i64>()) {
        let mut dest: i64 = 0;
        let report = decode_value(&Value::Int(v), &mut dest);
        prop_assert!(report.is_empty());
        prop_assert_eq!(dest, v);
    }

    #[test]
    fn uint_leaves_decode_losslessly(v in any::<u64>()) {
        let mut dest: u64 = 0;
        let report = decode_value(&Value::Uint(v), &mut dest);
        prop_assert!(report.is_empty());
        prop_assert_eq!(dest, v);
    }

    #[test]
    fn float_leaves_decode_losslessly(v in proptest::num::f64::NORMAL) {
        let mut dest: f64 = 0.0;
        let report = decode_value(&Value::Float(v), &mut dest);
        prop_assert!(report.is_empty());
        prop_assert_eq!(dest, v);
    }

    #[test]
    fn string_leaves_decode_losslessly(v in ".*") {
        let mut dest = String::new();
        let report = decode_value(&Value::String(v.clone()), &mut dest);
        prop_assert!(report.is_empty());
        prop_assert_eq!(dest, v);
    }

    #[test]
    fn mismatched_kind_fails_and_leaves_destination_unmodified(
        initial in any::<i64>(),
        text in ".*",
    ) {
        let mut dest = initial;
        let report = decode_value(&Value::String(text), &mut dest);
        prop_assert_eq!(report.len(), 1);
        prop_assert_eq!(dest, initial);
    }

    #[test]
    fn integer_sequences_round_trip(values in prop::collection::vec(any::<i64>(), 0..32)) {
        let tree = Value::Sequence(values.iter().copied().map(Value::Int).collect());
        let mut dest: Vec<i64> = vec![];
        let report = decode_value(&tree, &mut dest);
        prop_assert!(report.is_empty());
        prop_assert_eq!(dest, values);
    }

    #[test]
    fn decoding_is_idempotent_over_fresh_destinations(
        flag in any::<bool>(),
        count in any::<i64>(),
        label in "[a-z]{0,12}",
    ) {
        let tree: Value = [
            ("flag".to_string(), Value::Bool(flag)),
            ("count".to_string(), Value::Int(count)),
            ("label".to_string(), Value::String(label)),
        ]
        .into_iter()
        .collect();

        let mut first = Sample::default();
        let mut second = Sample::default();
        let report_first = decode_value(&tree, &mut first);
        let report_second = decode_value(&tree, &mut second);

        prop_assert!(report_first.is_empty());
        prop_assert_eq!(report_first, report_second);
        prop_assert_eq!(first, second);
    }
}
