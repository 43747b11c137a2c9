use placemark_json_patch::{apply_patch, diff};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        "[a-z~/]{0,4}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-c~/]{0,3}", inner, 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

proptest! {
    #[test]
    fn applying_the_diff_reproduces_next(prev in arb_json(), next in arb_json()) {
        let patches = diff(Some(&prev), &next);
        let mut doc = prev.clone();
        apply_patch(&mut doc, &patches).expect("patch applies");
        prop_assert_eq!(doc, next);
    }

    #[test]
    fn first_snapshot_diff_builds_next_from_empty(next in arb_json()) {
        let patches = diff(None, &next);
        let mut doc = match &next {
            Value::Object(_) => Value::Object(Map::new()),
            Value::Array(_) => Value::Array(Vec::new()),
            _ => Value::Null,
        };
        apply_patch(&mut doc, &patches).expect("patch applies");
        prop_assert_eq!(doc, next);
    }

    #[test]
    fn diff_against_itself_is_empty(doc in arb_json()) {
        prop_assert!(diff(Some(&doc), &doc).is_empty());
        prop_assert!(diff(Some(&doc), &doc.clone()).is_empty());
    }

    #[test]
    fn diff_is_deterministic(prev in arb_json(), next in arb_json()) {
        prop_assert_eq!(diff(Some(&prev), &next), diff(Some(&prev), &next));
    }
}
