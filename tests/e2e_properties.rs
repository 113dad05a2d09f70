//! Property tests for connection weights and identity.

use std::hash::{DefaultHasher, Hash, Hasher};

use incremental_units::{IncrementalUnit, SequentialIds, UnitId, Value};
use proptest::prelude::*;

fn hash_of(unit: &IncrementalUnit) -> u64 {
    let mut hasher = DefaultHasher::new();
    unit.hash(&mut hasher);
    hasher.finish()
}

fn valid_weight() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(1.0), 0.0f64..=1.0]
}

fn invalid_weight() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        -1e9f64..-1e-9,
        (1.0f64 + 1e-9)..1e9,
    ]
}

proptest! {
    #[test]
    fn invalid_weight_leaves_predecessors_unchanged(w in invalid_weight(), prior in proptest::option::of(valid_weight())) {
        let ids = SequentialIds::new();
        let previous = IncrementalUnit::from_text(&ids, "u", "a");
        let mut unit = IncrementalUnit::from_text(&ids, "u", "a b");
        if let Some(p) = prior {
            unit.connect(&previous, p).unwrap();
        }

        let before: Vec<UnitId> = unit.predecessor_ids().collect();
        prop_assert!(unit.connect(&previous, w).is_err());
        let after: Vec<UnitId> = unit.predecessor_ids().collect();

        prop_assert_eq!(before, after);
        prop_assert_eq!(unit.weight_of(previous.id()), prior);
    }

    #[test]
    fn valid_weight_round_trips_and_overwrites(w in valid_weight(), w2 in valid_weight()) {
        let ids = SequentialIds::new();
        let previous = IncrementalUnit::from_text(&ids, "u", "a");
        let mut unit = IncrementalUnit::from_text(&ids, "u", "a b");

        prop_assert_eq!(unit.connect(&previous, w), Ok(None));
        prop_assert_eq!(unit.connection_weight(previous.id()), w);

        prop_assert_eq!(unit.connect(&previous, w2), Ok(Some(w)));
        prop_assert_eq!(unit.connection_weight(previous.id()), w2);
        prop_assert_eq!(unit.connection_count(), 1);
    }

    #[test]
    fn unknown_predecessor_is_zero(raw in any::<u64>()) {
        let ids = SequentialIds::starting_at(1);
        let unit = IncrementalUnit::from_text(&ids, "u", "x");
        prop_assume!(raw != unit.id().0);
        prop_assert_eq!(unit.connection_weight(UnitId(raw)), 0.0);
        prop_assert_eq!(unit.weight_of(UnitId(raw)), None);
    }

    #[test]
    fn copy_stays_equal_after_mutation(label in "[a-z_]{1,8}", text in "[a-z ]{0,16}", w in valid_weight(), other in any::<u64>()) {
        let ids = SequentialIds::new();
        let original = IncrementalUnit::from_text(&ids, "u", "hello");
        let mut copy = original.shadow_copy();

        copy.set_variable(label);
        copy.set_payload(Value::parse(&text));
        copy.connect_id(UnitId(other), w).unwrap();

        prop_assert!(copy == original);
        prop_assert_eq!(hash_of(&copy), hash_of(&original));
        prop_assert_eq!(original.payload(), &Value::from("hello"));
        prop_assert_eq!(original.connection_count(), 0);
    }
}
