//! Property tests for the record store.

use chrono::NaiveDate;
use patient_board_core::store::RecordStore;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add,
    Delete(u64),
    AddPendiente(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Add),
        (1u64..20).prop_map(Op::Delete),
        (1u64..20).prop_map(Op::AddPendiente),
    ]
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

proptest! {
    #[test]
    fn ids_strictly_increase(ops in prop::collection::vec(op(), 0..60)) {
        let mut store = RecordStore::new();
        let mut assigned = Vec::new();
        for op in ops {
            match op {
                Op::Add => assigned.push(store.add_record_on(day())),
                Op::Delete(id) => {
                    store.delete_record(id, || true);
                    prop_assert!(store.get(id).is_none());
                }
                Op::AddPendiente(id) => {
                    store.add_pendiente(id, "x");
                }
            }
        }
        prop_assert!(assigned.windows(2).all(|w| w[0] < w[1]));

        // Display order is insertion order.
        let ids: Vec<_> = store.records().iter().map(|r| r.id).collect();
        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn toggle_twice_is_identity(entries in 1usize..6, index in 0usize..8) {
        let mut store = RecordStore::new();
        let id = store.add_record_on(day());
        for n in 0..entries {
            store.add_pendiente(id, format!("item {n}"));
        }
        let before = store.records().to_vec();
        let first = store.toggle_pendiente(id, index);
        let second = store.toggle_pendiente(id, index);
        prop_assert_eq!(first, index < entries);
        prop_assert_eq!(first, second);
        prop_assert_eq!(store.records(), before.as_slice());
    }
}
