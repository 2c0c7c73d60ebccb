use bencode::{vecmap::VecMap, Value};
use bytes::Bytes;
use proptest::prelude::*;

/// arbitrary Bytes for use with proptest, not necessarily UTF-8
pub fn arb_bs() -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 0..64).prop_map(Bytes::from)
}

/// arbitrary dictionary key, short enough that collisions and shared prefixes are common
pub fn arb_key() -> impl Strategy<Value = Bytes> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..4).prop_map(Bytes::from),
        "[a-c]{0,3}".prop_map(Bytes::from),
    ]
}

/// arbitrary bencode Value for use with proptest
pub fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(Value::from),
        // small integers exercise the single digit and zero cases
        (-10i64..10).prop_map(Value::from),
        arb_bs().prop_map(Value::from),
    ];
    leaf.prop_recursive(
        8,  // max depth
        64, // max nodes
        10, // max items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..10).prop_map(Value::from),
                prop::collection::btree_map(arb_key(), inner, 0..10)
                    .prop_map(|m| Value::from(VecMap::from(m)))
            ]
        },
    )
}
