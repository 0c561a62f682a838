//! proptest strategies for [`MemoryOrder`].
//!
//! Enabled by the `proptest` feature so downstream crates can drive their own
//! property tests with valid orderings per operation class.

use proptest::prelude::*;
use proptest::sample::select;

use crate::MemoryOrder;

/// Any of the six intents. Valid for read-modify-write operations.
pub fn any_order() -> impl Strategy<Value = MemoryOrder> {
    select(MemoryOrder::ALL.to_vec())
}

/// Intents valid for a pure load.
pub fn load_order() -> impl Strategy<Value = MemoryOrder> {
    any_order().prop_filter("load ordering", |o| o.is_valid_for_load())
}

/// Intents valid for a pure store.
pub fn store_order() -> impl Strategy<Value = MemoryOrder> {
    select(vec![
        MemoryOrder::Relaxed,
        MemoryOrder::Release,
        MemoryOrder::SequentiallyConsistent,
    ])
}
