//! C-callable surface over [`AtomicCell`].
//!
//! Every cell variant gets the same family of `extern "C"` functions,
//! `spa_<type>_{create,free,store,load,exchange,add,sub,or,xor,and}`, each
//! (apart from `create` and `free`) paired with an `_explicit` form taking a
//! raw C11 ordering. The functions are stamped out in [`exports`]; all of
//! their logic lives in the generic helpers below.
//!
//! Contract violations (null handle, unknown ordering, ordering invalid for
//! the operation) cannot unwind into foreign code, so they log and abort.

use core::fmt;
use core::ptr;
use std::io::Write;

use libc::c_int;

use crate::cell::{self, AtomicCell, AtomicScalar};
use crate::sync::Ordering;
use crate::MemoryOrder;

mod exports;

pub use exports::*;

/// `memory_order_relaxed`.
pub const SPA_MEMORY_ORDER_RELAXED: c_int = MemoryOrder::Relaxed.as_raw();
/// `memory_order_consume`.
pub const SPA_MEMORY_ORDER_CONSUME: c_int = MemoryOrder::Consume.as_raw();
/// `memory_order_acquire`.
pub const SPA_MEMORY_ORDER_ACQUIRE: c_int = MemoryOrder::Acquire.as_raw();
/// `memory_order_release`.
pub const SPA_MEMORY_ORDER_RELEASE: c_int = MemoryOrder::Release.as_raw();
/// `memory_order_acq_rel`.
pub const SPA_MEMORY_ORDER_ACQUIRE_AND_RELEASE: c_int = MemoryOrder::AcquireRelease.as_raw();
/// `memory_order_seq_cst`.
pub const SPA_MEMORY_ORDER_SEQUENTIALLY_CONSISTENT: c_int =
    MemoryOrder::SequentiallyConsistent.as_raw();

/// Which orderings an operation accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpClass {
    Load,
    Store,
    ReadModifyWrite,
}

impl fmt::Display for OpClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OpClass::Load => "load",
            OpClass::Store => "store",
            OpClass::ReadModifyWrite => "read-modify-write",
        })
    }
}

#[cold]
#[inline(never)]
fn contract_violation(args: fmt::Arguments<'_>) -> ! {
    #[cfg(feature = "tracing")]
    tracing::error!("atomic cell contract violation: {args}");
    let _ = writeln!(std::io::stderr(), "atomic cell contract violation: {args}");
    std::process::abort()
}

fn decode_order(raw: c_int, class: OpClass) -> MemoryOrder {
    let order = match MemoryOrder::from_raw(raw) {
        Ok(order) => order,
        Err(err) => contract_violation(format_args!("{err} passed to a {class}")),
    };
    let valid = match class {
        OpClass::Load => order.is_valid_for_load(),
        OpClass::Store => order.is_valid_for_store(),
        OpClass::ReadModifyWrite => true,
    };
    if !valid {
        contract_violation(format_args!("{order} is not a valid ordering for a {class}"));
    }
    order
}

/// Borrows the storage behind a live handle.
///
/// # Safety
/// A non-null `handle` must have come from [`create`] and not yet been freed.
unsafe fn storage<'a, T: AtomicScalar>(handle: *mut T::Atomic) -> &'a T::Atomic {
    if handle.is_null() {
        contract_violation(format_args!("null {} cell handle", T::NAME));
    }
    // SAFETY: non-null, and live per the caller's contract.
    unsafe { AtomicCell::<T>::storage_from_raw(handle) }
}

fn create<T: AtomicScalar>(value: T) -> *mut T::Atomic {
    match AtomicCell::try_new(value) {
        Ok(cell) => {
            let handle = cell.into_raw();
            #[cfg(feature = "tracing")]
            tracing::trace!(cell = T::NAME, ?handle, "created atomic cell");
            handle
        }
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(cell = T::NAME, error = %_err, "atomic cell allocation failed");
            ptr::null_mut()
        }
    }
}

/// # Safety
/// `handle` must be null or come from [`create`] and not yet been freed, and
/// every other operation on it must have completed.
unsafe fn free<T: AtomicScalar>(handle: *mut T::Atomic) {
    if handle.is_null() {
        return;
    }
    #[cfg(feature = "tracing")]
    tracing::trace!(cell = T::NAME, ?handle, "freeing atomic cell");
    // SAFETY: ownership returns to the cell, which is dropped here.
    drop(unsafe { AtomicCell::<T>::from_raw(handle) });
}

/// # Safety
/// See [`storage`].
unsafe fn store<T: AtomicScalar>(handle: *mut T::Atomic, value: T, order: MemoryOrder) {
    // SAFETY: forwarded caller contract.
    cell::store::<T>(unsafe { storage::<T>(handle) }, value, order);
}

/// # Safety
/// See [`storage`].
unsafe fn load<T: AtomicScalar>(handle: *mut T::Atomic, order: MemoryOrder) -> T {
    // SAFETY: forwarded caller contract.
    cell::load::<T>(unsafe { storage::<T>(handle) }, order)
}

/// # Safety
/// See [`storage`].
unsafe fn read_modify_write<T: AtomicScalar>(
    handle: *mut T::Atomic,
    operand: T,
    order: MemoryOrder,
    op: fn(&T::Atomic, T, Ordering) -> T,
) -> T {
    // SAFETY: forwarded caller contract.
    op(unsafe { storage::<T>(handle) }, operand, order.translate())
}

#[cfg(all(test, not(loom)))]
mod tests;
