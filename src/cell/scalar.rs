//! Scalars that can live in an [`AtomicCell`](super::AtomicCell).
//!
//! [`AtomicScalar`] ties each primitive to its native atomic storage and
//! exposes the primitive operations the cell is generic over. Integer
//! variants share one macro; `bool` is written out because its arithmetic is
//! mod-2 and the hardware offers no add/sub on it.

use core::fmt::Debug;

use num_traits::{PrimInt, WrappingAdd, WrappingSub};

use crate::sync::{
    AtomicBool, AtomicI16, AtomicI32, AtomicI8, AtomicIsize, AtomicU16, AtomicU32, AtomicU8,
    AtomicUsize, Ordering,
};

#[cfg(any(loom, target_has_atomic = "64"))]
use crate::sync::{AtomicI64, AtomicU64};

mod sealed {
    pub trait Sealed {}
}

/// A primitive scalar no wider than a machine word that the target can
/// read and write indivisibly.
///
/// Sealed: the set of scalars is closed.
pub trait AtomicScalar: Copy + PartialEq + Debug + Send + Sync + 'static + sealed::Sealed {
    /// The native atomic storage for this scalar.
    type Atomic: Send + Sync;

    /// Human-readable type name used in diagnostics.
    const NAME: &'static str;

    /// Builds the atomic storage holding `value`.
    fn new_atomic(value: Self) -> Self::Atomic;

    /// Atomic load.
    fn load(atomic: &Self::Atomic, order: Ordering) -> Self;

    /// Atomic store.
    fn store(atomic: &Self::Atomic, value: Self, order: Ordering);

    /// Atomic exchange, returning the previous value.
    fn swap(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self;

    /// Strong compare-and-exchange.
    ///
    /// # Errors
    /// Returns the observed value if it differed from `current`.
    fn compare_exchange(
        atomic: &Self::Atomic,
        current: Self,
        new: Self,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self, Self>;

    /// Wrapping add, returning the previous value.
    fn fetch_add(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self;

    /// Wrapping subtract, returning the previous value.
    fn fetch_sub(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self;

    /// Bitwise OR, returning the previous value.
    fn fetch_or(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self;

    /// Bitwise XOR, returning the previous value.
    fn fetch_xor(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self;

    /// Bitwise AND, returning the previous value.
    fn fetch_and(atomic: &Self::Atomic, value: Self, order: Ordering) -> Self;
}

/// The integer variants of [`AtomicScalar`].
pub trait AtomicInteger: AtomicScalar + PrimInt + WrappingAdd + WrappingSub {}

impl sealed::Sealed for bool {}

impl AtomicScalar for bool {
    type Atomic = AtomicBool;

    const NAME: &'static str = "bool";

    #[inline(always)]
    fn new_atomic(value: bool) -> AtomicBool {
        AtomicBool::new(value)
    }

    #[inline(always)]
    fn load(atomic: &AtomicBool, order: Ordering) -> bool {
        atomic.load(order)
    }

    #[inline(always)]
    fn store(atomic: &AtomicBool, value: bool, order: Ordering) {
        atomic.store(value, order);
    }

    #[inline(always)]
    fn swap(atomic: &AtomicBool, value: bool, order: Ordering) -> bool {
        atomic.swap(value, order)
    }

    #[inline(always)]
    fn compare_exchange(
        atomic: &AtomicBool,
        current: bool,
        new: bool,
        success: Ordering,
        failure: Ordering,
    ) -> Result<bool, bool> {
        atomic.compare_exchange(current, new, success, failure)
    }

    // Addition and subtraction modulo 2 are both XOR.
    #[inline(always)]
    fn fetch_add(atomic: &AtomicBool, value: bool, order: Ordering) -> bool {
        atomic.fetch_xor(value, order)
    }

    #[inline(always)]
    fn fetch_sub(atomic: &AtomicBool, value: bool, order: Ordering) -> bool {
        atomic.fetch_xor(value, order)
    }

    #[inline(always)]
    fn fetch_or(atomic: &AtomicBool, value: bool, order: Ordering) -> bool {
        atomic.fetch_or(value, order)
    }

    #[inline(always)]
    fn fetch_xor(atomic: &AtomicBool, value: bool, order: Ordering) -> bool {
        atomic.fetch_xor(value, order)
    }

    #[inline(always)]
    fn fetch_and(atomic: &AtomicBool, value: bool, order: Ordering) -> bool {
        atomic.fetch_and(value, order)
    }
}

macro_rules! impl_atomic_integer {
    ($($(#[$cfg:meta])* $value:ty => $atomic:ident),+ $(,)?) => {$(
        $(#[$cfg])*
        impl sealed::Sealed for $value {}

        $(#[$cfg])*
        impl AtomicScalar for $value {
            type Atomic = $atomic;

            const NAME: &'static str = stringify!($value);

            #[inline(always)]
            fn new_atomic(value: $value) -> $atomic {
                $atomic::new(value)
            }

            #[inline(always)]
            fn load(atomic: &$atomic, order: Ordering) -> $value {
                atomic.load(order)
            }

            #[inline(always)]
            fn store(atomic: &$atomic, value: $value, order: Ordering) {
                atomic.store(value, order);
            }

            #[inline(always)]
            fn swap(atomic: &$atomic, value: $value, order: Ordering) -> $value {
                atomic.swap(value, order)
            }

            #[inline(always)]
            fn compare_exchange(
                atomic: &$atomic,
                current: $value,
                new: $value,
                success: Ordering,
                failure: Ordering,
            ) -> Result<$value, $value> {
                atomic.compare_exchange(current, new, success, failure)
            }

            // Native fetch_add/fetch_sub wrap on overflow for both signednesses.
            #[inline(always)]
            fn fetch_add(atomic: &$atomic, value: $value, order: Ordering) -> $value {
                atomic.fetch_add(value, order)
            }

            #[inline(always)]
            fn fetch_sub(atomic: &$atomic, value: $value, order: Ordering) -> $value {
                atomic.fetch_sub(value, order)
            }

            #[inline(always)]
            fn fetch_or(atomic: &$atomic, value: $value, order: Ordering) -> $value {
                atomic.fetch_or(value, order)
            }

            #[inline(always)]
            fn fetch_xor(atomic: &$atomic, value: $value, order: Ordering) -> $value {
                atomic.fetch_xor(value, order)
            }

            #[inline(always)]
            fn fetch_and(atomic: &$atomic, value: $value, order: Ordering) -> $value {
                atomic.fetch_and(value, order)
            }
        }

        $(#[$cfg])*
        impl AtomicInteger for $value {}
    )+};
}

impl_atomic_integer! {
    i8 => AtomicI8,
    u8 => AtomicU8,
    i16 => AtomicI16,
    u16 => AtomicU16,
    i32 => AtomicI32,
    u32 => AtomicU32,
    #[cfg(any(loom, target_has_atomic = "64"))]
    i64 => AtomicI64,
    #[cfg(any(loom, target_has_atomic = "64"))]
    u64 => AtomicU64,
    isize => AtomicIsize,
    usize => AtomicUsize,
}

/// The platform-width signed integer used for the "default int" variant.
///
/// Pointer width, which is `long` on LP64 targets and `int` on ILP32 ones.
pub type NativeInt = isize;

/// The platform-width unsigned integer used for the "default uint" variant.
pub type NativeUInt = usize;
