//! Heap-allocated atomic cells.
//!
//! One generic [`AtomicCell`] serves every scalar in [`AtomicScalar`]:
//! `bool`, the 8/16/32/64-bit integers of both signednesses, and the
//! pointer-width [`NativeInt`]/[`NativeUInt`].

mod atomic_cell;
/// Scalar types that can be stored in a cell.
pub mod scalar;

pub use atomic_cell::AtomicCell;
pub use scalar::{AtomicInteger, AtomicScalar, NativeInt, NativeUInt};

pub(crate) use atomic_cell::{load, store};
