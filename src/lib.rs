//! # `spa-atomic` - Atomic Cells Across the FFI Boundary
//!
//! Heap-allocated atomic cells for `bool` and every integer width, with each
//! operation taking an explicit memory-ordering intent. The same cells are
//! exposed to foreign callers as a flat family of `extern "C"` functions over
//! opaque handles.
//!
//! ## Guarantees
//!
//! ### Atomicity
//! - A cell holds exactly one valid value at every instant; no reader can
//!   observe a torn write. Variants exist only for widths the target reads
//!   and writes natively (`i64`/`u64` require `target_has_atomic = "64"`).
//! - Every operation is a single non-blocking hardware instruction sequence.
//!   Nothing spins, retries, parks or yields.
//!
//! ### Ordering
//! - [`MemoryOrder`] carries the six C11 intents and translates them to
//!   native orderings. `Consume` is treated as `Acquire`; `Release` is a true
//!   release.
//! - Orderings that make no sense for an operation (a release load, an
//!   acquire store) are contract violations and fail loudly rather than being
//!   downgraded.
//!
//! ### Ownership
//! - [`AtomicCell`] owns its allocation. Dropping it is the only way to
//!   destroy it, so double-destroy and use-after-destroy do not compile.
//! - Across the foreign surface a handle is a raw pointer; the caller is
//!   responsible for freeing it exactly once, after every other operation on
//!   it has completed.
//!
//! ## Architecture
//!
//! 1. **Ordering policy** ([`ordering`]): pure translation from intent to
//!    native ordering, plus the C11 integer encoding.
//! 2. **Atomic cell** ([`cell`]): one generic [`AtomicCell<T>`] over the
//!    sealed [`AtomicScalar`] trait, instantiated for eleven scalars.
//! 3. **Foreign surface** ([`ffi`]): `spa_<type>_<op>[_explicit]` functions
//!    generated per scalar, forwarding to the generic cell.
//!
//! ## Example
//!
//! ```rust
//! use spa_atomic::{AtomicCell, MemoryOrder};
//! use std::thread;
//!
//! let hits = AtomicCell::new(0u64);
//! thread::scope(|s| {
//!     for _ in 0..4 {
//!         s.spawn(|| {
//!             for _ in 0..100 {
//!                 hits.add(1, MemoryOrder::Relaxed);
//!             }
//!         });
//!     }
//! });
//! assert_eq!(hits.load(MemoryOrder::default()), 400);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod cell;
pub mod error;
pub mod ffi;
pub mod ordering;
#[cfg(any(test, feature = "proptest"))]
pub mod strategy;

mod sync;

pub use cell::{AtomicCell, AtomicInteger, AtomicScalar, NativeInt, NativeUInt};
pub use error::AllocError;
pub use ordering::{MemoryOrder, UnknownOrder};

// Compile-time layout assertions.
#[cfg(not(loom))]
macro_rules! assert_same_layout {
    ($($t:ty),+) => {$(
        assert!(core::mem::size_of::<<$t as AtomicScalar>::Atomic>() == core::mem::size_of::<$t>());
        assert!(
            core::mem::align_of::<<$t as AtomicScalar>::Atomic>() >= core::mem::align_of::<$t>()
        );
    )+};
}

#[cfg(not(loom))]
const _: () = {
    use core::mem;

    // Storage is exactly one scalar: no header, no generation counter.
    assert_same_layout!(bool, i8, u8, i16, u16, i32, u32, isize, usize);

    // The owning handle is a single non-null pointer.
    assert!(mem::size_of::<AtomicCell<u8>>() == mem::size_of::<usize>());
    assert!(mem::size_of::<Option<AtomicCell<u8>>>() == mem::size_of::<usize>());

    // The C surface passes orderings as `int`.
    assert!(mem::size_of::<MemoryOrder>() == mem::size_of::<libc::c_int>());
};

#[cfg(all(not(loom), target_has_atomic = "64"))]
const _: () = {
    assert_same_layout!(i64, u64);
};
