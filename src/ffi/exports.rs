//! The exported `extern "C"` functions, one family per cell variant.

use libc::c_int;

use super::{create, decode_order, free, load, read_modify_write, store, OpClass};
use crate::cell::{AtomicScalar, NativeInt, NativeUInt};
use crate::MemoryOrder;

macro_rules! export_cell {
    // Exchange returns the previous value; the fetch family is effect-only.
    (
        @rmw $(#[$cfg:meta])* $ty:ty, $handle:ident,
        $default:ident, $explicit:ident, $op:ident, $what:literal, true
    ) => {
        #[doc = concat!("Sequentially consistent ", $what, ", returning the previous value.")]
        ///
        /// # Safety
        /// `handle` must be a live handle from the matching `_create`.
        $(#[$cfg])*
        #[no_mangle]
        pub unsafe extern "C" fn $default(handle: $handle, value: $ty) -> $ty {
            // SAFETY: forwarded caller contract.
            unsafe {
                read_modify_write::<$ty>(
                    handle,
                    value,
                    MemoryOrder::SequentiallyConsistent,
                    <$ty as AtomicScalar>::$op,
                )
            }
        }

        #[doc = concat!("Explicitly ordered ", $what, ", returning the previous value.")]
        ///
        /// # Safety
        /// `handle` must be a live handle from the matching `_create`.
        $(#[$cfg])*
        #[no_mangle]
        pub unsafe extern "C" fn $explicit(handle: $handle, value: $ty, order: c_int) -> $ty {
            let order = decode_order(order, OpClass::ReadModifyWrite);
            // SAFETY: forwarded caller contract.
            unsafe { read_modify_write::<$ty>(handle, value, order, <$ty as AtomicScalar>::$op) }
        }
    };

    (
        @rmw $(#[$cfg:meta])* $ty:ty, $handle:ident,
        $default:ident, $explicit:ident, $op:ident, $what:literal, false
    ) => {
        #[doc = concat!("Sequentially consistent ", $what, ".")]
        ///
        /// # Safety
        /// `handle` must be a live handle from the matching `_create`.
        $(#[$cfg])*
        #[no_mangle]
        pub unsafe extern "C" fn $default(handle: $handle, value: $ty) {
            // SAFETY: forwarded caller contract.
            unsafe {
                read_modify_write::<$ty>(
                    handle,
                    value,
                    MemoryOrder::SequentiallyConsistent,
                    <$ty as AtomicScalar>::$op,
                );
            }
        }

        #[doc = concat!("Explicitly ordered ", $what, ".")]
        ///
        /// # Safety
        /// `handle` must be a live handle from the matching `_create`.
        $(#[$cfg])*
        #[no_mangle]
        pub unsafe extern "C" fn $explicit(handle: $handle, value: $ty, order: c_int) {
            let order = decode_order(order, OpClass::ReadModifyWrite);
            // SAFETY: forwarded caller contract.
            unsafe {
                read_modify_write::<$ty>(handle, value, order, <$ty as AtomicScalar>::$op);
            }
        }
    };

    ($($(#[$cfg:meta])* $ty:ty => $name:ident, $handle:ident;)+) => {$(
        paste::paste! {
            #[doc = concat!("Opaque handle to an atomic `", stringify!($ty), "` cell.")]
            $(#[$cfg])*
            pub type $handle = *mut <$ty as AtomicScalar>::Atomic;

            #[doc = concat!("Allocates an atomic `", stringify!($ty), "` cell holding `value`.")]
            ///
            /// Returns null if the allocator is exhausted.
            $(#[$cfg])*
            #[no_mangle]
            pub extern "C" fn [<spa_ $name _create>](value: $ty) -> $handle {
                create::<$ty>(value)
            }

            /// Frees a cell. Null is ignored.
            ///
            /// # Safety
            /// `handle` must come from the matching `_create`, must not be
            /// freed twice, and no other thread may still be using it.
            $(#[$cfg])*
            #[no_mangle]
            pub unsafe extern "C" fn [<spa_ $name _free>](handle: $handle) {
                // SAFETY: forwarded caller contract.
                unsafe { free::<$ty>(handle) }
            }

            /// Sequentially consistent store.
            ///
            /// # Safety
            /// `handle` must be a live handle from the matching `_create`.
            $(#[$cfg])*
            #[no_mangle]
            pub unsafe extern "C" fn [<spa_ $name _store>](handle: $handle, value: $ty) {
                // SAFETY: forwarded caller contract.
                unsafe { store::<$ty>(handle, value, MemoryOrder::SequentiallyConsistent) }
            }

            /// Store with an explicit ordering (relaxed, release or seq_cst).
            ///
            /// # Safety
            /// `handle` must be a live handle from the matching `_create`.
            $(#[$cfg])*
            #[no_mangle]
            pub unsafe extern "C" fn [<spa_ $name _store_explicit>](
                handle: $handle,
                value: $ty,
                order: c_int,
            ) {
                let order = decode_order(order, OpClass::Store);
                // SAFETY: forwarded caller contract.
                unsafe { store::<$ty>(handle, value, order) }
            }

            /// Sequentially consistent load.
            ///
            /// # Safety
            /// `handle` must be a live handle from the matching `_create`.
            $(#[$cfg])*
            #[no_mangle]
            pub unsafe extern "C" fn [<spa_ $name _load>](handle: $handle) -> $ty {
                // SAFETY: forwarded caller contract.
                unsafe { load::<$ty>(handle, MemoryOrder::SequentiallyConsistent) }
            }

            /// Load with an explicit ordering (relaxed, consume, acquire or seq_cst).
            ///
            /// # Safety
            /// `handle` must be a live handle from the matching `_create`.
            $(#[$cfg])*
            #[no_mangle]
            pub unsafe extern "C" fn [<spa_ $name _load_explicit>](
                handle: $handle,
                order: c_int,
            ) -> $ty {
                let order = decode_order(order, OpClass::Load);
                // SAFETY: forwarded caller contract.
                unsafe { load::<$ty>(handle, order) }
            }

            export_cell!(
                @rmw $(#[$cfg])* $ty, $handle,
                [<spa_ $name _exchange>], [<spa_ $name _exchange_explicit>],
                swap, "exchange", true
            );
            export_cell!(
                @rmw $(#[$cfg])* $ty, $handle,
                [<spa_ $name _add>], [<spa_ $name _add_explicit>],
                fetch_add, "wrapping add", false
            );
            export_cell!(
                @rmw $(#[$cfg])* $ty, $handle,
                [<spa_ $name _sub>], [<spa_ $name _sub_explicit>],
                fetch_sub, "wrapping subtract", false
            );
            export_cell!(
                @rmw $(#[$cfg])* $ty, $handle,
                [<spa_ $name _or>], [<spa_ $name _or_explicit>],
                fetch_or, "bitwise OR", false
            );
            export_cell!(
                @rmw $(#[$cfg])* $ty, $handle,
                [<spa_ $name _xor>], [<spa_ $name _xor_explicit>],
                fetch_xor, "bitwise XOR", false
            );
            export_cell!(
                @rmw $(#[$cfg])* $ty, $handle,
                [<spa_ $name _and>], [<spa_ $name _and_explicit>],
                fetch_and, "bitwise AND", false
            );
        }
    )+};
}

export_cell! {
    bool => bool, SpaBoolRef;
    i8 => int8, SpaInt8Ref;
    u8 => uint8, SpaUInt8Ref;
    i16 => int16, SpaInt16Ref;
    u16 => uint16, SpaUInt16Ref;
    i32 => int32, SpaInt32Ref;
    u32 => uint32, SpaUInt32Ref;
    #[cfg(any(loom, target_has_atomic = "64"))]
    i64 => int64, SpaInt64Ref;
    #[cfg(any(loom, target_has_atomic = "64"))]
    u64 => uint64, SpaUInt64Ref;
    NativeInt => int, SpaIntRef;
    NativeUInt => uint, SpaUIntRef;
}
