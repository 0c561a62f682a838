use super::*;
use std::process::Command;

const CHILD_ENV: &str = "SPA_ATOMIC_CONTRACT_CHILD";

/// Re-runs `test` in a child process with `CHILD_ENV` set and reports whether
/// the child exited successfully.
fn child_succeeds(test: &str) -> bool {
    let exe = std::env::current_exe().expect("test binary path");
    let status = Command::new(exe)
        .args([test, "--exact", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .status()
        .expect("spawn child test");
    status.success()
}

#[test]
fn ordering_constants_are_c11_values() {
    assert_eq!(SPA_MEMORY_ORDER_RELAXED, 0);
    assert_eq!(SPA_MEMORY_ORDER_CONSUME, 1);
    assert_eq!(SPA_MEMORY_ORDER_ACQUIRE, 2);
    assert_eq!(SPA_MEMORY_ORDER_RELEASE, 3);
    assert_eq!(SPA_MEMORY_ORDER_ACQUIRE_AND_RELEASE, 4);
    assert_eq!(SPA_MEMORY_ORDER_SEQUENTIALLY_CONSISTENT, 5);
}

#[test]
fn decode_accepts_valid_classes() {
    assert_eq!(
        decode_order(SPA_MEMORY_ORDER_CONSUME, OpClass::Load),
        MemoryOrder::Consume
    );
    assert_eq!(
        decode_order(SPA_MEMORY_ORDER_RELEASE, OpClass::Store),
        MemoryOrder::Release
    );
    for raw in 0..6 {
        assert_eq!(
            decode_order(raw, OpClass::ReadModifyWrite).as_raw(),
            raw
        );
    }
}

#[test]
fn int_create_load_free() {
    let a = spa_int_create(0);
    // SAFETY: `a` is live until freed at the end of the block.
    unsafe {
        assert_eq!(spa_int_load(a), 0);
        spa_int_free(a);
    }

    let b = spa_int_create(42);
    // SAFETY: `b` is live until freed at the end of the block.
    unsafe {
        assert_eq!(spa_int_load_explicit(b, SPA_MEMORY_ORDER_RELAXED), 42);
        assert_eq!(
            spa_int_load_explicit(b, SPA_MEMORY_ORDER_SEQUENTIALLY_CONSISTENT),
            42
        );
        spa_int_free(b);
    }
}

#[test]
fn free_null_is_noop() {
    // SAFETY: null is explicitly accepted.
    unsafe {
        spa_bool_free(core::ptr::null_mut());
        spa_uint64_free(core::ptr::null_mut());
    }
}

#[test]
fn store_exchange_and_fetch_family() {
    let h = spa_uint8_create(250);
    // SAFETY: `h` stays live until the final free.
    unsafe {
        spa_uint8_store(h, 254);
        spa_uint8_store_explicit(h, 255, SPA_MEMORY_ORDER_RELEASE);
        spa_uint8_add(h, 1);
        assert_eq!(spa_uint8_load(h), 0);
        spa_uint8_sub_explicit(h, 1, SPA_MEMORY_ORDER_ACQUIRE_AND_RELEASE);
        assert_eq!(spa_uint8_load(h), 255);
        spa_uint8_and(h, 0x0f);
        spa_uint8_or_explicit(h, 0x30, SPA_MEMORY_ORDER_RELAXED);
        spa_uint8_xor(h, 0x01);
        assert_eq!(spa_uint8_load_explicit(h, SPA_MEMORY_ORDER_ACQUIRE), 0x3e);
        assert_eq!(spa_uint8_exchange(h, 7), 0x3e);
        assert_eq!(
            spa_uint8_exchange_explicit(h, 8, SPA_MEMORY_ORDER_CONSUME),
            7
        );
        assert_eq!(spa_uint8_load(h), 8);
        spa_uint8_free(h);
    }
}

#[test]
fn signed_and_bool_variants() {
    let n = spa_int16_create(i16::MAX);
    let f = spa_bool_create(false);
    // SAFETY: both handles are live until freed below.
    unsafe {
        spa_int16_add(n, 1);
        assert_eq!(spa_int16_load(n), i16::MIN);
        spa_int16_sub_explicit(n, 1, SPA_MEMORY_ORDER_SEQUENTIALLY_CONSISTENT);
        assert_eq!(spa_int16_load(n), i16::MAX);

        spa_bool_or(f, true);
        assert!(spa_bool_load(f));
        spa_bool_add(f, true);
        assert!(!spa_bool_load(f));
        spa_bool_xor_explicit(f, true, SPA_MEMORY_ORDER_RELAXED);
        spa_bool_and(f, true);
        assert!(spa_bool_load(f));
        assert!(spa_bool_exchange(f, false));

        spa_int16_free(n);
        spa_bool_free(f);
    }
}

macro_rules! cycle {
    ($create:ident, $free:ident, $load:ident, $value:expr) => {
        for _ in 0..10_000 {
            let h = $create($value);
            assert!(!h.is_null());
            // SAFETY: freshly created and freed exactly once.
            unsafe { $free(h) };
        }
        let h = $create($value);
        // SAFETY: live until freed.
        unsafe {
            assert_eq!($load(h), $value);
            $free(h);
        }
    };
}

#[test]
fn create_free_cycles_every_variant() {
    cycle!(spa_bool_create, spa_bool_free, spa_bool_load, true);
    cycle!(spa_int8_create, spa_int8_free, spa_int8_load, -3);
    cycle!(spa_uint8_create, spa_uint8_free, spa_uint8_load, 3);
    cycle!(spa_int16_create, spa_int16_free, spa_int16_load, -3);
    cycle!(spa_uint16_create, spa_uint16_free, spa_uint16_load, 3);
    cycle!(spa_int32_create, spa_int32_free, spa_int32_load, -3);
    cycle!(spa_uint32_create, spa_uint32_free, spa_uint32_load, 3);
    cycle!(spa_int64_create, spa_int64_free, spa_int64_load, -3);
    cycle!(spa_uint64_create, spa_uint64_free, spa_uint64_load, 3);
    cycle!(spa_int_create, spa_int_free, spa_int_load, -3);
    cycle!(spa_uint_create, spa_uint_free, spa_uint_load, 3);
}

#[test]
fn release_load_aborts() {
    if std::env::var_os(CHILD_ENV).is_some() {
        let h = spa_int32_create(1);
        // SAFETY: live handle; the ordering is the violation under test.
        unsafe { spa_int32_load_explicit(h, SPA_MEMORY_ORDER_RELEASE) };
        return;
    }
    assert!(!child_succeeds("ffi::tests::release_load_aborts"));
}

#[test]
fn acquire_store_aborts() {
    if std::env::var_os(CHILD_ENV).is_some() {
        let h = spa_uint32_create(1);
        // SAFETY: live handle; the ordering is the violation under test.
        unsafe { spa_uint32_store_explicit(h, 2, SPA_MEMORY_ORDER_ACQUIRE) };
        return;
    }
    assert!(!child_succeeds("ffi::tests::acquire_store_aborts"));
}

#[test]
fn unknown_ordering_aborts() {
    if std::env::var_os(CHILD_ENV).is_some() {
        let h = spa_uint_create(1);
        // SAFETY: live handle; the ordering is the violation under test.
        unsafe { spa_uint_add_explicit(h, 1, 42) };
        return;
    }
    assert!(!child_succeeds("ffi::tests::unknown_ordering_aborts"));
}

#[test]
fn null_handle_aborts() {
    if std::env::var_os(CHILD_ENV).is_some() {
        // SAFETY: the null handle is the violation under test.
        unsafe { spa_int8_load(core::ptr::null_mut()) };
        return;
    }
    assert!(!child_succeeds("ffi::tests::null_handle_aborts"));
}

#[test]
fn child_harness_runs_passing_tests() {
    assert!(child_succeeds("ffi::tests::ordering_constants_are_c11_values"));
}
