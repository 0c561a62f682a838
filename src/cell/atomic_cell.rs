use core::alloc::Layout;
use core::fmt;
use core::marker::PhantomData;
use core::mem::ManuallyDrop;
use core::ptr::NonNull;
use std::alloc::{alloc, dealloc, handle_alloc_error};

use crate::cell::scalar::{AtomicInteger, AtomicScalar};
use crate::error::AllocError;
use crate::ordering::MemoryOrder;

/// A heap-allocated atomic cell holding one `T`.
///
/// The cell is an owning handle: dropping it releases the storage, so a cell
/// cannot be destroyed twice or used after destruction. Every operation takes
/// `&self` and may run concurrently from any number of threads.
///
/// Operations take a [`MemoryOrder`]; pass `MemoryOrder::default()`
/// (sequentially consistent) for the conventional default.
///
/// ```
/// use spa_atomic::{AtomicCell, MemoryOrder};
///
/// let cell = AtomicCell::new(41u32);
/// cell.add(1, MemoryOrder::default());
/// assert_eq!(cell.load(MemoryOrder::Acquire), 42);
/// ```
pub struct AtomicCell<T: AtomicScalar> {
    ptr: NonNull<T::Atomic>,
    _owns: PhantomData<T::Atomic>,
}

// SAFETY: the cell exclusively owns its allocation and `T::Atomic` is
// Send + Sync; all shared access goes through atomic operations.
unsafe impl<T: AtomicScalar> Send for AtomicCell<T> {}
unsafe impl<T: AtomicScalar> Sync for AtomicCell<T> {}

impl<T: AtomicScalar> AtomicCell<T> {
    const LAYOUT: Layout = Layout::new::<T::Atomic>();

    /// Allocates a cell initialised to `value`.
    ///
    /// Aborts through [`handle_alloc_error`] if the allocator is exhausted;
    /// use [`AtomicCell::try_new`] to observe that instead.
    pub fn new(value: T) -> Self {
        match Self::try_new(value) {
            Ok(cell) => cell,
            Err(AllocError) => handle_alloc_error(Self::LAYOUT),
        }
    }

    /// Allocates a cell initialised to `value`.
    ///
    /// # Errors
    /// Returns [`AllocError`] if the allocator cannot provide the storage.
    pub fn try_new(value: T) -> Result<Self, AllocError> {
        // SAFETY: atomic storage types are never zero-sized.
        let raw = unsafe { alloc(Self::LAYOUT) }.cast::<T::Atomic>();
        let ptr = NonNull::new(raw).ok_or(AllocError)?;
        // SAFETY: freshly allocated with the layout of `T::Atomic`.
        unsafe { ptr.as_ptr().write(T::new_atomic(value)) };
        Ok(Self {
            ptr,
            _owns: PhantomData,
        })
    }

    /// Releases ownership, returning the raw storage pointer.
    ///
    /// The pointer must eventually be passed to [`AtomicCell::from_raw`] to be
    /// freed.
    pub fn into_raw(self) -> *mut T::Atomic {
        ManuallyDrop::new(self).ptr.as_ptr()
    }

    /// Reclaims ownership of a pointer produced by [`AtomicCell::into_raw`].
    ///
    /// # Safety
    /// `raw` must come from `into_raw` on a cell of the same `T` and must not
    /// have been reclaimed already. No other thread may still be operating on
    /// it once the returned cell is dropped.
    pub unsafe fn from_raw(raw: *mut T::Atomic) -> Self {
        debug_assert!(!raw.is_null(), "null {} cell handle", T::NAME);
        Self {
            // SAFETY: guaranteed non-null by the caller.
            ptr: unsafe { NonNull::new_unchecked(raw) },
            _owns: PhantomData,
        }
    }

    /// Borrows the atomic storage behind a raw handle without taking
    /// ownership.
    ///
    /// # Safety
    /// `raw` must come from [`AtomicCell::into_raw`] and stay live for `'a`.
    pub(crate) unsafe fn storage_from_raw<'a>(raw: *const T::Atomic) -> &'a T::Atomic {
        debug_assert!(!raw.is_null(), "null {} cell handle", T::NAME);
        // SAFETY: caller guarantees a live allocation.
        unsafe { &*raw }
    }

    #[inline(always)]
    fn storage(&self) -> &T::Atomic {
        // SAFETY: the allocation lives as long as `self`.
        unsafe { self.ptr.as_ref() }
    }

    /// Atomically replaces the value.
    ///
    /// # Panics
    /// Panics if `order` is `Consume`, `Acquire` or `AcquireRelease`.
    #[inline]
    pub fn store(&self, value: T, order: MemoryOrder) {
        store::<T>(self.storage(), value, order);
    }

    /// Atomically reads the value.
    ///
    /// # Panics
    /// Panics if `order` is `Release` or `AcquireRelease`.
    #[inline]
    pub fn load(&self, order: MemoryOrder) -> T {
        load::<T>(self.storage(), order)
    }

    /// Atomically writes `value`, returning the previous value.
    #[inline]
    pub fn exchange(&self, value: T, order: MemoryOrder) -> T {
        T::swap(self.storage(), value, order.translate())
    }

    /// Stores `new` if the current value equals `current`.
    ///
    /// # Errors
    /// Returns the observed value if it differed from `current`.
    ///
    /// # Panics
    /// Panics if `failure` is `Release` or `AcquireRelease`.
    #[inline]
    pub fn compare_exchange(
        &self,
        current: T,
        new: T,
        success: MemoryOrder,
        failure: MemoryOrder,
    ) -> Result<T, T> {
        debug_assert!(
            failure.is_valid_for_load(),
            "{failure} is not a valid failure ordering"
        );
        T::compare_exchange(
            self.storage(),
            current,
            new,
            success.translate(),
            failure.translate(),
        )
    }

    /// Wrapping add, returning the previous value.
    #[inline]
    pub fn fetch_add(&self, operand: T, order: MemoryOrder) -> T {
        T::fetch_add(self.storage(), operand, order.translate())
    }

    /// Wrapping subtract, returning the previous value.
    #[inline]
    pub fn fetch_sub(&self, operand: T, order: MemoryOrder) -> T {
        T::fetch_sub(self.storage(), operand, order.translate())
    }

    /// Bitwise OR, returning the previous value.
    #[inline]
    pub fn fetch_or(&self, operand: T, order: MemoryOrder) -> T {
        T::fetch_or(self.storage(), operand, order.translate())
    }

    /// Bitwise XOR, returning the previous value.
    #[inline]
    pub fn fetch_xor(&self, operand: T, order: MemoryOrder) -> T {
        T::fetch_xor(self.storage(), operand, order.translate())
    }

    /// Bitwise AND, returning the previous value.
    #[inline]
    pub fn fetch_and(&self, operand: T, order: MemoryOrder) -> T {
        T::fetch_and(self.storage(), operand, order.translate())
    }

    /// Wrapping add; the updated cell is the only effect.
    #[inline(always)]
    pub fn add(&self, operand: T, order: MemoryOrder) {
        self.fetch_add(operand, order);
    }

    /// Wrapping subtract; the updated cell is the only effect.
    #[inline(always)]
    pub fn sub(&self, operand: T, order: MemoryOrder) {
        self.fetch_sub(operand, order);
    }

    /// Bitwise OR; the updated cell is the only effect.
    #[inline(always)]
    pub fn or(&self, operand: T, order: MemoryOrder) {
        self.fetch_or(operand, order);
    }

    /// Bitwise XOR; the updated cell is the only effect.
    #[inline(always)]
    pub fn xor(&self, operand: T, order: MemoryOrder) {
        self.fetch_xor(operand, order);
    }

    /// Bitwise AND; the updated cell is the only effect.
    #[inline(always)]
    pub fn and(&self, operand: T, order: MemoryOrder) {
        self.fetch_and(operand, order);
    }

    /// Consumes the cell, returning the final value.
    pub fn into_inner(self) -> T {
        // Exclusive ownership: no concurrent writer can exist.
        self.load(MemoryOrder::Relaxed)
    }
}

impl<T: AtomicInteger> AtomicCell<T> {
    /// Adds one, returning the previous value.
    #[inline]
    pub fn increment(&self, order: MemoryOrder) -> T {
        self.fetch_add(T::one(), order)
    }

    /// Subtracts one, returning the previous value.
    #[inline]
    pub fn decrement(&self, order: MemoryOrder) -> T {
        self.fetch_sub(T::one(), order)
    }
}

/// Store with the ordering contract checked.
#[inline(always)]
pub(crate) fn store<T: AtomicScalar>(atomic: &T::Atomic, value: T, order: MemoryOrder) {
    debug_assert!(
        order.is_valid_for_store(),
        "{order} is not a valid ordering for a {} store",
        T::NAME
    );
    T::store(atomic, value, order.translate());
}

/// Load with the ordering contract checked.
#[inline(always)]
pub(crate) fn load<T: AtomicScalar>(atomic: &T::Atomic, order: MemoryOrder) -> T {
    debug_assert!(
        order.is_valid_for_load(),
        "{order} is not a valid ordering for a {} load",
        T::NAME
    );
    T::load(atomic, order.translate())
}

impl<T: AtomicScalar> Drop for AtomicCell<T> {
    fn drop(&mut self) {
        // SAFETY: `ptr` was allocated in `try_new` with `LAYOUT` and is dropped
        // exactly once here.
        unsafe {
            core::ptr::drop_in_place(self.ptr.as_ptr());
            dealloc(self.ptr.as_ptr().cast(), Self::LAYOUT);
        }
    }
}

impl<T: AtomicScalar + Default> Default for AtomicCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: AtomicScalar> From<T> for AtomicCell<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: AtomicScalar> fmt::Debug for AtomicCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicCell")
            .field(&self.load(MemoryOrder::SequentiallyConsistent))
            .finish()
    }
}
