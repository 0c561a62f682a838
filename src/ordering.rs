//! Memory-ordering intents and their translation to native orderings.
//!
//! [`MemoryOrder`] is the closed set of ordering intents accepted by every
//! cell operation. Its discriminants are the C11 `memory_order` values, so a
//! foreign caller can pass an ordering as a plain integer and get the same
//! meaning it would get from `<stdatomic.h>`.
//!
//! Rust has no consume ordering; [`MemoryOrder::Consume`] translates to
//! [`Ordering::Acquire`], which is how every mainstream C11 compiler treats it
//! as well.

use core::fmt;
use core::sync::atomic::Ordering;

use serde::{Deserialize, Serialize};

/// An abstract memory-ordering intent.
///
/// The default is [`MemoryOrder::SequentiallyConsistent`], the ordering every
/// non-explicit operation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum MemoryOrder {
    /// Atomicity only, no ordering.
    Relaxed = 0,
    /// Data-dependency ordering for loads. Treated as `Acquire`.
    Consume = 1,
    /// Later accesses cannot move before this load.
    Acquire = 2,
    /// Earlier accesses cannot move after this store.
    Release = 3,
    /// `Acquire` and `Release` combined, for read-modify-write operations.
    #[serde(alias = "acq_rel")]
    AcquireRelease = 4,
    /// Single total order over all `SequentiallyConsistent` operations.
    #[default]
    #[serde(alias = "seq_cst")]
    SequentiallyConsistent = 5,
}

impl MemoryOrder {
    /// Every intent, in discriminant order.
    pub const ALL: [MemoryOrder; 6] = [
        MemoryOrder::Relaxed,
        MemoryOrder::Consume,
        MemoryOrder::Acquire,
        MemoryOrder::Release,
        MemoryOrder::AcquireRelease,
        MemoryOrder::SequentiallyConsistent,
    ];

    /// Translates the intent to the native ordering used by the hardware
    /// read/modify/write sequence.
    #[inline(always)]
    pub const fn translate(self) -> Ordering {
        match self {
            MemoryOrder::Relaxed => Ordering::Relaxed,
            MemoryOrder::Consume | MemoryOrder::Acquire => Ordering::Acquire,
            MemoryOrder::Release => Ordering::Release,
            MemoryOrder::AcquireRelease => Ordering::AcqRel,
            MemoryOrder::SequentiallyConsistent => Ordering::SeqCst,
        }
    }

    /// Whether the intent is meaningful for a pure load.
    #[inline(always)]
    pub const fn is_valid_for_load(self) -> bool {
        !matches!(self, MemoryOrder::Release | MemoryOrder::AcquireRelease)
    }

    /// Whether the intent is meaningful for a pure store.
    #[inline(always)]
    pub const fn is_valid_for_store(self) -> bool {
        matches!(
            self,
            MemoryOrder::Relaxed | MemoryOrder::Release | MemoryOrder::SequentiallyConsistent
        )
    }

    /// The C11 integer encoding of this intent.
    #[inline(always)]
    pub const fn as_raw(self) -> i32 {
        self as i32
    }

    /// Decodes a C11 integer encoding.
    ///
    /// # Errors
    /// Returns [`UnknownOrder`] if `raw` is not one of the six encodings.
    pub const fn from_raw(raw: i32) -> Result<Self, UnknownOrder> {
        match raw {
            0 => Ok(MemoryOrder::Relaxed),
            1 => Ok(MemoryOrder::Consume),
            2 => Ok(MemoryOrder::Acquire),
            3 => Ok(MemoryOrder::Release),
            4 => Ok(MemoryOrder::AcquireRelease),
            5 => Ok(MemoryOrder::SequentiallyConsistent),
            other => Err(UnknownOrder(other)),
        }
    }
}

impl From<MemoryOrder> for Ordering {
    #[inline(always)]
    fn from(order: MemoryOrder) -> Self {
        order.translate()
    }
}

impl TryFrom<i32> for MemoryOrder {
    type Error = UnknownOrder;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        MemoryOrder::from_raw(raw)
    }
}

impl fmt::Display for MemoryOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MemoryOrder::Relaxed => "relaxed",
            MemoryOrder::Consume => "consume",
            MemoryOrder::Acquire => "acquire",
            MemoryOrder::Release => "release",
            MemoryOrder::AcquireRelease => "acq_rel",
            MemoryOrder::SequentiallyConsistent => "seq_cst",
        })
    }
}

/// An integer that does not encode any [`MemoryOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownOrder(pub i32);

impl fmt::Display for UnknownOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown memory order encoding {}", self.0)
    }
}

impl std::error::Error for UnknownOrder {}
