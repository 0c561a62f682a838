//! Recoverable failures.

/// The allocator could not provide storage for a new cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocError;

impl core::fmt::Display for AllocError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("atomic cell allocation failed")
    }
}

impl std::error::Error for AllocError {}
