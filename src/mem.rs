//! Memory primitives consumed by the loader.
//!
//! The boot environment links `memmove`/`memcmp` from its own assembly routines; on a
//! host the same symbols come from the C library.

use core::cmp::min;

/// Bulk copy and compare over byte spans.
pub trait Memory {
    /// Copies `src` into `dst`. Callers pass spans of the same length.
    fn copy(&self, dst: &mut [u8], src: &[u8]);

    /// Returns `true` if `a` and `b` hold the same bytes.
    fn equal(&self, a: &[u8], b: &[u8]) -> bool;
}

/// Uses the compiler's own slice operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct Intrinsic;

impl Memory for Intrinsic {
    fn copy(&self, dst: &mut [u8], src: &[u8]) {
        dst.copy_from_slice(src);
    }

    fn equal(&self, a: &[u8], b: &[u8]) -> bool {
        a == b
    }
}

/// Calls the C-ABI `memmove` and `memcmp`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Libc;

impl Memory for Libc {
    fn copy(&self, dst: &mut [u8], src: &[u8]) {
        let len = min(dst.len(), src.len());

        unsafe { libc::memmove(dst.as_mut_ptr().cast(), src.as_ptr().cast(), len) };
    }

    fn equal(&self, a: &[u8], b: &[u8]) -> bool {
        if a.len() != b.len() {
            return false;
        }

        unsafe { libc::memcmp(a.as_ptr().cast(), b.as_ptr().cast(), a.len()) == 0 }
    }
}
