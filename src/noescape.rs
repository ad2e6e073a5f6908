//! Hiding a pointer's provenance from the optimizer.
//!
//! The most dangerous functions in the crate. Passing a pointer through
//! [`obscure`] severs the data-flow chain the optimizer uses to reason
//! about where the pointee can be reached from, so a value referenced only
//! through the result is not pessimized (spilled, copied, or kept alive
//! longer) on account of a call it is handed to.

use core::{hint::black_box, ptr};

/// Returns `p` unchanged through a transformation the optimizer cannot
/// fold away.
///
/// The address round-trips through an exposed integer and an opaque
/// identity, so the result numerically equals `p` while looking like a
/// fresh, unrelated pointer to any provenance-tracking analysis.
///
/// Only sound to use when the caller can prove, outside the type system,
/// that the pointee outlives every use of the returned pointer; the
/// optimizer is being told a lie about reachability, and nothing will keep
/// the pointee alive on the caller's behalf. Dereferencing the result is
/// `unsafe` as with any raw pointer, and a dangling result is undefined
/// behavior at the point of use, not here.
#[inline(always)]
#[must_use]
pub fn obscure<T>(p: *const T) -> *const T {
    ptr::with_exposed_provenance(black_box(p.expose_provenance()))
}

/// Mutable-pointer form of [`obscure`]; same identity guarantee, same
/// lifetime obligations.
#[inline(always)]
#[must_use]
pub fn obscure_mut<T>(p: *mut T) -> *mut T {
    ptr::with_exposed_provenance_mut(black_box(p.expose_provenance()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obscure_is_identity_on_locals() {
        let value = 0xA5u8;
        let p: *const u8 = &value;

        assert_eq!(obscure(p), p);
    }

    #[test]
    fn obscure_is_identity_on_null_and_dangling() {
        assert_eq!(obscure(ptr::null::<u64>()), ptr::null());

        let dangling = ptr::NonNull::<u32>::dangling().as_ptr();
        assert_eq!(obscure_mut(dangling), dangling);
    }

    #[test]
    fn obscured_pointer_reads_the_same_value() {
        let value = 0xDEAD_BEEFu32;
        let p = obscure(&raw const value);

        assert_eq!(unsafe { *p }, 0xDEAD_BEEF);
    }
}
