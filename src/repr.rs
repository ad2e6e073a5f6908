//! The assumed in-memory layout of `Bytes` and `BytesMut`, and the header
//! value types read out of it.
//!
//! Every other module rests on the single assumption isolated here: the
//! mirror structs below declare the exact fields of `bytes::Bytes`
//! (`{ptr, len, data, vtable}`) and `bytes::BytesMut`
//! (`{ptr, len, cap, data}`). Both real types are `repr(Rust)`, so the
//! mirrors must NOT be `#[repr(C)]`: the compiler is free to reorder a
//! `repr(Rust)` struct's fields, but it lays out two structs with
//! identical field declarations identically, which is what makes the
//! `transmute` sound. The size and alignment assertions below pin the
//! field sets; if `bytes` ever adds, removes, or retypes a field, every
//! consumer of this crate breaks silently.

use core::{
    mem,
    ptr::NonNull,
    slice,
    sync::atomic::{AtomicPtr, Ordering},
};

use bytes::{Bytes, BytesMut};

// Field-for-field mirror of `bytes::Bytes`.
#[allow(unused)]
pub(crate) struct BytesRepr {
    pub(crate) ptr: *const u8,
    pub(crate) len: usize,
    // refcount / shared state; `to_buf_uncapped` reads this word raw via
    // `data_word`, nothing else touches it.
    data: AtomicPtr<()>,
    vtable: &'static (),
}

// Field-for-field mirror of `bytes::BytesMut`.
#[allow(unused)]
pub(crate) struct BytesMutRepr {
    pub(crate) ptr: NonNull<u8>,
    pub(crate) len: usize,
    pub(crate) cap: usize,
    data: *mut (),
}

const _: () = assert!(mem::size_of::<Bytes>() == mem::size_of::<BytesRepr>());
const _: () = assert!(mem::align_of::<Bytes>() == mem::align_of::<BytesRepr>());
const _: () = assert!(mem::size_of::<BytesMut>() == mem::size_of::<BytesMutRepr>());
const _: () = assert!(mem::align_of::<BytesMut>() == mem::align_of::<BytesMutRepr>());

impl BytesRepr {
    #[inline(always)]
    pub(crate) fn of(seq: &Bytes) -> &Self {
        unsafe { mem::transmute(seq) }
    }

    // The shared-state word of the header, exposed raw for the uncapped
    // conversion.
    #[inline(always)]
    pub(crate) fn data_word(&self) -> usize {
        self.data.load(Ordering::Relaxed) as usize
    }
}

impl BytesMutRepr {
    #[inline(always)]
    pub(crate) fn of(buf: &BytesMut) -> &Self {
        unsafe { mem::transmute(buf) }
    }
}

/// Header of an immutable byte sequence: data pointer and length.
///
/// A `SeqHeader` does not own the bytes it points at and does not keep them
/// alive; the handle it was read from must outlive every use of it.
/// Equality compares the pointer and length words, not the byte content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeqHeader {
    /// Address of the first byte of the backing storage.
    pub ptr: *const u8,
    /// Number of readable bytes.
    pub len: usize,
}

/// Header of a mutable byte-buffer view: data pointer, length, capacity.
///
/// Like [`SeqHeader`] this is a non-owning alias over someone else's
/// storage. `cap` is only meaningful for headers produced by [`to_buf`]
/// or read from a real `BytesMut`; [`to_buf_uncapped`] leaves it
/// unspecified.
///
/// [`to_buf`]: crate::to_buf
/// [`to_buf_uncapped`]: crate::to_buf_uncapped
#[derive(Clone, Copy, Debug)]
pub struct BufHeader {
    /// Address of the first byte of the backing storage.
    pub ptr: *mut u8,
    /// Number of initialized bytes.
    pub len: usize,
    /// Writable extent of the backing storage, when specified.
    pub cap: usize,
}

/// Reads the `{ptr, len}` header of `seq` directly from its in-memory
/// representation.
#[inline(always)]
#[must_use]
pub fn header_of(seq: &Bytes) -> SeqHeader {
    let repr = BytesRepr::of(seq);
    SeqHeader {
        ptr: repr.ptr,
        len: repr.len,
    }
}

/// Address of the backing storage of `seq`.
///
/// Shorthand for `header_of(seq).ptr`, for call sites that only want the
/// address (logging, equality checks) without a full header.
#[inline(always)]
#[must_use]
pub fn data_ptr_of(seq: &Bytes) -> *const u8 {
    BytesRepr::of(seq).ptr
}

impl SeqHeader {
    /// Materializes the header as a byte slice.
    ///
    /// # Safety
    ///
    /// The storage `ptr` points at must still be live, must hold at least
    /// `len` initialized bytes, and must not be mutated through any alias
    /// for the chosen lifetime `'a`.
    #[inline(always)]
    #[must_use]
    pub unsafe fn as_slice<'a>(self) -> &'a [u8] {
        unsafe { slice::from_raw_parts(self.ptr, self.len) }
    }
}

impl BufHeader {
    /// Materializes the header as a mutable byte slice of `len` bytes.
    ///
    /// # Safety
    ///
    /// The storage `ptr` points at must still be live with at least `len`
    /// initialized bytes, the caller must have exclusive access to it for
    /// the chosen lifetime `'a`, and writing through the result must not
    /// violate an immutability promise made elsewhere (a header obtained
    /// from a `Bytes` aliases storage other code may rely on never
    /// changing). Must not be called on a header whose capacity came from
    /// [`to_buf_uncapped`](crate::to_buf_uncapped).
    #[inline(always)]
    #[must_use]
    pub unsafe fn as_mut_slice<'a>(self) -> &'a mut [u8] {
        debug_assert!(self.cap >= self.len);
        unsafe { slice::from_raw_parts_mut(self.ptr, self.len) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    extern crate alloc;

    use alloc::vec;

    #[test]
    fn header_matches_public_accessors() {
        let seq = Bytes::from_static(b"header probe");
        let h = header_of(&seq);

        assert_eq!(h.ptr, seq.as_ptr());
        assert_eq!(h.len, seq.len());
    }

    #[test]
    fn header_of_heap_backed_sequence() {
        let seq = Bytes::from(vec![1u8, 2, 3, 4, 5]);
        let h = header_of(&seq);

        assert_eq!(h.ptr, seq.as_ptr());
        assert_eq!(h.len, 5);
    }

    #[test]
    fn data_ptr_is_header_ptr() {
        let seq = Bytes::from_static(b"addr only");

        assert_eq!(data_ptr_of(&seq), seq.as_ptr());
        assert_eq!(data_ptr_of(&seq), header_of(&seq).ptr);
    }

    #[test]
    fn empty_sequence_header() {
        let seq = Bytes::new();
        let h = header_of(&seq);

        assert_eq!(h.len, 0);
    }

    #[test]
    fn materialized_mut_slice_writes_through() {
        let mut storage = [0u8; 8];
        let h = BufHeader {
            ptr: storage.as_mut_ptr(),
            len: 4,
            cap: 8,
        };

        let view = unsafe { h.as_mut_slice() };
        assert_eq!(view.len(), 4);
        view.fill(0x5A);

        assert_eq!(storage, [0x5A, 0x5A, 0x5A, 0x5A, 0, 0, 0, 0]);
    }

    #[test]
    fn materialized_slice_is_content_identical() {
        let seq = Bytes::from_static(b"round trip bytes");
        let h = header_of(&seq);

        let view = unsafe { h.as_slice() };
        assert_eq!(view, &seq[..]);
        assert_eq!(view.as_ptr(), seq.as_ptr());
    }
}
