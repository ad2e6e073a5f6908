//! Zero-copy conversions between the two header shapes.
//!
//! Each conversion copies two or three machine words out of the source's
//! header and returns them reshaped; the data pointer of the result always
//! aliases the source's backing storage. No branch depends on buffer
//! content and nothing is allocated, so each function reduces to a handful
//! of moves after inlining.

use bytes::{Bytes, BytesMut};

use crate::repr::{BufHeader, BytesMutRepr, BytesRepr, SeqHeader};

/// Views an immutable sequence as a mutable buffer header, capacity
/// initialized.
///
/// The result aliases `seq`'s bytes with `len` and `cap` both equal to
/// `seq.len()`. Setting `cap` is an explicit step, not a property of the
/// reinterpretation; see [`to_buf_uncapped`] for the variant that skips it.
///
/// The caller now holds a handle capable of mutating storage that the rest
/// of the program believes is immutable. The function itself mutates
/// nothing; actually writing through the result is only sound under the
/// conditions on [`BufHeader::as_mut_slice`].
#[inline(always)]
#[must_use]
pub fn to_buf(seq: &Bytes) -> BufHeader {
    let repr = BytesRepr::of(seq);
    BufHeader {
        ptr: repr.ptr.cast_mut(),
        len: repr.len,
        cap: repr.len,
    }
}

/// Views an immutable sequence as a mutable buffer header without
/// initializing capacity.
///
/// Same pointer/length aliasing as [`to_buf`], one word-store shorter: the
/// result's `cap` is the raw shared-state word of the source's header, not
/// a capacity anyone computed. Callers must treat `cap` as unusable — any
/// operation that consults it (growth checks, re-slicing to capacity,
/// [`BufHeader::as_mut_slice`]) is off the table for this result.
#[inline(always)]
#[must_use]
pub fn to_buf_uncapped(seq: &Bytes) -> BufHeader {
    let repr = BytesRepr::of(seq);
    BufHeader {
        ptr: repr.ptr.cast_mut(),
        len: repr.len,
        cap: repr.data_word(),
    }
}

/// Views a mutable buffer as an immutable sequence header.
///
/// The result aliases `buf`'s bytes with the same length; the capacity word
/// is dropped, as the immutable shape has no slot for it. Nothing is frozen
/// by this: a later write through `buf` (or any other alias) changes the
/// content observed through the result.
#[inline(always)]
#[must_use]
pub fn to_seq(buf: &BytesMut) -> SeqHeader {
    let repr = BytesMutRepr::of(buf);
    SeqHeader {
        ptr: repr.ptr.as_ptr().cast_const(),
        len: repr.len,
    }
}

impl BufHeader {
    /// Projects the header down to the immutable shape, dropping `cap`.
    ///
    /// Header-to-header form of [`to_seq`], usable on headers that never
    /// came from a real `BytesMut`.
    #[inline(always)]
    #[must_use]
    pub const fn as_seq(self) -> SeqHeader {
        SeqHeader {
            ptr: self.ptr.cast_const(),
            len: self.len,
        }
    }
}
