//! Zero-copy header reinterpretation for runtime-managed byte storage.
//!
//! Primitives for viewing an immutable byte sequence ([`bytes::Bytes`]) as a
//! mutable-looking buffer header and back without touching the underlying
//! bytes, plus [`obscure`], which hides a pointer's provenance from the
//! optimizer.
//!
//! Nothing here copies, allocates, or checks anything at runtime. Every
//! function hands back raw header values whose data pointer aliases the
//! source's backing storage; keeping that storage alive, and not mutating
//! through an alias of supposedly-immutable bytes, is entirely the caller's
//! job. Misuse is undefined behavior, not an error return.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
extern crate std;

mod convert;
mod noescape;
mod repr;

pub use convert::{to_buf, to_buf_uncapped, to_seq};
pub use noescape::{obscure, obscure_mut};
pub use repr::{data_ptr_of, header_of, BufHeader, SeqHeader};
