//! Reinterpret complex buffers as interleaved `[re, im, re, im, ...]` slices.
//!
//! `Complex<T>` is `repr(C)` with two `T` fields, so a slice of `n` complex
//! values is exactly a slice of `2n` components over the same memory. The
//! casts go through `bytemuck`, which checks size and alignment.

use bytemuck::Pod;
use num_complex::Complex;

/// View a complex slice as its interleaved components.
#[inline]
pub(crate) fn as_interleaved<F: Pod>(src: &[Complex<F>]) -> &[F] {
    bytemuck::cast_slice(src)
}

/// Mutable variant of [`as_interleaved`].
#[inline]
pub(crate) fn as_interleaved_mut<F: Pod>(dst: &mut [Complex<F>]) -> &mut [F] {
    bytemuck::cast_slice_mut(dst)
}
