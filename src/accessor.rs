//! Uniform element access over indexed buffers and accessor-protocol storage.
//!
//! Every operand is reached through [`Accessor`] / [`AccessorMut`]. Plain
//! buffers additionally expose themselves as slices (`as_indexed`), which lets
//! callers pick a bracket-indexed loop once per call instead of branching per
//! element. Storage with a non-trivial layout (booleans held as bytes,
//! complex numbers held as interleaved components) exposes a [`Raw`]
//! reinterpretation of its backing memory.

use crate::dtype::{DType, Element};

/// Zero-copy reinterpretation of an operand's backing storage.
#[derive(Debug, Clone, Copy)]
pub enum Raw<'a> {
    /// One byte per logical element.
    Bytes(&'a [u8]),
    /// Two `f32` components (re, im) per logical element.
    Interleaved32(&'a [f32]),
    /// Two `f64` components (re, im) per logical element.
    Interleaved64(&'a [f64]),
}

/// Mutable counterpart of [`Raw`].
#[derive(Debug)]
pub enum RawMut<'a> {
    Bytes(&'a mut [u8]),
    Interleaved32(&'a mut [f32]),
    Interleaved64(&'a mut [f64]),
}

/// Read access to a one-dimensional buffer of logical elements.
pub trait Accessor {
    /// Logical element type.
    type Elem: Copy;

    /// Number of logical elements.
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Storage dtype tag.
    fn dtype(&self) -> DType;

    /// Read the logical element at `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    fn get(&self, index: usize) -> Self::Elem;

    /// The buffer as a directly indexable slice, if it is one.
    #[inline]
    fn as_indexed(&self) -> Option<&[Self::Elem]> {
        None
    }

    /// Raw reinterpretation of the backing storage, if it has one.
    #[inline]
    fn raw(&self) -> Option<Raw<'_>> {
        None
    }

    /// Whether elements must be reached through `get`/`set` rather than
    /// bracket indexing.
    #[inline]
    fn uses_accessors(&self) -> bool {
        self.as_indexed().is_none()
    }
}

/// Write access to a one-dimensional buffer of logical elements.
pub trait AccessorMut: Accessor {
    /// Write the logical element at `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    fn set(&mut self, index: usize, value: Self::Elem);

    #[inline]
    fn as_indexed_mut(&mut self) -> Option<&mut [Self::Elem]> {
        None
    }

    #[inline]
    fn raw_mut(&mut self) -> Option<RawMut<'_>> {
        None
    }
}

impl<T: Element> Accessor for [T] {
    type Elem = T;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn dtype(&self) -> DType {
        T::DTYPE
    }

    #[inline(always)]
    fn get(&self, index: usize) -> T {
        self[index]
    }

    #[inline]
    fn as_indexed(&self) -> Option<&[T]> {
        Some(self)
    }
}

impl<T: Element> AccessorMut for [T] {
    #[inline(always)]
    fn set(&mut self, index: usize, value: T) {
        self[index] = value;
    }

    #[inline]
    fn as_indexed_mut(&mut self) -> Option<&mut [T]> {
        Some(self)
    }
}

macro_rules! forward_to_slice {
    ($([$($gen:tt)*] $ty:ty),*) => {
        $(
            impl<$($gen)*> Accessor for $ty {
                type Elem = T;

                #[inline]
                fn len(&self) -> usize {
                    self.as_slice().len()
                }

                #[inline]
                fn dtype(&self) -> DType {
                    T::DTYPE
                }

                #[inline(always)]
                fn get(&self, index: usize) -> T {
                    self.as_slice()[index]
                }

                #[inline]
                fn as_indexed(&self) -> Option<&[T]> {
                    Some(self.as_slice())
                }
            }

            impl<$($gen)*> AccessorMut for $ty {
                #[inline(always)]
                fn set(&mut self, index: usize, value: T) {
                    self.as_mut_slice()[index] = value;
                }

                #[inline]
                fn as_indexed_mut(&mut self) -> Option<&mut [T]> {
                    Some(self.as_mut_slice())
                }
            }
        )*
    };
}

forward_to_slice!([T: Element] Vec<T>, [T: Element, const N: usize] [T; N]);
