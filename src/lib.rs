//! Base-tier broadcasting and elementwise kernels for nested and strided arrays.
//!
//! The crate is organised around one engine: operands of possibly different
//! shapes are aligned right-to-left, broadcast dimensions get stride `0`, and
//! an n-ary callback is applied in lockstep across every operand into an
//! output container.
//!
//! # Operands
//!
//! - [`StridedView`] / [`StridedViewMut`]: flat buffers addressed through
//!   `dims`, `strides` and `offset`. The buffer is anything implementing
//!   [`Accessor`] (plain slices and `Vec`s, [`BoolArray`], [`ComplexArray`]).
//! - [`NestedArray`]: rank-agnostic nested arrays, plus rank-2 helpers that
//!   operate on `[Vec<T>]` directly.
//!
//! # Operations
//!
//! - Stride resolution and shape broadcasting: [`resolve_stride`],
//!   [`broadcast_strides`], [`broadcast_shapes`], [`broadcast_array`],
//!   [`StridedView::broadcast`]
//! - Strided appliers: [`unary`] .. [`quinary`], [`broadcast_unary`] ..
//!   [`broadcast_quinary`], [`mask_unary`], [`mask_binary`]
//! - Conditional selection: [`select_where`], [`select_where_into`]
//! - Nested appliers: [`unary_nd`] .. [`quinary_nd`] and the rank-2 family
//!   [`unary2d`] .. [`quinary2d`]
//! - Flatten / reshape: [`flatten_nd`], [`flatten2d`], [`strided_to_nested`]
//! - Generators: [`filled_nd`], [`zeros_nd`], [`ones_nd`], [`TypedBuffer`]
//!
//! # Example
//!
//! ```rust
//! use strided_base::{broadcast_binary, StridedView, StridedViewMut};
//!
//! // [2, 3] + [3] -> [2, 3]
//! let a = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let b = vec![10.0, 20.0, 30.0];
//! let mut out = vec![0.0; 6];
//!
//! let a = StridedView::contiguous(&a[..], &[2, 3]).unwrap();
//! let b = StridedView::contiguous(&b[..], &[3]).unwrap();
//! let mut dest = StridedViewMut::contiguous(&mut out[..], &[2, 3]).unwrap();
//!
//! broadcast_binary(&a, &b, &mut dest, |x, y| x + y).unwrap();
//! assert_eq!(out, vec![11.0, 22.0, 33.0, 14.0, 25.0, 36.0]);
//! ```
//!
//! # Conventions
//!
//! This is the unchecked base tier. Nested arrays are assumed to be
//! rectangular: ragged input produces partial output, not an error. Flat
//! views are bounds-checked once at construction so the kernels never read
//! outside their buffers.

mod accessor;
mod apply;
mod apply2d;
mod dtype;
mod fill;
mod flatten;
mod fuse;
mod interleaved;
mod kernel;
mod nested;
mod nested_apply;
mod select;
pub mod shape;
mod typed;
pub mod view;

// ============================================================================
// Operand model
// ============================================================================
pub use accessor::{Accessor, AccessorMut, Raw, RawMut};
pub use dtype::{DType, Element, Truthy};
pub use typed::{BoolArray, Complex128Array, Complex64Array, ComplexArray, ComplexPart, TypedBuffer};
pub use view::{StridedView, StridedViewMut};

// ============================================================================
// Shapes and strides
// ============================================================================
pub use shape::{
    broadcast_shapes, broadcast_strides, col_major_strides, numel, promote_strides,
    resolve_stride, row_major_strides, strided_len,
};

// ============================================================================
// Strided appliers
// ============================================================================
pub use apply::{
    binary, binary_in_place, broadcast_binary, broadcast_quaternary, broadcast_quinary,
    broadcast_ternary, broadcast_unary, mask_binary, mask_unary, quaternary, quinary, ternary,
    unary, unary_in_place,
};

// ============================================================================
// Conditional selection
// ============================================================================
pub use select::{select_where, select_where_into};

// ============================================================================
// Nested arrays
// ============================================================================
pub use apply2d::{
    binary2d, broadcast_binary2d, broadcast_unary2d, mask_binary2d, mask_unary2d, quaternary2d,
    quinary2d, ternary2d, unary2d,
};
pub use nested::{broadcast_array, BroadcastArray, NestedArray};
pub use nested_apply::{
    binary_nd, broadcast_binary_nd, broadcast_quaternary_nd, broadcast_quinary_nd,
    broadcast_ternary_nd, broadcast_unary_nd, mask_binary_nd, mask_unary_nd, quaternary_nd,
    quinary_nd, ternary_nd, unary_nd,
};

// ============================================================================
// Flatten and generators
// ============================================================================
pub use fill::{
    filled, filled2d, filled2d_by, filled_nd, filled_nd_by, ones, ones2d, ones_nd, zeros, zeros2d,
    zeros_nd,
};
pub use flatten::{
    flatten2d, flatten2d_by, flatten2d_into, flatten_nd, flatten_nd_by, flatten_nd_by_into,
    flatten_nd_into, strided_to_nested,
};

// ============================================================================
// Error types
// ============================================================================

/// Errors raised by the broadcasting and apply engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StridedError {
    /// An operand shape cannot be aligned to the target shape.
    #[error("cannot broadcast shape {from:?} to shape {to:?}")]
    Broadcast { from: Vec<usize>, to: Vec<usize> },

    /// Array ranks do not match.
    #[error("rank mismatch: {0} vs {1}")]
    RankMismatch(usize, usize),

    /// Array shapes differ where identical shapes are required.
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// Stride array length doesn't match dimensions.
    #[error("stride and dims length mismatch")]
    StrideLengthMismatch,

    /// A view would address a position outside its buffer.
    #[error("offset overflow while computing element position")]
    OffsetOverflow,

    /// The dtype tag is not one of the known storage tags.
    #[error("unknown dtype `{0}`")]
    UnknownDType(String),
}

impl StridedError {
    /// Returns true for broadcast-incompatibility failures.
    pub fn is_broadcast(&self) -> bool {
        matches!(self, StridedError::Broadcast { .. })
    }
}

/// Result type for strided operations.
pub type Result<T> = std::result::Result<T, StridedError>;
