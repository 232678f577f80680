//! Rank-agnostic appliers over nested arrays.
//!
//! Positions are visited in row-major order of `shape` with a multi-index
//! odometer. The input arrays are trusted to match their shapes: any
//! position that is missing from an operand or from `out` is skipped, so
//! ragged input gives partial output rather than an error.

use crate::dtype::Truthy;
use crate::kernel::for_each_index;
use crate::nested::{broadcast_array, NestedArray};
use crate::Result;

// ============================================================================
// Same-shape
// ============================================================================

/// Apply `f` to every element of `x` and store the result at the same
/// position of `out`.
///
/// `x` and `out` are assumed to have `shape`. Positions missing from either
/// array (ragged input) are skipped.
///
/// # Example
/// ```rust
/// use strided_base::{unary_nd, zeros_nd, NestedArray};
///
/// let x = NestedArray::from_vec2(vec![vec![1, 2], vec![3, 4]]);
/// let mut out = zeros_nd::<i32>(&[2, 2]);
/// unary_nd(&x, &mut out, &[2, 2], |v| v * v);
/// assert_eq!(out.to_vec2(), vec![vec![1, 4], vec![9, 16]]);
/// ```
pub fn unary_nd<A, U, F>(
    x: &NestedArray<A>,
    out: &mut NestedArray<U>,
    shape: &[usize],
    mut f: F,
) where
    F: FnMut(&A) -> U,
{
    for_each_index(shape, false, |idx| {
        if let (Some(xv), Some(slot)) = (x.get(idx), out.get_mut(idx)) {
            *slot = f(xv);
        }
    });
}

/// Binary counterpart of [`unary_nd`].
pub fn binary_nd<A, B, U, F>(
    x: &NestedArray<A>,
    y: &NestedArray<B>,
    out: &mut NestedArray<U>,
    shape: &[usize],
    mut f: F,
) where
    F: FnMut(&A, &B) -> U,
{
    for_each_index(shape, false, |idx| {
        if let (Some(xv), Some(yv), Some(slot)) = (x.get(idx), y.get(idx), out.get_mut(idx)) {
            *slot = f(xv, yv);
        }
    });
}

/// Ternary counterpart of [`unary_nd`].
pub fn ternary_nd<A, B, C, U, F>(
    x: &NestedArray<A>,
    y: &NestedArray<B>,
    z: &NestedArray<C>,
    out: &mut NestedArray<U>,
    shape: &[usize],
    mut f: F,
) where
    F: FnMut(&A, &B, &C) -> U,
{
    for_each_index(shape, false, |idx| {
        if let (Some(xv), Some(yv), Some(zv), Some(slot)) =
            (x.get(idx), y.get(idx), z.get(idx), out.get_mut(idx))
        {
            *slot = f(xv, yv, zv);
        }
    });
}

pub fn quaternary_nd<A, B, C, D, U, F>(
    x: &NestedArray<A>,
    y: &NestedArray<B>,
    z: &NestedArray<C>,
    w: &NestedArray<D>,
    out: &mut NestedArray<U>,
    shape: &[usize],
    mut f: F,
) where
    F: FnMut(&A, &B, &C, &D) -> U,
{
    for_each_index(shape, false, |idx| {
        if let (Some(xv), Some(yv), Some(zv), Some(wv), Some(slot)) =
            (x.get(idx), y.get(idx), z.get(idx), w.get(idx), out.get_mut(idx))
        {
            *slot = f(xv, yv, zv, wv);
        }
    });
}

/// Five-input counterpart of [`unary_nd`].
#[allow(clippy::too_many_arguments)]
pub fn quinary_nd<A, B, C, D, E, U, F>(
    x: &NestedArray<A>,
    y: &NestedArray<B>,
    z: &NestedArray<C>,
    w: &NestedArray<D>,
    v: &NestedArray<E>,
    out: &mut NestedArray<U>,
    shape: &[usize],
    mut f: F,
) where
    F: FnMut(&A, &B, &C, &D, &E) -> U,
{
    for_each_index(shape, false, |idx| {
        if let (Some(xv), Some(yv), Some(zv), Some(wv), Some(vv), Some(slot)) =
            (x.get(idx), y.get(idx), z.get(idx), w.get(idx), v.get(idx), out.get_mut(idx))
        {
            *slot = f(xv, yv, zv, wv, vv);
        }
    });
}

// ============================================================================
// Broadcasted
// ============================================================================

/// Apply `f` to `x` broadcast from `x_shape` to `shape`.
///
/// # Errors
/// Fails before touching `out` when `x_shape` cannot be broadcast to `shape`.
pub fn broadcast_unary_nd<A, U, F>(
    x: &NestedArray<A>,
    x_shape: &[usize],
    out: &mut NestedArray<U>,
    shape: &[usize],
    mut f: F,
) -> Result<()>
where
    F: FnMut(&A) -> U,
{
    let xb = broadcast_array(x, x_shape, shape)?;
    for_each_index(shape, false, |idx| {
        if let (Some(xv), Some(slot)) = (xb.get(idx), out.get_mut(idx)) {
            *slot = f(xv);
        }
    });
    Ok(())
}

/// Apply a binary `f` to `x` and `y`, each broadcast from its own shape to
/// `shape`.
///
/// # Example
/// ```rust
/// use strided_base::{broadcast_binary_nd, zeros_nd, NestedArray};
///
/// let col = NestedArray::from_vec2(vec![vec![1], vec![2]]);
/// let row = NestedArray::from_vec1(vec![10, 20, 30]);
/// let mut out = zeros_nd::<i32>(&[2, 3]);
/// broadcast_binary_nd(&col, &[2, 1], &row, &[3], &mut out, &[2, 3], |a, b| a * b).unwrap();
/// assert_eq!(out.to_vec2(), vec![vec![10, 20, 30], vec![20, 40, 60]]);
/// ```
pub fn broadcast_binary_nd<A, B, U, F>(
    x: &NestedArray<A>,
    x_shape: &[usize],
    y: &NestedArray<B>,
    y_shape: &[usize],
    out: &mut NestedArray<U>,
    shape: &[usize],
    mut f: F,
) -> Result<()>
where
    F: FnMut(&A, &B) -> U,
{
    let xb = broadcast_array(x, x_shape, shape)?;
    let yb = broadcast_array(y, y_shape, shape)?;
    for_each_index(shape, false, |idx| {
        if let (Some(xv), Some(yv), Some(slot)) = (xb.get(idx), yb.get(idx), out.get_mut(idx)) {
            *slot = f(xv, yv);
        }
    });
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn broadcast_ternary_nd<A, B, C, U, F>(
    x: &NestedArray<A>,
    x_shape: &[usize],
    y: &NestedArray<B>,
    y_shape: &[usize],
    z: &NestedArray<C>,
    z_shape: &[usize],
    out: &mut NestedArray<U>,
    shape: &[usize],
    mut f: F,
) -> Result<()>
where
    F: FnMut(&A, &B, &C) -> U,
{
    let xb = broadcast_array(x, x_shape, shape)?;
    let yb = broadcast_array(y, y_shape, shape)?;
    let zb = broadcast_array(z, z_shape, shape)?;
    for_each_index(shape, false, |idx| {
        if let (Some(xv), Some(yv), Some(zv), Some(slot)) =
            (xb.get(idx), yb.get(idx), zb.get(idx), out.get_mut(idx))
        {
            *slot = f(xv, yv, zv);
        }
    });
    Ok(())
}

/// Quaternary counterpart of [`broadcast_binary_nd`].
#[allow(clippy::too_many_arguments)]
pub fn broadcast_quaternary_nd<A, B, C, D, U, F>(
    x: &NestedArray<A>,
    x_shape: &[usize],
    y: &NestedArray<B>,
    y_shape: &[usize],
    z: &NestedArray<C>,
    z_shape: &[usize],
    w: &NestedArray<D>,
    w_shape: &[usize],
    out: &mut NestedArray<U>,
    shape: &[usize],
    mut f: F,
) -> Result<()>
where
    F: FnMut(&A, &B, &C, &D) -> U,
{
    let xb = broadcast_array(x, x_shape, shape)?;
    let yb = broadcast_array(y, y_shape, shape)?;
    let zb = broadcast_array(z, z_shape, shape)?;
    let wb = broadcast_array(w, w_shape, shape)?;
    for_each_index(shape, false, |idx| {
        if let (Some(xv), Some(yv), Some(zv), Some(wv), Some(slot)) =
            (xb.get(idx), yb.get(idx), zb.get(idx), wb.get(idx), out.get_mut(idx))
        {
            *slot = f(xv, yv, zv, wv);
        }
    });
    Ok(())
}

/// Quinary counterpart of [`broadcast_binary_nd`].
#[allow(clippy::too_many_arguments)]
pub fn broadcast_quinary_nd<A, B, C, D, E, U, F>(
    x: &NestedArray<A>,
    x_shape: &[usize],
    y: &NestedArray<B>,
    y_shape: &[usize],
    z: &NestedArray<C>,
    z_shape: &[usize],
    w: &NestedArray<D>,
    w_shape: &[usize],
    v: &NestedArray<E>,
    v_shape: &[usize],
    out: &mut NestedArray<U>,
    shape: &[usize],
    mut f: F,
) -> Result<()>
where
    F: FnMut(&A, &B, &C, &D, &E) -> U,
{
    let xb = broadcast_array(x, x_shape, shape)?;
    let yb = broadcast_array(y, y_shape, shape)?;
    let zb = broadcast_array(z, z_shape, shape)?;
    let wb = broadcast_array(w, w_shape, shape)?;
    let vb = broadcast_array(v, v_shape, shape)?;
    for_each_index(shape, false, |idx| {
        if let (Some(xv), Some(yv), Some(zv), Some(wv), Some(vv), Some(slot)) =
            (xb.get(idx), yb.get(idx), zb.get(idx), wb.get(idx), vb.get(idx), out.get_mut(idx))
        {
            *slot = f(xv, yv, zv, wv, vv);
        }
    });
    Ok(())
}

// ============================================================================
// Masked
// ============================================================================

/// Apply `f` to `x`, writing into `out` only where `mask` is truthy.
pub fn mask_unary_nd<A, M, U, F>(
    x: &NestedArray<A>,
    mask: &NestedArray<M>,
    out: &mut NestedArray<U>,
    shape: &[usize],
    mut f: F,
) where
    M: Truthy,
    F: FnMut(&A) -> U,
{
    for_each_index(shape, false, |idx| {
        if !mask.get(idx).is_some_and(Truthy::is_truthy) {
            return;
        }
        if let (Some(xv), Some(slot)) = (x.get(idx), out.get_mut(idx)) {
            *slot = f(xv);
        }
    });
}

/// Binary counterpart of [`mask_unary_nd`].
pub fn mask_binary_nd<A, B, M, U, F>(
    x: &NestedArray<A>,
    y: &NestedArray<B>,
    mask: &NestedArray<M>,
    out: &mut NestedArray<U>,
    shape: &[usize],
    mut f: F,
) where
    M: Truthy,
    F: FnMut(&A, &B) -> U,
{
    for_each_index(shape, false, |idx| {
        if !mask.get(idx).is_some_and(Truthy::is_truthy) {
            return;
        }
        if let (Some(xv), Some(yv), Some(slot)) = (x.get(idx), y.get(idx), out.get_mut(idx)) {
            *slot = f(xv, yv);
        }
    });
}
