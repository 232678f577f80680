//! Rank-2 appliers over `Vec<Vec<T>>`.
//!
//! These are the two-level special cases of the nested appliers, working on
//! rows directly instead of through [`NestedArray`](crate::NestedArray).

use crate::dtype::Truthy;
use crate::shape::broadcast_strides;
use crate::Result;

/// Apply `f` to every element of the rank-2 array `x`, storing into `out`.
///
/// Only the leading `shape[0] x shape[1]` block is visited; rows or columns
/// missing from an operand are skipped.
pub fn unary2d<A, U, F>(
    x: &[Vec<A>],
    out: &mut [Vec<U>],
    shape: [usize; 2],
    mut f: F,
) where
    F: FnMut(&A) -> U,
{
    for i in 0..shape[0] {
        let (Some(xr), Some(or)) = (x.get(i), out.get_mut(i)) else {
            continue;
        };
        for j in 0..shape[1] {
            if let (Some(xv), Some(o)) = (xr.get(j), or.get_mut(j)) {
                *o = f(xv);
            }
        }
    }
}

/// Apply a binary `f` to same-shape rank-2 arrays.
///
/// ```rust
/// use strided_base::{binary2d, zeros2d};
///
/// let x = vec![vec![1, 2], vec![3, 4]];
/// let y = vec![vec![5, 6], vec![7, 8]];
/// let mut out = zeros2d::<i32>([2, 2]);
/// binary2d(&x, &y, &mut out, [2, 2], |a, b| a * b);
/// assert_eq!(out, vec![vec![5, 12], vec![21, 32]]);
/// ```
pub fn binary2d<A, B, U, F>(
    x: &[Vec<A>],
    y: &[Vec<B>],
    out: &mut [Vec<U>],
    shape: [usize; 2],
    mut f: F,
) where
    F: FnMut(&A, &B) -> U,
{
    for i in 0..shape[0] {
        let (Some(xr), Some(yr), Some(or)) = (x.get(i), y.get(i), out.get_mut(i)) else {
            continue;
        };
        for j in 0..shape[1] {
            if let (Some(xv), Some(yv), Some(o)) = (xr.get(j), yr.get(j), or.get_mut(j)) {
                *o = f(xv, yv);
            }
        }
    }
}

pub fn ternary2d<A, B, C, U, F>(
    x: &[Vec<A>],
    y: &[Vec<B>],
    z: &[Vec<C>],
    out: &mut [Vec<U>],
    shape: [usize; 2],
    mut f: F,
) where
    F: FnMut(&A, &B, &C) -> U,
{
    for i in 0..shape[0] {
        let (Some(xr), Some(yr), Some(zr), Some(or)) =
            (x.get(i), y.get(i), z.get(i), out.get_mut(i))
        else {
            continue;
        };
        for j in 0..shape[1] {
            if let (Some(xv), Some(yv), Some(zv), Some(o)) =
                (xr.get(j), yr.get(j), zr.get(j), or.get_mut(j))
            {
                *o = f(xv, yv, zv);
            }
        }
    }
}

pub fn quaternary2d<A, B, C, D, U, F>(
    x: &[Vec<A>],
    y: &[Vec<B>],
    z: &[Vec<C>],
    w: &[Vec<D>],
    out: &mut [Vec<U>],
    shape: [usize; 2],
    mut f: F,
) where
    F: FnMut(&A, &B, &C, &D) -> U,
{
    for i in 0..shape[0] {
        let (Some(xr), Some(yr), Some(zr), Some(wr), Some(or)) =
            (x.get(i), y.get(i), z.get(i), w.get(i), out.get_mut(i))
        else {
            continue;
        };
        for j in 0..shape[1] {
            if let (Some(xv), Some(yv), Some(zv), Some(wv), Some(o)) =
                (xr.get(j), yr.get(j), zr.get(j), wr.get(j), or.get_mut(j))
            {
                *o = f(xv, yv, zv, wv);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn quinary2d<A, B, C, D, E, U, F>(
    x: &[Vec<A>],
    y: &[Vec<B>],
    z: &[Vec<C>],
    w: &[Vec<D>],
    v: &[Vec<E>],
    out: &mut [Vec<U>],
    shape: [usize; 2],
    mut f: F,
) where
    F: FnMut(&A, &B, &C, &D, &E) -> U,
{
    for i in 0..shape[0] {
        let (Some(xr), Some(yr), Some(zr), Some(wr), Some(vr), Some(or)) =
            (x.get(i), y.get(i), z.get(i), w.get(i), v.get(i), out.get_mut(i))
        else {
            continue;
        };
        for j in 0..shape[1] {
            if let (Some(xv), Some(yv), Some(zv), Some(wv), Some(vv), Some(o)) =
                (xr.get(j), yr.get(j), zr.get(j), wr.get(j), vr.get(j), or.get_mut(j))
            {
                *o = f(xv, yv, zv, wv, vv);
            }
        }
    }
}

fn strides2(in_shape: [usize; 2], shape: [usize; 2]) -> Result<[usize; 2]> {
    let s = broadcast_strides(&in_shape, &shape)?;
    Ok([s[0] as usize, s[1] as usize])
}

/// Apply `f` to `x` broadcast from `x_shape` to `shape`.
///
/// ```rust
/// use strided_base::{broadcast_unary2d, zeros2d};
///
/// let x = vec![vec![1, 2]];
/// let mut out = zeros2d::<i32>([2, 2]);
/// broadcast_unary2d(&x, [1, 2], &mut out, [2, 2], |v| *v).unwrap();
/// assert_eq!(out, vec![vec![1, 2], vec![1, 2]]);
/// ```
pub fn broadcast_unary2d<A, U, F>(
    x: &[Vec<A>],
    x_shape: [usize; 2],
    out: &mut [Vec<U>],
    shape: [usize; 2],
    mut f: F,
) -> Result<()>
where
    F: FnMut(&A) -> U,
{
    let [sx0, sx1] = strides2(x_shape, shape)?;
    for (i, or) in out.iter_mut().enumerate().take(shape[0]) {
        let Some(xr) = x.get(i * sx0) else {
            continue;
        };
        for (j, o) in or.iter_mut().enumerate().take(shape[1]) {
            if let Some(xv) = xr.get(j * sx1) {
                *o = f(xv);
            }
        }
    }
    Ok(())
}

/// Apply a binary `f` to `x` and `y`, each broadcast from its own shape.
pub fn broadcast_binary2d<A, B, U, F>(
    x: &[Vec<A>],
    x_shape: [usize; 2],
    y: &[Vec<B>],
    y_shape: [usize; 2],
    out: &mut [Vec<U>],
    shape: [usize; 2],
    mut f: F,
) -> Result<()>
where
    F: FnMut(&A, &B) -> U,
{
    let [sx0, sx1] = strides2(x_shape, shape)?;
    let [sy0, sy1] = strides2(y_shape, shape)?;
    for (i, or) in out.iter_mut().enumerate().take(shape[0]) {
        let (Some(xr), Some(yr)) = (x.get(i * sx0), y.get(i * sy0)) else {
            continue;
        };
        for (j, o) in or.iter_mut().enumerate().take(shape[1]) {
            if let (Some(xv), Some(yv)) = (xr.get(j * sx1), yr.get(j * sy1)) {
                *o = f(xv, yv);
            }
        }
    }
    Ok(())
}

/// Apply `f` to `x`, writing only where `mask` is truthy.
pub fn mask_unary2d<A, M, U, F>(
    x: &[Vec<A>],
    mask: &[Vec<M>],
    out: &mut [Vec<U>],
    shape: [usize; 2],
    mut f: F,
) where
    M: Truthy,
    F: FnMut(&A) -> U,
{
    for i in 0..shape[0] {
        let (Some(xr), Some(mr), Some(or)) = (x.get(i), mask.get(i), out.get_mut(i)) else {
            continue;
        };
        for j in 0..shape[1] {
            if let (Some(xv), Some(m), Some(o)) = (xr.get(j), mr.get(j), or.get_mut(j)) {
                if m.is_truthy() {
                    *o = f(xv);
                }
            }
        }
    }
}

/// Apply a binary `f`, writing only where `mask` is truthy.
///
/// Unmasked positions of `out` keep whatever they held before the call.
///
/// ```rust
/// use strided_base::mask_binary2d;
///
/// let x = vec![vec![1, 2], vec![3, 4]];
/// let y = vec![vec![10, 20], vec![30, 40]];
/// let mask = vec![vec![0, 1], vec![0, 0]];
/// let mut out = vec![vec![-1, -1], vec![-1, -1]];
/// mask_binary2d(&x, &y, &mask, &mut out, [2, 2], |a, b| a + b);
/// assert_eq!(out, vec![vec![-1, 22], vec![-1, -1]]);
/// ```
pub fn mask_binary2d<A, B, M, U, F>(
    x: &[Vec<A>],
    y: &[Vec<B>],
    mask: &[Vec<M>],
    out: &mut [Vec<U>],
    shape: [usize; 2],
    mut f: F,
) where
    M: Truthy,
    F: FnMut(&A, &B) -> U,
{
    for i in 0..shape[0] {
        let (Some(xr), Some(yr), Some(mr), Some(or)) =
            (x.get(i), y.get(i), mask.get(i), out.get_mut(i))
        else {
            continue;
        };
        for j in 0..shape[1] {
            if let (Some(xv), Some(yv), Some(m), Some(o)) =
                (xr.get(j), yr.get(j), mr.get(j), or.get_mut(j))
            {
                if m.is_truthy() {
                    *o = f(xv, yv);
                }
            }
        }
    }
}
