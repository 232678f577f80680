//! Flatten nested arrays into one-dimensional buffers, and the inverse
//! reshape of a strided buffer into a nested array.
//!
//! Row-major order advances the last index fastest; colexicographic order
//! advances the first index fastest. Nested input is trusted to have
//! `shape`. Every element lands at the flat index of its logical position:
//! the allocating forms stop at the first position missing from a ragged
//! array, the `_into` forms leave missing positions untouched and go on.
//!
//! The `_into` forms write at most `strided_len(out.len(), stride, offset)`
//! elements, so an output that is too short is filled and never overrun.

use crate::accessor::{Accessor, AccessorMut};
use crate::fill::filled_nd_by;
use crate::kernel::for_each_index;
use crate::nested::NestedArray;
use crate::shape::strided_len;
use crate::view::StridedView;
use crate::Result;

// ============================================================================
// Nested, any rank
// ============================================================================

/// Flatten `x` of shape `shape` into a new `Vec`.
///
/// # Example
/// ```rust
/// use strided_base::{flatten_nd, NestedArray};
///
/// let x = NestedArray::from_vec2(vec![vec![1, 2, 3], vec![4, 5, 6]]);
/// assert_eq!(flatten_nd(&x, &[2, 3], false), vec![1, 2, 3, 4, 5, 6]);
/// assert_eq!(flatten_nd(&x, &[2, 3], true), vec![1, 4, 2, 5, 3, 6]);
/// ```
pub fn flatten_nd<T: Clone>(x: &NestedArray<T>, shape: &[usize], colexicographic: bool) -> Vec<T> {
    flatten_nd_by(x, shape, colexicographic, |v, _| v.clone())
}

/// Flatten `x`, transforming each element with `f(element, index)`.
///
/// Stops at the first position missing from a ragged `x`.
pub fn flatten_nd_by<T, U, F>(
    x: &NestedArray<T>,
    shape: &[usize],
    colexicographic: bool,
    mut f: F,
) -> Vec<U>
where
    F: FnMut(&T, &[usize]) -> U,
{
    let mut out = Vec::with_capacity(shape.iter().product());
    let mut complete = true;
    for_each_index(shape, colexicographic, |idx| {
        if !complete {
            return;
        }
        match x.get(idx) {
            Some(v) => out.push(f(v, idx)),
            None => complete = false,
        }
    });
    out
}

/// Flatten `x` into `out`, writing element `i` at `offset + i * stride`.
///
/// Returns `out`. Elements past the end of `out` are not written.
pub fn flatten_nd_into<'o, O>(
    x: &NestedArray<O::Elem>,
    shape: &[usize],
    colexicographic: bool,
    out: &'o mut O,
    stride: isize,
    offset: usize,
) -> &'o mut O
where
    O: AccessorMut + ?Sized,
{
    flatten_nd_by_into(x, shape, colexicographic, out, stride, offset, |v, _| *v)
}

/// Transforming counterpart of [`flatten_nd_into`].
pub fn flatten_nd_by_into<'o, T, O, F>(
    x: &NestedArray<T>,
    shape: &[usize],
    colexicographic: bool,
    out: &'o mut O,
    stride: isize,
    offset: usize,
    mut f: F,
) -> &'o mut O
where
    O: AccessorMut + ?Sized,
    F: FnMut(&T, &[usize]) -> O::Elem,
{
    let n = strided_len(out.len(), stride, offset);
    let mut i = 0;
    for_each_index(shape, colexicographic, |idx| {
        if i >= n {
            return;
        }
        if let Some(v) = x.get(idx) {
            out.set((offset as isize + i as isize * stride) as usize, f(v, idx));
        }
        i += 1;
    });
    out
}

// ============================================================================
// Rank 2
// ============================================================================

/// Flatten a rank-2 array.
pub fn flatten2d<T: Clone>(x: &[Vec<T>], shape: [usize; 2], colexicographic: bool) -> Vec<T> {
    flatten2d_by(x, shape, colexicographic, |v, _| v.clone())
}

/// Flatten a rank-2 array, transforming each element with `f(element, [i, j])`.
///
/// Stops at the first position missing from a ragged `x`.
pub fn flatten2d_by<T, U, F>(
    x: &[Vec<T>],
    shape: [usize; 2],
    colexicographic: bool,
    mut f: F,
) -> Vec<U>
where
    F: FnMut(&T, [usize; 2]) -> U,
{
    let mut out = Vec::with_capacity(shape[0] * shape[1]);
    let mut complete = true;
    visit2d(x, shape, colexicographic, |v, ij| match v {
        Some(v) if complete => out.push(f(v, ij)),
        _ => complete = false,
    });
    out
}

/// Flatten a rank-2 array into `out` at `offset + i * stride`.
pub fn flatten2d_into<'o, O>(
    x: &[Vec<O::Elem>],
    shape: [usize; 2],
    colexicographic: bool,
    out: &'o mut O,
    stride: isize,
    offset: usize,
) -> &'o mut O
where
    O: AccessorMut + ?Sized,
{
    let n = strided_len(out.len(), stride, offset);
    let mut i = 0;
    visit2d(x, shape, colexicographic, |v, _| {
        if i >= n {
            return;
        }
        if let Some(&v) = v {
            out.set((offset as isize + i as isize * stride) as usize, v);
        }
        i += 1;
    });
    out
}

/// Visit every position of a rank-2 `shape`; `f` gets `None` where `x` is
/// ragged.
fn visit2d<T, F>(x: &[Vec<T>], shape: [usize; 2], colexicographic: bool, mut f: F)
where
    F: FnMut(Option<&T>, [usize; 2]),
{
    let [n0, n1] = shape;
    let at = |i: usize, j: usize| x.get(i).and_then(|row| row.get(j));
    if colexicographic {
        for j in 0..n1 {
            for i in 0..n0 {
                f(at(i, j), [i, j]);
            }
        }
    } else {
        for i in 0..n0 {
            for j in 0..n1 {
                f(at(i, j), [i, j]);
            }
        }
    }
}

// ============================================================================
// Strided -> nested
// ============================================================================

/// Reshape a strided buffer into a nested array of `shape`.
///
/// Element `idx` is read from `offset + sum(idx[k] * strides[k])`. With
/// row-major strides this inverts [`flatten_nd`].
///
/// # Errors
/// Fails when the shape, strides and offset address positions outside `data`.
///
/// # Example
/// ```rust
/// use strided_base::strided_to_nested;
///
/// let x = strided_to_nested(&[1, 2, 3, 4, 5, 6][..], &[2, 3], &[3, 1], 0).unwrap();
/// assert_eq!(x.to_vec2(), vec![vec![1, 2, 3], vec![4, 5, 6]]);
/// ```
pub fn strided_to_nested<A>(
    data: &A,
    shape: &[usize],
    strides: &[isize],
    offset: isize,
) -> Result<NestedArray<A::Elem>>
where
    A: Accessor + ?Sized,
{
    let view = StridedView::new(data, shape, strides, offset)?;
    Ok(filled_nd_by(shape, |idx| view.get(idx)))
}
