//! Generators for flat, rank-2 and nested arrays.
//!
//! Every level of a generated array is a fresh allocation; siblings never
//! share storage.

use num_traits::{One, Zero};

use crate::nested::NestedArray;

/// `len` copies of `value`.
pub fn filled<T: Clone>(value: T, len: usize) -> Vec<T> {
    vec![value; len]
}

pub fn zeros<T: Zero + Clone>(len: usize) -> Vec<T> {
    filled(T::zero(), len)
}

pub fn ones<T: One + Clone>(len: usize) -> Vec<T> {
    filled(T::one(), len)
}

/// Rank-2 array of `shape[0]` rows, each holding `shape[1]` copies of `value`.
pub fn filled2d<T: Clone>(value: T, shape: [usize; 2]) -> Vec<Vec<T>> {
    (0..shape[0]).map(|_| filled(value.clone(), shape[1])).collect()
}

/// Rank-2 array whose element `(i, j)` is `f(i, j)`, generated row by row.
pub fn filled2d_by<T, F>(shape: [usize; 2], mut f: F) -> Vec<Vec<T>>
where
    F: FnMut(usize, usize) -> T,
{
    (0..shape[0])
        .map(|i| (0..shape[1]).map(|j| f(i, j)).collect())
        .collect()
}

pub fn zeros2d<T: Zero + Clone>(shape: [usize; 2]) -> Vec<Vec<T>> {
    filled2d(T::zero(), shape)
}

pub fn ones2d<T: One + Clone>(shape: [usize; 2]) -> Vec<Vec<T>> {
    filled2d(T::one(), shape)
}

/// Nested array of `shape` filled with `value`. A rank-0 shape gives a scalar.
///
/// ```rust
/// use strided_base::filled_nd;
///
/// let x = filled_nd('z', &[2, 1]);
/// assert_eq!(x.to_vec2(), vec![vec!['z'], vec!['z']]);
/// ```
pub fn filled_nd<T: Clone>(value: T, shape: &[usize]) -> NestedArray<T> {
    match shape.split_first() {
        None => NestedArray::Scalar(value),
        Some((&n, rest)) => {
            NestedArray::Array((0..n).map(|_| filled_nd(value.clone(), rest)).collect())
        }
    }
}

/// Nested array of `shape` whose leaf at index `idx` is `f(idx)`.
///
/// Leaves are generated in row-major order.
pub fn filled_nd_by<T, F>(shape: &[usize], mut f: F) -> NestedArray<T>
where
    F: FnMut(&[usize]) -> T,
{
    fn build<T, F: FnMut(&[usize]) -> T>(
        shape: &[usize],
        prefix: &mut Vec<usize>,
        f: &mut F,
    ) -> NestedArray<T> {
        let depth = prefix.len();
        if depth == shape.len() {
            return NestedArray::Scalar(f(prefix.as_slice()));
        }
        let mut items = Vec::with_capacity(shape[depth]);
        for i in 0..shape[depth] {
            prefix.push(i);
            items.push(build(shape, prefix, f));
            prefix.pop();
        }
        NestedArray::Array(items)
    }

    build(shape, &mut Vec::with_capacity(shape.len()), &mut f)
}

pub fn zeros_nd<T: Zero + Clone>(shape: &[usize]) -> NestedArray<T> {
    filled_nd(T::zero(), shape)
}

pub fn ones_nd<T: One + Clone>(shape: &[usize]) -> NestedArray<T> {
    filled_nd(T::one(), shape)
}
