//! Nested arrays and their copy-free broadcast view.
//!
//! A [`NestedArray`] of rank `R` is `R` levels of `Vec` around scalar
//! leaves. Shapes are never stored: they are inferred from the first element
//! of every level, and sibling containers are assumed to have equal length.

use crate::shape::broadcast_strides;
use crate::Result;

/// Rank-agnostic nested array.
#[derive(Debug, Clone, PartialEq)]
pub enum NestedArray<T> {
    Scalar(T),
    Array(Vec<NestedArray<T>>),
}

impl<T> NestedArray<T> {
    /// Build a rank-1 array.
    pub fn from_vec1(v: Vec<T>) -> Self {
        NestedArray::Array(v.into_iter().map(NestedArray::Scalar).collect())
    }

    /// Build a rank-2 array.
    pub fn from_vec2(v: Vec<Vec<T>>) -> Self {
        NestedArray::Array(v.into_iter().map(NestedArray::from_vec1).collect())
    }

    /// Build a rank-3 array.
    pub fn from_vec3(v: Vec<Vec<Vec<T>>>) -> Self {
        NestedArray::Array(v.into_iter().map(NestedArray::from_vec2).collect())
    }

    /// Infer the shape by descending through the first element of each level.
    ///
    /// An empty level ends the descent with a 0-length dimension.
    pub fn shape(&self) -> Vec<usize> {
        let mut shape = Vec::new();
        let mut node = self;
        while let NestedArray::Array(items) = node {
            shape.push(items.len());
            match items.first() {
                Some(first) => node = first,
                None => break,
            }
        }
        shape
    }

    /// Number of nesting levels above the leaves along the first path.
    pub fn rank(&self) -> usize {
        self.shape().len()
    }

    /// Leaf at `index`, or `None` when the path leaves the structure
    /// (out of range, ragged, or of the wrong depth).
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        let mut node = self;
        for &i in index {
            match node {
                NestedArray::Array(items) => node = items.get(i)?,
                NestedArray::Scalar(_) => return None,
            }
        }
        match node {
            NestedArray::Scalar(v) => Some(v),
            NestedArray::Array(_) => None,
        }
    }

    /// Mutable counterpart of [`get`](Self::get).
    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut T> {
        let mut node = self;
        for &i in index {
            match node {
                NestedArray::Array(items) => node = items.get_mut(i)?,
                NestedArray::Scalar(_) => return None,
            }
        }
        match node {
            NestedArray::Scalar(v) => Some(v),
            NestedArray::Array(_) => None,
        }
    }

    /// The leaf value of a rank-0 array.
    pub fn as_scalar(&self) -> Option<&T> {
        match self {
            NestedArray::Scalar(v) => Some(v),
            NestedArray::Array(_) => None,
        }
    }
}

impl<T: Clone> NestedArray<T> {
    /// Copy out the leaves of a rank-1 array; deeper levels are skipped.
    pub fn to_vec1(&self) -> Vec<T> {
        match self {
            NestedArray::Array(items) => items
                .iter()
                .filter_map(|item| item.as_scalar().cloned())
                .collect(),
            NestedArray::Scalar(v) => vec![v.clone()],
        }
    }

    /// Copy out a rank-2 array as `Vec<Vec<T>>`.
    pub fn to_vec2(&self) -> Vec<Vec<T>> {
        match self {
            NestedArray::Array(rows) => rows.iter().map(NestedArray::to_vec1).collect(),
            NestedArray::Scalar(v) => vec![vec![v.clone()]],
        }
    }
}

impl<T> From<T> for NestedArray<T> {
    fn from(v: T) -> Self {
        NestedArray::Scalar(v)
    }
}

/// Copy-free broadcast of a nested array to a larger shape.
///
/// Every logical position of `shape` maps back to one element of the source;
/// broadcast dimensions carry index multiplier 0.
#[derive(Debug, Clone)]
pub struct BroadcastArray<'a, T> {
    data: &'a NestedArray<T>,
    in_rank: usize,
    shape: Vec<usize>,
    strides: Vec<isize>,
}

impl<'a, T> BroadcastArray<'a, T> {
    /// Broadcast shape.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Per-dimension index multipliers (0 broadcast, 1 walk).
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Aliased source array.
    pub fn data(&self) -> &'a NestedArray<T> {
        self.data
    }

    /// Element at a position of the broadcast shape.
    pub fn get(&self, index: &[usize]) -> Option<&'a T> {
        if index.len() != self.shape.len() || index.iter().zip(&self.shape).any(|(&i, &n)| i >= n) {
            return None;
        }
        // Descend the source directly; leading broadcast dims have no level
        let lead = self.shape.len() - self.in_rank;
        let mut node = self.data;
        for (&i, &s) in index[lead..].iter().zip(&self.strides[lead..]) {
            match node {
                NestedArray::Array(items) => node = items.get(i * s as usize)?,
                NestedArray::Scalar(_) => return None,
            }
        }
        node.as_scalar()
    }
}

impl<T: Clone> BroadcastArray<'_, T> {
    /// Materialize the broadcast view as a freshly allocated nested array.
    pub fn to_nested(&self) -> NestedArray<T> {
        self.build(&mut Vec::with_capacity(self.shape.len()))
    }

    fn build(&self, prefix: &mut Vec<usize>) -> NestedArray<T> {
        let depth = prefix.len();
        if depth == self.shape.len() {
            return match self.get(prefix) {
                Some(v) => NestedArray::Scalar(v.clone()),
                None => NestedArray::Array(Vec::new()),
            };
        }
        let mut items = Vec::with_capacity(self.shape[depth]);
        for i in 0..self.shape[depth] {
            prefix.push(i);
            items.push(self.build(prefix));
            prefix.pop();
        }
        NestedArray::Array(items)
    }
}

/// Broadcast `x` of shape `in_shape` to `out_shape` without copying.
///
/// # Errors
/// [`StridedError::Broadcast`](crate::StridedError::Broadcast) when the
/// input rank exceeds the output rank or an aligned dimension is neither 1
/// nor equal to its output dimension.
///
/// # Example
/// ```rust
/// use strided_base::{broadcast_array, NestedArray};
///
/// let x = NestedArray::from_vec2(vec![vec![1, 2]]);
/// let b = broadcast_array(&x, &[1, 2], &[2, 2]).unwrap();
/// assert_eq!(b.to_nested().to_vec2(), vec![vec![1, 2], vec![1, 2]]);
/// ```
pub fn broadcast_array<'a, T>(
    x: &'a NestedArray<T>,
    in_shape: &[usize],
    out_shape: &[usize],
) -> Result<BroadcastArray<'a, T>> {
    let strides = broadcast_strides(in_shape, out_shape)?;
    Ok(BroadcastArray {
        data: x,
        in_rank: in_shape.len(),
        shape: out_shape.to_vec(),
        strides,
    })
}
