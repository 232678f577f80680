//! Strided views over flat buffers.
//!
//! A view pairs a borrowed buffer with `dims`, `strides` and a starting
//! `offset`, all in logical elements. Strides may be negative (reverse walks)
//! or zero (broadcast dimensions); views never copy their buffer.
//!
//! - [`StridedView`]: read-only operand
//! - [`StridedViewMut`]: output operand

use std::sync::Arc;

use crate::accessor::{Accessor, AccessorMut};
use crate::shape::{promote_strides, row_major_strides};
use crate::{Result, StridedError};

// ============================================================================
// Validation helpers
// ============================================================================

/// Validate that all addressable offsets stay within `[0, len)`.
fn validate_bounds(len: usize, dims: &[usize], strides: &[isize], offset: isize) -> Result<()> {
    if dims.len() != strides.len() {
        return Err(StridedError::StrideLengthMismatch);
    }
    // Empty array - nothing is ever addressed
    if dims.iter().any(|&d| d == 0) {
        return Ok(());
    }
    let mut min_offset = offset;
    let mut max_offset = offset;
    for (&dim, &stride) in dims.iter().zip(strides.iter()) {
        if dim > 1 {
            let end = stride
                .checked_mul(dim as isize - 1)
                .ok_or(StridedError::OffsetOverflow)?;
            if end >= 0 {
                max_offset = max_offset
                    .checked_add(end)
                    .ok_or(StridedError::OffsetOverflow)?;
            } else {
                min_offset = min_offset
                    .checked_add(end)
                    .ok_or(StridedError::OffsetOverflow)?;
            }
        }
    }
    if min_offset < 0 || max_offset < 0 || max_offset as usize >= len {
        return Err(StridedError::OffsetOverflow);
    }
    Ok(())
}

#[inline]
fn linear_offset(dims: &[usize], strides: &[isize], offset: isize, indices: &[usize]) -> usize {
    assert_eq!(indices.len(), dims.len(), "wrong number of indices");
    let mut idx = offset;
    for ((&i, &dim), &stride) in indices.iter().zip(dims).zip(strides) {
        assert!(i < dim, "index {i} out of bounds for dim {dim}");
        idx += i as isize * stride;
    }
    idx as usize
}

// ============================================================================
// StridedView
// ============================================================================

/// Immutable strided view over an [`Accessor`] buffer.
pub struct StridedView<'a, A: ?Sized> {
    pub(crate) data: &'a A,
    pub(crate) dims: Arc<[usize]>,
    pub(crate) strides: Arc<[isize]>,
    pub(crate) offset: isize,
}

impl<A: ?Sized> Clone for StridedView<'_, A> {
    fn clone(&self) -> Self {
        Self {
            data: self.data,
            dims: self.dims.clone(),
            strides: self.strides.clone(),
            offset: self.offset,
        }
    }
}

impl<A: ?Sized> std::fmt::Debug for StridedView<'_, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StridedView")
            .field("dims", &self.dims)
            .field("strides", &self.strides)
            .field("offset", &self.offset)
            .finish()
    }
}

impl<'a, A: Accessor + ?Sized> StridedView<'a, A> {
    /// Create a view, checking that every addressable position is inside `data`.
    pub fn new(data: &'a A, dims: &[usize], strides: &[isize], offset: isize) -> Result<Self> {
        validate_bounds(data.len(), dims, strides, offset)?;
        Ok(Self {
            data,
            dims: Arc::from(dims),
            strides: Arc::from(strides),
            offset,
        })
    }

    /// Create a row-major view starting at the beginning of `data`.
    pub fn contiguous(data: &'a A, dims: &[usize]) -> Result<Self> {
        Self::new(data, dims, &row_major_strides(dims), 0)
    }

    /// Read the element at a multi-dimensional index.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    pub fn get(&self, indices: &[usize]) -> A::Elem {
        self.data
            .get(linear_offset(&self.dims, &self.strides, self.offset, indices))
    }
}

impl<'a, A: ?Sized> StridedView<'a, A> {
    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    #[inline]
    pub fn offset(&self) -> isize {
        self.offset
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Number of logical positions (1 for rank 0).
    #[inline]
    pub fn len(&self) -> usize {
        self.dims.iter().product()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Underlying buffer.
    #[inline]
    pub fn data(&self) -> &'a A {
        self.data
    }

    /// Broadcast this view to `target` dims.
    ///
    /// Shapes are aligned right-to-left. Size-1 dimensions and new leading
    /// dimensions get stride 0, so several logical positions share one
    /// element of the buffer.
    ///
    /// # Example
    /// ```rust
    /// use strided_base::StridedView;
    ///
    /// let data = [1, 2];
    /// let row = StridedView::contiguous(&data[..], &[1, 2]).unwrap();
    /// let b = row.broadcast(&[3, 2]).unwrap();
    /// assert_eq!(b.strides(), &[0, 1]);
    /// assert_eq!(b.get(&[2, 1]), 2);
    /// ```
    pub fn broadcast(&self, target: &[usize]) -> Result<StridedView<'a, A>> {
        let strides = promote_strides(&self.dims, &self.strides, target)?;
        Ok(StridedView {
            data: self.data,
            dims: Arc::from(target),
            strides: Arc::from(strides),
            offset: self.offset,
        })
    }
}

// ============================================================================
// StridedViewMut
// ============================================================================

/// Mutable strided view over an [`AccessorMut`] buffer.
///
/// Zero strides are allowed; every logical position along such a dimension
/// writes the same buffer element.
pub struct StridedViewMut<'a, A: ?Sized> {
    pub(crate) data: &'a mut A,
    pub(crate) dims: Arc<[usize]>,
    pub(crate) strides: Arc<[isize]>,
    pub(crate) offset: isize,
}

impl<A: ?Sized> std::fmt::Debug for StridedViewMut<'_, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StridedViewMut")
            .field("dims", &self.dims)
            .field("strides", &self.strides)
            .field("offset", &self.offset)
            .finish()
    }
}

impl<'a, A: AccessorMut + ?Sized> StridedViewMut<'a, A> {
    /// Create a mutable view, checking that every addressable position is inside `data`.
    pub fn new(data: &'a mut A, dims: &[usize], strides: &[isize], offset: isize) -> Result<Self> {
        validate_bounds(data.len(), dims, strides, offset)?;
        Ok(Self {
            data,
            dims: Arc::from(dims),
            strides: Arc::from(strides),
            offset,
        })
    }

    /// Create a row-major view starting at the beginning of `data`.
    pub fn contiguous(data: &'a mut A, dims: &[usize]) -> Result<Self> {
        let strides = row_major_strides(dims);
        Self::new(data, dims, &strides, 0)
    }

    /// Read the element at a multi-dimensional index.
    pub fn get(&self, indices: &[usize]) -> A::Elem {
        self.data
            .get(linear_offset(&self.dims, &self.strides, self.offset, indices))
    }

    /// Write the element at a multi-dimensional index.
    pub fn set(&mut self, indices: &[usize], value: A::Elem) {
        let idx = linear_offset(&self.dims, &self.strides, self.offset, indices);
        self.data.set(idx, value);
    }

    /// Reborrow as an immutable view.
    pub fn as_view(&self) -> StridedView<'_, A> {
        StridedView {
            data: &*self.data,
            dims: self.dims.clone(),
            strides: self.strides.clone(),
            offset: self.offset,
        }
    }
}

impl<'a, A: ?Sized> StridedViewMut<'a, A> {
    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    #[inline]
    pub fn offset(&self) -> isize {
        self.offset
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dims.iter().product()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Underlying buffer.
    #[inline]
    pub fn data_mut(&mut self) -> &mut A {
        &mut *self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typed::BoolArray;

    #[test]
    fn test_new_view() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let view = StridedView::new(&data[..], &[2, 3], &[3, 1], 0).unwrap();

        assert_eq!(view.dims(), &[2, 3]);
        assert_eq!(view.strides(), &[3, 1]);
        assert_eq!(view.len(), 6);
        assert_eq!(view.get(&[1, 2]), 6.0);
    }

    #[test]
    fn test_negative_stride() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        // Start at offset 5, stride -1 to reverse the array
        let view = StridedView::new(&data[..], &[6], &[-1], 5).unwrap();

        assert_eq!(view.get(&[0]), 6.0);
        assert_eq!(view.get(&[5]), 1.0);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let data = vec![0.0; 6];
        assert_eq!(
            StridedView::new(&data[..], &[2, 3], &[3, 1], 1).unwrap_err(),
            StridedError::OffsetOverflow
        );
        assert_eq!(
            StridedView::new(&data[..], &[6], &[-1], 4).unwrap_err(),
            StridedError::OffsetOverflow
        );
        assert_eq!(
            StridedView::new(&data[..], &[2, 3], &[1], 0).unwrap_err(),
            StridedError::StrideLengthMismatch
        );
    }

    #[test]
    fn test_empty_view_skips_bounds() {
        let data: Vec<f64> = vec![];
        let view = StridedView::new(&data[..], &[0, 3], &[3, 1], 0).unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn test_broadcast_row_to_matrix() {
        let data = [1, 2];
        let view = StridedView::contiguous(&data[..], &[1, 2]).unwrap();
        let b = view.broadcast(&[2, 2]).unwrap();

        assert_eq!(b.dims(), &[2, 2]);
        assert_eq!(b.strides(), &[0, 1]);
        for i in 0..2 {
            assert_eq!(b.get(&[i, 0]), 1);
            assert_eq!(b.get(&[i, 1]), 2);
        }
    }

    #[test]
    fn test_broadcast_adds_leading_dims() {
        let data = [1.0, 2.0, 3.0];
        let view = StridedView::contiguous(&data[..], &[3]).unwrap();
        let b = view.broadcast(&[2, 4, 3]).unwrap();
        assert_eq!(b.strides(), &[0, 0, 1]);
        assert_eq!(b.get(&[1, 3, 2]), 3.0);
    }

    #[test]
    fn test_broadcast_incompatible() {
        let data = [0.0; 6];
        let view = StridedView::contiguous(&data[..], &[2, 3]).unwrap();
        let err = view.broadcast(&[2, 2]).unwrap_err();
        assert!(err.is_broadcast());
        assert!(view.broadcast(&[3]).unwrap_err().is_broadcast());
    }

    #[test]
    fn test_view_mut_set_get() {
        let mut data = vec![0; 6];
        {
            let mut view = StridedViewMut::new(&mut data[..], &[3, 2], &[1, 3], 0).unwrap();
            view.set(&[2, 1], 9);
            assert_eq!(view.get(&[2, 1]), 9);
            assert_eq!(view.as_view().get(&[2, 1]), 9);
        }
        assert_eq!(data, vec![0, 0, 0, 0, 0, 9]);
    }

    #[test]
    fn test_view_over_accessor_storage() {
        let mut flags = BoolArray::new(4);
        let mut view = StridedViewMut::contiguous(&mut flags, &[2, 2]).unwrap();
        view.set(&[1, 0], true);
        assert_eq!(flags.to_vec(), vec![false, false, true, false]);
    }
}
