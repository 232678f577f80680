//! Shape and stride arithmetic shared by every applier.
//!
//! Broadcasting aligns shapes right-to-left. A dimension of length 1 is
//! walked with stride 0, a dimension equal to the output is walked normally,
//! and anything else cannot be reconciled.

use crate::{Result, StridedError};

/// Resolve the index stride for one input dimension against one output dimension.
///
/// Returns `0` when the input dimension is broadcast (length 1) and `1` when it
/// matches the output length.
///
/// # Errors
/// Returns [`StridedError::Broadcast`] when the lengths are irreconcilable.
///
/// # Example
/// ```rust
/// use strided_base::resolve_stride;
///
/// assert_eq!(resolve_stride(1, 5).unwrap(), 0);
/// assert_eq!(resolve_stride(5, 5).unwrap(), 1);
/// assert!(resolve_stride(3, 5).is_err());
/// ```
#[inline]
pub fn resolve_stride(input: usize, output: usize) -> Result<isize> {
    if input == 1 {
        Ok(0)
    } else if input == output {
        Ok(1)
    } else {
        Err(StridedError::Broadcast {
            from: vec![input],
            to: vec![output],
        })
    }
}

/// Compute per-output-dimension index multipliers for broadcasting `in_shape`
/// to `out_shape`.
///
/// The result has one entry per output dimension. Leading output dimensions
/// without a counterpart in `in_shape` are broadcast (`0`).
pub fn broadcast_strides(in_shape: &[usize], out_shape: &[usize]) -> Result<Vec<isize>> {
    let unit = vec![1isize; in_shape.len()];
    promote_strides(in_shape, &unit, out_shape)
}

/// Promote memory strides of an operand to a broadcast target shape.
///
/// For each aligned pair:
/// - if `in_shape[d] == 1`, the stride becomes 0
/// - if `in_shape[d] == out_shape[d]`, the stride is kept
/// - otherwise the shapes are incompatible
///
/// New leading dimensions get stride 0.
pub fn promote_strides(
    in_shape: &[usize],
    in_strides: &[isize],
    out_shape: &[usize],
) -> Result<Vec<isize>> {
    if in_strides.len() != in_shape.len() {
        return Err(StridedError::StrideLengthMismatch);
    }
    let incompatible = || StridedError::Broadcast {
        from: in_shape.to_vec(),
        to: out_shape.to_vec(),
    };
    if in_shape.len() > out_shape.len() {
        log::debug!(
            "broadcast rejected: rank {} exceeds target rank {}",
            in_shape.len(),
            out_shape.len()
        );
        return Err(incompatible());
    }

    let lead = out_shape.len() - in_shape.len();
    let mut out = vec![0isize; out_shape.len()];
    for (i, (&dim, &stride)) in in_shape.iter().zip(in_strides).enumerate() {
        let step = resolve_stride(dim, out_shape[lead + i]).map_err(|_| incompatible())?;
        out[lead + i] = step * stride;
    }
    Ok(out)
}

/// Compute the common broadcast shape of several operands.
///
/// Shapes are aligned right-to-left; per dimension the sizes must be equal or 1.
pub fn broadcast_shapes(shapes: &[&[usize]]) -> Result<Vec<usize>> {
    let rank = shapes.iter().map(|s| s.len()).max().unwrap_or(0);
    let mut out = vec![1usize; rank];

    for shape in shapes {
        let lead = rank - shape.len();
        for (i, &dim) in shape.iter().enumerate() {
            let target = &mut out[lead + i];
            if dim == *target || dim == 1 {
                continue;
            }
            if *target == 1 {
                *target = dim;
            } else {
                return Err(StridedError::Broadcast {
                    from: shape.to_vec(),
                    to: out.clone(),
                });
            }
        }
    }

    Ok(out)
}

/// Number of elements addressed by `shape` (1 for a rank-0 shape).
#[inline]
pub fn numel(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Compute row-major strides (last index varies fastest).
pub fn row_major_strides(shape: &[usize]) -> Vec<isize> {
    let mut strides = vec![1isize; shape.len()];
    let mut acc = 1isize;
    for (stride, &dim) in strides.iter_mut().zip(shape).rev() {
        *stride = acc;
        acc *= dim.max(1) as isize;
    }
    strides
}

/// Compute column-major strides (first index varies fastest).
pub fn col_major_strides(shape: &[usize]) -> Vec<isize> {
    let mut strides = vec![1isize; shape.len()];
    let mut acc = 1isize;
    for (stride, &dim) in strides.iter_mut().zip(shape) {
        *stride = acc;
        acc *= dim.max(1) as isize;
    }
    strides
}

/// Number of elements a one-dimensional strided output of length `len`
/// exposes starting at `offset` and stepping by `stride`.
///
/// A zero stride addresses the single element at `offset`.
///
/// ```rust
/// use strided_base::strided_len;
///
/// assert_eq!(strided_len(8, 2, 1), 4);  // positions 1, 3, 5, 7
/// assert_eq!(strided_len(8, -3, 7), 3); // positions 7, 4, 1
/// assert_eq!(strided_len(4, 1, 4), 0);
/// ```
pub fn strided_len(len: usize, stride: isize, offset: usize) -> usize {
    if offset >= len {
        return 0;
    }
    let step = stride.unsigned_abs();
    if step == 0 {
        return 1;
    }
    if stride > 0 {
        (len - 1 - offset) / step + 1
    } else {
        offset / step + 1
    }
}
