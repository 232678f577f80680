//! Lockstep iteration engine.
//!
//! Every applier reduces to walking the logical positions of an output shape
//! in row-major order while advancing one buffer offset per operand. The
//! walk fuses contiguous dimensions first, runs a tight loop over the last
//! fused dimension, and carries into the outer dimensions odometer-style.

use crate::fuse::fuse_dims;
use crate::{Result, StridedError};

/// Visit every logical position of `dims` in row-major order.
///
/// `strides[k]` and `base[k]` describe operand `k`. The callback receives one
/// buffer offset per operand. Nothing is visited when any dimension is 0;
/// a rank-0 shape is visited exactly once at `base`.
///
/// Callers guarantee (through view construction) that every offset reached
/// is non-negative and inside the operand's buffer.
pub(crate) fn for_each_offset<const K: usize, F>(
    dims: &[usize],
    strides: [&[isize]; K],
    base: [isize; K],
    mut f: F,
) where
    F: FnMut([usize; K]),
{
    if dims.iter().any(|&d| d == 0) {
        return;
    }

    let (fdims, fstrides) = fuse_dims(dims, strides);
    log::trace!("lockstep walk over {K} operands: dims {dims:?} fused to {fdims:?}");

    let rank = fdims.len();
    if rank == 0 {
        f(base.map(|o| o as usize));
        return;
    }

    let inner_len = fdims[rank - 1];
    let inner: [isize; K] = std::array::from_fn(|k| fstrides[k][rank - 1]);
    let mut idx = vec![0usize; rank - 1];
    let mut offsets = base;

    loop {
        let mut cur = offsets;
        for _ in 0..inner_len {
            f(cur.map(|o| o as usize));
            for (c, s) in cur.iter_mut().zip(inner) {
                *c += s;
            }
        }

        // Carry into the outer dimensions
        let mut d = rank - 1;
        loop {
            if d == 0 {
                return;
            }
            d -= 1;
            idx[d] += 1;
            for (o, s) in offsets.iter_mut().zip(&fstrides) {
                *o += s[d];
            }
            if idx[d] < fdims[d] {
                break;
            }
            for (o, s) in offsets.iter_mut().zip(&fstrides) {
                *o -= s[d] * fdims[d] as isize;
            }
            idx[d] = 0;
        }
    }
}

/// Visit every multi-index of `dims`.
///
/// Row-major order advances the last index fastest; colexicographic order
/// advances the first index fastest.
pub(crate) fn for_each_index<F>(dims: &[usize], colexicographic: bool, mut f: F)
where
    F: FnMut(&[usize]),
{
    if dims.iter().any(|&d| d == 0) {
        return;
    }
    let rank = dims.len();
    let mut idx = vec![0usize; rank];
    loop {
        f(&idx);
        let mut advanced = false;
        for step in 0..rank {
            let d = if colexicographic { step } else { rank - 1 - step };
            idx[d] += 1;
            if idx[d] < dims[d] {
                advanced = true;
                break;
            }
            idx[d] = 0;
        }
        if !advanced {
            return;
        }
    }
}

/// Require two shapes to be identical.
pub(crate) fn ensure_same_shape(expected: &[usize], actual: &[usize]) -> Result<()> {
    if expected.len() != actual.len() {
        return Err(StridedError::RankMismatch(expected.len(), actual.len()));
    }
    if expected != actual {
        return Err(StridedError::ShapeMismatch(
            expected.to_vec(),
            actual.to_vec(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect1(dims: &[usize], strides: &[isize], base: isize) -> Vec<usize> {
        let mut seen = Vec::new();
        for_each_offset(dims, [strides], [base], |[o]| seen.push(o));
        seen
    }

    #[test]
    fn test_row_major_order() {
        assert_eq!(collect1(&[2, 3], &[3, 1], 0), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_transposed_walk() {
        // Column-major buffer walked in logical row-major order
        assert_eq!(collect1(&[2, 3], &[1, 2], 0), vec![0, 2, 4, 1, 3, 5]);
    }

    #[test]
    fn test_negative_and_offset() {
        assert_eq!(collect1(&[4], &[-1], 3), vec![3, 2, 1, 0]);
        assert_eq!(collect1(&[2, 2], &[-2, 1], 2), vec![2, 3, 0, 1]);
    }

    #[test]
    fn test_broadcast_stride() {
        assert_eq!(collect1(&[3, 2], &[0, 1], 0), vec![0, 1, 0, 1, 0, 1]);
    }

    #[test]
    fn test_zero_dim_and_rank0() {
        assert!(collect1(&[3, 0, 2], &[0, 2, 1], 0).is_empty());
        assert_eq!(collect1(&[], &[], 4), vec![4]);
    }

    #[test]
    fn test_lockstep_two_operands() {
        let mut pairs = Vec::new();
        for_each_offset(&[2, 2, 2], [&[4, 2, 1][..], &[1, 2, 4][..]], [0, 0], |[a, b]| {
            pairs.push((a, b))
        });
        let expected: Vec<(usize, usize)> = vec![
            (0, 0),
            (1, 4),
            (2, 2),
            (3, 6),
            (4, 1),
            (5, 5),
            (6, 3),
            (7, 7),
        ];
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_rank5_visits_everything_once() {
        let dims = [2, 3, 1, 2, 2];
        let strides = crate::shape::row_major_strides(&dims);
        let seen = collect1(&dims, &strides, 0);
        assert_eq!(seen, (0..24).collect::<Vec<_>>());
    }

    #[test]
    fn test_index_orders() {
        let mut row = Vec::new();
        for_each_index(&[2, 2], false, |i| row.push(i.to_vec()));
        assert_eq!(row, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);

        let mut col = Vec::new();
        for_each_index(&[2, 2], true, |i| col.push(i.to_vec()));
        assert_eq!(col, vec![vec![0, 0], vec![1, 0], vec![0, 1], vec![1, 1]]);

        let mut count = 0;
        for_each_index(&[], false, |_| count += 1);
        assert_eq!(count, 1);
        for_each_index(&[2, 0], true, |_| count += 1);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_ensure_same_shape() {
        assert!(ensure_same_shape(&[2, 3], &[2, 3]).is_ok());
        assert_eq!(
            ensure_same_shape(&[2, 3], &[2]).unwrap_err(),
            StridedError::RankMismatch(2, 1)
        );
        assert_eq!(
            ensure_same_shape(&[2, 3], &[3, 2]).unwrap_err(),
            StridedError::ShapeMismatch(vec![2, 3], vec![3, 2])
        );
    }
}
