//! Dimension fusion for row-major lockstep iteration.
//!
//! Adjacent dimensions `i` and `i + 1` can be walked as one dimension when,
//! for every operand, stepping once along `i` lands exactly where stepping
//! `dims[i + 1]` times along `i + 1` would:
//! `strides[i] == dims[i + 1] * strides[i + 1]`.

/// Fuse adjacent dimensions that are contiguous for every operand.
///
/// Returns the fused dims together with the fused strides of each operand.
/// Iteration order over the logical positions is unchanged: fused and
/// unfused layouts visit buffer positions in the same sequence.
pub(crate) fn fuse_dims<const K: usize>(
    dims: &[usize],
    strides: [&[isize]; K],
) -> (Vec<usize>, [Vec<isize>; K]) {
    let mut out_dims: Vec<usize> = Vec::with_capacity(dims.len());
    let mut out_strides: [Vec<isize>; K] = std::array::from_fn(|_| Vec::with_capacity(dims.len()));

    for (i, &dim) in dims.iter().enumerate() {
        // Size-1 dims contribute nothing to the walk
        if dim == 1 {
            continue;
        }
        let mergeable = match out_dims.last() {
            Some(_) => strides
                .iter()
                .zip(out_strides.iter())
                .all(|(s, fused)| fused.last().copied() == Some(dim as isize * s[i])),
            None => false,
        };
        if mergeable {
            if let Some(last) = out_dims.last_mut() {
                *last *= dim;
            }
            for (s, fused) in strides.iter().zip(out_strides.iter_mut()) {
                if let Some(last) = fused.last_mut() {
                    *last = s[i];
                }
            }
        } else {
            out_dims.push(dim);
            for (s, fused) in strides.iter().zip(out_strides.iter_mut()) {
                fused.push(s[i]);
            }
        }
    }

    (out_dims, out_strides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuse_contiguous() {
        let (dims, [s]) = fuse_dims(&[2, 3, 4][..], [&[12, 4, 1][..]]);
        assert_eq!(dims, vec![24]);
        assert_eq!(s, vec![1]);
    }

    #[test]
    fn test_fuse_partial() {
        // Second operand is column-major; nothing fuses
        let (dims, [a, b]) = fuse_dims(&[2, 3][..], [&[3, 1][..], &[1, 2][..]]);
        assert_eq!(dims, vec![2, 3]);
        assert_eq!(a, vec![3, 1]);
        assert_eq!(b, vec![1, 2]);
    }

    #[test]
    fn test_fuse_broadcast_dims() {
        // [2, 3, 4] where the leading dim is broadcast in one operand
        let (dims, [a, b]) = fuse_dims(&[2, 3, 4][..], [&[12, 4, 1][..], &[0, 4, 1][..]]);
        assert_eq!(dims, vec![2, 12]);
        assert_eq!(a, vec![12, 1]);
        assert_eq!(b, vec![0, 1]);
    }

    #[test]
    fn test_fuse_drops_unit_dims() {
        let (dims, [s]) = fuse_dims(&[1, 4, 1][..], [&[4, 1, 1][..]]);
        assert_eq!(dims, vec![4]);
        assert_eq!(s, vec![1]);
    }

    #[test]
    fn test_fuse_all_zero_strides() {
        let (dims, [s]) = fuse_dims(&[3, 2][..], [&[0, 0][..]]);
        assert_eq!(dims, vec![6]);
        assert_eq!(s, vec![0]);
    }
}
