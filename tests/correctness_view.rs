use approx::assert_relative_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};
use strided_base::shape::row_major_strides;
use strided_base::{
    binary_in_place, broadcast_binary, broadcast_shapes, broadcast_unary, mask_binary, unary,
    unary_in_place, StridedError, StridedView, StridedViewMut,
};

fn make_matrix(rows: usize, cols: usize) -> Vec<f64> {
    (0..rows * cols).map(|i| i as f64).collect()
}

#[test]
fn test_unary_identity_all_ranks() {
    let mut rng = StdRng::seed_from_u64(17);
    for rank in 1..=5 {
        let dims: Vec<usize> = (0..rank).map(|_| rng.gen_range(1..5)).collect();
        let len: usize = dims.iter().product();
        let src: Vec<f64> = (0..len).map(|_| rng.gen_range(-10.0..10.0)).collect();
        let mut out = vec![0.0; len];
        let x = StridedView::contiguous(&src[..], &dims).unwrap();
        let mut dest = StridedViewMut::contiguous(&mut out[..], &dims).unwrap();
        unary(&x, &mut dest, |v| v).unwrap();
        assert_eq!(out, src);
    }
}

#[test]
fn test_unary_transposed_source() {
    let (rows, cols) = (8, 5);
    let a = make_matrix(rows, cols);
    let mut out = vec![0.0; rows * cols];
    // a^T as a [cols, rows] view
    let a_t = StridedView::new(&a[..], &[cols, rows], &[1, cols as isize], 0).unwrap();
    let mut dest = StridedViewMut::contiguous(&mut out[..], &[cols, rows]).unwrap();
    unary(&a_t, &mut dest, |x| x * 2.0).unwrap();

    for i in 0..cols {
        for j in 0..rows {
            assert_relative_eq!(out[i * rows + j], a[j * cols + i] * 2.0, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_broadcast_binary_matches_manual() {
    let mut rng = StdRng::seed_from_u64(21);
    let a_dims = [4, 1, 3];
    let b_dims = [5, 1];
    let out_dims = broadcast_shapes(&[&a_dims[..], &b_dims[..]]).unwrap();
    assert_eq!(out_dims, vec![4, 5, 3]);

    let a: Vec<f64> = (0..12).map(|_| rng.gen()).collect();
    let b: Vec<f64> = (0..5).map(|_| rng.gen()).collect();
    let mut out = vec![0.0; 60];
    let av = StridedView::contiguous(&a[..], &a_dims).unwrap();
    let bv = StridedView::contiguous(&b[..], &b_dims).unwrap();
    let mut dest = StridedViewMut::contiguous(&mut out[..], &out_dims).unwrap();
    broadcast_binary(&av, &bv, &mut dest, |x, y| x * y).unwrap();

    for i in 0..4 {
        for j in 0..5 {
            for k in 0..3 {
                assert_relative_eq!(out[i * 15 + j * 3 + k], a[i * 3 + k] * b[j]);
            }
        }
    }
}

#[test]
fn test_broadcast_unary_into_strided_output() {
    // Write a broadcast row into every other column of a 2x4 buffer
    let row = [7, 8];
    let mut out = vec![0; 8];
    let x = StridedView::contiguous(&row[..], &[2]).unwrap();
    let mut dest = StridedViewMut::new(&mut out[..], &[2, 2], &[4, 2], 1).unwrap();
    broadcast_unary(&x, &mut dest, |v| v).unwrap();
    assert_eq!(out, vec![0, 7, 0, 8, 0, 7, 0, 8]);
}

#[test]
fn test_broadcast_incompatible_rejected() {
    let a = make_matrix(2, 3);
    let mut out = vec![0.0; 4];
    let av = StridedView::contiguous(&a[..], &[2, 3]).unwrap();
    let mut dest = StridedViewMut::contiguous(&mut out[..], &[2, 2]).unwrap();
    let err = broadcast_unary(&av, &mut dest, |v| v).unwrap_err();
    assert_eq!(
        err,
        StridedError::Broadcast {
            from: vec![2, 3],
            to: vec![2, 2]
        }
    );
}

#[test]
fn test_mask_binary_view_leaves_unmasked() {
    let x = [1, 2, 3, 4];
    let y = [10, 20, 30, 40];
    let mask = [0, 1, 0, 0];
    let mut out = [-1, -2, -3, -4];
    let xv = StridedView::contiguous(&x[..], &[2, 2]).unwrap();
    let yv = StridedView::contiguous(&y[..], &[2, 2]).unwrap();
    let mv = StridedView::contiguous(&mask[..], &[2, 2]).unwrap();
    let mut dest = StridedViewMut::contiguous(&mut out[..], &[2, 2]).unwrap();
    mask_binary(&xv, &yv, &mv, &mut dest, |a, b| a + b).unwrap();
    assert_eq!(out, [-1, 22, -3, -4]);
}

#[test]
fn test_in_place_aliasing() {
    let mut data = make_matrix(3, 4);
    let expected: Vec<f64> = data.iter().map(|v| v * v + 1.0).collect();
    {
        let dims = [3, 4];
        let mut view =
            StridedViewMut::new(&mut data[..], &dims, &row_major_strides(&dims), 0).unwrap();
        unary_in_place(&mut view, |v| v * v);
        let one = [1.0];
        let y = StridedView::contiguous(&one[..], &[]).unwrap();
        binary_in_place(&mut view, &y, |a, b| a + b).unwrap();
    }
    assert_eq!(data, expected);
}
