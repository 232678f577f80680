use num_complex::Complex64;
use rand::{rngs::StdRng, Rng, SeedableRng};
use strided_base::shape::row_major_strides;
use strided_base::{
    broadcast_array, flatten2d, flatten_nd, mask_binary2d, ones_nd, select_where_into,
    strided_to_nested, unary_nd, zeros_nd, BoolArray, Complex128Array, NestedArray,
};

fn random_shape(rng: &mut StdRng, rank: usize) -> Vec<usize> {
    (0..rank).map(|_| rng.gen_range(1..5)).collect()
}

fn random_flat(rng: &mut StdRng, len: usize) -> Vec<f64> {
    (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

#[test]
fn test_broadcast_repeats_row() {
    let x = NestedArray::from_vec2(vec![vec![1, 2]]);
    let b = broadcast_array(&x, &[1, 2], &[2, 2]).unwrap();
    assert_eq!(b.to_nested().to_vec2(), vec![vec![1, 2], vec![1, 2]]);
}

#[test]
fn test_broadcast_incompatible_shape() {
    let x = NestedArray::from_vec2(vec![vec![1, 2, 3], vec![4, 5, 6]]);
    let err = broadcast_array(&x, &[2, 3], &[2, 2]).unwrap_err();
    assert!(err.is_broadcast());
    assert_eq!(
        err.to_string(),
        "cannot broadcast shape [2, 3] to shape [2, 2]"
    );
}

#[test]
fn test_broadcast_reads_correct_source_index() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let rank = rng.gen_range(1..5);
        let out_shape = random_shape(&mut rng, rank);
        // Drop some leading dims and squash others to 1
        let lead = rng.gen_range(0..rank);
        let in_shape: Vec<usize> = out_shape[lead..]
            .iter()
            .map(|&d| if rng.gen_bool(0.5) { 1 } else { d })
            .collect();
        let len: usize = in_shape.iter().product();
        let flat: Vec<usize> = (0..len).collect();
        let x = strided_to_nested(&flat[..], &in_shape, &row_major_strides(&in_shape), 0).unwrap();

        let b = broadcast_array(&x, &in_shape, &out_shape).unwrap();
        let full = b.to_nested();
        let mut checked = 0;
        for (pos, v) in flatten_nd(&full, &out_shape, false).into_iter().enumerate() {
            // Recover the output index, then the expected source index
            let mut rem = pos;
            let mut idx = vec![0; rank];
            for d in (0..rank).rev() {
                idx[d] = rem % out_shape[d];
                rem /= out_shape[d];
            }
            let src: Vec<usize> = in_shape
                .iter()
                .zip(&idx[lead..])
                .map(|(&n, &i)| if n == 1 { 0 } else { i })
                .collect();
            assert_eq!(x.get(&src), Some(&v));
            checked += 1;
        }
        assert_eq!(checked, out_shape.iter().product::<usize>());
    }
}

#[test]
fn test_unary_identity_copies_ranks_1_to_5() {
    let mut rng = StdRng::seed_from_u64(3);
    for rank in 1..=5 {
        let shape = random_shape(&mut rng, rank);
        let len: usize = shape.iter().product();
        let flat = random_flat(&mut rng, len);
        let x = strided_to_nested(&flat[..], &shape, &row_major_strides(&shape), 0).unwrap();
        let mut out = zeros_nd::<f64>(&shape);
        unary_nd(&x, &mut out, &shape, |v| *v);
        assert_eq!(out, x);
        assert_eq!(flatten_nd(&out, &shape, false), flat);
    }
}

#[test]
fn test_where_literal_returns_same_output() {
    let cond = [true, false, true, false];
    let x = [1, 2, 3, 4];
    let y = [5, 6, 7, 8];
    let mut out = vec![0, 0, 0, 0];
    let expected: *const Vec<i32> = &out;
    let ret = select_where_into(&cond[..], &x[..], &y[..], &mut out, 1, 0).unwrap();
    assert!(std::ptr::eq(ret, expected));
    assert_eq!(out, vec![1, 6, 3, 8]);
}

#[test]
fn test_where_broadcast_condition_strided_output() {
    let mut out = vec![0; 8];
    select_where_into(&[true][..], &[1, 2, 3, 4][..], &[5, 6, 7, 8][..], &mut out, 2, 1).unwrap();
    assert_eq!(out, vec![0, 1, 0, 2, 0, 3, 0, 4]);
}

#[test]
fn test_where_empty_condition_is_noop() {
    let mut out = vec![42; 3];
    let cond: Vec<bool> = Vec::new();
    let ret = select_where_into(&cond, &[1, 2, 3, 4, 5][..], &[9][..], &mut out, 1, 0).unwrap();
    assert_eq!(ret, &vec![42; 3]);
}

#[test]
fn test_where_storage_specializations_agree() {
    let mut rng = StdRng::seed_from_u64(99);
    let n = 16;
    let flags: Vec<bool> = (0..n).map(|_| rng.gen_bool(0.5)).collect();

    // Boolean storage
    let xb: BoolArray = (0..n).map(|i| i % 3 == 0).collect();
    let yb: BoolArray = (0..n).map(|i| i % 2 == 0).collect();
    let cond = BoolArray::from(&flags[..]);
    let mut outb = BoolArray::new(n);
    select_where_into(&cond, &xb, &yb, &mut outb, 1, 0).unwrap();

    // Same values in plain storage
    let xv = xb.to_vec();
    let yv = yb.to_vec();
    let mut outv = vec![false; n];
    select_where_into(&flags[..], &xv[..], &yv[..], &mut outv, 1, 0).unwrap();
    assert_eq!(outb.to_vec(), outv);

    // Complex storage against plain complex slices
    let xc: Vec<Complex64> = (0..n).map(|i| Complex64::new(i as f64, -(i as f64))).collect();
    let yc = vec![Complex64::new(0.5, 0.5)];
    let mut outc = Complex128Array::new(n);
    select_where_into(
        &cond,
        &Complex128Array::from(xc.clone()),
        &Complex128Array::from(yc.clone()),
        &mut outc,
        1,
        0,
    )
    .unwrap();
    let mut plain = vec![Complex64::new(0.0, 0.0); n];
    select_where_into(&flags[..], &xc[..], &yc[..], &mut plain, 1, 0).unwrap();
    assert_eq!(outc.as_slice(), &plain[..]);
}

#[test]
fn test_flatten_round_trip_and_colex() {
    let mut rng = StdRng::seed_from_u64(5);
    for rank in 1..=4 {
        let shape = random_shape(&mut rng, rank);
        let len: usize = shape.iter().product();
        let flat: Vec<i64> = (0..len as i64).collect();
        let x = strided_to_nested(&flat[..], &shape, &row_major_strides(&shape), 0).unwrap();
        assert_eq!(flatten_nd(&x, &shape, false), flat);

        // Colexicographic flatten equals row-major flatten of the reversed-axes array
        let rev: Vec<usize> = shape.iter().rev().copied().collect();
        let rev_strides: Vec<isize> = row_major_strides(&shape).into_iter().rev().collect();
        let t = strided_to_nested(&flat[..], &rev, &rev_strides, 0).unwrap();
        assert_eq!(flatten_nd(&x, &shape, true), flatten_nd(&t, &rev, false));
    }
}

#[test]
fn test_flatten2d_matches_nd() {
    let rows = vec![vec![1, 2, 3], vec![4, 5, 6]];
    let nested = NestedArray::from_vec2(rows.clone());
    for colex in [false, true] {
        assert_eq!(
            flatten2d(&rows, [2, 3], colex),
            flatten_nd(&nested, &[2, 3], colex)
        );
    }
}

#[test]
fn test_mask_binary2d_only_touches_masked() {
    let x = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
    let y = vec![vec![10.0, 20.0], vec![30.0, 40.0]];
    let mask = vec![vec![0u8, 1], vec![0, 0]];
    let mut out = vec![vec![-1.0, -2.0], vec![-3.0, -4.0]];
    mask_binary2d(&x, &y, &mask, &mut out, [2, 2], |a, b| a + b);
    assert_eq!(out, vec![vec![-1.0, 22.0], vec![-3.0, -4.0]]);
}

#[test]
fn test_generators_fresh_levels() {
    let mut x = ones_nd::<i32>(&[2, 2, 2]);
    *x.get_mut(&[1, 1, 1]).unwrap() = 0;
    assert_eq!(
        flatten_nd(&x, &[2, 2, 2], false),
        vec![1, 1, 1, 1, 1, 1, 1, 0]
    );
}
