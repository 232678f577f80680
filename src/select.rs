//! Conditional selection: `out[i] = if condition[i] { x[i] } else { y[i] }`.
//!
//! `condition`, `x` and `y` are one-dimensional operands broadcast
//! independently against the number of output positions: length 1 repeats,
//! equal length walks. The assign form writes into a caller-supplied output
//! addressed by `stride` and `offset`.
//!
//! Storage is dispatched once per call, in this order:
//!
//! 1. boolean: all four operands are byte-backed booleans; copy raw bytes
//! 2. complex: `x`, `y` and `out` are complex of one precision; copy
//!    interleaved (re, im) pairs at doubled offsets
//! 3. indexed: every operand is a plain slice
//! 4. accessor: element-wise `get`/`set`

use crate::accessor::{Accessor, AccessorMut, Raw, RawMut};
use crate::dtype::Truthy;
use crate::shape::{resolve_stride, strided_len};
use crate::Result;

/// Per-call loop description shared by the specializations.
#[derive(Debug, Clone, Copy)]
struct Plan {
    n: usize,
    cond: usize,
    x: usize,
    y: usize,
    stride: isize,
    offset: usize,
}

impl Plan {
    /// Output position of logical element `i`.
    #[inline(always)]
    fn out_pos(&self, i: usize) -> usize {
        (self.offset as isize + i as isize * self.stride) as usize
    }
}

/// Select between `x` and `y` by `condition`, allocating the result.
///
/// The result length is the broadcast length of the three operands. An empty
/// condition yields an empty result.
///
/// # Example
/// ```rust
/// use strided_base::select_where;
///
/// let out = select_where(&[true, false, true][..], &[1, 2, 3][..], &[0][..]).unwrap();
/// assert_eq!(out, vec![1, 0, 3]);
/// ```
pub fn select_where<C, X, Y>(condition: &C, x: &X, y: &Y) -> Result<Vec<X::Elem>>
where
    C: Accessor + ?Sized,
    C::Elem: Truthy,
    X: Accessor + ?Sized,
    Y: Accessor<Elem = X::Elem> + ?Sized,
{
    if condition.is_empty() {
        return Ok(Vec::new());
    }
    let n = condition.len().max(x.len()).max(y.len());
    let sc = resolve_stride(condition.len(), n)? as usize;
    let sx = resolve_stride(x.len(), n)? as usize;
    let sy = resolve_stride(y.len(), n)? as usize;

    Ok((0..n)
        .map(|i| {
            if condition.get(i * sc).is_truthy() {
                x.get(i * sx)
            } else {
                y.get(i * sy)
            }
        })
        .collect())
}

/// Select between `x` and `y` by `condition`, writing into `out`.
///
/// The number of written positions is `N = strided_len(out.len(), stride,
/// offset)`; position `i` lands at `offset + i * stride`. `condition`, `x`
/// and `y` must each have length 1 or `N`; this is checked before the first
/// write. Returns `out` itself.
///
/// An empty `condition` returns `out` untouched without validating `x` or
/// `y`.
///
/// # Errors
/// [`StridedError::Broadcast`](crate::StridedError::Broadcast) when an
/// operand length is neither 1 nor `N`.
///
/// # Example
/// ```rust
/// use strided_base::select_where_into;
///
/// let mut out = vec![0; 8];
/// select_where_into(&[true][..], &[1, 2, 3, 4][..], &[5, 6, 7, 8][..], &mut out, 2, 1).unwrap();
/// assert_eq!(out, vec![0, 1, 0, 2, 0, 3, 0, 4]);
/// ```
pub fn select_where_into<'o, C, X, Y, O>(
    condition: &C,
    x: &X,
    y: &Y,
    out: &'o mut O,
    stride: isize,
    offset: usize,
) -> Result<&'o mut O>
where
    C: Accessor + ?Sized,
    C::Elem: Truthy,
    X: Accessor<Elem = O::Elem> + ?Sized,
    Y: Accessor<Elem = O::Elem> + ?Sized,
    O: AccessorMut + ?Sized,
{
    if condition.is_empty() {
        return Ok(out);
    }
    let n = strided_len(out.len(), stride, offset);
    let plan = Plan {
        n,
        cond: resolve_stride(condition.len(), n)? as usize,
        x: resolve_stride(x.len(), n)? as usize,
        y: resolve_stride(y.len(), n)? as usize,
        stride,
        offset,
    };
    assign(condition, x, y, &mut *out, &plan);
    Ok(out)
}

fn assign<C, X, Y, O>(condition: &C, x: &X, y: &Y, out: &mut O, plan: &Plan)
where
    C: Accessor + ?Sized,
    C::Elem: Truthy,
    X: Accessor<Elem = O::Elem> + ?Sized,
    Y: Accessor<Elem = O::Elem> + ?Sized,
    O: AccessorMut + ?Sized,
{
    let truthy = |i: usize| condition.get(i * plan.cond).is_truthy();

    match (condition.raw(), x.raw(), y.raw(), out.raw_mut()) {
        (
            Some(Raw::Bytes(cb)),
            Some(Raw::Bytes(xb)),
            Some(Raw::Bytes(yb)),
            Some(RawMut::Bytes(ob)),
        ) => {
            log::trace!("where: boolean path, {} elements", plan.n);
            for i in 0..plan.n {
                ob[plan.out_pos(i)] = if cb[i * plan.cond] != 0 {
                    xb[i * plan.x]
                } else {
                    yb[i * plan.y]
                };
            }
            return;
        }
        (
            _,
            Some(Raw::Interleaved64(xr)),
            Some(Raw::Interleaved64(yr)),
            Some(RawMut::Interleaved64(or)),
        ) => {
            log::trace!("where: complex128 path, {} elements", plan.n);
            copy_pairs(truthy, xr, yr, or, plan);
            return;
        }
        (
            _,
            Some(Raw::Interleaved32(xr)),
            Some(Raw::Interleaved32(yr)),
            Some(RawMut::Interleaved32(or)),
        ) => {
            log::trace!("where: complex64 path, {} elements", plan.n);
            copy_pairs(truthy, xr, yr, or, plan);
            return;
        }
        _ => {}
    }

    if let (Some(cs), Some(xs), Some(ys)) = (condition.as_indexed(), x.as_indexed(), y.as_indexed())
    {
        if let Some(os) = out.as_indexed_mut() {
            log::trace!("where: indexed path, {} elements", plan.n);
            for i in 0..plan.n {
                os[plan.out_pos(i)] = if cs[i * plan.cond].is_truthy() {
                    xs[i * plan.x]
                } else {
                    ys[i * plan.y]
                };
            }
            return;
        }
    }

    log::trace!("where: accessor path, {} elements", plan.n);
    for i in 0..plan.n {
        let v = if truthy(i) {
            x.get(i * plan.x)
        } else {
            y.get(i * plan.y)
        };
        out.set(plan.out_pos(i), v);
    }
}

/// Copy (re, im) pairs; every logical offset and stride is doubled.
fn copy_pairs<F: Copy>(
    truthy: impl Fn(usize) -> bool,
    xr: &[F],
    yr: &[F],
    or: &mut [F],
    plan: &Plan,
) {
    let (sx, sy) = (2 * plan.x, 2 * plan.y);
    for i in 0..plan.n {
        let (src, k) = if truthy(i) { (xr, i * sx) } else { (yr, i * sy) };
        let o = 2 * plan.out_pos(i);
        or[o] = src[k];
        or[o + 1] = src[k + 1];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typed::{BoolArray, Complex128Array, Complex64Array};
    use crate::StridedError;
    use num_complex::{Complex32, Complex64};

    #[test]
    fn test_literal_scenario() {
        let cond = [true, false, true, false];
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [5.0, 6.0, 7.0, 8.0];
        let mut out = vec![0.0; 4];
        let ptr: *const Vec<f64> = &out;
        let ret = select_where_into(&cond[..], &x[..], &y[..], &mut out, 1, 0).unwrap();
        assert!(std::ptr::eq(ret, ptr));
        assert_eq!(out, vec![1.0, 6.0, 3.0, 8.0]);
    }

    #[test]
    fn test_strided_output() {
        let mut out = vec![0; 8];
        select_where_into(&[true][..], &[1, 2, 3, 4][..], &[5, 6, 7, 8][..], &mut out, 2, 1)
            .unwrap();
        assert_eq!(out, vec![0, 1, 0, 2, 0, 3, 0, 4]);
    }

    #[test]
    fn test_negative_stride_output() {
        let mut out = vec![0; 3];
        select_where_into(&[1u8, 0, 1][..], &[1, 2, 3][..], &[-1][..], &mut out, -1, 2).unwrap();
        assert_eq!(out, vec![3, -1, 1]);
    }

    #[test]
    fn test_empty_condition_short_circuits() {
        let cond: [bool; 0] = [];
        let mut out = vec![9; 4];
        // x and y do not even agree with each other
        select_where_into(&cond[..], &[1, 2, 3][..], &[1, 2][..], &mut out, 1, 0).unwrap();
        assert_eq!(out, vec![9; 4]);
    }

    #[test]
    fn test_incompatible_length_rejected_before_write() {
        let mut out = vec![0; 4];
        let err = select_where_into(
            &[true, false, true][..],
            &[1, 2, 3, 4][..],
            &[0][..],
            &mut out,
            1,
            0,
        )
        .unwrap_err();
        assert_eq!(
            err,
            StridedError::Broadcast {
                from: vec![3],
                to: vec![4]
            }
        );
        assert_eq!(out, vec![0; 4]);
    }

    #[test]
    fn test_boolean_path() {
        let cond = BoolArray::from([true, false, false]);
        let x = BoolArray::from([true, true, true]);
        let y = BoolArray::from([false]);
        let mut out = BoolArray::new(3);
        select_where_into(&cond, &x, &y, &mut out, 1, 0).unwrap();
        assert_eq!(out.to_vec(), vec![true, false, false]);
    }

    #[test]
    fn test_complex_path() {
        let x: Complex128Array = vec![Complex64::new(1.0, 1.0), Complex64::new(2.0, 2.0)].into();
        let y: Complex128Array = vec![Complex64::new(-1.0, 0.0)].into();
        let mut out = Complex128Array::new(4);
        select_where_into(&[0.0, 1.0][..], &x, &y, &mut out, 2, 0).unwrap();
        assert_eq!(
            out.as_slice(),
            &[
                Complex64::new(-1.0, 0.0),
                Complex64::new(0.0, 0.0),
                Complex64::new(2.0, 2.0),
                Complex64::new(0.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_complex64_with_bool_condition() {
        let cond = BoolArray::from([false, true]);
        let x: Complex64Array = vec![Complex32::new(1.0, -1.0)].into();
        let y: Complex64Array = vec![Complex32::new(5.0, 5.0), Complex32::new(6.0, 6.0)].into();
        let mut out = Complex64Array::new(2);
        select_where_into(&cond, &x, &y, &mut out, 1, 0).unwrap();
        assert_eq!(out.as_interleaved(), &[5.0, 5.0, 1.0, -1.0]);
    }

    #[test]
    fn test_accessor_path_mixed_storage() {
        // Boolean condition over plain numeric buffers
        let cond = BoolArray::from([true, false, true, true]);
        let mut out = vec![0i16; 4];
        select_where_into(&cond, &[7i16][..], &[1i16, 2, 3, 4][..], &mut out, 1, 0).unwrap();
        assert_eq!(out, vec![7, 2, 7, 7]);
    }

    #[test]
    fn test_bool_output_from_plain_bools() {
        let mut out = BoolArray::new(2);
        select_where_into(&[true, false][..], &[true][..], &[true][..], &mut out, 1, 0).unwrap();
        assert_eq!(out.to_vec(), vec![true, true]);
    }

    #[test]
    fn test_select_where_allocating() {
        let out = select_where(&[1, 0, 0, 1][..], &[10][..], &[1, 2, 3, 4][..]).unwrap();
        assert_eq!(out, vec![10, 2, 3, 10]);
        let empty = select_where(&[] as &[bool], &[1][..], &[2][..]).unwrap();
        assert!(empty.is_empty());
        assert!(select_where(&[true, false][..], &[1, 2, 3][..], &[0][..])
            .unwrap_err()
            .is_broadcast());
    }
}
