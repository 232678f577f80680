//! N-ary elementwise appliers over strided views.
//!
//! Three flavors share one kernel:
//!
//! - same-shape (`unary` .. `quinary`): every operand has the dims of `dest`
//! - broadcasted (`broadcast_unary` .. `broadcast_quinary`): each input is
//!   aligned right-to-left to `dest` and walked with stride 0 along repeated
//!   dimensions
//! - masked (`mask_unary`, `mask_binary`): `dest` is written only where the
//!   mask element is truthy
//!
//! Operand access goes through [`Accessor`] / [`AccessorMut`]; for plain
//! slices those calls compile down to bracket indexing, so no per-element
//! dispatch happens.
//!
//! A callback that panics stops the walk; positions already written stay
//! written.

use crate::accessor::{Accessor, AccessorMut};
use crate::dtype::Truthy;
use crate::kernel::{ensure_same_shape, for_each_offset};
use crate::shape::promote_strides;
use crate::view::{StridedView, StridedViewMut};
use crate::Result;

// ============================================================================
// Same-shape appliers
// ============================================================================

/// Apply `f` to every element of `x`, writing into `dest`.
///
/// `x` and `dest` must have identical dims. Elements are visited in
/// row-major order of the logical shape regardless of memory layout.
///
/// # Example
/// ```rust
/// use strided_base::{unary, StridedView, StridedViewMut};
///
/// let src = [1.0, 2.0, 3.0, 4.0];
/// let mut out = [0.0; 4];
/// // Transposed read of a 2x2 row-major buffer
/// let x = StridedView::new(&src[..], &[2, 2], &[1, 2], 0).unwrap();
/// let mut dest = StridedViewMut::contiguous(&mut out[..], &[2, 2]).unwrap();
/// unary(&x, &mut dest, |v| v * 10.0).unwrap();
/// assert_eq!(out, [10.0, 30.0, 20.0, 40.0]);
/// ```
pub fn unary<A, O, F>(
    x: &StridedView<'_, A>,
    dest: &mut StridedViewMut<'_, O>,
    mut f: F,
) -> Result<()>
where
    A: Accessor + ?Sized,
    O: AccessorMut + ?Sized,
    F: FnMut(A::Elem) -> O::Elem,
{
    ensure_same_shape(dest.dims(), x.dims())?;
    let dims = dest.dims.clone();
    let out_strides = dest.strides.clone();
    let out_offset = dest.offset;
    let xd = x.data;
    let out = &mut *dest.data;

    for_each_offset(
        &dims,
        [&x.strides[..], &out_strides[..]],
        [x.offset, out_offset],
        |[i, o]| out.set(o, f(xd.get(i))),
    );
    Ok(())
}

/// Apply a binary `f` elementwise over same-shape `x` and `y`.
pub fn binary<A, B, O, F>(
    x: &StridedView<'_, A>,
    y: &StridedView<'_, B>,
    dest: &mut StridedViewMut<'_, O>,
    mut f: F,
) -> Result<()>
where
    A: Accessor + ?Sized,
    B: Accessor + ?Sized,
    O: AccessorMut + ?Sized,
    F: FnMut(A::Elem, B::Elem) -> O::Elem,
{
    ensure_same_shape(dest.dims(), x.dims())?;
    ensure_same_shape(dest.dims(), y.dims())?;
    let dims = dest.dims.clone();
    let out_strides = dest.strides.clone();
    let out_offset = dest.offset;
    let xd = x.data;
    let yd = y.data;
    let out = &mut *dest.data;

    for_each_offset(
        &dims,
        [&x.strides[..], &y.strides[..], &out_strides[..]],
        [x.offset, y.offset, out_offset],
        |[i, j, o]| out.set(o, f(xd.get(i), yd.get(j))),
    );
    Ok(())
}

/// Ternary counterpart of [`binary`].
pub fn ternary<A, B, C, O, F>(
    x: &StridedView<'_, A>,
    y: &StridedView<'_, B>,
    z: &StridedView<'_, C>,
    dest: &mut StridedViewMut<'_, O>,
    mut f: F,
) -> Result<()>
where
    A: Accessor + ?Sized,
    B: Accessor + ?Sized,
    C: Accessor + ?Sized,
    O: AccessorMut + ?Sized,
    F: FnMut(A::Elem, B::Elem, C::Elem) -> O::Elem,
{
    ensure_same_shape(dest.dims(), x.dims())?;
    ensure_same_shape(dest.dims(), y.dims())?;
    ensure_same_shape(dest.dims(), z.dims())?;
    let dims = dest.dims.clone();
    let out_strides = dest.strides.clone();
    let out_offset = dest.offset;
    let xd = x.data;
    let yd = y.data;
    let zd = z.data;
    let out = &mut *dest.data;

    for_each_offset(
        &dims,
        [&x.strides[..], &y.strides[..], &z.strides[..], &out_strides[..]],
        [x.offset, y.offset, z.offset, out_offset],
        |[i, j, k, o]| out.set(o, f(xd.get(i), yd.get(j), zd.get(k))),
    );
    Ok(())
}

/// Quaternary counterpart of [`binary`].
pub fn quaternary<A, B, C, D, O, F>(
    x: &StridedView<'_, A>,
    y: &StridedView<'_, B>,
    z: &StridedView<'_, C>,
    w: &StridedView<'_, D>,
    dest: &mut StridedViewMut<'_, O>,
    mut f: F,
) -> Result<()>
where
    A: Accessor + ?Sized,
    B: Accessor + ?Sized,
    C: Accessor + ?Sized,
    D: Accessor + ?Sized,
    O: AccessorMut + ?Sized,
    F: FnMut(A::Elem, B::Elem, C::Elem, D::Elem) -> O::Elem,
{
    ensure_same_shape(dest.dims(), x.dims())?;
    ensure_same_shape(dest.dims(), y.dims())?;
    ensure_same_shape(dest.dims(), z.dims())?;
    ensure_same_shape(dest.dims(), w.dims())?;
    let dims = dest.dims.clone();
    let out_strides = dest.strides.clone();
    let out_offset = dest.offset;
    let xd = x.data;
    let yd = y.data;
    let zd = z.data;
    let wd = w.data;
    let out = &mut *dest.data;

    for_each_offset(
        &dims,
        [&x.strides[..], &y.strides[..], &z.strides[..], &w.strides[..], &out_strides[..]],
        [x.offset, y.offset, z.offset, w.offset, out_offset],
        |[i, j, k, l, o]| out.set(o, f(xd.get(i), yd.get(j), zd.get(k), wd.get(l))),
    );
    Ok(())
}

/// Quinary counterpart of [`binary`].
pub fn quinary<A, B, C, D, E, O, F>(
    x: &StridedView<'_, A>,
    y: &StridedView<'_, B>,
    z: &StridedView<'_, C>,
    w: &StridedView<'_, D>,
    v: &StridedView<'_, E>,
    dest: &mut StridedViewMut<'_, O>,
    mut f: F,
) -> Result<()>
where
    A: Accessor + ?Sized,
    B: Accessor + ?Sized,
    C: Accessor + ?Sized,
    D: Accessor + ?Sized,
    E: Accessor + ?Sized,
    O: AccessorMut + ?Sized,
    F: FnMut(A::Elem, B::Elem, C::Elem, D::Elem, E::Elem) -> O::Elem,
{
    ensure_same_shape(dest.dims(), x.dims())?;
    ensure_same_shape(dest.dims(), y.dims())?;
    ensure_same_shape(dest.dims(), z.dims())?;
    ensure_same_shape(dest.dims(), w.dims())?;
    ensure_same_shape(dest.dims(), v.dims())?;
    let dims = dest.dims.clone();
    let out_strides = dest.strides.clone();
    let out_offset = dest.offset;
    let xd = x.data;
    let yd = y.data;
    let zd = z.data;
    let wd = w.data;
    let vd = v.data;
    let out = &mut *dest.data;

    for_each_offset(
        &dims,
        [
            &x.strides[..],
            &y.strides[..],
            &z.strides[..],
            &w.strides[..],
            &v.strides[..],
            &out_strides[..],
        ],
        [x.offset, y.offset, z.offset, w.offset, v.offset, out_offset],
        |[i, j, k, l, m, o]| out.set(o, f(xd.get(i), yd.get(j), zd.get(k), wd.get(l), vd.get(m))),
    );
    Ok(())
}

// ============================================================================
// Broadcasted appliers
// ============================================================================

/// Apply `f` to `x` broadcast against the dims of `dest`.
///
/// Size-1 and missing leading dimensions of `x` are repeated. Fails with
/// [`StridedError::Broadcast`](crate::StridedError::Broadcast) before any
/// write when `x` cannot be aligned to `dest`.
pub fn broadcast_unary<A, O, F>(
    x: &StridedView<'_, A>,
    dest: &mut StridedViewMut<'_, O>,
    mut f: F,
) -> Result<()>
where
    A: Accessor + ?Sized,
    O: AccessorMut + ?Sized,
    F: FnMut(A::Elem) -> O::Elem,
{
    let dims = dest.dims.clone();
    let xs = promote_strides(&x.dims, &x.strides, &dims)?;
    let out_strides = dest.strides.clone();
    let out_offset = dest.offset;
    let xd = x.data;
    let out = &mut *dest.data;

    for_each_offset(
        &dims,
        [&xs[..], &out_strides[..]],
        [x.offset, out_offset],
        |[i, o]| out.set(o, f(xd.get(i))),
    );
    Ok(())
}

/// Apply a binary `f` over `x` and `y`, each broadcast independently to the
/// dims of `dest`.
///
/// All operands are validated before the first write.
pub fn broadcast_binary<A, B, O, F>(
    x: &StridedView<'_, A>,
    y: &StridedView<'_, B>,
    dest: &mut StridedViewMut<'_, O>,
    mut f: F,
) -> Result<()>
where
    A: Accessor + ?Sized,
    B: Accessor + ?Sized,
    O: AccessorMut + ?Sized,
    F: FnMut(A::Elem, B::Elem) -> O::Elem,
{
    let dims = dest.dims.clone();
    let xs = promote_strides(&x.dims, &x.strides, &dims)?;
    let ys = promote_strides(&y.dims, &y.strides, &dims)?;
    let out_strides = dest.strides.clone();
    let out_offset = dest.offset;
    let xd = x.data;
    let yd = y.data;
    let out = &mut *dest.data;

    for_each_offset(
        &dims,
        [&xs[..], &ys[..], &out_strides[..]],
        [x.offset, y.offset, out_offset],
        |[i, j, o]| out.set(o, f(xd.get(i), yd.get(j))),
    );
    Ok(())
}

pub fn broadcast_ternary<A, B, C, O, F>(
    x: &StridedView<'_, A>,
    y: &StridedView<'_, B>,
    z: &StridedView<'_, C>,
    dest: &mut StridedViewMut<'_, O>,
    mut f: F,
) -> Result<()>
where
    A: Accessor + ?Sized,
    B: Accessor + ?Sized,
    C: Accessor + ?Sized,
    O: AccessorMut + ?Sized,
    F: FnMut(A::Elem, B::Elem, C::Elem) -> O::Elem,
{
    let dims = dest.dims.clone();
    let xs = promote_strides(&x.dims, &x.strides, &dims)?;
    let ys = promote_strides(&y.dims, &y.strides, &dims)?;
    let zs = promote_strides(&z.dims, &z.strides, &dims)?;
    let out_strides = dest.strides.clone();
    let out_offset = dest.offset;
    let xd = x.data;
    let yd = y.data;
    let zd = z.data;
    let out = &mut *dest.data;

    for_each_offset(
        &dims,
        [&xs[..], &ys[..], &zs[..], &out_strides[..]],
        [x.offset, y.offset, z.offset, out_offset],
        |[i, j, k, o]| out.set(o, f(xd.get(i), yd.get(j), zd.get(k))),
    );
    Ok(())
}

pub fn broadcast_quaternary<A, B, C, D, O, F>(
    x: &StridedView<'_, A>,
    y: &StridedView<'_, B>,
    z: &StridedView<'_, C>,
    w: &StridedView<'_, D>,
    dest: &mut StridedViewMut<'_, O>,
    mut f: F,
) -> Result<()>
where
    A: Accessor + ?Sized,
    B: Accessor + ?Sized,
    C: Accessor + ?Sized,
    D: Accessor + ?Sized,
    O: AccessorMut + ?Sized,
    F: FnMut(A::Elem, B::Elem, C::Elem, D::Elem) -> O::Elem,
{
    let dims = dest.dims.clone();
    let xs = promote_strides(&x.dims, &x.strides, &dims)?;
    let ys = promote_strides(&y.dims, &y.strides, &dims)?;
    let zs = promote_strides(&z.dims, &z.strides, &dims)?;
    let ws = promote_strides(&w.dims, &w.strides, &dims)?;
    let out_strides = dest.strides.clone();
    let out_offset = dest.offset;
    let xd = x.data;
    let yd = y.data;
    let zd = z.data;
    let wd = w.data;
    let out = &mut *dest.data;

    for_each_offset(
        &dims,
        [&xs[..], &ys[..], &zs[..], &ws[..], &out_strides[..]],
        [x.offset, y.offset, z.offset, w.offset, out_offset],
        |[i, j, k, l, o]| out.set(o, f(xd.get(i), yd.get(j), zd.get(k), wd.get(l))),
    );
    Ok(())
}

/// Five-input broadcast applier.
pub fn broadcast_quinary<A, B, C, D, E, O, F>(
    x: &StridedView<'_, A>,
    y: &StridedView<'_, B>,
    z: &StridedView<'_, C>,
    w: &StridedView<'_, D>,
    v: &StridedView<'_, E>,
    dest: &mut StridedViewMut<'_, O>,
    mut f: F,
) -> Result<()>
where
    A: Accessor + ?Sized,
    B: Accessor + ?Sized,
    C: Accessor + ?Sized,
    D: Accessor + ?Sized,
    E: Accessor + ?Sized,
    O: AccessorMut + ?Sized,
    F: FnMut(A::Elem, B::Elem, C::Elem, D::Elem, E::Elem) -> O::Elem,
{
    let dims = dest.dims.clone();
    let xs = promote_strides(&x.dims, &x.strides, &dims)?;
    let ys = promote_strides(&y.dims, &y.strides, &dims)?;
    let zs = promote_strides(&z.dims, &z.strides, &dims)?;
    let ws = promote_strides(&w.dims, &w.strides, &dims)?;
    let vs = promote_strides(&v.dims, &v.strides, &dims)?;
    let out_strides = dest.strides.clone();
    let out_offset = dest.offset;
    let xd = x.data;
    let yd = y.data;
    let zd = z.data;
    let wd = w.data;
    let vd = v.data;
    let out = &mut *dest.data;

    for_each_offset(
        &dims,
        [&xs[..], &ys[..], &zs[..], &ws[..], &vs[..], &out_strides[..]],
        [x.offset, y.offset, z.offset, w.offset, v.offset, out_offset],
        |[i, j, k, l, m, o]| out.set(o, f(xd.get(i), yd.get(j), zd.get(k), wd.get(l), vd.get(m))),
    );
    Ok(())
}

// ============================================================================
// Masked appliers
// ============================================================================

/// Apply `f` to `x` and write the result only where `mask` is truthy.
///
/// `x`, `mask` and `dest` share one shape. Positions with a falsy mask
/// element keep their previous value.
pub fn mask_unary<A, M, O, F>(
    x: &StridedView<'_, A>,
    mask: &StridedView<'_, M>,
    dest: &mut StridedViewMut<'_, O>,
    mut f: F,
) -> Result<()>
where
    A: Accessor + ?Sized,
    M: Accessor + ?Sized,
    M::Elem: Truthy,
    O: AccessorMut + ?Sized,
    F: FnMut(A::Elem) -> O::Elem,
{
    ensure_same_shape(dest.dims(), x.dims())?;
    ensure_same_shape(dest.dims(), mask.dims())?;
    let dims = dest.dims.clone();
    let out_strides = dest.strides.clone();
    let out_offset = dest.offset;
    let xd = x.data;
    let md = mask.data;
    let out = &mut *dest.data;

    for_each_offset(
        &dims,
        [&x.strides[..], &mask.strides[..], &out_strides[..]],
        [x.offset, mask.offset, out_offset],
        |[i, m, o]| {
            if md.get(m).is_truthy() {
                out.set(o, f(xd.get(i)));
            }
        },
    );
    Ok(())
}

/// Binary counterpart of [`mask_unary`].
pub fn mask_binary<A, B, M, O, F>(
    x: &StridedView<'_, A>,
    y: &StridedView<'_, B>,
    mask: &StridedView<'_, M>,
    dest: &mut StridedViewMut<'_, O>,
    mut f: F,
) -> Result<()>
where
    A: Accessor + ?Sized,
    B: Accessor + ?Sized,
    M: Accessor + ?Sized,
    M::Elem: Truthy,
    O: AccessorMut + ?Sized,
    F: FnMut(A::Elem, B::Elem) -> O::Elem,
{
    ensure_same_shape(dest.dims(), x.dims())?;
    ensure_same_shape(dest.dims(), y.dims())?;
    ensure_same_shape(dest.dims(), mask.dims())?;
    let dims = dest.dims.clone();
    let out_strides = dest.strides.clone();
    let out_offset = dest.offset;
    let xd = x.data;
    let yd = y.data;
    let md = mask.data;
    let out = &mut *dest.data;

    for_each_offset(
        &dims,
        [&x.strides[..], &y.strides[..], &mask.strides[..], &out_strides[..]],
        [x.offset, y.offset, mask.offset, out_offset],
        |[i, j, m, o]| {
            if md.get(m).is_truthy() {
                out.set(o, f(xd.get(i), yd.get(j)));
            }
        },
    );
    Ok(())
}

// ============================================================================
// In-place appliers
// ============================================================================

/// Replace every element of `dest` with `f(element)`.
///
/// Each position is read and then written in the same single pass. When
/// `dest` has zero strides several logical positions share one element,
/// and later visits observe earlier writes.
pub fn unary_in_place<O, F>(dest: &mut StridedViewMut<'_, O>, mut f: F)
where
    O: AccessorMut + ?Sized,
    F: FnMut(O::Elem) -> O::Elem,
{
    let dims = dest.dims.clone();
    let out_strides = dest.strides.clone();
    let out_offset = dest.offset;
    let out = &mut *dest.data;

    for_each_offset(&dims, [&out_strides[..]], [out_offset], |[o]| {
        let v = out.get(o);
        out.set(o, f(v));
    });
}

/// Replace every element of `dest` with `f(element, y)`, broadcasting `y`
/// to the dims of `dest`.
pub fn binary_in_place<B, O, F>(
    dest: &mut StridedViewMut<'_, O>,
    y: &StridedView<'_, B>,
    mut f: F,
) -> Result<()>
where
    B: Accessor + ?Sized,
    O: AccessorMut + ?Sized,
    F: FnMut(O::Elem, B::Elem) -> O::Elem,
{
    let dims = dest.dims.clone();
    let ys = promote_strides(&y.dims, &y.strides, &dims)?;
    let out_strides = dest.strides.clone();
    let out_offset = dest.offset;
    let yd = y.data;
    let out = &mut *dest.data;

    for_each_offset(
        &dims,
        [&out_strides[..], &ys[..]],
        [out_offset, y.offset],
        |[o, j]| {
            let v = out.get(o);
            out.set(o, f(v, yd.get(j)));
        },
    );
    Ok(())
}
