//! Accessor-protocol storage: byte-backed booleans and complex buffers, plus
//! a dtype-keyed buffer factory.

use bytemuck::Pod;
use num_complex::Complex;
use num_traits::Float;

use crate::accessor::{Accessor, AccessorMut, Raw, RawMut};
use crate::dtype::DType;
use crate::interleaved::{as_interleaved, as_interleaved_mut};

// ============================================================================
// BoolArray
// ============================================================================

/// Boolean array stored as one byte (0 or 1) per element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoolArray {
    bytes: Vec<u8>,
}

impl BoolArray {
    /// Create an array of `len` false values.
    pub fn new(len: usize) -> Self {
        Self {
            bytes: vec![0; len],
        }
    }

    /// Wrap raw bytes; any non-zero byte reads as true.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Backing bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Copy out as `Vec<bool>`.
    pub fn to_vec(&self) -> Vec<bool> {
        self.bytes.iter().map(|&b| b != 0).collect()
    }
}

impl From<&[bool]> for BoolArray {
    fn from(values: &[bool]) -> Self {
        values.iter().copied().collect()
    }
}

impl<const N: usize> From<[bool; N]> for BoolArray {
    fn from(values: [bool; N]) -> Self {
        values.into_iter().collect()
    }
}

impl FromIterator<bool> for BoolArray {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bytes: iter.into_iter().map(u8::from).collect(),
        }
    }
}

impl Accessor for BoolArray {
    type Elem = bool;

    #[inline]
    fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    fn dtype(&self) -> DType {
        DType::Bool
    }

    #[inline]
    fn get(&self, index: usize) -> bool {
        self.bytes[index] != 0
    }

    #[inline]
    fn raw(&self) -> Option<Raw<'_>> {
        Some(Raw::Bytes(&self.bytes))
    }
}

impl AccessorMut for BoolArray {
    #[inline]
    fn set(&mut self, index: usize, value: bool) {
        self.bytes[index] = u8::from(value);
    }

    #[inline]
    fn raw_mut(&mut self) -> Option<RawMut<'_>> {
        Some(RawMut::Bytes(&mut self.bytes))
    }
}

// ============================================================================
// ComplexArray
// ============================================================================

/// Component type of a complex array (`f32` or `f64`).
pub trait ComplexPart: Float + Pod {
    /// Tag of `ComplexArray<Self>`.
    const COMPLEX_DTYPE: DType;

    fn raw(data: &[Complex<Self>]) -> Raw<'_>;

    fn raw_mut(data: &mut [Complex<Self>]) -> RawMut<'_>;
}

impl ComplexPart for f32 {
    const COMPLEX_DTYPE: DType = DType::Complex64;

    #[inline]
    fn raw(data: &[Complex<f32>]) -> Raw<'_> {
        Raw::Interleaved32(as_interleaved(data))
    }

    #[inline]
    fn raw_mut(data: &mut [Complex<f32>]) -> RawMut<'_> {
        RawMut::Interleaved32(as_interleaved_mut(data))
    }
}

impl ComplexPart for f64 {
    const COMPLEX_DTYPE: DType = DType::Complex128;

    #[inline]
    fn raw(data: &[Complex<f64>]) -> Raw<'_> {
        Raw::Interleaved64(as_interleaved(data))
    }

    #[inline]
    fn raw_mut(data: &mut [Complex<f64>]) -> RawMut<'_> {
        RawMut::Interleaved64(as_interleaved_mut(data))
    }
}

/// Complex array read and written through the accessor protocol.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexArray<F> {
    data: Vec<Complex<F>>,
}

/// Single-precision complex array.
pub type Complex64Array = ComplexArray<f32>;

/// Double-precision complex array.
pub type Complex128Array = ComplexArray<f64>;

impl<F: ComplexPart> ComplexArray<F> {
    /// Create an array of `len` zeros.
    pub fn new(len: usize) -> Self {
        Self {
            data: vec![Complex::new(F::zero(), F::zero()); len],
        }
    }

    /// Build from interleaved `[re, im, ...]` components.
    ///
    /// A trailing unpaired component is ignored.
    pub fn from_interleaved(parts: &[F]) -> Self {
        Self {
            data: parts
                .chunks_exact(2)
                .map(|p| Complex::new(p[0], p[1]))
                .collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Interleaved components over the same storage.
    #[inline]
    pub fn as_interleaved(&self) -> &[F] {
        as_interleaved(&self.data)
    }

    /// Elements as a slice of complex values.
    #[inline]
    pub fn as_slice(&self) -> &[Complex<F>] {
        &self.data
    }
}

impl<F> From<Vec<Complex<F>>> for ComplexArray<F> {
    fn from(data: Vec<Complex<F>>) -> Self {
        Self { data }
    }
}

impl<F> FromIterator<Complex<F>> for ComplexArray<F> {
    fn from_iter<I: IntoIterator<Item = Complex<F>>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<F: ComplexPart> Accessor for ComplexArray<F> {
    type Elem = Complex<F>;

    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn dtype(&self) -> DType {
        F::COMPLEX_DTYPE
    }

    #[inline]
    fn get(&self, index: usize) -> Complex<F> {
        self.data[index]
    }

    #[inline]
    fn raw(&self) -> Option<Raw<'_>> {
        Some(F::raw(&self.data))
    }
}

impl<F: ComplexPart> AccessorMut for ComplexArray<F> {
    #[inline]
    fn set(&mut self, index: usize, value: Complex<F>) {
        self.data[index] = value;
    }

    #[inline]
    fn raw_mut(&mut self) -> Option<RawMut<'_>> {
        Some(F::raw_mut(&mut self.data))
    }
}

// ============================================================================
// TypedBuffer
// ============================================================================

/// A freshly allocated buffer in the storage specialization of a dtype tag.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedBuffer {
    Float64(Vec<f64>),
    Float32(Vec<f32>),
    Int32(Vec<i32>),
    Int16(Vec<i16>),
    Int8(Vec<i8>),
    Uint32(Vec<u32>),
    Uint16(Vec<u16>),
    Uint8(Vec<u8>),
    Uint8c(Vec<u8>),
    Complex128(Complex128Array),
    Complex64(Complex64Array),
    Bool(BoolArray),
    /// Untyped numeric storage, held as `f64`. Non-numeric generic
    /// elements use a plain `Vec<T>` through [`Element`](crate::Element).
    Generic(Vec<f64>),
}

impl TypedBuffer {
    /// Allocate `len` zeros (false for `bool`).
    pub fn zeros(dtype: DType, len: usize) -> Self {
        Self::splat(dtype, len, false)
    }

    /// Allocate `len` ones (true for `bool`, `1 + 0i` for complex tags).
    pub fn ones(dtype: DType, len: usize) -> Self {
        Self::splat(dtype, len, true)
    }

    fn splat(dtype: DType, len: usize, one: bool) -> Self {
        let v = u8::from(one);
        match dtype {
            DType::Float64 => TypedBuffer::Float64(vec![f64::from(v); len]),
            DType::Float32 => TypedBuffer::Float32(vec![f32::from(v); len]),
            DType::Int32 => TypedBuffer::Int32(vec![i32::from(v); len]),
            DType::Int16 => TypedBuffer::Int16(vec![i16::from(v); len]),
            DType::Int8 => TypedBuffer::Int8(vec![v as i8; len]),
            DType::Uint32 => TypedBuffer::Uint32(vec![u32::from(v); len]),
            DType::Uint16 => TypedBuffer::Uint16(vec![u16::from(v); len]),
            DType::Uint8 => TypedBuffer::Uint8(vec![v; len]),
            DType::Uint8c => TypedBuffer::Uint8c(vec![v; len]),
            DType::Complex128 => {
                TypedBuffer::Complex128(vec![Complex::new(f64::from(v), 0.0); len].into())
            }
            DType::Complex64 => {
                TypedBuffer::Complex64(vec![Complex::new(f32::from(v), 0.0); len].into())
            }
            DType::Bool => TypedBuffer::Bool(BoolArray::from_bytes(vec![v; len])),
            DType::Generic => TypedBuffer::Generic(vec![f64::from(v); len]),
        }
    }

    /// Dtype tag of this buffer.
    pub fn dtype(&self) -> DType {
        match self {
            TypedBuffer::Float64(_) => DType::Float64,
            TypedBuffer::Float32(_) => DType::Float32,
            TypedBuffer::Int32(_) => DType::Int32,
            TypedBuffer::Int16(_) => DType::Int16,
            TypedBuffer::Int8(_) => DType::Int8,
            TypedBuffer::Uint32(_) => DType::Uint32,
            TypedBuffer::Uint16(_) => DType::Uint16,
            TypedBuffer::Uint8(_) => DType::Uint8,
            TypedBuffer::Uint8c(_) => DType::Uint8c,
            TypedBuffer::Complex128(_) => DType::Complex128,
            TypedBuffer::Complex64(_) => DType::Complex64,
            TypedBuffer::Bool(_) => DType::Bool,
            TypedBuffer::Generic(_) => DType::Generic,
        }
    }

    /// Number of logical elements.
    pub fn len(&self) -> usize {
        match self {
            TypedBuffer::Float64(v) | TypedBuffer::Generic(v) => v.len(),
            TypedBuffer::Float32(v) => v.len(),
            TypedBuffer::Int32(v) => v.len(),
            TypedBuffer::Int16(v) => v.len(),
            TypedBuffer::Int8(v) => v.len(),
            TypedBuffer::Uint32(v) => v.len(),
            TypedBuffer::Uint16(v) => v.len(),
            TypedBuffer::Uint8(v) | TypedBuffer::Uint8c(v) => v.len(),
            TypedBuffer::Complex128(v) => v.len(),
            TypedBuffer::Complex64(v) => v.len(),
            TypedBuffer::Bool(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
