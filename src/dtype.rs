//! Storage dtype tags and element capabilities.
//!
//! The tag is only a dispatch key: it selects a storage specialization (plain
//! indexed buffer, byte-backed boolean, interleaved complex) and never drives
//! casting.

use std::fmt;
use std::str::FromStr;

use num_complex::Complex;

use crate::StridedError;

/// Storage dtype tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Float64,
    Float32,
    Int32,
    Int16,
    Int8,
    Uint32,
    Uint16,
    Uint8,
    /// Clamped unsigned 8-bit storage.
    Uint8c,
    Complex128,
    Complex64,
    Bool,
    /// Untyped storage of arbitrary elements.
    Generic,
}

impl DType {
    /// All known tags, in canonical order.
    pub const ALL: [DType; 13] = [
        DType::Float64,
        DType::Float32,
        DType::Int32,
        DType::Int16,
        DType::Int8,
        DType::Uint32,
        DType::Uint16,
        DType::Uint8,
        DType::Uint8c,
        DType::Complex128,
        DType::Complex64,
        DType::Bool,
        DType::Generic,
    ];

    /// Canonical tag string.
    pub fn as_str(&self) -> &'static str {
        match self {
            DType::Float64 => "float64",
            DType::Float32 => "float32",
            DType::Int32 => "int32",
            DType::Int16 => "int16",
            DType::Int8 => "int8",
            DType::Uint32 => "uint32",
            DType::Uint16 => "uint16",
            DType::Uint8 => "uint8",
            DType::Uint8c => "uint8c",
            DType::Complex128 => "complex128",
            DType::Complex64 => "complex64",
            DType::Bool => "bool",
            DType::Generic => "generic",
        }
    }

    /// Bytes per logical element, or `None` for `generic`.
    pub fn byte_size(&self) -> Option<usize> {
        match self {
            DType::Float64 | DType::Complex64 => Some(8),
            DType::Float32 | DType::Int32 | DType::Uint32 => Some(4),
            DType::Int16 | DType::Uint16 => Some(2),
            DType::Int8 | DType::Uint8 | DType::Uint8c | DType::Bool => Some(1),
            DType::Complex128 => Some(16),
            DType::Generic => None,
        }
    }

    #[inline]
    pub fn is_complex(&self) -> bool {
        matches!(self, DType::Complex64 | DType::Complex128)
    }

    #[inline]
    pub fn is_bool(&self) -> bool {
        matches!(self, DType::Bool)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DType {
    type Err = StridedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DType::ALL
            .iter()
            .copied()
            .find(|dt| dt.as_str() == s)
            .ok_or_else(|| StridedError::UnknownDType(s.to_string()))
    }
}

/// Element types that can live in an indexed buffer.
///
/// Custom element types get the `generic` tag by implementing this trait
/// with an empty body.
pub trait Element: Copy {
    const DTYPE: DType = DType::Generic;
}

macro_rules! impl_element {
    ($($t:ty => $dt:expr),* $(,)?) => {
        $(
            impl Element for $t {
                const DTYPE: DType = $dt;
            }
        )*
    };
}

impl_element!(
    f64 => DType::Float64,
    f32 => DType::Float32,
    i32 => DType::Int32,
    i16 => DType::Int16,
    i8 => DType::Int8,
    u32 => DType::Uint32,
    u16 => DType::Uint16,
    u8 => DType::Uint8,
    bool => DType::Bool,
    Complex<f64> => DType::Complex128,
    Complex<f32> => DType::Complex64,
    i64 => DType::Generic,
    u64 => DType::Generic,
    isize => DType::Generic,
    usize => DType::Generic,
);

/// Truthiness of mask and condition elements.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    #[inline(always)]
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! impl_truthy_int {
    ($($t:ty),*) => {
        $(
            impl Truthy for $t {
                #[inline(always)]
                fn is_truthy(&self) -> bool { *self != 0 }
            }
        )*
    };
}

impl_truthy_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_truthy_float {
    ($($t:ty),*) => {
        $(
            impl Truthy for $t {
                // NaN is falsy
                #[inline(always)]
                fn is_truthy(&self) -> bool { *self != 0.0 && !self.is_nan() }
            }
        )*
    };
}

impl_truthy_float!(f32, f64);

impl<T: Truthy> Truthy for Complex<T> {
    #[inline]
    fn is_truthy(&self) -> bool {
        self.re.is_truthy() || self.im.is_truthy()
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    #[inline(always)]
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}
