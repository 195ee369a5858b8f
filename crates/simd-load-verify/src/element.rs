//! Numeric element types: the scalar identities used both as vector lane
//! types and as the element type of the memory being loaded.
//!
//! [`ElementType`] is the runtime tag; [`Element`] is the sealed trait
//! implemented by the eight Rust scalars that carry a tag. Conversions
//! between any two elements go through [`Scalar`], which holds every
//! supported value exactly, and then narrow with `as` semantics.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag identifying a numeric element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    F32,
    F64,
}

impl ElementType {
    /// Every element type, ordered by width then signedness.
    pub const ALL: [ElementType; 8] = [
        Self::I8,
        Self::U8,
        Self::I16,
        Self::U16,
        Self::I32,
        Self::U32,
        Self::F32,
        Self::F64,
    ];

    /// Size of one element in bytes.
    pub const fn size(self) -> usize {
        match self {
            Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::F64 => 8,
        }
    }

    /// Diagnostic label, identical to the Rust type name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::U8 => "u8",
            Self::I16 => "i16",
            Self::U16 => "u16",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    pub const fn is_signed(self) -> bool {
        !matches!(self, Self::U8 | Self::U16 | Self::U32)
    }

    /// Look up a tag by its label.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.name() == name)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value widened to a representation that holds every element exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Int(i64),
    Float(f64),
}

mod sealed {
    pub trait Sealed {}
}

/// A Rust scalar type usable as a lane or memory element.
///
/// Implemented for `i8`, `u8`, `i16`, `u16`, `i32`, `u32`, `f32` and `f64`
/// only. Every implementor has a distinct [`Element::TYPE`], so two
/// elements with equal tags are the same Rust type.
pub trait Element:
    sealed::Sealed + Copy + Default + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    const TYPE: ElementType;

    fn widen(self) -> Scalar;

    /// Narrow a widened value with `as` semantics: integers wrap,
    /// integer-to-float rounds to nearest, float-to-float rounds.
    fn narrow(value: Scalar) -> Self;

    /// Lane-wise addition; wraps on integer overflow.
    fn wrapping_add(self, rhs: Self) -> Self;

    /// Convert to another element type, as a C-style `static_cast` would.
    #[inline]
    fn cast<T: Element>(self) -> T {
        T::narrow(self.widen())
    }

    /// The element holding the integer `k`, used to fill test buffers.
    #[inline]
    fn from_index(k: i64) -> Self {
        Self::narrow(Scalar::Int(k))
    }
}

macro_rules! int_element {
    ($($ty:ty => $tag:ident),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl Element for $ty {
            const TYPE: ElementType = ElementType::$tag;

            #[inline]
            fn widen(self) -> Scalar {
                Scalar::Int(i64::from(self))
            }

            #[inline]
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            fn narrow(value: Scalar) -> Self {
                match value {
                    Scalar::Int(v) => v as $ty,
                    Scalar::Float(v) => v as $ty,
                }
            }

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$ty>::wrapping_add(self, rhs)
            }
        }
    )*};
}

macro_rules! float_element {
    ($($ty:ty => $tag:ident),* $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl Element for $ty {
            const TYPE: ElementType = ElementType::$tag;

            #[inline]
            fn widen(self) -> Scalar {
                Scalar::Float(f64::from(self))
            }

            #[inline]
            #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
            fn narrow(value: Scalar) -> Self {
                match value {
                    Scalar::Int(v) => v as $ty,
                    Scalar::Float(v) => v as $ty,
                }
            }

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                self + rhs
            }
        }
    )*};
}

int_element!(i8 => I8, u8 => U8, i16 => I16, u16 => U16, i32 => I32, u32 => U32);
float_element!(f32 => F32, f64 => F64);
