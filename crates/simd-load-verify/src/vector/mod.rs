//! The vector abstraction under test and its reference backends.
//!
//! [`SimdVector`] is the load surface the checks drive: a lane count, a
//! lane element type, a zero factory, a constructor from memory, an
//! explicit load taking a [`LoadMode`], lane access and equality.
//!
//! Three reference backends are provided:
//! - [`scalar`] — single-lane vectors with natural scalar alignment
//! - [`sse`] — 128-bit vectors, 16-byte alignment
//! - [`avx`] — 256-bit vectors, 32-byte alignment; 16-bit lanes stay
//!   128 bits wide and are aligned to their own byte size

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementType};

pub mod avx;
pub mod scalar;
pub mod sse;

/// Caller assertion about the alignment of the source address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// No assertion; the implementation picks the access path.
    Default,
    /// The address is aligned for this vector and source type.
    Aligned,
    /// The address may be misaligned.
    Unaligned,
}

impl LoadMode {
    /// Mode used at `offset` during a sweep over vectors of `size` lanes.
    ///
    /// `Default` on multiples of `2 * size`, `Aligned` on the remaining
    /// multiples of `size`, `Unaligned` everywhere else. Every mode appears
    /// once `offset` has covered `2 * size` consecutive values.
    pub const fn select(offset: usize, size: usize) -> Self {
        if offset % (2 * size) == 0 {
            Self::Default
        } else if offset % size == 0 {
            Self::Aligned
        } else {
            Self::Unaligned
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Aligned => "aligned",
            Self::Unaligned => "unaligned",
        }
    }
}

impl fmt::Display for LoadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Family of vector implementations sharing one register width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Scalar,
    Sse,
    Avx,
}

impl Backend {
    pub const ALL: [Backend; 3] = [Self::Scalar, Self::Sse, Self::Avx];

    /// The backend-wide `VectorAlignment` constant.
    pub const fn vector_alignment(self) -> usize {
        match self {
            Self::Scalar | Self::Sse => 16,
            Self::Avx => 32,
        }
    }

    /// Whether 2-byte lanes are packed into a narrower register than the
    /// backend width, so their alignment is the vector's own byte size.
    pub const fn packs_sub_word(self) -> bool {
        matches!(self, Self::Avx)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Sse => "sse",
            Self::Avx => "avx",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A SIMD vector type whose load surface can be verified.
pub trait SimdVector: Copy + PartialEq + fmt::Debug + Add<Output = Self> + 'static {
    /// Lane element type.
    type Entry: Element;

    /// Number of lanes.
    const SIZE: usize;

    const BACKEND: Backend;

    const NAME: &'static str;

    /// Whether arrays of this type take part in alignment checking.
    const CHECKS_ALIGNMENT: bool = true;

    fn zero() -> Self;

    fn broadcast(value: Self::Entry) -> Self;

    /// Lane `j` holds `j`.
    fn indexes_from_zero() -> Self;

    /// # Panics
    ///
    /// Panics if `index >= Self::SIZE`.
    fn lane(&self, index: usize) -> Self::Entry;

    /// Replace all lanes with the first `SIZE` elements of `mem`, each
    /// converted to [`SimdVector::Entry`].
    ///
    /// # Panics
    ///
    /// Panics if `mem` is shorter than `SIZE`, or if `mode` is
    /// [`LoadMode::Aligned`] and `mem` does not start on a
    /// [`SimdVector::aligned_window`] boundary.
    fn load<M: Element>(&mut self, mem: &[M], mode: LoadMode);

    /// Construct a vector from memory.
    fn from_slice<M: Element>(mem: &[M], mode: LoadMode) -> Self {
        let mut v = Self::zero();
        v.load(mem, mode);
        v
    }

    /// Alignment an `Aligned` load of `M` elements requires: the source
    /// window rounded up to a power of two, capped at the vector's own
    /// alignment.
    fn aligned_window<M: Element>() -> usize {
        align_of::<Self>().min((Self::SIZE * size_of::<M>()).next_power_of_two())
    }
}

/// Enforce the `Aligned` assertion before a load.
pub(crate) fn check_assertion<V: SimdVector, M: Element>(mem: &[M], mode: LoadMode) {
    if mode == LoadMode::Aligned {
        let align = V::aligned_window::<M>();
        assert!(
            mem.as_ptr() as usize % align == 0,
            "{}: aligned load of {} from {:p} requires {align}-byte alignment",
            V::NAME,
            M::TYPE,
            mem.as_ptr()
        );
    }
}

/// Static layout facts about a [`SimdVector`] type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VectorTypeDescriptor {
    pub name: &'static str,
    pub backend: Backend,
    pub lane: ElementType,
    pub size: usize,
    /// Backend `VectorAlignment`.
    pub vector_alignment: usize,
    /// `align_of` the Rust type.
    pub type_alignment: usize,
    /// `size_of` the Rust type.
    pub byte_size: usize,
}

impl VectorTypeDescriptor {
    pub fn of<V: SimdVector>() -> Self {
        Self {
            name: V::NAME,
            backend: V::BACKEND,
            lane: <V::Entry as Element>::TYPE,
            size: V::SIZE,
            vector_alignment: V::BACKEND.vector_alignment(),
            type_alignment: align_of::<V>(),
            byte_size: size_of::<V>(),
        }
    }

    /// `backend::Name`, unique across backends.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.backend, self.name)
    }

    /// Byte distance between consecutive vectors in an array.
    pub const fn stride(&self) -> usize {
        self.size * self.lane.size()
    }

    /// Alignment every element of an array of this type must satisfy.
    pub const fn required_alignment(&self) -> usize {
        let elem = self.lane.size();
        let mut align = self.vector_alignment;
        if self.size == 1 && elem != align {
            align = elem;
        }
        if self.backend.packs_sub_word() && elem == 2 {
            align = self.byte_size;
        }
        align
    }
}

impl fmt::Display for VectorTypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}; {}] align {} stride {}",
            self.qualified_name(),
            self.lane,
            self.size,
            self.required_alignment(),
            self.stride()
        )
    }
}

/// Define a reference vector: `#[repr(C)]` over `[elem; lanes]` with the
/// given alignment. Same-type loads read the whole vector at once; other
/// source types convert lane by lane.
macro_rules! reference_vector {
    ($(#[$meta:meta])* $name:ident: [$elem:ty; $lanes:literal], align $align:literal, $backend:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq)]
        #[repr(C, align($align))]
        pub struct $name(pub [$elem; $lanes]);

        const _: () = assert!(size_of::<$name>() == $lanes * size_of::<$elem>());

        impl $crate::vector::SimdVector for $name {
            type Entry = $elem;
            const SIZE: usize = $lanes;
            const BACKEND: $crate::vector::Backend = $crate::vector::Backend::$backend;
            const NAME: &'static str = stringify!($name);

            fn zero() -> Self {
                Self([<$elem>::default(); $lanes])
            }

            fn broadcast(value: $elem) -> Self {
                Self([value; $lanes])
            }

            #[allow(clippy::cast_possible_wrap)]
            fn indexes_from_zero() -> Self {
                let mut lanes = [<$elem>::default(); $lanes];
                for (j, lane) in lanes.iter_mut().enumerate() {
                    *lane = <$elem as $crate::element::Element>::from_index(j as i64);
                }
                Self(lanes)
            }

            fn lane(&self, index: usize) -> $elem {
                self.0[index]
            }

            fn load<M: $crate::element::Element>(
                &mut self,
                mem: &[M],
                mode: $crate::vector::LoadMode,
            ) {
                use $crate::element::Element as _;

                let mem = &mem[..$lanes];
                $crate::vector::check_assertion::<Self, M>(mem, mode);
                if M::TYPE == <$elem as $crate::element::Element>::TYPE {
                    let src = mem.as_ptr().cast::<Self>();
                    *self = if mode != $crate::vector::LoadMode::Unaligned && src.is_aligned() {
                        // SAFETY: equal tags mean M is $elem, Self is
                        // repr(C) over exactly [$elem; $lanes], mem holds
                        // $lanes elements and src is aligned for Self.
                        unsafe { src.read() }
                    } else {
                        // SAFETY: as above, without the alignment requirement.
                        unsafe { src.read_unaligned() }
                    };
                } else {
                    for (lane, value) in self.0.iter_mut().zip(mem) {
                        *lane = value.cast();
                    }
                }
            }
        }

        impl ::std::ops::Add for $name {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                let mut out = self;
                for (a, b) in out.0.iter_mut().zip(rhs.0) {
                    *a = $crate::element::Element::wrapping_add(*a, b);
                }
                out
            }
        }
    };
}

pub(crate) use reference_vector;
