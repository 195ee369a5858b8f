//! Vector types with planted defects, shared by the falsification tests.
//!
//! Each type gets one thing wrong; the tests show the matching check
//! reports it and the others stay quiet.

#![allow(dead_code)]

use std::ops::Add;
use std::sync::atomic::{AtomicI32, Ordering};

use simd_load_verify::buffer::{AlignedBuffer, CACHE_LINE};
use simd_load_verify::element::{Element, ElementType};
use simd_load_verify::vector::{Backend, LoadMode, SimdVector};

macro_rules! lane_access {
    ($elem:ty; $lanes:literal) => {
        type Entry = $elem;
        const SIZE: usize = $lanes;

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
                *lane = <$elem as Element>::from_index(j as i64);
            }
            Self(lanes)
        }

        fn lane(&self, index: usize) -> $elem {
            self.0[index]
        }
    };
}

macro_rules! lanewise_add {
    ($($name:ident),*) => {$(
        impl Add for $name {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                let mut out = self;
                for (a, b) in out.0.iter_mut().zip(rhs.0) {
                    *a = Element::wrapping_add(*a, b);
                }
                out
            }
        }
    )*};
}

fn cast_lanes<M: Element, E: Element>(lanes: &mut [E], mem: &[M]) {
    let mem = &mem[..lanes.len()];
    for (lane, value) in lanes.iter_mut().zip(mem) {
        *lane = value.cast();
    }
}

/// Correct 4 x i32 with SSE layout, written outside the crate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C, align(16))]
pub struct GoodI32x4(pub [i32; 4]);

impl SimdVector for GoodI32x4 {
    lane_access!(i32; 4);
    const BACKEND: Backend = Backend::Sse;
    const NAME: &'static str = "GoodI32x4";

    fn load<M: Element>(&mut self, mem: &[M], _mode: LoadMode) {
        cast_lanes(&mut self.0, mem);
    }
}

/// Converts signed 8/16-bit sources as if they were unsigned.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C, align(16))]
pub struct ZeroExtendI32x4(pub [i32; 4]);

impl SimdVector for ZeroExtendI32x4 {
    lane_access!(i32; 4);
    const BACKEND: Backend = Backend::Sse;
    const NAME: &'static str = "ZeroExtendI32x4";

    fn load<M: Element>(&mut self, mem: &[M], _mode: LoadMode) {
        for (lane, value) in self.0.iter_mut().zip(&mem[..4]) {
            *lane = match M::TYPE {
                ElementType::I8 => i32::from(value.cast::<i8>().cast::<u8>()),
                ElementType::I16 => i32::from(value.cast::<i16>().cast::<u16>()),
                _ => value.cast(),
            };
        }
    }
}

/// Never writes its last lane.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C, align(16))]
pub struct DroppedLaneF32x4(pub [f32; 4]);

impl SimdVector for DroppedLaneF32x4 {
    lane_access!(f32; 4);
    const BACKEND: Backend = Backend::Sse;
    const NAME: &'static str = "DroppedLaneF32x4";

    fn load<M: Element>(&mut self, mem: &[M], _mode: LoadMode) {
        cast_lanes(&mut self.0[..3], mem);
    }
}

/// Reverses lane order, but only when the caller asserts alignment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C, align(16))]
pub struct ReversedOnAlignedI32x4(pub [i32; 4]);

impl SimdVector for ReversedOnAlignedI32x4 {
    lane_access!(i32; 4);
    const BACKEND: Backend = Backend::Sse;
    const NAME: &'static str = "ReversedOnAlignedI32x4";

    fn load<M: Element>(&mut self, mem: &[M], mode: LoadMode) {
        cast_lanes(&mut self.0, mem);
        if mode == LoadMode::Aligned {
            self.0.reverse();
        }
    }
}

/// Over-aligned to 32 bytes, so arrays are padded to a 32-byte stride.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C, align(32))]
pub struct PaddedF32x4(pub [f32; 4]);

impl SimdVector for PaddedF32x4 {
    lane_access!(f32; 4);
    const BACKEND: Backend = Backend::Sse;
    const NAME: &'static str = "PaddedF32x4";

    fn load<M: Element>(&mut self, mem: &[M], _mode: LoadMode) {
        cast_lanes(&mut self.0, mem);
    }
}

/// Only element-aligned, as a build without aligned vector storage would
/// be; excluded from alignment checking.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct PackedF32x4(pub [f32; 4]);

impl SimdVector for PackedF32x4 {
    lane_access!(f32; 4);
    const BACKEND: Backend = Backend::Sse;
    const NAME: &'static str = "PackedF32x4";
    const CHECKS_ALIGNMENT: bool = false;

    fn load<M: Element>(&mut self, mem: &[M], _mode: LoadMode) {
        cast_lanes(&mut self.0, mem);
    }
}

static DRIFT: AtomicI32 = AtomicI32::new(1);

/// Correct through the constructor; the explicit load adds a value to
/// lane 0 that changes on every call.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C, align(16))]
pub struct DriftingI32x4(pub [i32; 4]);

impl SimdVector for DriftingI32x4 {
    lane_access!(i32; 4);
    const BACKEND: Backend = Backend::Sse;
    const NAME: &'static str = "DriftingI32x4";

    fn load<M: Element>(&mut self, mem: &[M], _mode: LoadMode) {
        cast_lanes(&mut self.0, mem);
        self.0[0] = self.0[0].wrapping_add(DRIFT.fetch_add(1, Ordering::Relaxed));
    }

    fn from_slice<M: Element>(mem: &[M], _mode: LoadMode) -> Self {
        let mut v = Self::zero();
        cast_lanes(&mut v.0, mem);
        v
    }
}

/// 32 lanes over-aligned to 128 bytes, wider than a cache line.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C, align(128))]
pub struct WideF32x32(pub [f32; 32]);

impl SimdVector for WideF32x32 {
    lane_access!(f32; 32);
    const BACKEND: Backend = Backend::Avx;
    const NAME: &'static str = "WideF32x32";

    fn load<M: Element>(&mut self, mem: &[M], mode: LoadMode) {
        assert_window::<Self, M>(mem, mode);
        cast_lanes(&mut self.0, mem);
    }
}

/// Three `f64` lanes, 16-byte aligned: a 24-byte stride puts every odd
/// multiple of three lanes 8 bytes off the aligned window.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C, align(16))]
pub struct TripleF64x3(pub [f64; 3]);

impl SimdVector for TripleF64x3 {
    lane_access!(f64; 3);
    const BACKEND: Backend = Backend::Sse;
    const NAME: &'static str = "TripleF64x3";

    fn load<M: Element>(&mut self, mem: &[M], mode: LoadMode) {
        assert_window::<Self, M>(mem, mode);
        cast_lanes(&mut self.0, mem);
    }
}

/// Panic on an `Aligned` load from an address off the aligned window.
fn assert_window<V: SimdVector, M: Element>(mem: &[M], mode: LoadMode) {
    if mode == LoadMode::Aligned {
        let align = V::aligned_window::<M>();
        assert!(
            mem.as_ptr() as usize % align == 0,
            "{}: aligned load from {:p} off the {align}-byte window",
            V::NAME,
            mem.as_ptr()
        );
    }
}

lanewise_add!(
    DriftingI32x4,
    WideF32x32,
    TripleF64x3,
    GoodI32x4,
    ZeroExtendI32x4,
    DroppedLaneF32x4,
    ReversedOnAlignedI32x4,
    PaddedF32x4,
    PackedF32x4
);

/// Places packed vectors 4 bytes past a 16-byte boundary.
#[repr(C, align(16))]
pub struct MisalignedArray {
    _pad: f32,
    pub items: [PackedF32x4; 4],
}

impl MisalignedArray {
    pub fn new() -> Self {
        Self {
            _pad: 0.0,
            items: [PackedF32x4::zero(); 4],
        }
    }
}

/// The 128-element conversion buffer: slot `k` holds `k - 64` as `S`.
pub fn cvt_buffer<S: Element>() -> AlignedBuffer<S> {
    AlignedBuffer::from_fn(128, CACHE_LINE, |k| S::from_index(k as i64 - 64)).unwrap()
}

/// Lanes of a vector as a `Vec`, for readable assertions.
pub fn lanes<V: SimdVector>(v: &V) -> Vec<V::Entry> {
    (0..V::SIZE).map(|j| v.lane(j)).collect()
}
