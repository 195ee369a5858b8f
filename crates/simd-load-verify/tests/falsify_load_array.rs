//! Falsification tests for the sequential same-type load oracle.
//!
//! FALSIFY-SEQ-001..006: reference types pass, a missing lane and a
//! mode-dependent defect are caught, loads are repeatable through both
//! entry points.

mod common;

use proptest::prelude::*;

use common::{DriftingI32x4, DroppedLaneF32x4, GoodI32x4, ReversedOnAlignedI32x4};
use simd_load_verify::buffer::AlignedBuffer;
use simd_load_verify::checks::{EntryPoint, load_array, sequential_len};
use simd_load_verify::element::{Element, ElementType};
use simd_load_verify::report::Report;
use simd_load_verify::vector::{LoadMode, SimdVector, avx, sse};

fn sweep<V: SimdVector>() -> Report {
    let mut r = Report::new(V::NAME);
    load_array::<V>(&mut r).unwrap();
    r
}

/// FALSIFY-SEQ-001: External implementation
/// Prediction: a correct vector type defined outside the crate passes
/// every sequential load under every mode
/// If fails: the oracle depends on something private to the reference types
#[test]
fn falsify_seq_001_external_type_passes() {
    let r = sweep::<GoodI32x4>();
    assert!(r.is_success(), "{:?}", r.failures);
    assert_eq!(r.checks, (sequential_len(ElementType::I32) / 4 * 12) as u64);
}

/// FALSIFY-SEQ-002: Missing lane
/// Prediction: a load that never writes its last lane fails all six
/// comparisons at every offset while its six repeats still agree
/// If fails: only the first lane is compared
#[test]
fn falsify_seq_002_dropped_lane() {
    let r = sweep::<DroppedLaneF32x4>();
    let offsets = (sequential_len(ElementType::F32) / 4) as u64;
    assert_eq!(r.failed, offsets * 6);
    assert_eq!(r.checks, offsets * 12);
    assert!(r.failures[0].starts_with("offset 0: constructor (default)"));
}

/// FALSIFY-SEQ-003: Mode coverage
/// Prediction: a defect confined to aligned loads is reported, and only
/// for aligned loads
/// If fails: the sweep does not exercise every load mode
#[test]
fn falsify_seq_003_aligned_only_defect() {
    let r = sweep::<ReversedOnAlignedI32x4>();
    let offsets = (sequential_len(ElementType::I32) / 4) as u64;
    assert_eq!(r.failed, offsets * 2);
    assert!(r.failures.iter().all(|f| f.contains("(aligned)")));
}

/// FALSIFY-SEQ-004: Short lanes
/// Prediction: 16-bit sweeps stop at 32 Ki elements, so the last vector
/// ends at i16::MAX and nothing wraps
/// If fails: the short buffer length is 256 KiB worth and lanes wrap
#[test]
fn falsify_seq_004_short_buffers_do_not_wrap() {
    assert_eq!(sequential_len(ElementType::I16), 32 * 1024);
    let r = sweep::<sse::I16x8>();
    assert!(r.is_success(), "{:?}", r.failures);
    assert_eq!(r.checks, (32 * 1024 / 8 * 12) as u64);
    assert!(sweep::<avx::U16x8>().is_success());
}

/// FALSIFY-SEQ-006: Repeatability of the explicit load
/// Prediction: an explicit load that drifts between calls fails its
/// repeat check under every mode, even when the constructor is stable
/// If fails: only the constructor is repeated
#[test]
fn falsify_seq_006_explicit_load_repeated() {
    let r = sweep::<DriftingI32x4>();
    let offsets = (sequential_len(ElementType::I32) / 4) as u64;
    // The load entry point fails its comparison and its repeat in each mode.
    assert_eq!(r.failed, offsets * 6);
    assert!(r.failures.iter().all(|f| !f.contains("constructor")));
    assert!(r.failures.iter().any(|f| f.starts_with("offset 0: repeated load (default)")));
    assert!(r.failures.iter().any(|f| f.starts_with("offset 0: repeated load (unaligned)")));
}

proptest! {
    /// FALSIFY-SEQ-005: Repeatable loads
    /// Prediction: loading the same window twice through either entry
    /// point gives identical vectors under any mode
    /// If fails: the load keeps state between calls
    #[test]
    fn falsify_seq_005_repeatable(offset in 0usize..=1016, mode_idx in 0usize..3) {
        let mode = [LoadMode::Default, LoadMode::Aligned, LoadMode::Unaligned][mode_idx];
        let offset = if mode == LoadMode::Aligned { offset / 8 * 8 } else { offset };
        let buf = AlignedBuffer::from_fn(1024, 32, |k| f32::from_index(k as i64)).unwrap();
        let window = &buf[offset..];
        let a: avx::F32x8 = EntryPoint::Constructor.load(window, mode);
        let b: avx::F32x8 = EntryPoint::Load.load(window, mode);
        let c: avx::F32x8 = EntryPoint::Constructor.load(window, mode);
        prop_assert_eq!(a, b);
        prop_assert_eq!(a, c);
        prop_assert_eq!(a.lane(7), (offset + 7) as f32);
    }
}
