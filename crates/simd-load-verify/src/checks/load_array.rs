//! Same-type load oracle.
//!
//! A buffer holding `0, 1, 2, …` in the lane type is swept one vector at
//! a time; the vector loaded at `offset` must equal
//! `broadcast(offset) + indexes_from_zero()` through both entry points
//! and under every load mode.

use tracing::{debug, info};

use crate::buffer::AlignedBuffer;
use crate::checks::EntryPoint;
use crate::element::{Element, ElementType};
use crate::error::VerifyError;
use crate::report::Report;
use crate::vector::{LoadMode, SimdVector, VectorTypeDescriptor};

/// Number of elements in the sequential buffer for `lane`: 256 KiB worth,
/// except 16-bit lanes, which stop at 32 Ki so every value stays exactly
/// representable in a signed 16-bit lane.
pub const fn sequential_len(lane: ElementType) -> usize {
    if lane.size() == 2 {
        32 * 1024
    } else {
        256 * 1024 / lane.size()
    }
}

/// Sweep a sequential buffer with every entry point and load mode.
///
/// Each offset gets 12 checks: both entry points under each of the three
/// modes against the expected vector, and each of those loads repeated.
///
/// # Errors
///
/// Returns an error if the buffer cannot be allocated. Mismatches are
/// recorded in `report` and never abort the sweep.
#[allow(clippy::cast_possible_wrap)]
pub fn load_array<V: SimdVector>(report: &mut Report) -> Result<(), VerifyError> {
    let desc = VectorTypeDescriptor::of::<V>();
    let count = sequential_len(desc.lane);
    debug!(vector = %desc.qualified_name(), count, "sequential load sweep");

    let buf = AlignedBuffer::from_fn(count, align_of::<V>(), |k| {
        V::Entry::from_index(k as i64)
    })?;
    let offsets = V::indexes_from_zero();

    for offset in (0..=count - V::SIZE).step_by(V::SIZE) {
        let window = &buf[offset..];
        let expected = V::broadcast(V::Entry::from_index(offset as i64)) + offsets;

        for mode in [LoadMode::Default, LoadMode::Aligned, LoadMode::Unaligned] {
            for entry in EntryPoint::ALL {
                let v: V = entry.load(window, mode);
                report.check(v == expected, || {
                    format!("offset {offset}: {entry} ({mode}) gave {v:?}, expected {expected:?}")
                });
            }

            for entry in EntryPoint::ALL {
                let first: V = entry.load(window, mode);
                let again: V = entry.load(window, mode);
                report.check(again == first, || {
                    format!("offset {offset}: repeated {entry} ({mode}) gave {again:?}, first {first:?}")
                });
            }
        }
    }

    info!(vector = %desc.qualified_name(), checks = report.checks, failed = report.failed, "sequential loads done");
    Ok(())
}
