//! Converting load oracle, driven by the conversion lattice.
//!
//! For a vector with lane type `L`, every source type `S` on `L`'s chain
//! gets a 128-element cache-line aligned buffer holding `k - 64`. Each
//! start offset is loaded with the mode [`LoadMode::select`] picks, once
//! through each entry point, and lane `j` must equal `buf[offset + j]`
//! cast to `L`.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::buffer::{AlignedBuffer, CACHE_LINE};
use crate::checks::EntryPoint;
use crate::element::{Element, ElementType};
use crate::error::VerifyError;
use crate::lattice::ConversionLattice;
use crate::report::Report;
use crate::vector::{LoadMode, SimdVector, VectorTypeDescriptor};

/// Elements in each conversion buffer.
pub const CVT_BUFFER_LEN: usize = 128;

/// Walk the lattice chain for `V`'s lane type and verify every step.
///
/// Returns the number of source types exercised; zero when the lane type
/// has no lattice entry. A step that adds no failures is annotated with a
/// pass naming the source and vector types.
///
/// # Errors
///
/// Returns an error if a conversion buffer cannot be allocated.
pub fn load_cvt<V: SimdVector>(
    lattice: &ConversionLattice,
    report: &mut Report,
) -> Result<usize, VerifyError> {
    let desc = VectorTypeDescriptor::of::<V>();
    let lane = desc.lane;
    let mut visited = BTreeSet::new();
    let mut current = lattice.next(lane, None);

    while let Some(source) = current {
        // A chain listing a type twice would otherwise never end.
        if !visited.insert(source) {
            debug!(%lane, %source, "source repeated in chain, stopping");
            break;
        }
        let failed_before = report.failed;
        match source {
            ElementType::I8 => load_cvt_step::<V, i8>(report)?,
            ElementType::U8 => load_cvt_step::<V, u8>(report)?,
            ElementType::I16 => load_cvt_step::<V, i16>(report)?,
            ElementType::U16 => load_cvt_step::<V, u16>(report)?,
            ElementType::I32 => load_cvt_step::<V, i32>(report)?,
            ElementType::U32 => load_cvt_step::<V, u32>(report)?,
            ElementType::F32 => load_cvt_step::<V, f32>(report)?,
            ElementType::F64 => load_cvt_step::<V, f64>(report)?,
        }
        if report.failed == failed_before {
            report.pass(format!(
                "load_cvt: load {source}* as {}",
                desc.qualified_name()
            ));
        }
        current = lattice.next(lane, Some(source));
    }

    info!(vector = %desc.qualified_name(), steps = visited.len(), "conversion chain done");
    Ok(visited.len())
}

/// Verify loads of `S` memory into `V` at every start offset.
///
/// The buffer starts on a cache line, or on the vector's aligned window
/// for `S` when that is wider, so whether an offset is aligned depends
/// only on the offset. An offset the mode policy marks `Aligned` that is
/// not on the window is recorded as a failure and skipped rather than
/// loaded.
///
/// # Errors
///
/// Returns an error if the buffer cannot be allocated.
#[allow(clippy::cast_possible_wrap)]
pub fn load_cvt_step<V: SimdVector, S: Element>(report: &mut Report) -> Result<(), VerifyError> {
    let desc = VectorTypeDescriptor::of::<V>();
    let window_align = V::aligned_window::<S>();
    let data = AlignedBuffer::from_fn(CVT_BUFFER_LEN, CACHE_LINE.max(window_align), |k| {
        S::from_index(k as i64 - 64)
    })?;
    debug!(vector = %desc.qualified_name(), source = %S::TYPE, window_align, "conversion step");

    for entry in EntryPoint::ALL {
        for offset in 0..=CVT_BUFFER_LEN - V::SIZE {
            let window = &data[offset..];
            let mode = LoadMode::select(offset, V::SIZE);
            if mode == LoadMode::Aligned {
                let addr = window.as_ptr() as usize;
                let aligned = report.check(addr % window_align == 0, || {
                    format!(
                        "{} offset {offset} selected aligned but {addr:#x} is not {window_align}-byte aligned",
                        S::TYPE
                    )
                });
                if !aligned {
                    continue;
                }
            }

            let v: V = entry.load(window, mode);
            for j in 0..V::SIZE {
                let expected: V::Entry = data[offset + j].cast();
                let got = v.lane(j);
                report.check(got == expected, || {
                    format!(
                        "{entry} ({mode}) of {} as {} at offset {offset}, lane {j}: got {got}, expected {expected}",
                        S::TYPE,
                        desc.qualified_name()
                    )
                });
            }
        }
    }
    Ok(())
}
