//! Array layout check: every element of an array of vectors must sit on
//! the descriptor's required alignment, and consecutive elements must be
//! exactly one stride apart.

use tracing::debug;

use crate::report::Report;
use crate::vector::{SimdVector, VectorTypeDescriptor};

/// Length of the array [`check_alignment`] lays out.
pub const DEFAULT_ARRAY_LEN: usize = 10;

/// Check a stack array of [`DEFAULT_ARRAY_LEN`] vectors.
///
/// Vector types that opt out through [`SimdVector::CHECKS_ALIGNMENT`] are
/// skipped with a pass annotation.
pub fn check_alignment<V: SimdVector>(report: &mut Report) {
    let desc = VectorTypeDescriptor::of::<V>();
    if !V::CHECKS_ALIGNMENT {
        debug!(vector = %desc.qualified_name(), "alignment check excluded");
        report.pass(format!(
            "{}: excluded from alignment checking",
            desc.qualified_name()
        ));
        return;
    }
    let items = [V::zero(); DEFAULT_ARRAY_LEN];
    check_layout(&items, report);
}

/// Check the layout of `items`.
///
/// Every index is checked for alignment first, then for stride; a bad
/// index never hides later ones.
///
/// # Panics
///
/// Panics if `items` has fewer than two elements.
pub fn check_layout<V: SimdVector>(items: &[V], report: &mut Report) {
    assert!(items.len() >= 2, "layout check needs at least two elements");
    let desc = VectorTypeDescriptor::of::<V>();
    let align = desc.required_alignment();
    let mask = align - 1;
    let name = desc.qualified_name();
    debug!(vector = %name, align, stride = desc.stride(), len = items.len(), "checking layout");

    for (i, item) in items.iter().enumerate() {
        let addr = std::ptr::from_ref(item) as usize;
        report.check(addr & mask == 0, || {
            format!("{name}[{i}] at {addr:#x} is not {align}-byte aligned")
        });
    }

    let base = items.as_ptr() as usize;
    for (i, item) in items.iter().enumerate() {
        let addr = std::ptr::from_ref(item) as usize;
        let expected = base + i * desc.stride();
        report.check(addr == expected, || {
            format!(
                "{name}[{i}] at {addr:#x}, expected {expected:#x} (stride {})",
                desc.stride()
            )
        });
    }
}
