//! Suite runner: the registry of reference vector types and the loop that
//! applies each selected check to each selected vector.
//!
//! Tests run grouped by check, the way a full run reads: every alignment
//! test first, then every sequential load test, then every conversion
//! chain. Each test gets its own [`Report`].

use tracing::info;

use crate::checks::{CheckKind, check_alignment, load_array, load_cvt};
use crate::config::SuiteConfig;
use crate::error::VerifyError;
use crate::lattice::ConversionLattice;
use crate::report::{Report, SuiteReport};
use crate::vector::{SimdVector, VectorTypeDescriptor, avx, scalar, sse};

type RunFn = fn(CheckKind, &ConversionLattice, &mut Report) -> Result<(), VerifyError>;

/// A registered vector type with its monomorphised check runner.
#[derive(Clone, Copy)]
pub struct VectorEntry {
    pub descriptor: VectorTypeDescriptor,
    run: RunFn,
}

impl VectorEntry {
    pub fn of<V: SimdVector>() -> Self {
        Self {
            descriptor: VectorTypeDescriptor::of::<V>(),
            run: run_check::<V>,
        }
    }

    /// True for the plain name (`I32x4`) or qualified name (`sse::I32x4`).
    pub fn matches(&self, name: &str) -> bool {
        self.descriptor.name == name || self.descriptor.qualified_name() == name
    }

    /// Run one check against this vector type.
    ///
    /// # Errors
    ///
    /// Propagates buffer allocation failures.
    pub fn run(
        &self,
        kind: CheckKind,
        lattice: &ConversionLattice,
        report: &mut Report,
    ) -> Result<(), VerifyError> {
        (self.run)(kind, lattice, report)
    }
}

impl std::fmt::Debug for VectorEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("VectorEntry").field(&self.descriptor).finish()
    }
}

fn run_check<V: SimdVector>(
    kind: CheckKind,
    lattice: &ConversionLattice,
    report: &mut Report,
) -> Result<(), VerifyError> {
    match kind {
        CheckKind::Alignment => {
            check_alignment::<V>(report);
            Ok(())
        }
        CheckKind::LoadArray => load_array::<V>(report),
        CheckKind::LoadCvt => load_cvt::<V>(lattice, report).map(|_| ()),
    }
}

/// Every reference vector type, grouped by backend.
pub fn registry() -> Vec<VectorEntry> {
    vec![
        VectorEntry::of::<scalar::I32x1>(),
        VectorEntry::of::<scalar::U32x1>(),
        VectorEntry::of::<scalar::F32x1>(),
        VectorEntry::of::<scalar::F64x1>(),
        VectorEntry::of::<scalar::I16x1>(),
        VectorEntry::of::<scalar::U16x1>(),
        VectorEntry::of::<sse::I32x4>(),
        VectorEntry::of::<sse::U32x4>(),
        VectorEntry::of::<sse::F32x4>(),
        VectorEntry::of::<sse::F64x2>(),
        VectorEntry::of::<sse::I16x8>(),
        VectorEntry::of::<sse::U16x8>(),
        VectorEntry::of::<sse::F32x8>(),
        VectorEntry::of::<avx::I32x8>(),
        VectorEntry::of::<avx::U32x8>(),
        VectorEntry::of::<avx::F32x8>(),
        VectorEntry::of::<avx::F64x4>(),
        VectorEntry::of::<avx::I16x8>(),
        VectorEntry::of::<avx::U16x8>(),
    ]
}

/// The registry entries a configuration selects, in registry order.
///
/// # Errors
///
/// Returns [`VerifyError::UnknownVector`] for a name that matches no
/// registered vector type.
pub fn select(config: &SuiteConfig) -> Result<Vec<VectorEntry>, VerifyError> {
    let all = registry();
    if let Some(unknown) = config
        .vectors
        .iter()
        .find(|name| !all.iter().any(|e| e.matches(name)))
    {
        return Err(VerifyError::UnknownVector(unknown.clone()));
    }
    Ok(all
        .into_iter()
        .filter(|e| config.backends.contains(&e.descriptor.backend))
        .filter(|e| config.vectors.is_empty() || config.vectors.iter().any(|n| e.matches(n)))
        .collect())
}

/// Run the configured checks against the given entries.
///
/// Infrastructure errors end only the affected test, which is reported
/// as failed.
pub fn run_entries(entries: &[VectorEntry], config: &SuiteConfig) -> SuiteReport {
    let lattice = config.lattice();
    let mut checks = config.checks.clone();
    checks.sort_unstable();
    checks.dedup();

    let mut suite = SuiteReport::default();
    for kind in checks {
        for entry in entries {
            let mut report = Report::new(format!("{kind}<{}>", entry.descriptor.qualified_name()))
                .with_max_failures(config.max_reported_failures);
            if let Err(e) = entry.run(kind, &lattice, &mut report) {
                report.abort(&e);
            }
            info!(test = %report.name, ok = report.is_success(), checks = report.checks, "test finished");
            suite.push(report);
        }
    }
    suite
}

/// Select and run everything a configuration asks for.
///
/// # Errors
///
/// Returns an error if the configuration names an unknown vector type.
pub fn run_suite(config: &SuiteConfig) -> Result<SuiteReport, VerifyError> {
    let entries = select(config)?;
    Ok(run_entries(&entries, config))
}

/// Verify a single vector type, which need not be registered.
pub fn verify<V: SimdVector>(config: &SuiteConfig) -> SuiteReport {
    run_entries(&[VectorEntry::of::<V>()], config)
}
