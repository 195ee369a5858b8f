use serde::{Deserialize, Serialize};

use crate::checks::CheckKind;
use crate::lattice::ConversionLattice;
use crate::report::DEFAULT_MAX_FAILURES;
use crate::vector::Backend;

/// Suite configuration, usually read from a YAML file.
///
/// Every field is optional; an empty document selects every backend,
/// every check and every vector with the standard lattice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfig {
    #[serde(default = "default_backends")]
    pub backends: Vec<Backend>,
    #[serde(default = "default_checks")]
    pub checks: Vec<CheckKind>,
    /// Vector names (`I32x4`) or qualified names (`sse::I32x4`) to run.
    /// Empty means every vector of the selected backends.
    #[serde(default)]
    pub vectors: Vec<String>,
    /// Failure labels kept per test.
    #[serde(default = "default_max_reported_failures")]
    pub max_reported_failures: usize,
    /// Replaces the standard conversion lattice.
    #[serde(default)]
    pub lattice: Option<ConversionLattice>,
}

impl SuiteConfig {
    /// The lattice converting loads are walked against.
    pub fn lattice(&self) -> ConversionLattice {
        self.lattice
            .clone()
            .unwrap_or_else(ConversionLattice::standard)
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            backends: default_backends(),
            checks: default_checks(),
            vectors: Vec::new(),
            max_reported_failures: default_max_reported_failures(),
            lattice: None,
        }
    }
}

fn default_backends() -> Vec<Backend> {
    Backend::ALL.to_vec()
}

fn default_checks() -> Vec<CheckKind> {
    CheckKind::ALL.to_vec()
}

fn default_max_reported_failures() -> usize {
    DEFAULT_MAX_FAILURES
}
