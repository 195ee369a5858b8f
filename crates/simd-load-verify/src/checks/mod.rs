//! The three verification checks.
//!
//! - [`alignment`] — array layout: per-element alignment and stride
//! - [`load_array`] — same-type loads against a sequential buffer
//! - [`load_cvt`] — converting loads along the conversion lattice

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::vector::{LoadMode, SimdVector};

pub mod alignment;
pub mod load_array;
pub mod load_cvt;

pub use alignment::{DEFAULT_ARRAY_LEN, check_alignment, check_layout};
pub use load_array::{load_array, sequential_len};
pub use load_cvt::{CVT_BUFFER_LEN, load_cvt, load_cvt_step};

/// Selects one of the checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Alignment,
    LoadArray,
    LoadCvt,
}

impl CheckKind {
    /// Execution order of a full run.
    pub const ALL: [CheckKind; 3] = [Self::Alignment, Self::LoadArray, Self::LoadCvt];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Alignment => "check_alignment",
            Self::LoadArray => "load_array",
            Self::LoadCvt => "load_cvt",
        }
    }

    /// Accepts both the test name and the configuration spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "alignment" | "check_alignment" => Some(Self::Alignment),
            "load_array" => Some(Self::LoadArray),
            "load_cvt" => Some(Self::LoadCvt),
            _ => None,
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The two ways a vector can be loaded from memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPoint {
    /// [`SimdVector::from_slice`].
    Constructor,
    /// [`SimdVector::zero`] followed by [`SimdVector::load`].
    Load,
}

impl EntryPoint {
    pub const ALL: [EntryPoint; 2] = [Self::Constructor, Self::Load];

    pub fn load<V: SimdVector, M: Element>(self, mem: &[M], mode: LoadMode) -> V {
        match self {
            Self::Constructor => V::from_slice(mem, mode),
            Self::Load => {
                let mut v = V::zero();
                v.load(mem, mode);
                v
            }
        }
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constructor => f.write_str("constructor"),
            Self::Load => f.write_str("load"),
        }
    }
}
