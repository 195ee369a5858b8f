use std::path::Path;

use simd_load_verify::config::{SuiteConfig, parse_config};
use simd_load_verify::error::VerifyError;

pub mod lattice;
pub mod list;
pub mod run;
pub mod validate;

/// Load the configuration at `path`, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<SuiteConfig, VerifyError> {
    path.map_or_else(|| Ok(SuiteConfig::default()), parse_config)
}
