use std::path::Path;

use tracing::info;

use simd_load_verify::checks::CheckKind;
use simd_load_verify::config::{SuiteConfig, validate_config};
use simd_load_verify::error::{VerifyError, error_count};
use simd_load_verify::report::format_text;
use simd_load_verify::suite::run_suite;
use simd_load_verify::vector::Backend;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}', expected 'text' or 'json'")),
        }
    }
}

/// Command-line selections that replace the configured ones when given.
pub struct Overrides<'a> {
    pub backends: &'a [String],
    pub checks: &'a [String],
    pub vectors: &'a [String],
}

impl Overrides<'_> {
    fn apply(&self, config: &mut SuiteConfig) -> Result<(), Box<dyn std::error::Error>> {
        if !self.backends.is_empty() {
            config.backends = self
                .backends
                .iter()
                .map(|b| Backend::from_name(b).ok_or_else(|| VerifyError::UnknownBackend(b.clone())))
                .collect::<Result<_, _>>()?;
        }
        if !self.checks.is_empty() {
            config.checks = self
                .checks
                .iter()
                .map(|c| {
                    CheckKind::from_name(c).ok_or_else(|| {
                        format!("unknown check '{c}', expected 'alignment', 'load_array', or 'load_cvt'")
                    })
                })
                .collect::<Result<_, _>>()?;
        }
        if !self.vectors.is_empty() {
            config.vectors = self.vectors.to_vec();
        }
        Ok(())
    }
}

pub fn run(
    config_path: Option<&Path>,
    overrides: &Overrides<'_>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config(config_path)?;
    overrides.apply(&mut config)?;

    let violations = validate_config(&config);
    if error_count(&violations) > 0 {
        for v in &violations {
            eprintln!("{v}");
        }
        return Err("Suite configuration is invalid".into());
    }

    let suite = run_suite(&config)?;
    info!(
        tests = suite.reports.len(),
        passed = suite.passed(),
        checks = suite.total_checks(),
        "suite finished"
    );
    match format {
        OutputFormat::Text => print!("{}", format_text(&suite)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&suite)?),
    }

    if suite.is_success() {
        Ok(())
    } else {
        Err(format!(
            "{} of {} test(s) failed",
            suite.failed(),
            suite.reports.len()
        )
        .into())
    }
}
