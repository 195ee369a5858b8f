use std::path::Path;

use simd_load_verify::config::{parse_config, validate_config};
use simd_load_verify::error::{Severity, error_count};

pub fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_config(path)?;
    let violations = validate_config(&config);

    for v in &violations {
        println!("{v}");
    }

    let errors = error_count(&violations);
    let warnings = violations
        .iter()
        .filter(|v| v.severity == Severity::Warning)
        .count();
    println!("\n{errors} error(s), {warnings} warning(s)");

    if errors == 0 {
        println!("Configuration is valid.");
        Ok(())
    } else {
        Err(format!("Configuration has {errors} validation error(s)").into())
    }
}
