use std::collections::HashSet;

use crate::config::types::SuiteConfig;
use crate::error::{Severity, Violation};
use crate::lattice::validate_lattice;
use crate::suite::registry;

/// Validate a parsed suite configuration.
///
/// Returns a list of violations. If any violation has
/// [`Severity::Error`], the configuration is considered invalid. A custom
/// lattice is validated as well.
pub fn validate_config(config: &SuiteConfig) -> Vec<Violation> {
    let mut violations = Vec::new();

    validate_selection(config, &mut violations);
    validate_vectors(config, &mut violations);

    if config.max_reported_failures == 0 {
        violations.push(Violation {
            severity: Severity::Warning,
            rule: "CFG-005".to_string(),
            message: "max_reported_failures is 0; failures will be counted but not labelled"
                .to_string(),
            location: Some("max_reported_failures".to_string()),
        });
    }

    if let Some(ref lattice) = config.lattice {
        violations.extend(validate_lattice(lattice));
    }

    violations
}

fn validate_selection(config: &SuiteConfig, violations: &mut Vec<Violation>) {
    if config.backends.is_empty() {
        violations.push(Violation {
            severity: Severity::Error,
            rule: "CFG-003".to_string(),
            message: "backends must select at least one backend".to_string(),
            location: Some("backends".to_string()),
        });
    }
    if config.checks.is_empty() {
        violations.push(Violation {
            severity: Severity::Warning,
            rule: "CFG-002".to_string(),
            message: "checks is empty; the run will verify nothing".to_string(),
            location: Some("checks".to_string()),
        });
    }

    let mut seen_backends = HashSet::new();
    for backend in &config.backends {
        if !seen_backends.insert(*backend) {
            violations.push(Violation {
                severity: Severity::Warning,
                rule: "CFG-006".to_string(),
                message: format!("Duplicate backend: {backend}"),
                location: Some("backends".to_string()),
            });
        }
    }
    let mut seen_checks = HashSet::new();
    for check in &config.checks {
        if !seen_checks.insert(*check) {
            violations.push(Violation {
                severity: Severity::Warning,
                rule: "CFG-006".to_string(),
                message: format!("Duplicate check: {check}"),
                location: Some("checks".to_string()),
            });
        }
    }
}

fn validate_vectors(config: &SuiteConfig, violations: &mut Vec<Violation>) {
    let entries = registry();
    for (i, name) in config.vectors.iter().enumerate() {
        let matching: Vec<_> = entries.iter().filter(|e| e.matches(name)).collect();
        if matching.is_empty() {
            violations.push(Violation {
                severity: Severity::Error,
                rule: "CFG-001".to_string(),
                message: format!("Unknown vector type: {name}"),
                location: Some(format!("vectors[{i}]")),
            });
        } else if !matching
            .iter()
            .any(|e| config.backends.contains(&e.descriptor.backend))
        {
            violations.push(Violation {
                severity: Severity::Warning,
                rule: "CFG-004".to_string(),
                message: format!("{name} belongs to no selected backend and will not run"),
                location: Some(format!("vectors[{i}]")),
            });
        }
    }
}
