use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid buffer layout: {len} elements of {elem_size} bytes aligned to {align}")]
    Layout {
        len: usize,
        elem_size: usize,
        align: usize,
    },

    #[error("Allocation of {bytes} bytes failed")]
    Alloc { bytes: usize },

    #[error("Unknown vector type: {0}")]
    UnknownVector(String),

    #[error("Unknown backend: {0}")]
    UnknownBackend(String),
}

#[derive(Debug, Clone)]
pub struct Violation {
    pub severity: Severity,
    pub rule: String,
    pub message: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN",
            Severity::Info => "INFO",
        };
        write!(f, "[{prefix}] {}: {}", self.rule, self.message)
    }
}

/// Count the violations with [`Severity::Error`].
pub fn error_count(violations: &[Violation]) -> usize {
    violations
        .iter()
        .filter(|v| v.severity == Severity::Error)
        .count()
}
