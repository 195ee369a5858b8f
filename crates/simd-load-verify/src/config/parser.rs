use std::path::Path;

use tracing::debug;

use crate::config::types::SuiteConfig;
use crate::error::VerifyError;

/// Parse a YAML suite configuration file into a [`SuiteConfig`].
///
/// # Errors
///
/// Returns [`VerifyError::Io`] if the file cannot be read,
/// or [`VerifyError::Yaml`] if the YAML is malformed.
pub fn parse_config(path: &Path) -> Result<SuiteConfig, VerifyError> {
    debug!(path = %path.display(), "reading suite configuration");
    let content = std::fs::read_to_string(path)?;
    parse_config_str(&content)
}

/// Parse a YAML suite configuration from a string. A blank document
/// yields the default configuration.
///
/// # Errors
///
/// Returns [`VerifyError::Yaml`] if the YAML is malformed.
pub fn parse_config_str(yaml: &str) -> Result<SuiteConfig, VerifyError> {
    if yaml.trim().is_empty() {
        return Ok(SuiteConfig::default());
    }
    let config: SuiteConfig = serde_yaml::from_str(yaml)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::CheckKind;
    use crate::element::ElementType;
    use crate::vector::Backend;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(parse_config_str("").unwrap(), SuiteConfig::default());
        assert_eq!(parse_config_str("{}").unwrap(), SuiteConfig::default());
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
backends: [sse, avx]
checks: [alignment, load_cvt]
vectors: [I32x4, "avx::F32x8"]
max_reported_failures: 8
lattice:
  i32: [i16, u8]
"#;
        let config = parse_config_str(yaml).unwrap();
        assert_eq!(config.backends, [Backend::Sse, Backend::Avx]);
        assert_eq!(config.checks, [CheckKind::Alignment, CheckKind::LoadCvt]);
        assert_eq!(config.vectors, ["I32x4", "avx::F32x8"]);
        assert_eq!(config.max_reported_failures, 8);
        let lattice = config.lattice();
        assert_eq!(lattice.chain(ElementType::I32), [ElementType::I16, ElementType::U8]);
        assert!(lattice.chain(ElementType::F32).is_empty());
    }

    #[test]
    fn default_lattice_is_standard() {
        let config = parse_config_str("checks: [load_cvt]").unwrap();
        assert_eq!(config.lattice(), crate::lattice::ConversionLattice::standard());
    }

    #[test]
    fn unknown_backend_rejected() {
        assert!(matches!(
            parse_config_str("backends: [neon]"),
            Err(VerifyError::Yaml(_))
        ));
    }

    #[test]
    fn unknown_field_rejected() {
        assert!(parse_config_str("threads: 4").is_err());
    }

    #[test]
    fn malformed_yaml_rejected() {
        assert!(parse_config_str("{{invalid").is_err());
    }

    #[test]
    fn missing_file() {
        let err = parse_config(Path::new("/nonexistent/suite.yaml")).unwrap_err();
        assert!(matches!(err, VerifyError::Io(_)));
    }

    #[test]
    fn reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("suite.yaml");
        std::fs::write(&path, "backends: [scalar]\n").unwrap();
        let config = parse_config(&path).unwrap();
        assert_eq!(config.backends, [Backend::Scalar]);
    }
}
