//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::DeltaConfig;
use super::validation::Validatable;
use crate::error::{DeltaError, ErrorContext, Result};
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".resource-delta.yaml",
    ".resource-delta.yml",
    "resource-delta.yaml",
    "resource-delta.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/resource-delta/)
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if let Some(path) = find_config_in_dir(&cwd) {
            return Some(path);
        }
    }

    dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join("resource-delta")))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Load a `DeltaConfig` from a YAML file and validate it.
pub fn load_config_file(path: &Path) -> Result<DeltaConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DeltaError::io(path, e))?;
    let config = parse_config_str(&content)
        .with_context(|| format!("config file {}", path.display()))?;
    Ok(config)
}

/// Parse and validate configuration from YAML text.
pub fn parse_config_str(content: &str) -> Result<DeltaConfig> {
    let config: DeltaConfig = serde_yaml::from_str(content)?;
    let errors = config.validate();
    if errors.is_empty() {
        Ok(config)
    } else {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(DeltaError::config(joined))
    }
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (DeltaConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (DeltaConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (DeltaConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = DeltaConfig::default();
    format!(
        r"# resource-delta configuration
# Place this file at .resource-delta.yaml in your project root or ~/.config/resource-delta/

{}",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::FieldEncoding;
    use std::io::Write;

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "normalization:\n  builtin_rules: false\n  field_folds:\n    - name: plain\n      write_only_field: spec.plain\n      canonical_field: spec.data\ncomparison:\n  max_depth: 32"
        )
        .unwrap();

        let config = load_config_file(file.path()).unwrap();
        assert!(!config.normalization.builtin_rules);
        assert_eq!(config.comparison.max_depth, 32);
        assert_eq!(
            config.normalization.field_folds[0].encoding,
            FieldEncoding::Base64
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config_file(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, DeltaError::Io { .. }), "{err:?}");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = parse_config_str("comparison:\n  max_depth: 0\n").unwrap_err();
        assert!(matches!(err, DeltaError::Config(ref m) if m.contains("max_depth")));

        let err = parse_config_str("comparison: [1, 2]\n").unwrap_err();
        assert!(matches!(err, DeltaError::Parse { .. }), "{err:?}");
    }

    #[test]
    fn test_discover_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        std::fs::write(&path, "{}\n").unwrap();
        assert_eq!(discover_config_file(Some(&path)), Some(path.clone()));

        let (config, loaded_from) = load_or_default(Some(&path));
        assert_eq!(config, DeltaConfig::default());
        assert_eq!(loaded_from, Some(path));
    }

    #[test]
    fn test_find_config_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(find_config_in_dir(dir.path()), None);
        let path = dir.path().join("resource-delta.yml");
        std::fs::write(&path, "").unwrap();
        assert_eq!(find_config_in_dir(dir.path()), Some(path));
    }

    #[test]
    fn test_example_config_parses() {
        let example = generate_example_config();
        let config = parse_config_str(&example).unwrap();
        assert_eq!(config, DeltaConfig::default());
    }
}
