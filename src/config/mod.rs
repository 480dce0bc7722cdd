//! Configuration for resource-delta.
//!
//! The rule set is static configuration: build a [`DeltaConfig`] (or load one
//! from YAML) at startup and turn it into a registry and comparator once.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use resource_delta::config::{DeltaConfig, ConfigPreset};
//! use resource_delta::Comparator;
//!
//! let config = DeltaConfig::from_preset(ConfigPreset::Strict);
//! let comparator = Comparator::from_config(&config)?;
//!
//! use resource_delta::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.resource-delta.yaml` file in your working directory or
//! `~/.config/resource-delta/`:
//!
//! ```yaml
//! normalization:
//!   builtin_rules: true
//!   field_folds:
//!     - name: configmap-plain
//!       kind: ConfigMap
//!       write_only_field: plainData
//!       canonical_field: data
//!       encoding: identity
//! comparison:
//!   max_depth: 256
//!   numeric_equivalence: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{ConfigPreset, DEFAULT_MAX_DEPTH, DEFAULT_NUMERIC_EQUIVALENCE};
pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    parse_config_str,
};
pub use types::{
    ComparisonConfig, DeltaConfig, DeltaConfigBuilder, FieldFoldConfig, NormalizationConfig,
};
pub use validation::{ConfigError, Validatable};

/// Generate a JSON Schema for the `DeltaConfig` configuration format.
///
/// Editors can use it to validate and autocomplete `.resource-delta.yaml`.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(DeltaConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_mentions_sections() {
        let schema = generate_json_schema();
        assert!(schema.contains("normalization"));
        assert!(schema.contains("field_folds"));
        assert!(schema.contains("max_depth"));
    }
}
