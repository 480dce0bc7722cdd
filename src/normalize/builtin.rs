//! Rules every registry gets by default.

use super::field_fold::{FieldEncoding, FieldFoldRule, ResourceSelector};
use super::registry::NormalizerRegistry;
use super::traits::NormalizationRule;

/// Name of the built-in Secret `stringData` rule.
pub const SECRET_STRING_DATA_RULE: &str = "secret-string-data";

/// Core `v1` Secrets: `stringData` is base64 encoded into `data` by the
/// API server and never read back.
#[must_use]
pub fn secret_string_data_rule() -> FieldFoldRule {
    FieldFoldRule::new(
        SECRET_STRING_DATA_RULE,
        "stringData",
        "data",
        FieldEncoding::Base64,
    )
    .with_selector(ResourceSelector::kind("Secret").with_api_version("v1"))
}

/// All built-in rules, in the order they are registered.
#[must_use]
pub fn builtin_rules() -> Vec<Box<dyn NormalizationRule>> {
    vec![Box::new(secret_string_data_rule())]
}

/// Register the built-in rules. Call once while setting up a registry.
pub fn register_builtin_rules(registry: &mut NormalizerRegistry) {
    for rule in builtin_rules() {
        registry.register_boxed(rule);
    }
}
