#![no_main]
use libfuzzer_sys::fuzz_target;
use resource_delta::NormalizerRegistry;

/// Fuzz the built-in normalization rules.
///
/// Whatever a rule produces must already be canonical.
fuzz_target!(|data: &[u8]| {
    let Ok(doc) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    let registry = NormalizerRegistry::with_builtin_rules();
    if let Ok(once) = registry.normalize(&doc) {
        let twice = registry.normalize(&once).expect("normalized document must normalize again");
        assert_eq!(once, twice);
    }
});
