#![no_main]
use libfuzzer_sys::fuzz_target;
use resource_delta::Comparator;
use serde_json::Value;

/// Fuzz normalization and comparison.
///
/// Input is a JSON array holding a desired and an observed document. Errors
/// are fine; panics and stack overflows are not.
fuzz_target!(|data: &[u8]| {
    let Ok((desired, observed)) = serde_json::from_slice::<(Value, Value)>(data) else {
        return;
    };
    let comparator = Comparator::default();
    if let Ok(result) = comparator.compare(desired.clone(), observed.clone()) {
        let reverse = comparator
            .compare(observed, desired)
            .expect("reverse comparison must succeed when forward did");
        assert_eq!(result.len(), reverse.len());
    }
});
