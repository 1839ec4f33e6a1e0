#![no_main]

use envbind::FieldDescriptor;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // === Tag parsing never fails, whatever the annotation ===
    let desc = FieldDescriptor::parse(Some(data), "Fuzz", "field");

    // === A parsed key is always trimmed and non-empty ===
    if let Some(key) = &desc.key {
        assert!(!key.is_empty());
        assert_eq!(key.trim(), key);
    }

    // === Descriptor accessors never panic ===
    let _ = desc.reveals_value();
    let _ = format!("{desc:?}");
});
