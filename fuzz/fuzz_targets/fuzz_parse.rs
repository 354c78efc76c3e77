#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(parsed) = cg_parser::parse(input) else {
        return;
    };

    let json = serde_json::to_string(&parsed.document).expect("document serializes");
    let back: cg_core::Document = serde_json::from_str(&json).expect("document deserializes");
    assert_eq!(back, parsed.document);
});
