#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    if let Ok(parsed) = cg_parser::parse(&input) {
        let dot = cg_render_dot::render_dot(&parsed.document);
        assert!(dot.ends_with("}\n"));
    }
});
