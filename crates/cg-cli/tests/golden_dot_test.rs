//! Golden snapshot harness for DOT output stability.
//!
//! Set `CG_BLESS=1` to rewrite the expected `.gv` files from current output.

use cg_parser::parse;
use cg_render_dot::render_dot;
use std::fs;
use std::path::{Path, PathBuf};

const CASE_IDS: &[&str] = &["nested_palette", "multi_root"];

fn golden_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("golden")
}

fn normalize_dot(dot: &str) -> String {
    let mut normalized = dot.replace("\r\n", "\n");
    if !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

fn run_case(case_id: &str, bless: bool) {
    let base = golden_dir();
    let input_path = base.join(format!("{case_id}.outline"));
    let expected_path = base.join(format!("{case_id}.gv"));

    let input = fs::read_to_string(&input_path)
        .unwrap_or_else(|err| panic!("failed reading {}: {err}", input_path.display()));

    let parsed = parse(&input).unwrap_or_else(|err| panic!("{case_id}: parse failed: {err}"));
    assert!(
        parsed.warnings.is_empty(),
        "{case_id}: unexpected warnings {:?}",
        parsed.warnings
    );
    let actual = normalize_dot(&render_dot(&parsed.document));

    if bless {
        fs::write(&expected_path, &actual)
            .unwrap_or_else(|err| panic!("failed writing {}: {err}", expected_path.display()));
        return;
    }

    let expected = fs::read_to_string(&expected_path)
        .unwrap_or_else(|err| panic!("failed reading {}: {err}", expected_path.display()));
    assert_eq!(
        normalize_dot(&expected),
        actual,
        "{case_id}: DOT output drifted from {}",
        expected_path.display()
    );
}

#[test]
fn golden_dot_snapshots_match() {
    let bless = std::env::var("CG_BLESS").is_ok_and(|value| value == "1");
    for case_id in CASE_IDS {
        run_case(case_id, bless);
    }
}

#[test]
fn golden_rendering_is_deterministic() {
    for case_id in CASE_IDS {
        let input = fs::read_to_string(golden_dir().join(format!("{case_id}.outline")))
            .expect("read golden input");
        let first = render_dot(&parse(&input).expect("parse").document);
        let second = render_dot(&parse(&input).expect("parse").document);
        assert_eq!(first, second, "{case_id}: output is not deterministic");
    }
}
