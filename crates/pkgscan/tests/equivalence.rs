#![allow(missing_docs)]
//! Property: the indexed lookup and the single-pass scan agree on any
//! well-formed manifest. Documents are generated structurally and rendered
//! through `serde_json`, so every input is valid JSON with an object root.

use pkgscan::{PaddedBytes, extract_by_lookup, extract_by_scan};
use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};
use quickcheck_macros::quickcheck;
use serde_json::{Map, Value, json};

#[derive(Clone, Debug)]
struct ManifestDoc(String);

const RECOGNIZED: [&str; 5] = ["name", "main", "exports", "imports", "type"];
const TYPE_KEYWORDS: [&str; 5] = ["module", "commonjs", "esm", "umd", ""];
const TARGETS: [&str; 4] = ["./index.js", "./dist/main.cjs", "", "päckage/∅"];

fn arbitrary_value(g: &mut Gen, depth: usize) -> Value {
    let scalar = depth == 0 || bool::arbitrary(g);
    if scalar {
        match u8::arbitrary(g) % 5 {
            0 => Value::Null,
            1 => json!(bool::arbitrary(g)),
            2 => json!(u32::arbitrary(g)),
            3 => json!(f64::from(i16::arbitrary(g))),
            _ => json!(*g.choose(&TARGETS).unwrap()),
        }
    } else if bool::arbitrary(g) {
        let len = usize::arbitrary(g) % 3;
        Value::Array((0..len).map(|_| arbitrary_value(g, depth - 1)).collect())
    } else {
        let len = usize::arbitrary(g) % 3;
        let mut map = Map::new();
        for i in 0..len {
            map.insert(format!("k{i}"), arbitrary_value(g, depth - 1));
        }
        Value::Object(map)
    }
}

// Bias recognized keys toward their expected shapes so the interesting
// branches (string vs object vs junk) all get exercised.
fn arbitrary_field(g: &mut Gen, key: &str) -> Value {
    match (key, u8::arbitrary(g) % 4) {
        ("type", 0 | 1 | 2) => json!(*g.choose(&TYPE_KEYWORDS).unwrap()),
        ("exports" | "imports", 0 | 1) => {
            let mut map = Map::new();
            if bool::arbitrary(g) {
                map.insert(".".to_owned(), json!(*g.choose(&TARGETS).unwrap()));
            }
            Value::Object(map)
        }
        ("name" | "main" | "exports" | "imports", 2) => json!(*g.choose(&TARGETS).unwrap()),
        _ => arbitrary_value(g, 2),
    }
}

impl Arbitrary for ManifestDoc {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut map = Map::new();
        for key in RECOGNIZED {
            if bool::arbitrary(g) {
                map.insert(key.to_owned(), arbitrary_field(g, key));
            }
        }
        for i in 0..usize::arbitrary(g) % 4 {
            map.insert(format!("extra{i}"), arbitrary_value(g, 2));
        }
        ManifestDoc(Value::Object(map).to_string())
    }
}

#[test]
fn lookup_and_scan_agree() {
    fn prop(doc: ManifestDoc) -> TestResult {
        let buffer = PaddedBytes::from(doc.0.as_str());
        let by_lookup = extract_by_lookup(&buffer);
        let by_scan = extract_by_scan(&buffer);
        match (by_lookup, by_scan) {
            (Ok(a), Ok(b)) => TestResult::from_bool(a == b),
            // The indexed strategy alone rejects a wrong-typed `type`.
            (Err(_), Ok(_)) => TestResult::discard(),
            _ => TestResult::failed(),
        }
    }

    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(ManifestDoc) -> TestResult);
}

#[quickcheck]
fn extraction_is_idempotent_over_generated_documents(doc: ManifestDoc) -> bool {
    let buffer = PaddedBytes::from(doc.0.as_str());
    extract_by_scan(&buffer) == extract_by_scan(&buffer)
        && extract_by_lookup(&buffer) == extract_by_lookup(&buffer)
}
