#![no_main]
// SPDX-License-Identifier: MIT OR Apache-2.0
//! libFuzzer target for byte normalization
//!
//! Tests:
//! - construction from arbitrary bytes never panics
//! - JSON input survives an encode/decode round trip
//! - coercions and rendering never panic
//! - pruning is idempotent

use libfuzzer_sys::fuzz_target;
use lookup::{Options, Value};

fuzz_target!(|data: &[u8]| {
    // Skip overly large inputs
    if data.len() > 50_000 {
        return;
    }

    // === Test 1: normalization ===
    let value = Value::from_slice(data);
    let sniffed = Options::sniffing().normalize(value.clone());

    // === Test 2: round trip ===
    // Text holding JSON may legitimately decode to a different tag
    if std::str::from_utf8(data).is_ok_and(|text| serde_json_like(text)) {
        if let Ok(json) = value.to_json_string() {
            let decoded = Value::from_json_str(&json).expect("own output must decode");
            if !contains_float(&value) {
                assert_eq!(decoded, value, "round trip changed the tree");
            }
        }
    }

    // === Test 3: accessors ===
    for candidate in [&value, &sniffed] {
        let _ = candidate.text();
        let _ = candidate.i64();
        let _ = candidate.u8();
        let _ = candidate.f64();
        let _ = candidate.bool();
        let _ = candidate.mapping();
        let _ = candidate.sequence();
        let _ = candidate.to_string();
    }

    // === Test 4: pruning ===
    let once = value.compact();
    assert_eq!(once.compact(), once, "compact must be idempotent");
    let once = value.compact_pruned(true);
    assert_eq!(once.compact_pruned(true), once, "compact_pruned must be idempotent");
});

fn serde_json_like(text: &str) -> bool {
    Value::from_json_str(text).is_ok()
}

// Float text may not survive rendering bit-for-bit
fn contains_float(value: &Value) -> bool {
    match value {
        Value::Number(number) => number.is_float(),
        Value::Sequence(items) => items.iter().any(contains_float),
        Value::Mapping(map) | Value::Reflected { fields: map, .. } => {
            map.values().any(contains_float)
        }
        Value::Absent | Value::Text(_) => false,
    }
}
