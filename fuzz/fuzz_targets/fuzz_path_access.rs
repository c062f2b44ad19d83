#![no_main]
// SPDX-License-Identifier: MIT OR Apache-2.0
//! libFuzzer target for dotted path access
//!
//! The first line of input is a path, the rest a document. Reads must never
//! panic, and a successful write must be observable through a read.

use libfuzzer_sys::fuzz_target;
use lookup::Value;
use lookup_core::path::{ParsedPath, split};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    let (head, body) = match data.iter().position(|&b| b == b'\n') {
        Some(pos) => (&data[..pos], &data[pos + 1..]),
        None => (data, &[][..]),
    };
    let Ok(path) = std::str::from_utf8(head) else {
        return;
    };

    // === Parsing ===
    let parsed = ParsedPath::parse(path);
    assert_eq!(parsed.len(), split(path).len(), "component count mismatch for {path:?}");
    assert_eq!(parsed.as_str(), path);

    // === Reads ===
    let mut document = Value::from_slice(body);
    let borrowed = document.lookup(path).into_owned();
    assert_eq!(borrowed, document.get(path));
    assert_eq!(borrowed, document.lookup_parsed(&parsed).into_owned());

    // === Writes ===
    let marker = Value::from("fuzz-marker");
    if document.set(path, marker.clone()).is_ok() {
        assert_eq!(document.get(path), marker, "write not visible at {path:?}");
    }

    let nulled = document.with_nulled([path]);
    if !path.is_empty() {
        let _ = nulled.get(path);
    }
    let _ = document.keep([path]);
});
