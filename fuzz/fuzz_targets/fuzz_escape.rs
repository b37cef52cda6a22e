#![no_main]
use libfuzzer_sys::fuzz_target;

// Any text written as a string value must parse back to itself through a
// strict JSON parser.
fuzz_target!(|data: &str| {
    let mut buf = Vec::with_capacity(data.len() + 2);
    let mut w = jsonwriter::JsonWriter::new(&mut buf);
    w.string(data).unwrap();

    let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(parsed.as_str(), Some(data));
});
