#![no_main]
use libfuzzer_sys::fuzz_target;

use jsonwriter::JsonWriter;

fn emit<W: std::io::Write>(
    w: &mut JsonWriter<W>,
    value: &serde_json::Value,
) -> jsonwriter::Result<()> {
    use serde_json::Value;

    match value {
        Value::Null => w.null(),
        Value::Bool(b) => w.bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                w.int(i)
            } else if let Some(u) = n.as_u64() {
                w.uint(u)
            } else {
                w.float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => w.string(s),
        Value::Array(items) => {
            w.begin_array()?;
            for item in items {
                emit(w, item)?;
            }
            w.end_array()
        }
        Value::Object(members) => {
            w.begin_object()?;
            for (key, member) in members {
                w.key(key)?;
                emit(w, member)?;
            }
            w.end_object()
        }
    }
}

// Any document serde_json accepts must survive a re-encode through the
// writer and parse back equal.
fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    let mut buf = Vec::new();
    let mut w = JsonWriter::new(&mut buf);
    emit(&mut w, &value).unwrap();

    let back: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(value, back);
});
