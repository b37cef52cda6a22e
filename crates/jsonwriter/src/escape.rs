use std::io::{self, Write};

/// Escape text for the C0 range, indexed by byte value. The six characters
/// with a short form use it, everything else gets `\u00xx` with lowercase
/// hex.
static CONTROL: [&str; 0x20] = [
    "\\u0000", "\\u0001", "\\u0002", "\\u0003", "\\u0004", "\\u0005", "\\u0006", "\\u0007", "\\b",
    "\\t", "\\n", "\\u000b", "\\f", "\\r", "\\u000e", "\\u000f", "\\u0010", "\\u0011", "\\u0012",
    "\\u0013", "\\u0014", "\\u0015", "\\u0016", "\\u0017", "\\u0018", "\\u0019", "\\u001a",
    "\\u001b", "\\u001c", "\\u001d", "\\u001e", "\\u001f",
];

fn escape_for(b: u8) -> Option<&'static str> {
    match b {
        b'"' => Some("\\\""),
        b'\\' => Some("\\\\"),
        0x00..=0x1f => Some(CONTROL[b as usize]),
        _ => None,
    }
}

/// Writes `s` with JSON string escaping applied, without the surrounding
/// quotes.
///
/// Single pass over the bytes: a run `[start, i)` of bytes needing no
/// escape is flushed in one write when the run breaks, so long clean
/// stretches cost one sink call instead of one per character. Everything
/// outside the escape set passes through untouched, multi-byte UTF-8
/// sequences included; the input is not validated.
pub(crate) fn write_escaped<W: Write>(out: &mut W, s: &str) -> io::Result<()> {
    let bytes = s.as_bytes();
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        let Some(esc) = escape_for(b) else { continue };
        if start < i {
            out.write_all(&bytes[start..i])?;
        }
        out.write_all(esc.as_bytes())?;
        start = i + 1;
    }
    if start < bytes.len() {
        out.write_all(&bytes[start..])?;
    }
    Ok(())
}
