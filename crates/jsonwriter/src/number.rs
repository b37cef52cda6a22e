use std::io::{self, Write};

pub(crate) fn write_i64<W: Write>(out: &mut W, value: i64) -> io::Result<()> {
    let mut buf = itoa::Buffer::new();
    out.write_all(buf.format(value).as_bytes())
}

pub(crate) fn write_u64<W: Write>(out: &mut W, value: u64) -> io::Result<()> {
    let mut buf = itoa::Buffer::new();
    out.write_all(buf.format(value).as_bytes())
}

/// Shortest round-trip rendering at f64 width. Non-finite values have no
/// JSON representation and render as `null`.
pub(crate) fn write_f64<W: Write>(out: &mut W, value: f64) -> io::Result<()> {
    if !value.is_finite() {
        return out.write_all(b"null");
    }
    let mut buf = ryu::Buffer::new();
    write_general(out, buf.format_finite(value))
}

/// Shortest round-trip rendering at f32 width (fewer digits than the same
/// value widened to f64 would need).
pub(crate) fn write_f32<W: Write>(out: &mut W, value: f32) -> io::Result<()> {
    if !value.is_finite() {
        return out.write_all(b"null");
    }
    let mut buf = ryu::Buffer::new();
    write_general(out, buf.format_finite(value))
}

/// Re-renders ryu's shortest-digit output in `%g` style: positional form
/// while the decimal exponent is in `-4..6`, otherwise scientific with a
/// signed, zero-padded-to-two-digits exponent (`9.949944923949e+07`).
fn write_general<W: Write>(out: &mut W, raw: &str) -> io::Result<()> {
    let (sign, raw) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw),
    };

    // Collapse ryu's two output shapes (positional or `<mantissa>e<exp>`)
    // into bare digits plus the decimal exponent of the leading digit.
    let (mantissa, e) = match raw.find(['e', 'E']) {
        Some(i) => (&raw[..i], raw[i + 1..].parse::<i32>().unwrap_or(0)),
        None => (raw, 0),
    };

    let mut digits = [0u8; 24];
    let mut len = 0;
    let mut point = mantissa.len();
    for (i, b) in mantissa.bytes().enumerate() {
        if b == b'.' {
            point = i;
        } else {
            digits[len] = b;
            len += 1;
        }
    }
    if point == mantissa.len() {
        point = len;
    }
    let mut exp = point as i32 - 1 + e;

    // Normalize: ryu emits "0.001"-style leading zeros and "1.0"-style
    // trailing ones; neither counts as a significant digit.
    let mut start = 0;
    while start + 1 < len && digits[start] == b'0' {
        start += 1;
        exp -= 1;
    }
    while len > start + 1 && digits[len - 1] == b'0' {
        len -= 1;
    }
    let digits = &digits[start..len];
    if digits == b"0" {
        exp = 0;
    }

    out.write_all(sign.as_bytes())?;
    if exp < -4 || exp >= 6 {
        out.write_all(&digits[..1])?;
        if digits.len() > 1 {
            out.write_all(b".")?;
            out.write_all(&digits[1..])?;
        }
        let (esign, eabs) = if exp < 0 { (&b"e-"[..], -exp) } else { (&b"e+"[..], exp) };
        out.write_all(esign)?;
        if eabs < 10 {
            out.write_all(&[b'0', b'0' + eabs as u8])?;
        } else {
            let mut ebuf = itoa::Buffer::new();
            out.write_all(ebuf.format(eabs).as_bytes())?;
        }
    } else if exp >= 0 {
        let int_len = exp as usize + 1;
        if int_len >= digits.len() {
            out.write_all(digits)?;
            for _ in digits.len()..int_len {
                out.write_all(b"0")?;
            }
        } else {
            out.write_all(&digits[..int_len])?;
            out.write_all(b".")?;
            out.write_all(&digits[int_len..])?;
        }
    } else {
        out.write_all(b"0.")?;
        for _ in exp..-1 {
            out.write_all(b"0")?;
        }
        out.write_all(digits)?;
    }
    Ok(())
}
