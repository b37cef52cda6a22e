use std::io::{self, Write};

#[cfg(feature = "chrono")]
use chrono::{DateTime, TimeZone, Timelike, Utc};

use crate::error::Result;
use crate::escape::write_escaped;
use crate::number;
use crate::value::{ToJson, Value};

/// One open container. `first` is true until the container's first element
/// (or member key) lands, which is what decides the separating comma.
#[derive(Debug, Clone, Copy)]
struct Frame {
    array: bool,
    first: bool,
}

/// Streaming JSON writer over an output sink.
///
/// Every operation writes directly to the sink, unbuffered, and returns
/// the sink's error on first failure; there is no internal buffering and
/// no pretty-printing, so the output is fully compact. Wrap the sink in
/// [`std::io::BufWriter`] when byte-at-a-time writes are expensive.
///
/// Structural state is an explicit stack of open containers, so nesting
/// depth is always inspectable via [`depth`](JsonWriter::depth). Two
/// calling styles produce identical bytes: the scoped style
/// ([`root_object`](JsonWriter::root_object) and friends, returning a
/// [`Scope`] guard that closes the container when it ends), and the manual
/// style ([`begin_object`](JsonWriter::begin_object) /
/// [`end_object`](JsonWriter::end_object) pairs) for control flow a guard
/// cannot straddle.
///
/// Sink failures are recoverable `Err` values; structural misuse (closing
/// a container that is not open, opening an array element outside an
/// array) is a defect in the calling code and panics.
pub struct JsonWriter<W: Write> {
    out: W,
    stack: Vec<Frame>,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            stack: Vec::new(),
        }
    }

    /// Number of currently open containers.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Forgets all open containers so the writer can start a new document.
    /// Does not touch the sink; anything already written stays written.
    pub fn reset(&mut self) {
        self.stack.clear();
    }

    /// Consumes the writer, returning the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn in_array(&self) -> bool {
        self.stack.last().is_some_and(|f| f.array)
    }

    /// Comma check for an element at value position. Only array elements
    /// separate themselves; an object value follows its key's comma, and a
    /// root value has no siblings.
    fn element(&mut self) -> Result<()> {
        if let Some(top) = self.stack.last_mut() {
            if top.array {
                if top.first {
                    top.first = false;
                } else {
                    self.out.write_all(b",")?;
                }
            }
        }
        Ok(())
    }

    // ---- structural operations, manual pairing ----

    /// Opens an object at value position: document root, array element
    /// (comma-checked), or immediately after a key.
    pub fn begin_object(&mut self) -> Result<()> {
        self.element()?;
        self.out.write_all(b"{")?;
        self.stack.push(Frame {
            array: false,
            first: true,
        });
        Ok(())
    }

    /// Closes the innermost container, which must be an object.
    ///
    /// # Panics
    ///
    /// If no container is open, or the innermost one is an array.
    pub fn end_object(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame { array: false, .. }) => {}
            Some(Frame { array: true, .. }) => panic!("end_object while an array is open"),
            None => panic!("end_object with no open container"),
        }
        self.out.write_all(b"}")?;
        Ok(())
    }

    /// Opens an array at value position. See [`begin_object`](JsonWriter::begin_object).
    pub fn begin_array(&mut self) -> Result<()> {
        self.element()?;
        self.out.write_all(b"[")?;
        self.stack.push(Frame {
            array: true,
            first: true,
        });
        Ok(())
    }

    /// Closes the innermost container, which must be an array.
    ///
    /// # Panics
    ///
    /// If no container is open, or the innermost one is an object.
    pub fn end_array(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame { array: true, .. }) => {}
            Some(Frame { array: false, .. }) => panic!("end_array while an object is open"),
            None => panic!("end_array with no open container"),
        }
        self.out.write_all(b"]")?;
        Ok(())
    }

    /// Writes `"key":`, comma-separated from the previous member. Keys are
    /// only meaningful inside an object; the value that follows is not
    /// comma-checked again (the colon already separates them).
    pub fn key(&mut self, key: &str) -> Result<()> {
        debug_assert!(
            self.stack.last().is_some_and(|f| !f.array),
            "key written outside an object"
        );
        if let Some(top) = self.stack.last_mut() {
            if top.first {
                top.first = false;
            } else {
                self.out.write_all(b",")?;
            }
        }
        self.out.write_all(b"\"")?;
        write_escaped(&mut self.out, key)?;
        self.out.write_all(b"\":")?;
        Ok(())
    }

    // ---- structural operations, scoped ----

    /// Opens the root object of a document. Must be the first operation of
    /// the document (and the returned scope's close its last).
    ///
    /// # Panics
    ///
    /// If a container is already open.
    pub fn root_object(&mut self) -> Result<Scope<'_, W>> {
        assert!(self.stack.is_empty(), "root_object with a container open");
        self.scope_object()
    }

    /// Opens the root array of a document.
    ///
    /// # Panics
    ///
    /// If a container is already open.
    pub fn root_array(&mut self) -> Result<Scope<'_, W>> {
        assert!(self.stack.is_empty(), "root_array with a container open");
        self.scope_array()
    }

    /// Writes `"key":` and opens the object it introduces.
    pub fn key_object(&mut self, key: &str) -> Result<Scope<'_, W>> {
        self.key(key)?;
        self.scope_object()
    }

    /// Writes `"key":` and opens the array it introduces.
    pub fn key_array(&mut self, key: &str) -> Result<Scope<'_, W>> {
        self.key(key)?;
        self.scope_array()
    }

    /// Opens an unkeyed object as an array element.
    ///
    /// # Panics
    ///
    /// If the innermost open container is not an array.
    pub fn array_object(&mut self) -> Result<Scope<'_, W>> {
        assert!(self.in_array(), "array_object outside an array");
        self.scope_object()
    }

    /// Opens an unkeyed array as an array element (arrays of arrays).
    pub fn sub_array(&mut self) -> Result<Scope<'_, W>> {
        self.scope_array()
    }

    fn scope_object(&mut self) -> Result<Scope<'_, W>> {
        self.begin_object()?;
        Ok(Scope {
            writer: self,
            open: true,
        })
    }

    fn scope_array(&mut self) -> Result<Scope<'_, W>> {
        self.begin_array()?;
        Ok(Scope {
            writer: self,
            open: true,
        })
    }

    /// Pops and closes the innermost container, whichever kind it is.
    fn close_innermost(&mut self) -> Result<()> {
        let Some(frame) = self.stack.pop() else {
            panic!("container closed with no open container");
        };
        self.out
            .write_all(if frame.array { b"]" } else { b"}" })?;
        Ok(())
    }

    // ---- value operations ----

    /// Writes any supported value at value position, comma-separating it
    /// when the enclosing container is an array. The typed shortcuts below
    /// produce byte-identical output and skip the dispatch.
    pub fn value<'v>(&mut self, value: impl Into<Value<'v>>) -> Result<()> {
        self.element()?;
        self.write_value(value.into())
    }

    fn write_value(&mut self, value: Value<'_>) -> Result<()> {
        match value {
            Value::Null => self.out.write_all(b"null")?,
            Value::Bool(v) => self.write_bool(v)?,
            Value::Int(v) => number::write_i64(&mut self.out, v)?,
            Value::Uint(v) => number::write_u64(&mut self.out, v)?,
            Value::F32(v) => number::write_f32(&mut self.out, v)?,
            Value::F64(v) => number::write_f64(&mut self.out, v)?,
            Value::Str(v) => self.write_quoted(v)?,
            #[cfg(feature = "chrono")]
            Value::Timestamp(v) => self.write_timestamp(&v)?,
            Value::Custom(v) => self.out.write_all(&v.to_json())?,
            Value::Raw(v) => self.out.write_all(v)?,
        }
        Ok(())
    }

    fn write_bool(&mut self, value: bool) -> io::Result<()> {
        self.out
            .write_all(if value { "true" } else { "false" }.as_bytes())
    }

    fn write_quoted(&mut self, value: &str) -> Result<()> {
        self.out.write_all(b"\"")?;
        write_escaped(&mut self.out, value)?;
        self.out.write_all(b"\"")?;
        Ok(())
    }

    /// RFC 3339 in UTC: fractional seconds only when nonzero, at up to
    /// nanosecond precision with trailing zeros trimmed.
    #[cfg(feature = "chrono")]
    fn write_timestamp(&mut self, value: &DateTime<Utc>) -> Result<()> {
        self.out.write_all(b"\"")?;
        write!(self.out, "{}", value.format("%Y-%m-%dT%H:%M:%S"))?;
        let nanos = value.nanosecond();
        if nanos > 0 {
            let mut digits = *b".000000000";
            let mut n = nanos;
            for i in (1..=9).rev() {
                digits[i] = b'0' + (n % 10) as u8;
                n /= 10;
            }
            let mut end = digits.len();
            while digits[end - 1] == b'0' {
                end -= 1;
            }
            self.out.write_all(&digits[..end])?;
        }
        self.out.write_all(b"Z\"")?;
        Ok(())
    }

    /// Writes a string value.
    pub fn string(&mut self, value: &str) -> Result<()> {
        self.element()?;
        self.write_quoted(value)
    }

    /// Writes a signed integer value. All narrower widths widen losslessly.
    pub fn int(&mut self, value: i64) -> Result<()> {
        self.element()?;
        number::write_i64(&mut self.out, value)?;
        Ok(())
    }

    /// Writes an unsigned integer value.
    pub fn uint(&mut self, value: u64) -> Result<()> {
        self.element()?;
        number::write_u64(&mut self.out, value)?;
        Ok(())
    }

    /// Writes `true` or `false`.
    pub fn bool(&mut self, value: bool) -> Result<()> {
        self.element()?;
        self.write_bool(value)?;
        Ok(())
    }

    /// Writes an f64 in shortest round-trip general notation. Non-finite
    /// values render as `null`.
    pub fn float(&mut self, value: f64) -> Result<()> {
        self.element()?;
        number::write_f64(&mut self.out, value)?;
        Ok(())
    }

    /// Writes an f32 in shortest round-trip general notation at f32 width.
    pub fn float32(&mut self, value: f32) -> Result<()> {
        self.element()?;
        number::write_f32(&mut self.out, value)?;
        Ok(())
    }

    /// Writes `null`.
    pub fn null(&mut self) -> Result<()> {
        self.element()?;
        self.out.write_all(b"null")?;
        Ok(())
    }

    /// Writes a timestamp value, normalized to UTC.
    #[cfg(feature = "chrono")]
    pub fn timestamp<Tz: TimeZone>(&mut self, value: &DateTime<Tz>) -> Result<()> {
        self.element()?;
        let utc = value.with_timezone(&Utc);
        self.write_timestamp(&utc)
    }

    /// Writes a value that renders its own JSON. The bytes go out verbatim.
    pub fn custom(&mut self, value: &dyn ToJson) -> Result<()> {
        self.element()?;
        self.out.write_all(&value.to_json())?;
        Ok(())
    }

    /// Writes caller-encoded bytes as one value: comma bookkeeping happens,
    /// escaping does not.
    pub fn raw_value(&mut self, data: &[u8]) -> Result<()> {
        self.element()?;
        self.out.write_all(data)?;
        Ok(())
    }

    /// Fully raw passthrough: no comma bookkeeping, no escaping. For
    /// splicing pre-rendered fragments (entire key/value runs included)
    /// into the current container; structural correctness is on the caller.
    pub fn raw(&mut self, data: &[u8]) -> Result<()> {
        self.out.write_all(data)?;
        Ok(())
    }

    // ---- combined key + value shortcuts ----

    /// `key(key)` followed by `value(value)` in one call.
    pub fn key_value<'v>(&mut self, key: &str, value: impl Into<Value<'v>>) -> Result<()> {
        self.key(key)?;
        self.write_value(value.into())
    }

    pub fn key_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.key(key)?;
        self.write_quoted(value)
    }

    pub fn key_int(&mut self, key: &str, value: i64) -> Result<()> {
        self.key(key)?;
        number::write_i64(&mut self.out, value)?;
        Ok(())
    }

    pub fn key_uint(&mut self, key: &str, value: u64) -> Result<()> {
        self.key(key)?;
        number::write_u64(&mut self.out, value)?;
        Ok(())
    }

    pub fn key_bool(&mut self, key: &str, value: bool) -> Result<()> {
        self.key(key)?;
        self.write_bool(value)?;
        Ok(())
    }

    pub fn key_float(&mut self, key: &str, value: f64) -> Result<()> {
        self.key(key)?;
        number::write_f64(&mut self.out, value)?;
        Ok(())
    }

    pub fn key_float32(&mut self, key: &str, value: f32) -> Result<()> {
        self.key(key)?;
        number::write_f32(&mut self.out, value)?;
        Ok(())
    }

    /// Keyed raw bytes: the key is escaped, the value bytes are not.
    pub fn key_raw(&mut self, key: &str, data: &[u8]) -> Result<()> {
        self.key(key)?;
        self.out.write_all(data)?;
        Ok(())
    }

    /// Writes `key` followed by an array of the given values, one element
    /// per item.
    pub fn array_values<'v, I>(&mut self, key: &str, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Value<'v>>,
    {
        self.key(key)?;
        self.begin_array()?;
        for v in values {
            self.value(v)?;
        }
        self.end_array()
    }
}

/// Guard for an open object or array.
///
/// Dropping the scope writes the matching close delimiter, so a container
/// cannot be left unclosed on any exit path; call [`end`](Scope::end)
/// instead where the sink error matters (drop has nowhere to report one).
/// The scope derefs to the writer, so members and elements are written
/// through it.
#[must_use = "dropping the scope closes the container immediately"]
pub struct Scope<'a, W: Write> {
    writer: &'a mut JsonWriter<W>,
    open: bool,
}

impl<W: Write> Scope<'_, W> {
    /// Closes the container, surfacing any sink error.
    pub fn end(mut self) -> Result<()> {
        self.open = false;
        self.writer.close_innermost()
    }
}

impl<W: Write> Drop for Scope<'_, W> {
    fn drop(&mut self) {
        if self.open {
            let _ = self.writer.close_innermost();
        }
    }
}

impl<W: Write> std::ops::Deref for Scope<'_, W> {
    type Target = JsonWriter<W>;

    fn deref(&self) -> &JsonWriter<W> {
        self.writer
    }
}

impl<W: Write> std::ops::DerefMut for Scope<'_, W> {
    fn deref_mut(&mut self) -> &mut JsonWriter<W> {
        self.writer
    }
}
