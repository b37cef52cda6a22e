#[cfg(feature = "chrono")]
use chrono::{DateTime, TimeZone, Utc};

/// Types that render themselves as pre-encoded JSON.
///
/// The writer splices the returned bytes into the output verbatim, with no
/// further escaping or validation: if the bytes are malformed, the document
/// is malformed.
pub trait ToJson {
    fn to_json(&self) -> Vec<u8>;
}

#[cfg(feature = "json")]
impl ToJson for serde_json::Value {
    fn to_json(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

/// A single JSON value at value position.
///
/// The supported kinds are closed: anything a caller can construct here has
/// a defined rendering, so there is no unsupported-type failure path at
/// runtime. `From` conversions cover every primitive width, so call sites
/// normally pass the bare value and let `into()` pick the variant.
#[derive(Clone, Copy)]
pub enum Value<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    F32(f32),
    F64(f64),
    Str(&'a str),
    /// Rendered as a quoted RFC 3339 string in UTC.
    #[cfg(feature = "chrono")]
    Timestamp(DateTime<Utc>),
    /// Defers to the value's own [`ToJson`] rendering.
    Custom(&'a dyn ToJson),
    /// Caller-supplied bytes, spliced verbatim.
    Raw(&'a [u8]),
}

macro_rules! value_from_int {
    ($($t:ty)*) => {$(
        impl From<$t> for Value<'_> {
            fn from(v: $t) -> Self {
                Value::Int(v as i64)
            }
        }
    )*};
}

macro_rules! value_from_uint {
    ($($t:ty)*) => {$(
        impl From<$t> for Value<'_> {
            fn from(v: $t) -> Self {
                Value::Uint(v as u64)
            }
        }
    )*};
}

value_from_int!(i8 i16 i32 i64 isize);
value_from_uint!(u8 u16 u32 u64 usize);

impl From<f32> for Value<'_> {
    fn from(v: f32) -> Self {
        Value::F32(v)
    }
}

impl From<f64> for Value<'_> {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

impl From<bool> for Value<'_> {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(v: &'a str) -> Self {
        Value::Str(v)
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(v: &'a String) -> Self {
        Value::Str(v)
    }
}

impl<'a, T: Into<Value<'a>>> From<Option<T>> for Value<'a> {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// Any zoned time normalizes to UTC on the way in.
#[cfg(feature = "chrono")]
impl<Tz: TimeZone> From<DateTime<Tz>> for Value<'_> {
    fn from(v: DateTime<Tz>) -> Self {
        Value::Timestamp(v.with_timezone(&Utc))
    }
}
