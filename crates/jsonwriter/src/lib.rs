#![doc = include_str!("../README.md")]

pub mod error;
mod escape;
mod number;
pub mod value;
pub mod writer;

pub use crate::error::{Error, Result};
pub use crate::value::{ToJson, Value};
pub use crate::writer::{JsonWriter, Scope};

/// Runs `f` against a writer over a fresh in-memory buffer and returns the
/// encoded bytes.
pub fn to_vec<F>(f: F) -> Result<Vec<u8>>
where
    F: FnOnce(&mut JsonWriter<Vec<u8>>) -> Result<()>,
{
    let mut w = JsonWriter::new(Vec::new());
    f(&mut w)?;
    Ok(w.into_inner())
}
