use std::io;

use thiserror::Error;

/// Failure while emitting a document. The only recoverable error class is
/// the sink refusing bytes; once one surfaces, the remaining writes for the
/// document should be abandoned (a partially written stream cannot be
/// resumed into a valid document).
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
