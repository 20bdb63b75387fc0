//! Errors reported by the explicit-result API of [`LogWriter`](crate::LogWriter).

use std::io;

/// Errors that can occur when writing through a [`LogWriter`](crate::LogWriter).
///
/// The print-style methods never return these. They record failures in the sticky flag read by
/// [`LogWriter::check_error`](crate::LogWriter::check_error) instead.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The writer has been closed, nothing was written.
    #[error("the writer has been closed")]
    Closed,

    /// The downstream writer failed. The text was still logged.
    #[error("writing to the downstream writer failed")]
    Io(#[from] io::Error),

    /// A formatting trait implementation returned an error.
    #[error("a formatting trait implementation returned an error")]
    Format,
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::Io(error) => error,
            Error::Closed => io::Error::new(io::ErrorKind::BrokenPipe, error),
            Error::Format => io::Error::other(error),
        }
    }
}
