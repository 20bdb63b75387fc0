//! Logging backends receiving the lines produced by a [`LogWriter`](crate::LogWriter).
//!
//! The writer does not format, filter or persist anything itself. Every completed line is handed
//! to a [`LogBackend`] as a [`Record`], together with the severity, marker and component the
//! writer was built with.
//!
//! # Built-in Backends
//!
//! - [`TracingBackend`] - Emits `tracing` events
//! - [`LogCrateBackend`] - Emits `log` records (feature `log`)
//! - [`NopBackend`] - Discards every line
//! - [`TestBackend`] - Collects records in memory for testing purposes

#[cfg(feature = "log")]
mod log_backend;
mod test_backend;
mod tracing_backend;

use std::fmt::Debug;
use std::sync::Arc;

#[cfg(feature = "log")]
pub use log_backend::LogCrateBackend;
#[doc(hidden)]
pub use test_backend::{OwnedRecord, TestBackend};
pub use tracing_backend::TracingBackend;

use crate::{Marker, Severity};

/// Everything about a line except its text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Metadata<'a> {
    /// The severity the writer was built with.
    pub severity: Severity,

    /// The category marker the writer was built with, if any.
    pub marker: Option<&'a Marker>,

    /// Identifies the component the line originates from.
    pub component: &'a str,
}

/// A single completed line of text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Record<'a> {
    /// Severity, marker and component of this line.
    pub metadata: Metadata<'a>,

    /// The line without its terminator.
    pub line: &'a str,
}

/// Trait for logging systems that receive lines from a [`LogWriter`](crate::LogWriter).
///
/// Implementations are expected to handle their own failures, the writer treats [`log`] as
/// infallible.
///
/// # Examples
///
/// ```rust
/// use veecle_log_writer::backend::{LogBackend, Record};
///
/// #[derive(Debug)]
/// struct StderrBackend;
///
/// impl LogBackend for StderrBackend {
///     fn log(&self, record: &Record<'_>) {
///         eprintln!("[{}] {}", record.metadata.severity, record.line);
///     }
/// }
/// ```
///
/// [`log`]: LogBackend::log
pub trait LogBackend: Debug {
    /// Returns whether a line with the given metadata would be logged.
    ///
    /// Lines for which this returns `false` are dropped without calling [`log`](Self::log).
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        let _ = metadata;
        true
    }

    /// Logs a single line.
    fn log(&self, record: &Record<'_>);
}

impl<T> LogBackend for &T
where
    T: LogBackend + ?Sized,
{
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        (**self).enabled(metadata)
    }

    fn log(&self, record: &Record<'_>) {
        (**self).log(record)
    }
}

impl<T> LogBackend for Box<T>
where
    T: LogBackend + ?Sized,
{
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        (**self).enabled(metadata)
    }

    fn log(&self, record: &Record<'_>) {
        (**self).log(record)
    }
}

impl<T> LogBackend for Arc<T>
where
    T: LogBackend + ?Sized,
{
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        (**self).enabled(metadata)
    }

    fn log(&self, record: &Record<'_>) {
        (**self).log(record)
    }
}

/// A backend that discards every line.
#[derive(Debug, Default, Clone, Copy)]
pub struct NopBackend;

impl LogBackend for NopBackend {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        false
    }

    fn log(&self, _: &Record<'_>) {}
}
