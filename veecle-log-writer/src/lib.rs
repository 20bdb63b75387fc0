//! # `veecle-log-writer`
//!
//! A character-stream writer whose output ends up in a logging system.
//!
//! Code that reports through a plain text stream, such as a driver that was handed a "log writer",
//! can be given a [`LogWriter`] instead. Every line written to it becomes one log call at a fixed
//! [`Severity`], optionally tagged with a category [`Marker`] and attributed to a configurable
//! component.
//!
//! ## Features
//!
//! - **Line splitting**: `\n`, `\r\n` and a lone `\r` end a line, partial lines are kept until
//!   terminated, flushed or closed
//! - **Tee mode**: Forward everything unmodified to a downstream [`std::io::Write`] as well
//! - **Print-style API**: `print`, `println`, `printf` and friends never fail, failures are read
//!   with [`LogWriter::check_error`]
//! - **Backends**: [`tracing`](backend::TracingBackend), [`log`](backend::LogCrateBackend) or
//!   your own [`LogBackend`]
//!
//! ## Feature Flags
//!
//! - `log` - Enable the [`log`] facade backend
//!
//! ## Basic Usage
//!
//! ```rust
//! use std::io::Write;
//!
//! use veecle_log_writer::backend::TracingBackend;
//! use veecle_log_writer::{LogWriter, Marker, Severity};
//!
//! let mut writer = LogWriter::with_marker(
//!     TracingBackend::DEFAULT,
//!     Severity::Info,
//!     Marker::new("SQL"),
//! );
//!
//! writer.println("connection established");
//! writer.write_all(b"select 1\r\nselect 2\n")?;
//! writer.printf(format_args!("{} rows affected", 2)).newline();
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! ## Tee Mode
//!
//! ```rust
//! use veecle_log_writer::backend::TracingBackend;
//! use veecle_log_writer::{LogWriter, Severity};
//!
//! let mut writer = LogWriter::tee(Vec::new(), TracingBackend::DEFAULT, Severity::Debug);
//! writer.println("hello");
//! assert_eq!(writer.get_ref().unwrap(), b"hello\n");
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod backend;
mod config;
mod error;
mod line_buffer;
mod marker;
mod severity;
mod writer;

pub use backend::LogBackend;
pub use config::WriterConfig;
pub use error::Error;
pub use marker::Marker;
pub use severity::{ParseSeverityError, Severity};
pub use writer::{Builder, LINE_SEPARATOR, LogOnly, LogWriter};
