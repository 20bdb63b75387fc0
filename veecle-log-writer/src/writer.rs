//! The writer adapter.
//!
//! [`LogWriter`] implements [`io::Write`] and [`fmt::Write`] and offers a print-style surface on top
//! of them. Everything written is split into lines and every line becomes one call into a
//! [`LogBackend`].
//!
//! A writer either only logs ([`LogOnly`]) or tees its output into a downstream [`io::Write`],
//! see [`LogWriter::tee`].

use std::borrow::Cow;
use std::fmt::{self, Display};
use std::io;

use crate::backend::{LogBackend, Metadata, Record};
use crate::config::WriterConfig;
use crate::line_buffer::LineBuffer;
use crate::{Error, Marker, Severity};

/// Line separator written by [`LogWriter::println`] and [`LogWriter::newline`].
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";

/// Line separator written by [`LogWriter::println`] and [`LogWriter::newline`].
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Downstream of a writer that only logs.
///
/// Accepts and discards every byte.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOnly;

impl io::Write for LogOnly {
    fn write(&mut self, buffer: &[u8]) -> io::Result<usize> {
        Ok(buffer.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A writer that logs every line written to it.
///
/// Lines are handed to the backend `B` with the severity, marker and component the writer was
/// built with. These never change after construction.
///
/// With a downstream writer `W` (tee mode) every byte is also forwarded, unmodified, to `W`.
///
/// # Error handling
///
/// The print-style methods ([`print`], [`println`], [`printf`], ...) never fail. A failing
/// downstream writer sets a sticky flag, read with [`check_error`]. The `write_*` and `try_*`
/// methods, and the [`io::Write`] implementation, report errors as values and set the same flag.
///
/// # Closing
///
/// [`close`] logs the pending partial line, flushes and drops the downstream writer. Afterwards
/// every write is silently ignored. Dropping the writer closes it.
///
/// # Examples
///
/// ```rust
/// use veecle_log_writer::backend::TestBackend;
/// use veecle_log_writer::{LogWriter, Severity};
///
/// let (backend, records) = TestBackend::new();
/// let mut writer = LogWriter::new(backend, Severity::Debug);
///
/// writer.print("a");
/// writer.print('b');
/// writer.newline();
/// writer.printf(format_args!("{} rows affected", 3)).println("");
///
/// let lines: Vec<_> = records.lock().unwrap().iter().map(|r| r.line.clone()).collect();
/// assert_eq!(lines, ["ab", "3 rows affected"]);
/// ```
///
/// [`print`]: LogWriter::print
/// [`println`]: LogWriter::println
/// [`printf`]: LogWriter::printf
/// [`check_error`]: LogWriter::check_error
/// [`close`]: LogWriter::close
pub struct LogWriter<B, W = LogOnly>
where
    B: LogBackend,
    W: io::Write,
{
    backend: B,
    severity: Severity,
    marker: Option<Marker>,
    component: Cow<'static, str>,
    auto_flush: bool,

    /// `None` once closed.
    downstream: Option<W>,
    buffer: LineBuffer,
    error: bool,
}

/// Builder for a [`LogWriter`].
///
/// Created via [`LogWriter::builder`] and finalized with [`build`](Builder::build) or
/// [`build_tee`](Builder::build_tee).
#[derive(Debug)]
#[must_use]
pub struct Builder<B> {
    backend: B,
    severity: Severity,
    marker: Option<Marker>,
    component: Cow<'static, str>,
    auto_flush: bool,
    skip_empty_lines: bool,
}

impl<B> Builder<B>
where
    B: LogBackend,
{
    pub(crate) fn new(backend: B, severity: Severity) -> Self {
        Self {
            backend,
            severity,
            marker: None,
            component: Cow::Borrowed(LogWriter::<B>::DEFAULT_COMPONENT),
            auto_flush: false,
            skip_empty_lines: false,
        }
    }

    /// Attaches `marker` to every line.
    pub fn marker(mut self, marker: impl Into<Option<Marker>>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Sets the component identifier attached to every line.
    ///
    /// Defaults to [`LogWriter::DEFAULT_COMPONENT`].
    pub fn component(mut self, component: impl Into<Cow<'static, str>>) -> Self {
        self.component = component.into();
        self
    }

    /// Flush after every `println`, `newline`, `printf` and `format`.
    pub fn auto_flush(mut self, auto_flush: bool) -> Self {
        self.auto_flush = auto_flush;
        self
    }

    /// Do not log empty lines.
    pub fn skip_empty_lines(mut self, skip_empty_lines: bool) -> Self {
        self.skip_empty_lines = skip_empty_lines;
        self
    }

    /// Applies every setting of `config` to this builder, replacing earlier settings.
    pub fn apply_config(self, config: &WriterConfig) -> Self {
        let mut builder = Self {
            severity: config.severity,
            ..self
        };
        builder = builder
            .marker(config.to_marker())
            .auto_flush(config.auto_flush)
            .skip_empty_lines(config.skip_empty_lines);
        if let Some(component) = &config.component {
            builder = builder.component(component.clone());
        }
        builder
    }

    /// Builds a writer that only logs.
    pub fn build(self) -> LogWriter<B> {
        self.build_tee(LogOnly)
    }

    /// Builds a writer that forwards everything to `downstream` and logs it.
    pub fn build_tee<W>(self, downstream: W) -> LogWriter<B, W>
    where
        W: io::Write,
    {
        LogWriter {
            backend: self.backend,
            severity: self.severity,
            marker: self.marker,
            component: self.component,
            auto_flush: self.auto_flush,
            downstream: Some(downstream),
            buffer: LineBuffer::new(self.skip_empty_lines),
            error: false,
        }
    }
}

impl<B> LogWriter<B>
where
    B: LogBackend,
{
    /// Component identifier used when none is configured.
    pub const DEFAULT_COMPONENT: &'static str = concat!(module_path!(), "::LogWriter");

    /// Creates a writer that only logs, at `severity` and without marker.
    pub fn new(backend: B, severity: Severity) -> Self {
        Builder::new(backend, severity).build()
    }

    /// Creates a writer that only logs, at `severity` and tagged with `marker`.
    pub fn with_marker(backend: B, severity: Severity, marker: Marker) -> Self {
        Builder::new(backend, severity).marker(marker).build()
    }

    /// Creates a builder for a writer logging to `backend` at `severity`.
    pub fn builder(backend: B, severity: Severity) -> Builder<B> {
        Builder::new(backend, severity)
    }
}

impl<B, W> LogWriter<B, W>
where
    B: LogBackend,
    W: io::Write,
{
    /// Creates a writer that forwards everything to `downstream` and logs it at `severity`.
    pub fn tee(downstream: W, backend: B, severity: Severity) -> Self {
        Builder::new(backend, severity).build_tee(downstream)
    }

    /// Returns the severity of every emitted line.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the marker attached to every emitted line.
    pub fn marker(&self) -> Option<&Marker> {
        self.marker.as_ref()
    }

    /// Returns the component identifier attached to every emitted line.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Returns whether line-ending print operations flush.
    pub fn is_auto_flush(&self) -> bool {
        self.auto_flush
    }

    /// Returns whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.downstream.is_none()
    }

    /// Returns the downstream writer, `None` once closed.
    pub fn get_ref(&self) -> Option<&W> {
        self.downstream.as_ref()
    }

    /// Returns the downstream writer mutably, `None` once closed.
    ///
    /// Bytes written directly to it are not logged.
    pub fn get_mut(&mut self) -> Option<&mut W> {
        self.downstream.as_mut()
    }

    /// Returns the text of the current, not yet terminated, line.
    pub fn pending_line(&self) -> &str {
        self.buffer.pending()
    }

    /// Logs the pending partial line and returns the downstream writer without flushing it.
    ///
    /// Returns `None` if the writer was already closed.
    pub fn into_inner(mut self) -> Option<W> {
        let Self {
            backend,
            severity,
            marker,
            component,
            buffer,
            ..
        } = &mut self;
        let emitter = Emitter::new(backend, *severity, marker.as_ref(), component);
        buffer.finish(|line| emitter.emit(line));

        self.downstream.take()
    }

    /// Writes `text`, reporting failures as values.
    ///
    /// The text is logged even if the downstream writer fails.
    pub fn write_str(&mut self, text: &str) -> Result<(), Error> {
        let Some(downstream) = self.downstream.as_mut() else {
            return Err(Error::Closed);
        };
        let result = downstream.write_all(text.as_bytes());
        self.log_str(text);
        result.map_err(|error| self.record_failure(error))
    }

    /// Writes a single character, reporting failures as values.
    pub fn write_char(&mut self, character: char) -> Result<(), Error> {
        self.write_str(character.encode_utf8(&mut [0; 4]))
    }

    /// Writes formatted text, reporting failures as values.
    ///
    /// This makes `write!(writer, ..)` return [`Error`].
    ///
    /// Formatting continues after a downstream failure so that the complete text is logged, the
    /// first failure is returned.
    pub fn write_fmt(&mut self, arguments: fmt::Arguments<'_>) -> Result<(), Error> {
        if let Some(text) = arguments.as_str() {
            return self.write_str(text);
        }
        if self.is_closed() {
            return Err(Error::Closed);
        }

        struct Adapter<'a, B, W>
        where
            B: LogBackend,
            W: io::Write,
        {
            writer: &'a mut LogWriter<B, W>,
            error: Option<Error>,
        }

        impl<B, W> fmt::Write for Adapter<'_, B, W>
        where
            B: LogBackend,
            W: io::Write,
        {
            fn write_str(&mut self, text: &str) -> fmt::Result {
                if let Err(error) = self.writer.write_str(text) {
                    self.error.get_or_insert(error);
                }
                Ok(())
            }
        }

        let mut adapter = Adapter {
            writer: self,
            error: None,
        };
        match fmt::write(&mut adapter, arguments) {
            Ok(()) => adapter.error.map_or(Ok(()), Err),
            Err(fmt::Error) => {
                self.error = true;
                Err(Error::Format)
            }
        }
    }

    /// Logs the pending partial line and flushes the downstream writer, reporting failures as
    /// values.
    pub fn try_flush(&mut self) -> Result<(), Error> {
        let Self {
            backend,
            severity,
            marker,
            component,
            buffer,
            downstream,
            ..
        } = self;
        let Some(downstream) = downstream.as_mut() else {
            return Err(Error::Closed);
        };
        let emitter = Emitter::new(backend, *severity, marker.as_ref(), component);
        buffer.flush(|line| emitter.emit(line));

        downstream
            .flush()
            .map_err(|error| self.record_failure(error))
    }

    /// Logs the pending partial line, flushes and drops the downstream writer, reporting failures
    /// as values.
    ///
    /// Closing an already closed writer does nothing and succeeds.
    pub fn try_close(&mut self) -> Result<(), Error> {
        let Some(mut downstream) = self.downstream.take() else {
            return Ok(());
        };

        let Self {
            backend,
            severity,
            marker,
            component,
            buffer,
            ..
        } = self;
        let emitter = Emitter::new(backend, *severity, marker.as_ref(), component);
        buffer.finish(|line| emitter.emit(line));

        downstream
            .flush()
            .map_err(|error| self.record_failure(error))
    }

    /// Logs the bytes the downstream writer accepted.
    fn log_bytes(&mut self, bytes: &[u8]) {
        let Self {
            backend,
            severity,
            marker,
            component,
            buffer,
            ..
        } = self;
        let emitter = Emitter::new(backend, *severity, marker.as_ref(), component);
        buffer.push_bytes(bytes, |line| emitter.emit(line));
    }

    fn log_str(&mut self, text: &str) {
        let Self {
            backend,
            severity,
            marker,
            component,
            buffer,
            ..
        } = self;
        let emitter = Emitter::new(backend, *severity, marker.as_ref(), component);
        buffer.push_str(text, |line| emitter.emit(line));
    }

    fn record_failure(&mut self, error: io::Error) -> Error {
        if !self.error {
            tracing::warn!(
                component = %self.component,
                ?error,
                "downstream writer failed, lines are still logged"
            );
        }
        self.error = true;
        Error::Io(error)
    }
}

/// Hands completed lines to the backend.
struct Emitter<'a, B> {
    backend: &'a B,
    metadata: Metadata<'a>,
}

impl<'a, B> Emitter<'a, B>
where
    B: LogBackend,
{
    fn new(
        backend: &'a B,
        severity: Severity,
        marker: Option<&'a Marker>,
        component: &'a str,
    ) -> Self {
        Self {
            backend,
            metadata: Metadata {
                severity,
                marker,
                component,
            },
        }
    }

    fn emit(&self, line: &str) {
        if self.backend.enabled(&self.metadata) {
            self.backend.log(&Record {
                metadata: self.metadata,
                line,
            });
        }
    }
}

impl<B, W> io::Write for LogWriter<B, W>
where
    B: LogBackend,
    W: io::Write,
{
    /// Forwards `buffer` to the downstream writer and logs the part it accepted.
    ///
    /// A closed writer accepts and discards everything.
    fn write(&mut self, buffer: &[u8]) -> io::Result<usize> {
        let Some(downstream) = self.downstream.as_mut() else {
            return Ok(buffer.len());
        };
        match downstream.write(buffer) {
            Ok(written) => {
                self.log_bytes(&buffer[..written]);
                Ok(written)
            }
            Err(error) if error.kind() == io::ErrorKind::Interrupted => Err(error),
            Err(error) => Err(self.record_failure(error).into()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.try_flush() {
            Err(Error::Closed) => Ok(()),
            result => result.map_err(io::Error::from),
        }
    }
}

impl<B, W> fmt::Write for LogWriter<B, W>
where
    B: LogBackend,
    W: io::Write,
{
    /// Writes `text`, failing only if the downstream writer failed.
    ///
    /// A closed writer accepts and discards everything.
    fn write_str(&mut self, text: &str) -> fmt::Result {
        match LogWriter::write_str(self, text) {
            Ok(()) | Err(Error::Closed) => Ok(()),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl<B, W> fmt::Debug for LogWriter<B, W>
where
    B: LogBackend,
    W: io::Write + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogWriter")
            .field("stream", &self.downstream)
            .field("backend", &self.backend)
            .field("severity", &self.severity)
            .field("marker", &self.marker)
            .field("component", &self.component)
            .finish_non_exhaustive()
    }
}

impl<B, W> Drop for LogWriter<B, W>
where
    B: LogBackend,
    W: io::Write,
{
    fn drop(&mut self) {
        self.close();
    }
}

/// The print-style surface.
///
/// None of these methods fail. Downstream and formatting failures set the flag read by
/// [`check_error`](Self::check_error), on a closed writer they do nothing.
impl<B, W> LogWriter<B, W>
where
    B: LogBackend,
    W: io::Write,
{
    /// Writes the [`Display`] rendering of `value`.
    pub fn print(&mut self, value: impl Display) {
        let _ = self.write_fmt(format_args!("{value}"));
    }

    /// Writes the [`Display`] rendering of `value` followed by [`LINE_SEPARATOR`].
    pub fn println(&mut self, value: impl Display) {
        let _ = self.write_fmt(format_args!("{value}{LINE_SEPARATOR}"));
        self.flush_if_auto();
    }

    /// Writes [`LINE_SEPARATOR`], ending the current line.
    pub fn newline(&mut self) {
        let _ = self.write_str(LINE_SEPARATOR);
        self.flush_if_auto();
    }

    /// Writes formatted text.
    ///
    /// ```rust
    /// # use veecle_log_writer::{LogWriter, Severity, backend::NopBackend};
    /// # let mut writer = LogWriter::new(NopBackend, Severity::Debug);
    /// writer.printf(format_args!("{:>8.3}", 1.5)).newline();
    /// ```
    pub fn printf(&mut self, arguments: fmt::Arguments<'_>) -> &mut Self {
        let _ = self.write_fmt(arguments);
        self.flush_if_auto();
        self
    }

    /// Same as [`printf`](Self::printf).
    pub fn format(&mut self, arguments: fmt::Arguments<'_>) -> &mut Self {
        self.printf(arguments)
    }

    /// Writes the [`Display`] rendering of `value`, returning the writer for chaining.
    pub fn append(&mut self, value: impl Display) -> &mut Self {
        self.print(value);
        self
    }

    /// Logs the pending partial line and flushes the downstream writer.
    pub fn flush(&mut self) {
        let _ = self.try_flush();
    }

    /// Logs the pending partial line, flushes and drops the downstream writer.
    ///
    /// Calling this more than once has no further effect.
    pub fn close(&mut self) {
        let _ = self.try_close();
    }

    /// Returns whether any operation has failed so far.
    ///
    /// Once set, the flag stays set.
    pub fn check_error(&self) -> bool {
        self.error
    }

    fn flush_if_auto(&mut self) {
        if self.auto_flush {
            self.flush();
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{LINE_SEPARATOR, LogOnly, LogWriter};
    use crate::backend::{NopBackend, TestBackend};
    use crate::{Error, Marker, Severity};

    #[test]
    fn default_component_is_the_writer_path() {
        assert_eq!(
            LogWriter::<NopBackend>::DEFAULT_COMPONENT,
            "veecle_log_writer::writer::LogWriter"
        );
    }

    #[test]
    fn builder_settings() {
        let writer = LogWriter::builder(NopBackend, Severity::Warn)
            .marker(Marker::new("SQL"))
            .component("driver")
            .auto_flush(true)
            .build();

        assert_eq!(writer.severity(), Severity::Warn);
        assert_eq!(writer.marker(), Some(&Marker::new("SQL")));
        assert_eq!(writer.component(), "driver");
        assert!(writer.is_auto_flush());
        assert!(!writer.is_closed());
    }

    #[test]
    fn marker_can_be_cleared() {
        let writer = LogWriter::builder(NopBackend, Severity::Warn)
            .marker(Marker::new("SQL"))
            .marker(Option::<Marker>::None)
            .build();
        assert_eq!(writer.marker(), None);
    }

    #[test]
    fn debug_names_the_downstream_writer() {
        let writer = LogWriter::tee(Vec::<u8>::new(), NopBackend, Severity::Info);
        assert_eq!(
            format!("{writer:?}"),
            r#"LogWriter { stream: Some([]), backend: NopBackend, severity: Info, marker: None, component: "veecle_log_writer::writer::LogWriter", .. }"#
        );

        let mut writer = LogWriter::new(NopBackend, Severity::Info);
        writer.close();
        assert!(format!("{writer:?}").starts_with("LogWriter { stream: None,"));
    }

    #[test]
    fn pending_line_tracks_partial_text() {
        let (backend, records) = TestBackend::new();
        let mut writer = LogWriter::new(backend, Severity::Debug);

        writer.print("select");
        writer.print(' ');
        assert_eq!(writer.pending_line(), "select ");
        writer.print(1);
        writer.newline();
        assert_eq!(writer.pending_line(), "");
        assert_eq!(records.lock().unwrap()[0].line, "select 1");
    }

    #[test]
    fn write_fmt_reports_closed() {
        let mut writer = LogWriter::new(NopBackend, Severity::Debug);
        writer.close();
        assert!(matches!(write!(writer, "{}", 1), Err(Error::Closed)));
        assert!(matches!(writer.write_char('x'), Err(Error::Closed)));
        assert!(!writer.check_error());
    }

    #[test]
    fn format_errors_set_the_flag() {
        struct Broken;

        impl std::fmt::Display for Broken {
            fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                Err(std::fmt::Error)
            }
        }

        let mut writer = LogWriter::new(NopBackend, Severity::Debug);
        assert!(matches!(write!(writer, "{}", Broken), Err(Error::Format)));
        assert!(writer.check_error());
    }

    #[test]
    fn into_inner_logs_pending_line() {
        let (backend, records) = TestBackend::new();
        let mut writer = LogWriter::tee(Vec::new(), backend, Severity::Info);
        writer.print("partial");

        let downstream = writer.into_inner().unwrap();
        assert_eq!(downstream, b"partial");
        assert_eq!(records.lock().unwrap().len(), 1);
    }

    #[test]
    fn log_only_accepts_everything() {
        use std::io::Write;

        let mut sink = LogOnly;
        assert_eq!(sink.write(b"abc").unwrap(), 3);
        sink.flush().unwrap();
        assert!(LINE_SEPARATOR.ends_with('\n'));
    }
}
