//! `tracing` adapter.

use super::{LogBackend, Metadata, Record};
use crate::{Marker, Severity};

/// Backend that emits every line as a `tracing` event.
///
/// Events carry the line as message and the writer's component in the `component` field.
/// The `marker` field is only recorded when the writer has a marker.
/// [`Severity::Fatal`] is emitted at [`tracing::Level::ERROR`].
///
/// # Examples
///
/// ```rust
/// use veecle_log_writer::backend::TracingBackend;
/// use veecle_log_writer::{LogWriter, Severity};
///
/// // Assumes a tracing subscriber is installed.
/// let mut writer = LogWriter::new(TracingBackend::DEFAULT, Severity::Debug);
/// writer.println("connection opened");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingBackend(());

impl TracingBackend {
    /// A `const` version of `TracingBackend::default()` to allow use as a `&'static`.
    pub const DEFAULT: Self = TracingBackend(());
}

impl LogBackend for TracingBackend {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        match metadata.severity {
            Severity::Trace => tracing::enabled!(tracing::Level::TRACE),
            Severity::Debug => tracing::enabled!(tracing::Level::DEBUG),
            Severity::Info => tracing::enabled!(tracing::Level::INFO),
            Severity::Warn => tracing::enabled!(tracing::Level::WARN),
            Severity::Error | Severity::Fatal => tracing::enabled!(tracing::Level::ERROR),
        }
    }

    fn log(&self, record: &Record<'_>) {
        let Record {
            metadata:
                Metadata {
                    severity,
                    marker,
                    component,
                },
            line,
        } = *record;
        let marker = marker.map(Marker::name);

        // `tracing` needs the level at the callsite, so every severity gets its own event.
        match severity {
            Severity::Trace => tracing::trace!(component, marker, "{line}"),
            Severity::Debug => tracing::debug!(component, marker, "{line}"),
            Severity::Info => tracing::info!(component, marker, "{line}"),
            Severity::Warn => tracing::warn!(component, marker, "{line}"),
            Severity::Error | Severity::Fatal => tracing::error!(component, marker, "{line}"),
        }
    }
}
