//! Deserializable writer configuration.
//!
//! Hosts that configure their logging from a file can embed a [`WriterConfig`] and turn it into a
//! [`Builder`] once the backend is known.

use serde::{Deserialize, Serialize};

use crate::writer::Builder;
use crate::{LogBackend, Marker, Severity};

/// Configuration of a single [`LogWriter`](crate::LogWriter).
///
/// Every field is optional when deserializing, unknown fields are rejected.
///
/// # Examples
///
/// ```rust
/// use veecle_log_writer::backend::NopBackend;
/// use veecle_log_writer::{Severity, WriterConfig};
///
/// let config: WriterConfig = serde_json::from_str(
///     r#"{ "severity": "info", "marker": "SQL", "auto_flush": true }"#,
/// )
/// .unwrap();
///
/// let writer = config.builder(NopBackend).build();
/// assert_eq!(writer.severity(), Severity::Info);
/// assert_eq!(writer.marker().map(|marker| marker.name()), Some("SQL"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct WriterConfig {
    /// Severity of every emitted line. Default: `DEBUG`.
    pub severity: Severity,

    /// Name of the category marker, if any.
    pub marker: Option<String>,

    /// Names of the parent markers of [`marker`](Self::marker).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub marker_parents: Vec<String>,

    /// Component identifier attached to every line. Defaults to the writer's own type path.
    pub component: Option<String>,

    /// Flush after every `println`, `newline`, `printf` and `format`.
    pub auto_flush: bool,

    /// Do not log empty lines.
    pub skip_empty_lines: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            severity: Severity::Debug,
            marker: None,
            marker_parents: Vec::new(),
            component: None,
            auto_flush: false,
            skip_empty_lines: false,
        }
    }
}

impl WriterConfig {
    /// Builds the configured marker, `None` if no marker is configured.
    pub fn to_marker(&self) -> Option<Marker> {
        let name = self.marker.clone()?;
        Some(Marker::with_parents(
            name,
            self.marker_parents.iter().cloned().map(Marker::new),
        ))
    }

    /// Creates a writer builder for `backend` with this configuration applied.
    pub fn builder<B>(&self, backend: B) -> Builder<B>
    where
        B: LogBackend,
    {
        Builder::new(backend, self.severity).apply_config(self)
    }
}
