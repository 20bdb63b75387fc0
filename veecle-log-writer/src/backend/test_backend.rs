use std::sync::{Arc, Mutex};

use super::{LogBackend, Metadata, Record};
use crate::{Marker, Severity};

/// An owned copy of a [`Record`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedRecord {
    /// See [`Metadata::severity`].
    pub severity: Severity,

    /// See [`Metadata::marker`].
    pub marker: Option<Marker>,

    /// See [`Metadata::component`].
    pub component: String,

    /// See [`Record::line`].
    pub line: String,
}

impl From<&Record<'_>> for OwnedRecord {
    fn from(record: &Record<'_>) -> Self {
        Self {
            severity: record.metadata.severity,
            marker: record.metadata.marker.cloned(),
            component: record.metadata.component.to_owned(),
            line: record.line.to_owned(),
        }
    }
}

/// A backend for testing that stores all records in memory.
///
/// This backend is useful for unit tests and integration tests where you need
/// to verify which lines a writer produced.
#[derive(Debug)]
pub struct TestBackend {
    /// Shared vector storing all logged records.
    pub records: Arc<Mutex<Vec<OwnedRecord>>>,

    /// Records below this severity are reported as disabled.
    pub threshold: Severity,
}

impl TestBackend {
    /// Creates a new test backend and returns both the backend and a handle to the record storage.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use veecle_log_writer::backend::TestBackend;
    ///
    /// let (backend, records) = TestBackend::new();
    /// // Use backend for a writer
    /// // Check records for verification
    /// ```
    pub fn new() -> (Self, Arc<Mutex<Vec<OwnedRecord>>>) {
        Self::with_threshold(Severity::Trace)
    }

    /// Like [`TestBackend::new`], but only enabled for records at or above `threshold`.
    pub fn with_threshold(threshold: Severity) -> (Self, Arc<Mutex<Vec<OwnedRecord>>>) {
        let records = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                records: records.clone(),
                threshold,
            },
            records,
        )
    }
}

impl LogBackend for TestBackend {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.severity >= self.threshold
    }

    fn log(&self, record: &Record<'_>) {
        self.records.lock().unwrap().push(record.into());
    }
}
