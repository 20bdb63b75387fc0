#![expect(missing_docs, reason = "tests")]
#![cfg(feature = "log")]

use std::sync::{LazyLock, Mutex};

use pretty_assertions::assert_eq;
use serial_test::serial;
use veecle_log_writer::backend::LogCrateBackend;
use veecle_log_writer::{LogWriter, Marker, Severity};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Captured {
    level: log::Level,
    target: String,
    message: String,
    marker: Option<String>,
}

#[derive(Debug, Default)]
struct CapturingLogger {
    records: Mutex<Vec<Captured>>,
}

impl log::Log for CapturingLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.target() != "muted"
    }

    fn log(&self, record: &log::Record<'_>) {
        let marker = record
            .key_values()
            .get(log::kv::Key::from_str("marker"))
            .map(|value| value.to_string());
        self.records.lock().unwrap().push(Captured {
            level: record.level(),
            target: record.target().to_owned(),
            message: record.args().to_string(),
            marker,
        });
    }

    fn flush(&self) {}
}

/// Installs the capturing logger once and returns it with its buffer cleared.
fn logger() -> &'static CapturingLogger {
    static LOGGER: LazyLock<&'static CapturingLogger> = LazyLock::new(|| {
        let logger: &'static CapturingLogger = Box::leak(Box::default());
        log::set_logger(logger).expect("logger was not set yet");
        log::set_max_level(log::LevelFilter::Debug);
        logger
    });

    LOGGER.records.lock().unwrap().clear();
    *LOGGER
}

#[test]
#[serial]
fn lines_become_log_records() {
    let logger = logger();
    let mut writer = LogWriter::builder(LogCrateBackend::DEFAULT, Severity::Warn)
        .marker(Marker::new("SQL"))
        .component("jdbc::driver")
        .build();

    writer.println("select 1");
    writer.print("partial");
    writer.close();

    assert_eq!(
        *logger.records.lock().unwrap(),
        [
            Captured {
                level: log::Level::Warn,
                target: "jdbc::driver".to_owned(),
                message: "select 1".to_owned(),
                marker: Some("SQL".to_owned()),
            },
            Captured {
                level: log::Level::Warn,
                target: "jdbc::driver".to_owned(),
                message: "partial".to_owned(),
                marker: Some("SQL".to_owned()),
            },
        ]
    );
}

#[test]
#[serial]
fn fatal_maps_to_error_without_marker() {
    let logger = logger();
    let mut writer = LogWriter::new(LogCrateBackend::DEFAULT, Severity::Fatal);

    writer.println("out of memory");

    assert_eq!(
        *logger.records.lock().unwrap(),
        [Captured {
            level: log::Level::Error,
            target: LogWriter::<LogCrateBackend>::DEFAULT_COMPONENT.to_owned(),
            message: "out of memory".to_owned(),
            marker: None,
        }]
    );
}

#[test]
#[serial]
fn respects_max_level_and_logger_filter() {
    let logger = logger();

    let mut trace = LogWriter::new(LogCrateBackend::DEFAULT, Severity::Trace);
    trace.println("below max level");

    let mut muted = LogWriter::builder(LogCrateBackend::DEFAULT, Severity::Error)
        .component("muted")
        .build();
    muted.println("filtered by logger");

    assert!(logger.records.lock().unwrap().is_empty());
}
