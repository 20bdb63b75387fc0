//! `log` facade adapter.

use super::{LogBackend, Metadata, Record};

/// Backend that forwards every line to the installed [`log::Log`] implementation.
///
/// The writer's component becomes the record target and its marker, if any, is attached as the
/// `marker` key-value.
/// [`Severity::Fatal`](crate::Severity::Fatal) is logged at [`log::Level::Error`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LogCrateBackend(());

impl LogCrateBackend {
    /// A `const` version of `LogCrateBackend::default()` to allow use as a `&'static`.
    pub const DEFAULT: Self = LogCrateBackend(());
}

impl LogBackend for LogCrateBackend {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        let level = log::Level::from(metadata.severity);
        level <= log::max_level()
            && log::logger().enabled(
                &log::Metadata::builder()
                    .level(level)
                    .target(metadata.component)
                    .build(),
            )
    }

    fn log(&self, record: &Record<'_>) {
        let Record { metadata, line } = *record;
        let mut builder = log::Record::builder();
        builder
            .level(metadata.severity.into())
            .target(metadata.component);

        match metadata.marker {
            Some(marker) => {
                let key_values = ("marker", marker.name());
                log::logger().log(
                    &builder
                        .args(format_args!("{line}"))
                        .key_values(&key_values)
                        .build(),
                );
            }
            None => log::logger().log(&builder.args(format_args!("{line}")).build()),
        }
    }
}
