//! Severity levels attached to every line a [`LogWriter`](crate::LogWriter) emits.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde_with::{DeserializeFromStr, SerializeDisplay};

/// Log line severity levels.
///
/// These levels follow standard logging conventions, ordered from most verbose
/// to most critical.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub enum Severity {
    /// The "trace" level.
    ///
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// The "debug" level.
    ///
    /// Designates lower priority information.
    Debug,

    /// The "info" level.
    ///
    /// Designates useful information.
    Info,

    /// The "warn" level.
    ///
    /// Designates hazardous situations.
    Warn,

    /// The "error" level.
    ///
    /// Designates very serious errors.
    Error,

    /// The "fatal" level.
    ///
    /// Designates critical failures that might crash the program.
    Fatal,
}

impl Severity {
    /// All severities, from most verbose to most critical.
    pub const ALL: [Severity; 6] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Returns the upper-case name of this severity.
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // `pad` so that width and alignment flags apply.
        f.pad(self.as_str())
    }
}

/// Error returned when parsing a [`Severity`] from an unknown name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown severity level `{0}`")]
pub struct ParseSeverityError(String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    /// Parses a severity name, ignoring ASCII case. `warning` is accepted for [`Severity::Warn`].
    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let name = string.trim();
        Severity::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(name))
            .or_else(|| name.eq_ignore_ascii_case("warning").then_some(Severity::Warn))
            .ok_or_else(|| ParseSeverityError(string.to_owned()))
    }
}

impl From<Severity> for tracing::Level {
    /// `tracing` has no fatal level, [`Severity::Fatal`] maps to [`tracing::Level::ERROR`].
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Trace => tracing::Level::TRACE,
            Severity::Debug => tracing::Level::DEBUG,
            Severity::Info => tracing::Level::INFO,
            Severity::Warn => tracing::Level::WARN,
            Severity::Error | Severity::Fatal => tracing::Level::ERROR,
        }
    }
}

#[cfg(feature = "log")]
impl From<Severity> for log::Level {
    /// `log` has no fatal level, [`Severity::Fatal`] maps to [`log::Level::Error`].
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Trace => log::Level::Trace,
            Severity::Debug => log::Level::Debug,
            Severity::Info => log::Level::Info,
            Severity::Warn => log::Level::Warn,
            Severity::Error | Severity::Fatal => log::Level::Error,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::{ParseSeverityError, Severity};

    #[test]
    fn ordering_follows_importance() {
        let mut shuffled = [
            Severity::Fatal,
            Severity::Debug,
            Severity::Warn,
            Severity::Trace,
            Severity::Error,
            Severity::Info,
        ];
        shuffled.sort();
        assert_eq!(shuffled, Severity::ALL);
    }

    #[test_case("trace", Severity::Trace)]
    #[test_case("DEBUG", Severity::Debug)]
    #[test_case("Info", Severity::Info)]
    #[test_case("warn", Severity::Warn)]
    #[test_case("WARNING", Severity::Warn)]
    #[test_case(" error ", Severity::Error)]
    #[test_case("fatal", Severity::Fatal)]
    fn parse(name: &str, expected: Severity) {
        assert_eq!(Severity::from_str(name), Ok(expected));
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            Severity::from_str("verbose"),
            Err(ParseSeverityError("verbose".to_owned()))
        );
        assert_eq!(
            Severity::from_str("").unwrap_err().to_string(),
            "unknown severity level ``"
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for severity in Severity::ALL {
            assert_eq!(severity.to_string().parse::<Severity>(), Ok(severity));
        }
        assert_eq!(format!("[{:>5}]", Severity::Info), "[ INFO]");
    }

    #[test]
    fn serde_uses_display_names() {
        assert_eq!(
            serde_json::to_string(&Severity::Warn).unwrap(),
            r#""WARN""#
        );
        assert_eq!(
            serde_json::from_str::<Severity>(r#""debug""#).unwrap(),
            Severity::Debug
        );
        assert!(serde_json::from_str::<Severity>(r#""loud""#).is_err());
    }

    #[test]
    fn level_conversions() {
        assert_eq!(tracing::Level::from(Severity::Fatal), tracing::Level::ERROR);
        assert_eq!(tracing::Level::from(Severity::Trace), tracing::Level::TRACE);

        #[cfg(feature = "log")]
        {
            assert_eq!(log::Level::from(Severity::Fatal), log::Level::Error);
            assert_eq!(log::Level::from(Severity::Info), log::Level::Info);
        }
    }
}
