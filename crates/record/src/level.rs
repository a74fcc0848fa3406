use std::fmt;
use std::str::FromStr;

/// Severity of a log record.
///
/// Levels are ordered from least to most severe, so threshold filtering is a
/// plain comparison: a record passes when its level is at least the
/// configured minimum. [`Level::Out`] sits between `Info` and `Warn`; it is
/// the ordinary-output level for messages that must reach the sink under
/// default filtering without signalling a problem.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Level {
    /// Diagnostic detail intended for developers.
    Debug,
    /// Informational message.
    Info,
    /// Ordinary output.
    Out,
    /// Warning condition.
    Warn,
    /// Error condition.
    Error,
    /// Uncaught failure captured on an abnormal exit path.
    Exception,
}

impl Level {
    /// Returns the lowercase name used when parsing levels from
    /// configuration input.
    ///
    /// # Examples
    ///
    /// ```
    /// use record::Level;
    ///
    /// assert_eq!(Level::Out.as_str(), "out");
    /// assert_eq!(Level::Exception.as_str(), "exception");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Out => "out",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Exception => "exception",
        }
    }

    /// Returns the uppercase label rendered into sink lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Out => "OUT",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Exception => "EXCEPTION",
        }
    }

    /// Returns every level in ascending severity order.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Debug,
            Self::Info,
            Self::Out,
            Self::Warn,
            Self::Error,
            Self::Exception,
        ]
    }

    /// Reports whether records at this level describe a failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use record::Level;
    ///
    /// assert!(Level::Exception.is_failure());
    /// assert!(!Level::Warn.is_failure());
    /// ```
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Error | Self::Exception)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`Level`] from a string fails.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseLevelError {
    _private: (),
}

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unrecognised log level")
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "out" => Ok(Self::Out),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "exception" => Ok(Self::Exception),
            _ => Err(ParseLevelError { _private: () }),
        }
    }
}
