//! Logger configuration consumed by [`LoggerCore::configure`](crate::LoggerCore::configure).

use std::path::{Path, PathBuf};

use logging_sink::WriteMode;
use record::Level;

/// Number of buffered records that triggers an automatic flush when the
/// configuration does not override it.
pub const DEFAULT_FLUSH_THRESHOLD: usize = 64;

/// Logger name used when the configuration does not override it.
pub const DEFAULT_LOGGER_NAME: &str = "root";

/// Configuration for a logger core.
///
/// Built with [`new`](Self::new) plus builder-style setters; only the
/// destination has no default. A `flush_threshold` of `0` flushes after
/// every record.
///
/// # Examples
///
/// ```
/// use logging::LoggerConfig;
/// use logging_sink::WriteMode;
/// use record::Level;
///
/// let config = LoggerConfig::new("/tmp/worker.log")
///     .with_mode(WriteMode::Truncate)
///     .with_min_level(Level::Debug)
///     .with_name("worker");
///
/// assert_eq!(config.min_level(), Level::Debug);
/// assert_eq!(config.name(), "worker");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoggerConfig {
    destination: PathBuf,
    mode: WriteMode,
    min_level: Level,
    flush_threshold: usize,
    name: String,
}

impl LoggerConfig {
    /// Creates a configuration for `destination` with default mode
    /// (append), minimum level (`Info`), flush threshold, and logger name.
    #[must_use]
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            mode: WriteMode::default(),
            min_level: Level::Info,
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
            name: DEFAULT_LOGGER_NAME.to_owned(),
        }
    }

    /// Sets the [`WriteMode`] used when the sink is opened.
    #[must_use]
    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the minimum [`Level`] a record needs to be accepted.
    #[must_use]
    pub fn with_min_level(mut self, min_level: Level) -> Self {
        self.min_level = min_level;
        self
    }

    /// Sets the buffered-record count that triggers an automatic flush.
    ///
    /// `0` flushes after every record.
    #[must_use]
    pub fn with_flush_threshold(mut self, flush_threshold: usize) -> Self {
        self.flush_threshold = flush_threshold;
        self
    }

    /// Sets the logger name stamped into every record's origin.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns the destination path.
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Returns the configured [`WriteMode`].
    #[must_use]
    pub const fn mode(&self) -> WriteMode {
        self.mode
    }

    /// Returns the minimum accepted [`Level`].
    #[must_use]
    pub const fn min_level(&self) -> Level {
        self.min_level
    }

    /// Returns the automatic flush threshold.
    #[must_use]
    pub const fn flush_threshold(&self) -> usize {
        self.flush_threshold
    }

    /// Returns the logger name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
