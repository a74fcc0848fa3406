use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::level::Level;

/// Identifies the process and logger that produced a record.
///
/// The process id is captured eagerly so records emitted after a fork carry
/// the child's pid rather than the inherited parent state.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Origin {
    process_id: u32,
    logger_name: String,
}

impl Origin {
    /// Creates an origin from an explicit process id and logger name.
    #[must_use]
    pub fn new(process_id: u32, logger_name: impl Into<String>) -> Self {
        Self {
            process_id,
            logger_name: logger_name.into(),
        }
    }

    /// Creates an origin for the current process.
    #[must_use]
    pub fn current(logger_name: impl Into<String>) -> Self {
        Self::new(std::process::id(), logger_name)
    }

    /// Returns the id of the process that emitted the record.
    #[must_use]
    pub const fn process_id(&self) -> u32 {
        self.process_id
    }

    /// Returns the name of the logger that emitted the record.
    #[must_use]
    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }
}

/// A single structured log record.
///
/// Records are immutable once created: the constructor captures the
/// timestamp, and all fields are only reachable through accessors. The
/// rendered form is exactly one line,
/// `<timestamp> <LEVEL> <pid> <logger>: <message>`, with interior newlines in
/// the message escaped as `\n`.
///
/// # Examples
///
/// ```
/// use record::{Level, LogRecord, Origin};
///
/// let record = LogRecord::new(Level::Warn, "low disk space", Origin::new(7, "root"));
/// assert_eq!(record.level(), Level::Warn);
/// assert!(record.to_string().ends_with("low disk space"));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogRecord {
    timestamp: DateTime<Utc>,
    level: Level,
    message: String,
    origin: Origin,
}

impl LogRecord {
    /// Creates a record stamped with the current UTC time.
    #[must_use]
    pub fn new(level: Level, message: impl Into<String>, origin: Origin) -> Self {
        Self::with_timestamp(Utc::now(), level, message, origin)
    }

    /// Creates a record with an explicit timestamp.
    ///
    /// Intended for tests and replay tooling that need deterministic output;
    /// production emission paths use [`new`](Self::new).
    #[must_use]
    pub fn with_timestamp(
        timestamp: DateTime<Utc>,
        level: Level,
        message: impl Into<String>,
        origin: Origin,
    ) -> Self {
        Self {
            timestamp,
            level,
            message: message.into(),
            origin,
        }
    }

    /// Returns the UTC timestamp captured at construction.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the record's severity level.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the record's origin.
    #[must_use]
    pub const fn origin(&self) -> &Origin {
        &self.origin
    }

    fn fmt_line<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        write!(
            out,
            "{} {} {} {}: ",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
            self.level.label(),
            self.origin.process_id,
            self.origin.logger_name,
        )?;
        for ch in self.message.chars() {
            if ch == '\n' {
                out.write_str("\\n")?;
            } else {
                out.write_char(ch)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_line(f)
    }
}

/// Reusable rendering buffer for batch flushes.
///
/// A scratch instance keeps one heap allocation alive across records so
/// writing a large batch does not allocate per line. The buffer is cleared on
/// every call; the returned slice borrows the scratch and is valid until the
/// next render.
#[derive(Clone, Debug, Default)]
pub struct RenderScratch {
    buf: String,
}

impl RenderScratch {
    /// Creates an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `record` as a single newline-terminated line.
    pub fn render_line(&mut self, record: &LogRecord) -> &str {
        self.buf.clear();
        // Writing into a String cannot fail.
        let _ = record.fmt_line(&mut self.buf);
        self.buf.push('\n');
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).single().expect("valid timestamp")
    }

    fn sample(level: Level, message: &str) -> LogRecord {
        LogRecord::with_timestamp(fixed_timestamp(), level, message, Origin::new(99, "root"))
    }

    #[test]
    fn renders_one_line_with_all_fields() {
        let mut scratch = RenderScratch::new();
        let line = scratch.render_line(&sample(Level::Out, "In subprocess"));
        assert_eq!(line, "2025-03-14T09:26:53.000000Z OUT 99 root: In subprocess\n");
    }

    #[test]
    fn interior_newlines_are_escaped() {
        let mut scratch = RenderScratch::new();
        let line = scratch.render_line(&sample(Level::Error, "first\nsecond"));
        assert_eq!(line.matches('\n').count(), 1);
        assert!(line.ends_with("first\\nsecond\n"));
    }

    #[test]
    fn display_matches_rendered_line_without_newline() {
        let record = sample(Level::Warn, "careful");
        let mut scratch = RenderScratch::new();
        let line = scratch.render_line(&record).to_owned();
        assert_eq!(format!("{record}\n"), line);
    }

    #[test]
    fn scratch_is_reusable_across_records() {
        let mut scratch = RenderScratch::new();
        let first = scratch.render_line(&sample(Level::Info, "one")).to_owned();
        let second = scratch.render_line(&sample(Level::Info, "two")).to_owned();
        assert!(first.ends_with("one\n"));
        assert!(second.ends_with("two\n"));
    }

    #[test]
    fn origin_current_uses_this_process() {
        let origin = Origin::current("worker");
        assert_eq!(origin.process_id(), std::process::id());
        assert_eq!(origin.logger_name(), "worker");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn record_serde_roundtrip() {
        let record = sample(Level::Exception, "boom");
        let json = serde_json::to_string(&record).expect("serialize");
        let decoded: LogRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, record);
    }
}
