//! Capture of uncaught failures into log records.

use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;

use record::Level;

use crate::logger::LoggerCore;

/// Classifies how a unit of work failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FailureKind {
    /// The work panicked.
    Panic,
    /// The work returned an error that nothing handled.
    Error,
}

impl FailureKind {
    /// Returns the phrase used as the summary record's prefix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Panic => "uncaught panic",
            Self::Error => "uncaught error",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
enum BacktraceCapture {
    Captured(String),
    Unavailable(&'static str),
}

/// Transient capture of an in-flight failure.
///
/// A capture owns no resources and is consumed immediately by
/// [`record_to`](Self::record_to). Construction never fails: a panic payload
/// that is neither `&str` nor `String` degrades to a placeholder message,
/// and an unavailable backtrace degrades to a note rather than suppressing
/// the capture.
#[derive(Debug)]
pub struct FailureCapture {
    kind: FailureKind,
    message: String,
    backtrace: BacktraceCapture,
}

impl FailureCapture {
    /// Captures a panic payload as handed out by `std::panic::catch_unwind`.
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = payload.downcast_ref::<&str>().map_or_else(
            || {
                payload
                    .downcast_ref::<String>()
                    .cloned()
                    .unwrap_or_else(|| "opaque panic payload".to_owned())
            },
            |text| (*text).to_owned(),
        );
        Self {
            kind: FailureKind::Panic,
            message,
            backtrace: capture_backtrace(),
        }
    }

    /// Captures an error value by its display form.
    #[must_use]
    pub fn from_error<E: fmt::Display + ?Sized>(error: &E) -> Self {
        Self {
            kind: FailureKind::Error,
            message: error.to_string(),
            backtrace: capture_backtrace(),
        }
    }

    /// Returns the failure classification.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Returns the failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the flattened backtrace, when one could be captured.
    #[must_use]
    pub fn backtrace(&self) -> Option<&str> {
        match &self.backtrace {
            BacktraceCapture::Captured(frames) => Some(frames),
            BacktraceCapture::Unavailable(_) => None,
        }
    }

    /// Records the capture through `core` and consumes it.
    ///
    /// The backtrace (or, when extraction was unavailable, a lower-severity
    /// note saying so) is emitted first, then the `Exception`-level summary
    /// record, so the summary's line is the last one a tail reader sees and
    /// it ends with the original failure message. Never fails; emission
    /// follows the core's usual no-op rules outside the `Active` state.
    pub fn record_to(self, core: &LoggerCore) {
        match &self.backtrace {
            BacktraceCapture::Captured(frames) => {
                core.emit(Level::Exception, format!("backtrace: {frames}"));
            }
            BacktraceCapture::Unavailable(reason) => {
                core.emit(Level::Warn, format!("failure backtrace unavailable: {reason}"));
            }
        }
        core.emit(Level::Exception, format!("{}: {}", self.kind, self.message));
    }
}

fn capture_backtrace() -> BacktraceCapture {
    // The trace reflects the capture point: for panics that is the handling
    // context, not the unwound frames, which std has already torn down.
    let backtrace = Backtrace::capture();
    if matches!(backtrace.status(), BacktraceStatus::Captured) {
        let flattened = backtrace
            .to_string()
            .lines()
            .map(str::trim)
            .collect::<Vec<_>>()
            .join(" | ");
        BacktraceCapture::Captured(flattened)
    } else {
        BacktraceCapture::Unavailable("backtrace capture is disabled; set RUST_BACKTRACE=1")
    }
}
