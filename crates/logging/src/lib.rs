#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` is the logger core of the logwell workspace: a process-wide
//! state machine coordinating the record buffer, the sink, and the
//! init / reinit / shutdown lifecycle, together with the fork guard and the
//! failure recorder that make it safe to log from forked workers.
//!
//! # Design
//!
//! - [`LoggerCore`] walks
//!   `Uninitialized → Configured → Active → ShuttingDown → Closed` and owns
//!   the [`RecordBuffer`] plus at most one sink handle behind a single lock.
//!   Flushing happens under that lock, so the sink has exactly one writer at
//!   any instant.
//! - [`run_isolated`] wraps a forked worker's entry point: it reinitializes
//!   the core before the work runs and flushes on every exit path, capturing
//!   a propagating panic as an `Exception`-level record before resuming the
//!   unwind with the original payload.
//! - [`FailureCapture`] turns panics and unhandled errors into records
//!   without ever failing itself; a missing backtrace degrades to a note
//!   instead of suppressing the capture.
//!
//! # Invariants
//!
//! - No record is appended while the core is `Uninitialized`,
//!   `ShuttingDown`, or `Closed`; [`LoggerCore::emit`] never returns an
//!   error, it only no-ops.
//! - The `Active` state always holds an exclusively owned, freshly opened
//!   sink handle; a forked child's inherited handle is discarded by
//!   [`LoggerCore::reinitialize`] without ever being written through.
//! - A failed flush retains the undelivered records in order; flushing is
//!   retriable and idempotent on an empty buffer.
//!
//! # Errors
//!
//! Configuration and activation failures surface as [`LoggerError`]
//! synchronously. Flush failures carry the sink's partial-delivery report.
//! Uncaught failures inside the guard are recorded and then re-signalled
//! unchanged; the guard never masks the original failure.
//!
//! # Examples
//!
//! The full worker lifecycle, including a captured panic:
//!
//! ```
//! use logging::{LoggerConfig, LoggerCore, run_isolated};
//! use logging_sink::WriteMode;
//! use record::Level;
//! use std::panic::{AssertUnwindSafe, catch_unwind};
//!
//! # fn main() -> Result<(), logging::LoggerError> {
//! let path = std::env::temp_dir().join(format!("logwell-lib-doc-{}.log", std::process::id()));
//! let core = LoggerCore::new();
//! core.configure(LoggerConfig::new(&path).with_mode(WriteMode::Truncate))?;
//!
//! let outcome = catch_unwind(AssertUnwindSafe(|| {
//!     run_isolated(&core, || -> () {
//!         core.emit(Level::Out, "In subprocess");
//!         panic!("An unexpected exception in subprocess");
//!     });
//! }));
//! assert!(outcome.is_err());
//!
//! let contents = std::fs::read_to_string(&path).expect("log readable");
//! let last = contents.lines().last().expect("records were flushed");
//! assert!(last.ends_with("An unexpected exception in subprocess"));
//! # std::fs::remove_file(&path).ok();
//! # Ok(())
//! # }
//! ```

mod buffer;
mod config;
mod failure;
mod guard;
mod logger;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use buffer::RecordBuffer;
pub use config::{DEFAULT_FLUSH_THRESHOLD, DEFAULT_LOGGER_NAME, LoggerConfig};
pub use failure::{FailureCapture, FailureKind};
pub use guard::{run_isolated, run_isolated_result};
pub use logger::{LoggerCore, LoggerError, LoggerState};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{LogwellLayer, init_tracing, init_tracing_with_filter};
