#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logwell` is a fork-safe, crash-safe buffered logging core. The facade
//! re-exports the workspace's public surface: the record model from
//! [`record`], the sink writer from [`logging_sink`], and the logger core,
//! fork guard, and failure recorder from [`logging`].
//!
//! # Design
//!
//! The library is built around three guarantees:
//!
//! 1. **Fork safety**: a forked child never writes through a sink handle it
//!    shares with its parent. [`LoggerCore::reinitialize`] discards the
//!    inherited handle and opens a fresh one; [`run_isolated`] does this
//!    unconditionally before the wrapped work runs.
//! 2. **Flush on every exit path**: [`run_isolated`] flushes whether the
//!    work returns or panics, and a successful flush is fsynced, so buffered
//!    records survive the process dying immediately afterwards.
//! 3. **Failure capture**: a panic or unhandled error propagating out of
//!    the guard is recorded at [`Level::Exception`] and flushed before being
//!    re-signalled unchanged to the caller.
//!
//! # Examples
//!
//! ```
//! use logwell::{Level, LoggerConfig, LoggerCore, WriteMode, run_isolated};
//!
//! # fn main() -> Result<(), logwell::LoggerError> {
//! let path = std::env::temp_dir().join(format!("logwell-facade-doc-{}.log", std::process::id()));
//! let core = LoggerCore::new();
//! core.configure(LoggerConfig::new(&path).with_mode(WriteMode::Truncate))?;
//!
//! run_isolated(&core, || {
//!     core.emit(Level::Out, "In subprocess");
//! });
//!
//! let contents = std::fs::read_to_string(&path).expect("log readable");
//! assert!(contents.trim_end().ends_with("In subprocess"));
//! # std::fs::remove_file(&path).ok();
//! # Ok(())
//! # }
//! ```

pub use logging::{
    DEFAULT_FLUSH_THRESHOLD, DEFAULT_LOGGER_NAME, FailureCapture, FailureKind, LoggerConfig,
    LoggerCore, LoggerError, LoggerState, RecordBuffer, run_isolated, run_isolated_result,
};
#[cfg(feature = "tracing")]
pub use logging::{LogwellLayer, init_tracing, init_tracing_with_filter};
pub use logging_sink::{SinkError, SinkHandle, WriteMode};
pub use record::{Level, LogRecord, Origin, ParseLevelError, RenderScratch};
