#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging-sink` owns the output destination for the logwell workspace. The
//! crate exposes [`SinkHandle`], an exclusively owned wrapper around an open
//! log file that writes [`record::LogRecord`] batches in order, reports
//! partial delivery on failure, and supports the post-fork reopen required by
//! the logger core.
//!
//! # Design
//!
//! A handle is acquired with [`SinkHandle::open`] under a [`WriteMode`]
//! (truncate or append) and is the only way records reach the destination.
//! Batch writes reuse a [`record::RenderScratch`] instance so flushing a
//! large buffer does not allocate per record, and every successful batch ends
//! with an fsync so a flushed record survives immediate process death.
//!
//! # Invariants
//!
//! - Records are written strictly in slice order; a failed batch reports how
//!   many records were durably delivered so the caller can requeue the rest.
//! - [`SinkHandle::reopen`] never writes through the stale descriptor it
//!   replaces. After a fork the inherited handle may alias the parent's file
//!   offset at the OS level, so the child must reopen before emitting.
//! - Close errors on a replaced handle are swallowed; the handle was stale
//!   and nothing durable depends on it.
//!
//! # Errors
//!
//! All operations surface [`SinkError`]: [`SinkError::Unavailable`] when the
//! destination cannot be created or opened and [`SinkError::Write`] when an
//! I/O error interrupts a batch.
//!
//! # Examples
//!
//! Write two records and read them back line by line:
//!
//! ```
//! use logging_sink::{SinkHandle, WriteMode};
//! use record::{Level, LogRecord, Origin, RenderScratch};
//!
//! # fn main() -> Result<(), logging_sink::SinkError> {
//! let dir = std::env::temp_dir();
//! let path = dir.join(format!("logwell-sink-doc-{}.log", std::process::id()));
//! let mut sink = SinkHandle::open(&path, WriteMode::Truncate)?;
//!
//! let origin = Origin::current("root");
//! let records = [
//!     LogRecord::new(Level::Info, "starting", origin.clone()),
//!     LogRecord::new(Level::Out, "done", origin),
//! ];
//!
//! let mut scratch = RenderScratch::new();
//! assert_eq!(sink.write_records(&records, &mut scratch)?, 2);
//!
//! let contents = std::fs::read_to_string(&path).expect("sink file readable");
//! assert_eq!(contents.lines().count(), 2);
//! # std::fs::remove_file(&path).ok();
//! # Ok(())
//! # }
//! ```

mod handle;
mod write_mode;

pub use handle::{SinkError, SinkHandle};
pub use write_mode::WriteMode;
