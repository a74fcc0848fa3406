#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `record` defines the data model shared by every crate in the logwell
//! workspace: the [`Level`] severity scale, the [`Origin`] of a record, and
//! the immutable [`LogRecord`] itself. The crate also owns line rendering so
//! the sink layer and tests agree on exactly one serialized form.
//!
//! # Design
//!
//! Records are rendered as single lines of the shape
//!
//! ```text
//! <timestamp> <LEVEL> <pid> <logger>: <message>
//! ```
//!
//! with RFC 3339 UTC timestamps at microsecond precision. Rendering goes
//! through a reusable [`RenderScratch`] buffer so batch flushes avoid
//! allocating a fresh string per record.
//!
//! # Invariants
//!
//! - A [`LogRecord`] is immutable once constructed; there are no setters.
//! - Rendering always produces exactly one line: interior newlines in the
//!   message are escaped as `\n` so line-based consumers never see a record
//!   split across lines.
//! - [`Level`] ordering is ascending severity, and `min_level` comparisons in
//!   higher layers rely on the derived `Ord`.
//!
//! # Examples
//!
//! ```
//! use record::{Level, LogRecord, Origin, RenderScratch};
//!
//! let origin = Origin::new(4242, "root");
//! let record = LogRecord::new(Level::Out, "In subprocess", origin);
//!
//! let mut scratch = RenderScratch::new();
//! let line = scratch.render_line(&record);
//! assert!(line.ends_with("In subprocess\n"));
//! assert!(line.contains(" OUT 4242 root: "));
//! ```

mod level;
mod log_record;

pub use level::{Level, ParseLevelError};
pub use log_record::{LogRecord, Origin, RenderScratch};
