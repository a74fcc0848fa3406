use std::fs::{File, OpenOptions};
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use record::{LogRecord, RenderScratch};

use crate::write_mode::WriteMode;

/// Error type for sink operations.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The destination could not be created or opened.
    #[error("cannot open log destination {}: {source}", .path.display())]
    Unavailable {
        /// Destination that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An I/O error interrupted a batch write.
    #[error("log write failed after {written} record(s): {source}")]
    Write {
        /// Number of records durably delivered before the failure.
        written: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Exclusively owned handle to an open log destination.
///
/// The handle is the single writer for its destination: the logger core keeps
/// exactly one alive and serialises all access through its own lock, which is
/// what keeps record lines from interleaving. A handle inherited across a
/// fork is stale by definition and must be replaced via
/// [`reopen`](Self::reopen) before the child emits anything.
#[derive(Debug)]
pub struct SinkHandle {
    file: File,
    path: PathBuf,
    mode: WriteMode,
}

impl SinkHandle {
    /// Opens `path` for logging under the given [`WriteMode`].
    ///
    /// The file is created when missing. Fails with
    /// [`SinkError::Unavailable`] when the destination cannot be created or
    /// opened (missing parent directory, permissions).
    pub fn open(path: impl AsRef<Path>, mode: WriteMode) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        let mut options = OpenOptions::new();
        options.create(true).write(true);
        if mode.truncates() {
            options.truncate(true);
        } else {
            options.append(true);
        }
        let file = options.open(&path).map_err(|source| SinkError::Unavailable {
            path: path.clone(),
            source,
        })?;
        Ok(Self { file, path, mode })
    }

    /// Returns the destination path this handle writes to.
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.path
    }

    /// Returns the [`WriteMode`] the handle was opened with.
    #[must_use]
    pub const fn mode(&self) -> WriteMode {
        self.mode
    }

    /// Writes `records` in order, one rendered line per record, then fsyncs.
    ///
    /// Returns the number of records written, which equals `records.len()` on
    /// success. On failure the [`SinkError::Write`] carries how many records
    /// were durably delivered so the caller can requeue the remainder; a
    /// failed fsync reports the full count because the records reached the
    /// OS but their durability is unknown.
    pub fn write_records(
        &mut self,
        records: &[LogRecord],
        scratch: &mut RenderScratch,
    ) -> Result<usize, SinkError> {
        for (written, record) in records.iter().enumerate() {
            let line = scratch.render_line(record);
            self.file
                .write_all(line.as_bytes())
                .map_err(|source| SinkError::Write { written, source })?;
        }
        self.file.sync_data().map_err(|source| SinkError::Write {
            written: records.len(),
            source,
        })?;
        Ok(records.len())
    }

    /// Replaces this handle with a freshly opened one.
    ///
    /// This is the post-fork path: the inherited descriptor may share
    /// file-offset state with the parent, so the replacement acquires a
    /// brand-new descriptor for `path` and the stale handle is closed without
    /// ever being written through. Close errors on the stale descriptor are
    /// swallowed. The stale handle is consumed even when opening the
    /// replacement fails; it must not be reused either way.
    pub fn reopen(self, path: impl AsRef<Path>, mode: WriteMode) -> Result<Self, SinkError> {
        let fresh = Self::open(path, mode)?;
        drop(self);
        Ok(fresh)
    }

    /// Syncs all outstanding data and closes the handle.
    pub fn close(self) -> io::Result<()> {
        self.file.sync_all()
    }
}
