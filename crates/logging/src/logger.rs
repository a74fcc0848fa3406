use std::fmt;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use logging_sink::{SinkError, SinkHandle};
use record::{Level, LogRecord, Origin, RenderScratch};

use crate::buffer::RecordBuffer;
use crate::config::LoggerConfig;

/// Lifecycle state of a [`LoggerCore`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LoggerState {
    /// No configuration has been installed yet.
    #[default]
    Uninitialized,
    /// A configuration is installed but no sink is open.
    Configured,
    /// The sink is open and records are accepted.
    Active,
    /// A shutdown is in progress; records are rejected.
    ShuttingDown,
    /// The logger has been shut down.
    Closed,
}

impl LoggerState {
    /// Returns the lowercase name of the state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Configured => "configured",
            Self::Active => "active",
            Self::ShuttingDown => "shutting-down",
            Self::Closed => "closed",
        }
    }

    /// Reports whether records may currently be appended.
    #[must_use]
    pub const fn accepts_records(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for LoggerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for logger core operations.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// `configure()` was called while the logger is active.
    #[error("logger is already active; use reconfigure() to replace the configuration")]
    AlreadyActive,

    /// An operation that needs a configuration found none.
    #[error("logger has no configuration; call configure() first")]
    NotConfigured,

    /// The sink reported a failure.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

#[derive(Debug, Default)]
struct Inner {
    state: LoggerState,
    config: Option<LoggerConfig>,
    sink: Option<SinkHandle>,
    buffer: RecordBuffer,
    scratch: RenderScratch,
}

/// Process-wide logger core coordinating buffer, sink, and lifecycle.
///
/// The core is a state machine
/// (`Uninitialized → Configured → Active → ShuttingDown → Closed`) guarding
/// one [`RecordBuffer`] and at most one open [`SinkHandle`] behind a single
/// lock. Holding the lock across [`flush`](Self::flush) gives the sink a
/// single writer at any instant: concurrent `emit` calls, emit-triggered
/// auto-flushes, and explicit flushes cannot interleave their writes.
///
/// A forked child inherits the parent's core as a memory copy whose sink
/// handle may alias the parent's descriptor at the OS level. The child must
/// call [`reinitialize`](Self::reinitialize) before emitting anything; the
/// [`run_isolated`](crate::run_isolated) guard does so unconditionally.
///
/// # Examples
///
/// ```
/// use logging::{LoggerConfig, LoggerCore};
/// use logging_sink::WriteMode;
/// use record::Level;
///
/// # fn main() -> Result<(), logging::LoggerError> {
/// let path = std::env::temp_dir().join(format!("logwell-core-doc-{}.log", std::process::id()));
/// let core = LoggerCore::new();
/// core.configure(LoggerConfig::new(&path).with_mode(WriteMode::Truncate))?;
/// core.activate()?;
///
/// core.emit(Level::Out, "In subprocess");
/// assert_eq!(core.flush()?, 1);
///
/// core.shutdown()?;
/// # std::fs::remove_file(&path).ok();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct LoggerCore {
    inner: Mutex<Inner>,
}

static GLOBAL: OnceLock<LoggerCore> = OnceLock::new();

impl LoggerCore {
    /// Creates an uninitialized core.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide logger core.
    ///
    /// The instance is created on first use and lives for the remainder of
    /// the process. Owned instances from [`new`](Self::new) behave
    /// identically and are what tests use.
    #[must_use]
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::new)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panicking emitter must not disable logging: the fork guard's
        // whole job is to flush after a panic, so poisoned state is
        // recovered rather than propagated.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> LoggerState {
        self.lock().state
    }

    /// Returns the number of buffered, unflushed records.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.lock().buffer.len()
    }

    /// Installs `config`, transitioning to `Configured`.
    ///
    /// Allowed from `Uninitialized`, `Configured`, and `Closed`. Fails with
    /// [`LoggerError::AlreadyActive`] while the logger is active or shutting
    /// down; use [`reconfigure`](Self::reconfigure) to replace the
    /// configuration of a live logger.
    pub fn configure(&self, config: LoggerConfig) -> Result<(), LoggerError> {
        let mut inner = self.lock();
        match inner.state {
            LoggerState::Uninitialized | LoggerState::Configured | LoggerState::Closed => {
                inner.config = Some(config);
                inner.state = LoggerState::Configured;
                Ok(())
            }
            LoggerState::Active | LoggerState::ShuttingDown => Err(LoggerError::AlreadyActive),
        }
    }

    /// Replaces the configuration of a possibly-active logger.
    ///
    /// This is the explicit reconfiguration path that
    /// [`configure`](Self::configure) refuses. A live sink is flushed
    /// best-effort and closed; records that could not be delivered stay
    /// buffered and follow the logger to the new destination. Leaves the
    /// logger `Configured`; call [`activate`](Self::activate) to resume
    /// emission.
    pub fn reconfigure(&self, config: LoggerConfig) -> Result<(), LoggerError> {
        let mut inner = self.lock();
        if inner.state == LoggerState::ShuttingDown {
            return Err(LoggerError::AlreadyActive);
        }
        let _ = Self::flush_inner(&mut inner);
        if let Some(sink) = inner.sink.take() {
            let _ = sink.close();
        }
        inner.config = Some(config);
        inner.state = LoggerState::Configured;
        Ok(())
    }

    /// Opens the sink and transitions `Configured → Active`.
    ///
    /// Fails with [`SinkError::Unavailable`] when the destination cannot be
    /// opened, with [`LoggerError::AlreadyActive`] when already active, and
    /// with [`LoggerError::NotConfigured`] from any other state.
    pub fn activate(&self) -> Result<(), LoggerError> {
        let mut inner = self.lock();
        match inner.state {
            LoggerState::Configured => {}
            LoggerState::Active => return Err(LoggerError::AlreadyActive),
            _ => return Err(LoggerError::NotConfigured),
        }
        let config = inner.config.as_ref().ok_or(LoggerError::NotConfigured)?;
        let sink = SinkHandle::open(config.destination(), config.mode())?;
        inner.sink = Some(sink);
        inner.state = LoggerState::Active;
        Ok(())
    }

    /// Appends a record to the buffer.
    ///
    /// A no-op unless the logger is `Active` and `level` is at least the
    /// configured minimum. The record's timestamp, process id, and logger
    /// name are captured here, so records emitted after a fork carry the
    /// child's pid. Crossing the flush threshold triggers an automatic
    /// flush whose failure is swallowed; the records stay buffered and the
    /// error resurfaces on the next explicit [`flush`](Self::flush).
    pub fn emit(&self, level: Level, message: impl Into<String>) {
        let mut inner = self.lock();
        if !inner.state.accepts_records() {
            return;
        }
        let Some(config) = inner.config.as_ref() else {
            return;
        };
        if level < config.min_level() {
            return;
        }
        let record = LogRecord::new(level, message, Origin::current(config.name()));
        let threshold = config.flush_threshold();
        inner.buffer.append(record);
        if threshold == 0 || inner.buffer.len() >= threshold {
            let _ = Self::flush_inner(&mut inner);
        }
    }

    /// Drains the buffer and writes every record through the sink.
    ///
    /// Blocks the calling thread until the write completes or fails and
    /// returns the number of records written. Idempotent on an empty buffer
    /// (no write, no fsync). On [`SinkError::Write`] the undelivered tail is
    /// requeued at the buffer head and the error is returned; flushing is
    /// retriable. Outside the `Active` state there is no sink to write
    /// through: records stay buffered and the call reports zero.
    pub fn flush(&self) -> Result<usize, LoggerError> {
        let mut inner = self.lock();
        Self::flush_inner(&mut inner)
    }

    fn flush_inner(inner: &mut Inner) -> Result<usize, LoggerError> {
        if inner.buffer.is_empty() {
            return Ok(0);
        }
        let Inner {
            sink,
            buffer,
            scratch,
            ..
        } = inner;
        let Some(sink) = sink.as_mut() else {
            return Ok(0);
        };
        let mut records = buffer.drain();
        match sink.write_records(&records, scratch) {
            Ok(written) => Ok(written),
            Err(SinkError::Write { written, source }) => {
                let undelivered = records.split_off(written);
                buffer.requeue_front(undelivered);
                Err(SinkError::Write { written, source }.into())
            }
            Err(err) => {
                buffer.requeue_front(records);
                Err(err.into())
            }
        }
    }

    /// Discards the (possibly stale) sink handle and activates again.
    ///
    /// This is the operation a forked child must call before emitting
    /// anything: the inherited handle may alias the parent's descriptor, so
    /// it is dropped without ever being written through, and a fresh one is
    /// opened from the installed configuration. Buffered records are
    /// preserved: records the parent had emitted but not flushed appear
    /// exactly once in the child's output. Idempotent; fails with
    /// [`LoggerError::NotConfigured`] when no configuration was ever
    /// installed, and with [`SinkError::Unavailable`] when the fresh open
    /// fails (the logger is then left `Configured`).
    pub fn reinitialize(&self) -> Result<(), LoggerError> {
        let mut inner = self.lock();
        if inner.config.is_none() {
            return Err(LoggerError::NotConfigured);
        }
        inner.sink = None;
        inner.state = LoggerState::Configured;
        let config = inner.config.as_ref().ok_or(LoggerError::NotConfigured)?;
        let sink = SinkHandle::open(config.destination(), config.mode())?;
        inner.sink = Some(sink);
        inner.state = LoggerState::Active;
        Ok(())
    }

    /// Flushes, closes the sink, and transitions to `Closed`.
    ///
    /// Idempotent: repeated calls after the first are no-ops. The sink is
    /// closed and the state reaches `Closed` even when the final flush
    /// fails; the flush error is still returned so the caller observes the
    /// loss.
    pub fn shutdown(&self) -> Result<(), LoggerError> {
        let mut inner = self.lock();
        if inner.state == LoggerState::Closed {
            return Ok(());
        }
        inner.state = LoggerState::ShuttingDown;
        let result = Self::flush_inner(&mut inner);
        if let Some(sink) = inner.sink.take() {
            // Best-effort: the flush above already synced everything that
            // was written.
            let _ = sink.close();
        }
        inner.state = LoggerState::Closed;
        result.map(|_| ())
    }
}
