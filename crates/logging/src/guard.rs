//! Scoped execution guard for forked workers.

use std::fmt;
use std::panic::{UnwindSafe, catch_unwind, resume_unwind};

use crate::failure::FailureCapture;
use crate::logger::LoggerCore;

/// Runs `work` as the entry point of a freshly forked worker.
///
/// The guard provides the three guarantees a forked child needs from the
/// logging system:
///
/// 1. [`LoggerCore::reinitialize`] is called unconditionally before `work`
///    runs, so the child never writes through a sink handle it shares with
///    its parent.
/// 2. [`LoggerCore::flush`] runs on every exit path, normal or panicking, so
///    buffered records are not lost when the process dies right after.
/// 3. A panic propagating out of `work` is captured as an `Exception`-level
///    record and flushed *before* the unwind resumes with the original
///    payload; the failure is durably recorded, then re-raised unchanged.
///
/// A failed reinitialization leaves the core inactive: `work` still runs and
/// the exit-path flush still happens, but emission is a no-op for the run.
/// Flush errors on the exit paths are swallowed; undelivered records stay
/// buffered for [`LoggerCore::shutdown`].
///
/// # Examples
///
/// ```
/// use logging::{LoggerConfig, LoggerCore, run_isolated};
/// use logging_sink::WriteMode;
/// use record::Level;
///
/// # fn main() -> Result<(), logging::LoggerError> {
/// let path = std::env::temp_dir().join(format!("logwell-guard-doc-{}.log", std::process::id()));
/// let core = LoggerCore::new();
/// core.configure(LoggerConfig::new(&path).with_mode(WriteMode::Truncate))?;
///
/// let answer = run_isolated(&core, || {
///     core.emit(Level::Out, "In subprocess");
///     42
/// });
/// assert_eq!(answer, 42);
///
/// let contents = std::fs::read_to_string(&path).expect("log readable");
/// assert!(contents.trim_end().ends_with("In subprocess"));
/// # std::fs::remove_file(&path).ok();
/// # Ok(())
/// # }
/// ```
pub fn run_isolated<T, F>(core: &LoggerCore, work: F) -> T
where
    F: FnOnce() -> T + UnwindSafe,
{
    let _ = core.reinitialize();
    match catch_unwind(work) {
        Ok(value) => {
            let _ = core.flush();
            value
        }
        Err(payload) => {
            FailureCapture::from_panic(payload.as_ref()).record_to(core);
            let _ = core.flush();
            resume_unwind(payload)
        }
    }
}

/// Fallible variant of [`run_isolated`].
///
/// An `Err` propagating out of `work` is the result-based analogue of an
/// uncaught failure: it is captured as an `Exception`-level record and
/// flushed, then handed back to the caller unchanged. Panics are treated
/// exactly as in [`run_isolated`].
pub fn run_isolated_result<T, E, F>(core: &LoggerCore, work: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E> + UnwindSafe,
    E: fmt::Display,
{
    let _ = core.reinitialize();
    match catch_unwind(work) {
        Ok(Ok(value)) => {
            let _ = core.flush();
            Ok(value)
        }
        Ok(Err(error)) => {
            FailureCapture::from_error(&error).record_to(core);
            let _ = core.flush();
            Err(error)
        }
        Err(payload) => {
            FailureCapture::from_panic(payload.as_ref()).record_to(core);
            let _ = core.flush();
            resume_unwind(payload)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggerConfig;
    use crate::logger::LoggerState;
    use logging_sink::WriteMode;
    use record::Level;
    use std::panic::AssertUnwindSafe;
    use tempfile::TempDir;

    fn configured_core(dir: &TempDir) -> (LoggerCore, std::path::PathBuf) {
        let path = dir.path().join("guard.log");
        let core = LoggerCore::new();
        core.configure(
            LoggerConfig::new(&path)
                .with_mode(WriteMode::Truncate)
                .with_min_level(Level::Debug),
        )
        .expect("configure");
        (core, path)
    }

    fn lines(path: &std::path::Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .map(|contents| contents.lines().map(str::to_owned).collect())
            .unwrap_or_default()
    }

    #[test]
    fn work_runs_against_a_reinitialized_core() {
        let dir = TempDir::new().expect("tempdir");
        let (core, _path) = configured_core(&dir);

        let state = run_isolated(&core, || core.state());
        assert_eq!(state, LoggerState::Active);
    }

    #[test]
    fn normal_return_flushes_buffered_records() {
        let dir = TempDir::new().expect("tempdir");
        let (core, path) = configured_core(&dir);

        let value = run_isolated(&core, || {
            core.emit(Level::Out, "In subprocess");
            7
        });

        assert_eq!(value, 7);
        assert_eq!(core.buffered(), 0);
        assert!(lines(&path).last().expect("line").ends_with("In subprocess"));
    }

    #[test]
    fn panic_is_recorded_flushed_and_re_raised_unchanged() {
        let dir = TempDir::new().expect("tempdir");
        let (core, path) = configured_core(&dir);

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            run_isolated(&core, || -> () {
                core.emit(Level::Out, "In subprocess");
                panic!("An unexpected exception in subprocess");
            });
        }));

        let payload = outcome.expect_err("panic must propagate");
        assert_eq!(
            payload.downcast_ref::<&str>().copied(),
            Some("An unexpected exception in subprocess")
        );

        assert_eq!(core.buffered(), 0);
        let lines = lines(&path);
        let last = lines.last().expect("summary line");
        assert!(last.contains(" EXCEPTION "));
        assert!(last.ends_with("An unexpected exception in subprocess"));
        assert!(lines.iter().any(|line| line.ends_with("In subprocess")));
    }

    #[test]
    fn err_results_are_recorded_and_returned_unchanged() {
        let dir = TempDir::new().expect("tempdir");
        let (core, path) = configured_core(&dir);

        let result: Result<(), String> =
            run_isolated_result(&core, || Err(String::from("worker gave up")));

        assert_eq!(result, Err(String::from("worker gave up")));
        let lines = lines(&path);
        let last = lines.last().expect("summary line");
        assert!(last.ends_with("uncaught error: worker gave up"));
    }

    #[test]
    fn ok_results_pass_through_without_failure_records() {
        let dir = TempDir::new().expect("tempdir");
        let (core, path) = configured_core(&dir);

        let result: Result<u8, String> = run_isolated_result(&core, || Ok(3));
        assert_eq!(result, Ok(3));
        assert!(lines(&path).iter().all(|line| !line.contains(" EXCEPTION ")));
    }

    #[test]
    fn guard_without_configuration_still_runs_the_work() {
        let core = LoggerCore::new();
        let value = run_isolated(&core, || "ran anyway");
        assert_eq!(value, "ran anyway");
        assert_eq!(core.state(), LoggerState::Uninitialized);
    }
}
