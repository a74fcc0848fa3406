//! End-to-end lifecycle tests driving the facade the way a worker process
//! would: configure, activate, emit, flush, and capture an uncaught failure.

use logwell::{
    FailureCapture, Level, LoggerConfig, LoggerCore, WriteMode, run_isolated_result,
};
use tempfile::TempDir;

fn lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .map(|contents| contents.lines().map(str::to_owned).collect())
        .unwrap_or_default()
}

#[test]
fn records_round_trip_in_emission_order() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("fifo.log");

    let core = LoggerCore::new();
    core.configure(
        LoggerConfig::new(&path)
            .with_mode(WriteMode::Truncate)
            .with_min_level(Level::Debug),
    )
    .expect("configure");
    core.activate().expect("activate");

    for n in 0..10 {
        core.emit(Level::Out, format!("record {n}"));
    }
    assert_eq!(core.flush().expect("flush"), 10);

    let lines = lines(&path);
    assert_eq!(lines.len(), 10);
    for (n, line) in lines.iter().enumerate() {
        assert!(line.ends_with(&format!("record {n}")), "out of order: {line}");
    }
}

#[test]
fn simulated_fork_reinitialization_keeps_buffered_records() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("reinit.log");

    let core = LoggerCore::new();
    core.configure(
        LoggerConfig::new(&path)
            .with_mode(WriteMode::Truncate)
            .with_min_level(Level::Debug),
    )
    .expect("configure");
    core.activate().expect("activate");

    core.emit(Level::Info, "buffered before the fork");
    core.reinitialize().expect("reinitialize");
    core.emit(Level::Info, "emitted after the fork");
    core.flush().expect("flush");

    let lines = lines(&path);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("buffered before the fork"));
    assert!(lines[1].ends_with("emitted after the fork"));
}

#[test]
fn subprocess_scenario_leaves_the_failure_as_the_final_line() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("scenario.log");

    let core = LoggerCore::new();
    core.configure(
        LoggerConfig::new(&path)
            .with_mode(WriteMode::Truncate)
            .with_min_level(Level::Debug),
    )
    .expect("configure");

    let result: Result<(), String> = run_isolated_result(&core, || {
        core.emit(Level::Out, "In subprocess");
        core.flush().map_err(|err| err.to_string())?;

        // A handled failure is logged and execution continues.
        let handled: Result<(), String> = Err(String::from("An expected exception in subprocess"));
        if let Err(err) = handled {
            FailureCapture::from_error(&err).record_to(&core);
        }

        Err(String::from("An unexpected exception in subprocess"))
    });

    assert_eq!(
        result,
        Err(String::from("An unexpected exception in subprocess"))
    );

    let lines = lines(&path);
    let last = lines.last().expect("flushed records");
    assert!(last.contains(" EXCEPTION "));
    assert!(last.ends_with("An unexpected exception in subprocess"));
    assert!(lines.iter().any(|line| line.ends_with("In subprocess")));
    assert!(
        lines
            .iter()
            .any(|line| line.ends_with("An expected exception in subprocess"))
    );
    assert_eq!(core.buffered(), 0, "the guard must flush on the failure path");
}

#[test]
fn repeated_flushes_of_an_empty_buffer_write_nothing() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("idempotent.log");

    let core = LoggerCore::new();
    core.configure(LoggerConfig::new(&path).with_mode(WriteMode::Truncate))
        .expect("configure");
    core.activate().expect("activate");

    core.emit(Level::Out, "solitary");
    core.flush().expect("flush");
    let size = std::fs::metadata(&path).expect("metadata").len();

    for _ in 0..5 {
        assert_eq!(core.flush().expect("empty flush"), 0);
    }
    assert_eq!(std::fs::metadata(&path).expect("metadata").len(), size);
}

#[test]
fn shutdown_flushes_and_later_emits_are_dropped() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("shutdown.log");

    let core = LoggerCore::new();
    core.configure(LoggerConfig::new(&path).with_mode(WriteMode::Truncate))
        .expect("configure");
    core.activate().expect("activate");

    core.emit(Level::Out, "final words");
    core.shutdown().expect("shutdown");
    core.shutdown().expect("shutdown is idempotent");
    core.emit(Level::Error, "spoken after the end");

    let lines = lines(&path);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("final words"));
}
