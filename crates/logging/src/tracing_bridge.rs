//! Bridge between the tracing crate and the logger core.
//!
//! This module provides a tracing-subscriber layer that forwards tracing
//! events into a [`LoggerCore`], so code instrumented with the standard
//! tracing macros (`error!`, `warn!`, `info!`, `debug!`, `trace!`) lands in
//! the same buffered, fork-safe sink as direct `emit` calls.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{LoggerConfig, LoggerCore, init_tracing};
//!
//! LoggerCore::global().configure(LoggerConfig::new("/var/log/app.log"))?;
//! LoggerCore::global().activate()?;
//! init_tracing();
//!
//! tracing::info!("forwarded into the logwell sink");
//! ```

use record::Level;
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::logger::LoggerCore;

/// A tracing layer that forwards events into a [`LoggerCore`].
///
/// Filtering stays with the core: events are forwarded unconditionally and
/// the core's `min_level` decides what is kept, so tracing callers and
/// direct emitters obey one threshold.
pub struct LogwellLayer {
    core: &'static LoggerCore,
}

impl LogwellLayer {
    /// Creates a layer forwarding into `core`.
    #[must_use]
    pub const fn new(core: &'static LoggerCore) -> Self {
        Self { core }
    }

    /// Maps a tracing level onto the record severity scale.
    ///
    /// `DEBUG` and `TRACE` both land on [`Level::Debug`]; the record scale
    /// deliberately has no finer-grained developer levels.
    const fn map_level(level: &tracing::Level) -> Level {
        match *level {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::INFO => Level::Info,
            _ => Level::Debug,
        }
    }
}

impl<S> Layer<S> for LogwellLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let level = Self::map_level(event.metadata().level());
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if let Some(message) = visitor.message {
            self.core.emit(level, message);
        }
    }
}

/// Visitor extracting the `message` field from a tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Installs a global tracing subscriber forwarding into the global core.
///
/// Call after the global [`LoggerCore`] has been configured and activated;
/// events forwarded before activation follow the core's usual no-op rules.
pub fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(LogwellLayer::new(LoggerCore::global()))
        .init();
}

/// Installs the forwarding subscriber together with a custom filter layer.
///
/// This allows combining the logwell bridge with standard tracing filters
/// (for example an `EnvFilter`) for finer-grained control over what reaches
/// the core.
pub fn init_tracing_with_filter<F>(filter: F)
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(LogwellLayer::new(LoggerCore::global()))
        .init();
}
