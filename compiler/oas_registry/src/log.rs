//! Collision reporting sinks and tracing setup.

use std::rc::Rc;
use std::sync::Once;

use serde_json::Value;

/// Sink for structured informational messages (name collisions).
pub trait Logger {
    fn info(&self, message: &str, context: &Value);
}

impl<L: Logger + ?Sized> Logger for Rc<L> {
    fn info(&self, message: &str, context: &Value) {
        (**self).info(message, context);
    }
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn info(&self, message: &str, context: &Value) {
        (**self).info(message, context);
    }
}

/// Discards everything. The default sink.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn info(&self, _message: &str, _context: &Value) {}
}

/// Forwards messages to `tracing` at info level.
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str, context: &Value) {
        tracing::info!(target: "oas_registry::collision", %context, "{message}");
    }
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// For test harnesses and binaries embedding the registry; the library only
/// emits events and never installs a subscriber itself. Safe to call
/// multiple times. Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=oas_registry=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
