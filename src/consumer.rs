//! Diagnostic sinks: the [`Consumer`] trait, its error type, and the two
//! decorators every front-end wires up (error tracking, and the shared
//! process-wide console).
//!
//! Grounded on Carbon's `DiagnosticConsumer` / `ErrorTrackingDiagnosticConsumer`
//! / `ConsoleDiagnosticConsumer()`
//! (`examples/original_source/toolchain/diagnostics/diagnostic_consumer.h`).

use std::io;
use std::sync::{Mutex, OnceLock};

use crate::message::Diagnostic;
use crate::render::StreamConsumer;

/// A sink that a [`crate::emitter::Emitter`] delivers diagnostics to.
pub trait Consumer<'src> {
    /// Handle a single diagnostic, received by move (spec.md §3: "moved
    /// into the consumer. Consumers may retain it"). Consumers that buffer
    /// output may stash `diagnostic` and return `Ok(())` unconditionally,
    /// surfacing I/O failures from [`Self::flush`] instead.
    fn handle(&mut self, diagnostic: Diagnostic<'src>) -> Result<(), ConsumerError>;

    /// Flush any buffered output. The default does nothing; consumers that
    /// write immediately in `handle` never need to override this.
    fn flush(&mut self) -> Result<(), ConsumerError> {
        Ok(())
    }
}

/// An I/O failure while handling or flushing a diagnostic.
#[derive(Debug, thiserror::Error)]
pub enum ConsumerError {
    #[error("failed to write diagnostic output")]
    Io(#[from] io::Error),
}

/// Decorates a [`Consumer`], recording whether any diagnostic handled so far
/// was [`crate::Severity::Error`], so a driver can decide whether to keep
/// going after a batch of diagnostics.
///
/// Grounded on Carbon's `ErrorTrackingDiagnosticConsumer`.
pub struct ErrorTrackingConsumer<C> {
    inner: C,
    seen_error: bool,
}

impl<C> ErrorTrackingConsumer<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            seen_error: false,
        }
    }

    /// Whether `handle` has been called with an error-severity diagnostic
    /// since construction or the last [`Self::reset`].
    pub fn seen_error(&self) -> bool {
        self.seen_error
    }

    /// Clear the error-seen flag without touching the wrapped consumer.
    pub fn reset(&mut self) {
        self.seen_error = false;
    }

    /// Recover the wrapped consumer.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<'src, C: Consumer<'src>> Consumer<'src> for ErrorTrackingConsumer<C> {
    fn handle(&mut self, diagnostic: Diagnostic<'src>) -> Result<(), ConsumerError> {
        if diagnostic.is_error() {
            self.seen_error = true;
        }
        self.inner.handle(diagnostic)
    }

    fn flush(&mut self) -> Result<(), ConsumerError> {
        self.inner.flush()
    }
}

/// The process-wide console consumer, lazily initialized on first use and
/// shared by every caller for the remainder of the process.
///
/// Grounded on Carbon's `ConsoleDiagnosticConsumer()` function-local static.
pub fn console_consumer() -> &'static Mutex<StreamConsumer<io::Stderr>> {
    static CONSOLE: OnceLock<Mutex<StreamConsumer<io::Stderr>>> = OnceLock::new();
    CONSOLE.get_or_init(|| Mutex::new(StreamConsumer::new(io::stderr())))
}
