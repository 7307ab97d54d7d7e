//! Logging port used by command handlers.
//!
//! # Responsibility
//! - Decouple handlers from the process logger so tests can observe events.
//! - Forward events to the `log` facade in production.
//!
//! # Invariants
//! - Sinks preserve the level and the attached failure they were given.
//! - Logging never fails or panics from the caller's point of view.
//!
//! # See also
//! - `crate::logging` for the file backend bootstrap.

use log::{debug, error};
use std::error::Error;
use std::sync::Arc;

/// Severity accepted by [`LogSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Error,
}

/// Structured event sink written to by handlers.
pub trait LogSink {
    /// Records one event. `failure` is the original error, not a rendering
    /// of it, so sinks can walk its `source()` chain.
    fn log(&self, level: LogLevel, message: &str, failure: Option<&(dyn Error + 'static)>);
}

impl<S: LogSink + ?Sized> LogSink for &S {
    fn log(&self, level: LogLevel, message: &str, failure: Option<&(dyn Error + 'static)>) {
        (**self).log(level, message, failure);
    }
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn log(&self, level: LogLevel, message: &str, failure: Option<&(dyn Error + 'static)>) {
        (**self).log(level, message, failure);
    }
}

/// Production sink writing `event=command` lines through the `log` facade.
#[derive(Debug, Clone, Copy)]
pub struct CoreLogSink {
    module: &'static str,
}

impl CoreLogSink {
    /// `module` ends up as the `module=` key of every line.
    pub fn new(module: &'static str) -> Self {
        Self { module }
    }
}

impl Default for CoreLogSink {
    fn default() -> Self {
        Self::new("handler")
    }
}

impl LogSink for CoreLogSink {
    fn log(&self, level: LogLevel, message: &str, failure: Option<&(dyn Error + 'static)>) {
        let module = self.module;
        match (level, failure) {
            (LogLevel::Debug, None) => {
                debug!("event=command module={module} status=ok message=\"{message}\"");
            }
            (LogLevel::Debug, Some(err)) => {
                debug!(
                    "event=command module={module} status=ok message=\"{message}\" error={}",
                    render_error_chain(err)
                );
            }
            (LogLevel::Error, None) => {
                error!("event=command module={module} status=error message=\"{message}\"");
            }
            (LogLevel::Error, Some(err)) => {
                error!(
                    "event=command module={module} status=error message=\"{message}\" error={}",
                    render_error_chain(err)
                );
            }
        }
    }
}

/// Joins an error and its sources as `outer: inner: root`.
pub(crate) fn render_error_chain(err: &(dyn Error + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        // Wrapper variants often display their inner error verbatim.
        if !rendered.ends_with(text.as_str()) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        source = cause.source();
    }
    rendered
}
