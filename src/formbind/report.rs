//! # Reporting
//!
//! Handler attachment surfaces unresolved targets to a [`Reporter`] instead of
//! failing. The sink is injected so tests can assert on what was reported and
//! hosts can route warnings wherever they like.
//!
//! - [`TracingReporter`]: default; emits a `tracing` warning.
//! - [`RecordingReporter`]: keeps every report in memory.
//! - [`NullReporter`]: drops everything.
//!
//! Any `Fn(&str, Option<&Value>)` closure is also a reporter.

use serde_json::Value;
use std::cell::RefCell;

/// Sink for non-fatal binding problems. Must not panic.
pub trait Reporter {
    fn report(&self, message: &str, context: Option<&Value>);
}

impl<F> Reporter for F
where
    F: Fn(&str, Option<&Value>),
{
    fn report(&self, message: &str, context: Option<&Value>) {
        self(message, context)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, message: &str, context: Option<&Value>) {
        match context {
            Some(ctx) => tracing::warn!(target: "formbind", context = %ctx, "{}", message),
            None => tracing::warn!(target: "formbind", "{}", message),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _message: &str, _context: Option<&Value>) {}
}

/// A single captured report.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub message: String,
    pub context: Option<Value>,
}

#[derive(Debug, Default)]
pub struct RecordingReporter {
    reports: RefCell<Vec<Report>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<Report> {
        self.reports.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.reports.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.reports.borrow_mut().clear();
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, message: &str, context: Option<&Value>) {
        self.reports.borrow_mut().push(Report {
            message: message.to_string(),
            context: context.cloned(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;

    #[test]
    fn recording_reporter_keeps_order() {
        let reporter = RecordingReporter::new();
        reporter.report("first", None);
        reporter.report("second", Some(&json!({"operation": "on_change"})));

        let reports = reporter.reports();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].message, "first");
        assert_eq!(
            reports[1].context,
            Some(json!({"operation": "on_change"}))
        );

        reporter.clear();
        assert!(reporter.is_empty());
    }

    #[test]
    fn closures_are_reporters() {
        let count = Cell::new(0);
        let sink = |_: &str, _: Option<&Value>| count.set(count.get() + 1);
        sink.report("x", None);
        sink.report("y", None);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn tracing_and_null_reporters_do_not_panic() {
        TracingReporter.report("warned", Some(&json!({"a": 1})));
        NullReporter.report("dropped", None);
    }
}
