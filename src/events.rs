//! Structured events emitted by the integrity operations.
//!
//! The coordinator never logs directly. It hands [`Event`]s to an
//! [`EventSink`] chosen by the host: the binary forwards them to `tracing`,
//! tests record them in memory.

use std::fmt;

/// Severity of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventLevel {
    /// Routine progress (file hashed, file verified)
    Info,
    /// Recoverable per-file problem; the operation continues
    Warning,
    /// Discrepancy or fatal failure
    Error,
}

/// Operation that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Manifest generation
    Generate,
    /// Manifest verification
    Verify,
    /// Format-only manifest check
    Check,
}

impl Operation {
    /// Lowercase tag used in structured output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generate => "generate",
            Self::Verify => "verify",
            Self::Check => "check",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single structured event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Severity
    pub level: EventLevel,
    /// Operation tag
    pub operation: Operation,
    /// Path the event is about (file, directory, or manifest)
    pub subject: String,
    /// Human-readable message
    pub message: String,
}

impl Event {
    /// Build an event.
    pub fn new(
        level: EventLevel,
        operation: Operation,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            operation,
            subject: subject.into(),
            message: message.into(),
        }
    }
}

/// Destination for events.
pub trait EventSink {
    /// Receive one event.
    fn emit(&mut self, event: Event);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: Event) {
        (**self).emit(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: Event) {
        (**self).emit(event);
    }
}

/// Forwards events to the `tracing` subscriber installed by the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: Event) {
        let operation = event.operation.as_str();
        let subject = event.subject.as_str();
        match event.level {
            EventLevel::Info => tracing::info!(operation, subject, "{}", event.message),
            EventLevel::Warning => tracing::warn!(operation, subject, "{}", event.message),
            EventLevel::Error => tracing::error!(operation, subject, "{}", event.message),
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<Event>,
}

impl RecordingSink {
    /// Create an empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// All recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Recorded events at exactly `level`.
    pub fn at_level(&self, level: EventLevel) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.level == level)
    }

    /// Drop all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: Event) {}
}
