//! Event logging hooks and sinks.
//!
//! The engine decides *when* an event happens; the [`EventLogging`] policy
//! decides *whether* it is logged; a [`LogSink`] decides *where* it goes.
//!
//! | Policy           | Insert | Overflow | Find | Erase |
//! |------------------|--------|----------|------|-------|
//! | `LogNone`        |        |          |      |       |
//! | `LogOverflow<S>` |        |    ✓     |      |       |
//! | `LogAll<S>`      |   ✓    |    ✓     |  ✓   |   ✓   |
//!
//! Entries are rendered (see [`Entry`]'s `Display`) only for events that are
//! actually emitted, so `LogNone` needs no `Display` bound on keys or values.
//! Sinks run synchronously and must not call back into the map that is
//! logging.

use std::fmt;

use log::Level;

use crate::entry::Entry;
use crate::policy::hit_count::HitCounting;
use crate::policy::timestamp::Timestamping;

/// Kind of map event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    Insert,
    Overflow,
    Find,
    Erase,
}

impl Event {
    pub fn as_str(self) -> &'static str {
        match self {
            Event::Insert => "Insert",
            Event::Overflow => "Overflow",
            Event::Find => "Find",
            Event::Erase => "Erase",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives one record per logged event.
pub trait LogSink {
    fn emit(&self, event: Event, rendered: &str);
}

impl<F> LogSink for F
where
    F: Fn(Event, &str),
{
    fn emit(&self, event: Event, rendered: &str) {
        self(event, rendered)
    }
}

/// Forwards events to the `log` facade as `"<event>: <entry>"` under
/// target `lrumap`.
#[derive(Debug, Clone, Copy)]
pub struct LogFacade {
    level: Level,
}

impl LogFacade {
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for LogFacade {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

impl LogSink for LogFacade {
    fn emit(&self, event: Event, rendered: &str) {
        log::log!(target: "lrumap", self.level, "{}: {}", event, rendered);
    }
}

/// Event hooks invoked by the engine. Every hook defaults to a no-op.
pub trait EventLogging<K, V> {
    #[inline(always)]
    fn log_insert<T: Timestamping, H: HitCounting>(&self, _entry: &Entry<K, V, T, H>) {}

    #[inline(always)]
    fn log_overflow<T: Timestamping, H: HitCounting>(&self, _entry: &Entry<K, V, T, H>) {}

    #[inline(always)]
    fn log_find<T: Timestamping, H: HitCounting>(&self, _entry: &Entry<K, V, T, H>) {}

    #[inline(always)]
    fn log_erase<T: Timestamping, H: HitCounting>(&self, _entry: &Entry<K, V, T, H>) {}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogNone;

impl<K, V> EventLogging<K, V> for LogNone {}

/// Logs evictions only.
#[derive(Debug, Clone, Default)]
pub struct LogOverflow<S = LogFacade> {
    sink: S,
}

impl<S: LogSink> LogOverflow<S> {
    pub fn with_sink(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<K, V, S> EventLogging<K, V> for LogOverflow<S>
where
    K: fmt::Display,
    V: fmt::Display,
    S: LogSink,
{
    fn log_overflow<T: Timestamping, H: HitCounting>(&self, entry: &Entry<K, V, T, H>) {
        self.sink.emit(Event::Overflow, &entry.to_string());
    }
}

/// Logs every event.
#[derive(Debug, Clone, Default)]
pub struct LogAll<S = LogFacade> {
    sink: S,
}

impl<S: LogSink> LogAll<S> {
    pub fn with_sink(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<K, V, S> EventLogging<K, V> for LogAll<S>
where
    K: fmt::Display,
    V: fmt::Display,
    S: LogSink,
{
    fn log_insert<T: Timestamping, H: HitCounting>(&self, entry: &Entry<K, V, T, H>) {
        self.sink.emit(Event::Insert, &entry.to_string());
    }

    fn log_overflow<T: Timestamping, H: HitCounting>(&self, entry: &Entry<K, V, T, H>) {
        self.sink.emit(Event::Overflow, &entry.to_string());
    }

    fn log_find<T: Timestamping, H: HitCounting>(&self, entry: &Entry<K, V, T, H>) {
        self.sink.emit(Event::Find, &entry.to_string());
    }

    fn log_erase<T: Timestamping, H: HitCounting>(&self, entry: &Entry<K, V, T, H>) {
        self.sink.emit(Event::Erase, &entry.to_string());
    }
}
