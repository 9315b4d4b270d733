#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Tags emitted by the tick driver.
pub mod tags {
    /// One evaluation of the root.
    pub const PASS: &str = "tick.pass";
    /// A pass staged no changes; the tick is done.
    pub const CONVERGED: &str = "tick.converged";
    /// The pass cap stopped the tick before it converged.
    pub const DIVERGED: &str = "tick.diverged";
}

/// One record from a tick.
///
/// For `tick.pass`, `pass` is the 1-based pass index and `status` the root
/// status of that pass. For `tick.converged` and `tick.diverged`, `pass` is
/// the number of passes the tick ran and `status` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub tag: Cow<'static, str>,
    pub pass: u32,
    pub status: Option<Cow<'static, str>>,
}

impl TraceEvent {
    pub fn new(tick: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            tag: tag.into(),
            pass: 0,
            status: None,
        }
    }

    pub fn pass(tick: u64, pass: u32, status: impl Into<Cow<'static, str>>) -> Self {
        Self::new(tick, tags::PASS)
            .with_pass(pass)
            .with_status(status)
    }

    pub fn converged(tick: u64, passes: u32) -> Self {
        Self::new(tick, tags::CONVERGED).with_pass(passes)
    }

    pub fn diverged(tick: u64, passes: u32) -> Self {
        Self::new(tick, tags::DIVERGED).with_pass(passes)
    }

    pub fn with_pass(mut self, pass: u32) -> Self {
        self.pass = pass;
        self
    }

    pub fn with_status(mut self, status: impl Into<Cow<'static, str>>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// True for the event that closes a tick, converged or not.
    pub fn is_outcome(&self) -> bool {
        self.tag == tags::CONVERGED || self.tag == tags::DIVERGED
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TraceEvent> + 'a {
        self.events.iter().filter(move |e| e.tag == tag)
    }

    /// Every event recorded for one tick, in emission order.
    pub fn for_tick(&self, tick: u64) -> impl Iterator<Item = &TraceEvent> + '_ {
        self.events.iter().filter(move |e| e.tick == tick)
    }

    /// The converged or diverged event that closed `tick`, if it was recorded.
    pub fn outcome(&self, tick: u64) -> Option<&TraceEvent> {
        self.for_tick(tick).find(|e| e.is_outcome())
    }
}

impl TraceSink for TraceLog {
    fn emit(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

/// Optional in-memory log plus optional streaming sink.
///
/// Emitting with neither attached is a no-op, so drivers can emit unconditionally.
#[derive(Default)]
pub struct Tracer {
    log: Option<TraceLog>,
    sink: Option<Box<dyn TraceSink>>,
}

impl Tracer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable_log(&mut self) {
        self.log.get_or_insert_with(TraceLog::default);
    }

    pub fn set_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.sink = Some(sink);
    }

    pub fn log(&self) -> Option<&TraceLog> {
        self.log.as_ref()
    }

    pub fn take_log(&mut self) -> Option<TraceLog> {
        self.log.as_mut().map(std::mem::take)
    }

    pub fn is_active(&self) -> bool {
        self.log.is_some() || self.sink.is_some()
    }

    pub fn emit(&mut self, event: TraceEvent) {
        match (self.log.as_mut(), self.sink.as_mut()) {
            (Some(log), Some(sink)) => {
                log.push(event.clone());
                sink.emit(event);
            }
            (Some(log), None) => log.push(event),
            (None, Some(sink)) => sink.emit(event),
            (None, None) => {}
        }
    }
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer")
            .field("log", &self.log)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}
