use tickles_core::{BtStatus, MutableRegistry, TickError};
use tickles_tools::{TraceEvent, TraceLog, TraceSink, Tracer};

use crate::bt::BtNode;

pub const DEFAULT_MAX_PASSES: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutonomyConfig {
    /// Upper bound on passes per tick. `None` loops until the cells converge,
    /// which never happens for a tree whose writes oscillate.
    pub max_passes: Option<u32>,
}

impl Default for AutonomyConfig {
    fn default() -> Self {
        Self {
            max_passes: Some(DEFAULT_MAX_PASSES),
        }
    }
}

impl AutonomyConfig {
    pub fn unbounded() -> Self {
        Self { max_passes: None }
    }

    pub fn with_max_passes(max_passes: u32) -> Self {
        Self {
            max_passes: Some(max_passes.max(1)),
        }
    }
}

/// Summary of one converged tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    /// Number of root evaluations, always at least one.
    pub passes: u32,
    /// Root status from the final pass.
    pub status: BtStatus,
}

/// Drives a behavior tree to a fixed point once per external tick.
///
/// Every cell reachable from `root` must be registered with `registry`;
/// otherwise its writes are never committed and the driver cannot see them.
pub struct Autonomy {
    root: Box<dyn BtNode>,
    registry: MutableRegistry,
    config: AutonomyConfig,
    tick: u64,
    last: Option<BtStatus>,
    tracer: Tracer,
}

impl Autonomy {
    pub fn new(root: Box<dyn BtNode>, registry: MutableRegistry) -> Self {
        Self {
            root,
            registry,
            config: AutonomyConfig::default(),
            tick: 0,
            last: None,
            tracer: Tracer::new(),
        }
    }

    pub fn with_config(mut self, config: AutonomyConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> AutonomyConfig {
        self.config
    }

    pub fn registry(&self) -> &MutableRegistry {
        &self.registry
    }

    /// Number of ticks started so far.
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn last_status(&self) -> Option<BtStatus> {
        self.last
    }

    pub fn enable_trace_log(&mut self) {
        self.tracer.enable_log();
    }

    pub fn set_trace_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.tracer.set_sink(sink);
    }

    pub fn trace_log(&self) -> Option<&TraceLog> {
        self.tracer.log()
    }

    pub fn take_trace_log(&mut self) -> Option<TraceLog> {
        self.tracer.take_log()
    }

    /// Evaluate the root until a pass stages no changes.
    ///
    /// Inputs must be staged on their cells before calling; the first pass
    /// still reads the previously committed inputs and the following passes
    /// pick up the new ones. On hitting the pass cap the cells keep the values
    /// committed by the last pass and `TickError::NotConverged` is returned.
    pub fn tick(&mut self) -> Result<TickReport, TickError> {
        let tick = self.tick;
        self.tick += 1;

        let mut passes: u32 = 0;
        loop {
            passes += 1;
            let status = self.root.tick();
            self.last = Some(status);
            tracing::trace!(tick, pass = passes, %status, "pass evaluated");
            self.tracer
                .emit(TraceEvent::pass(tick, passes, status.as_str()));

            if !self.registry.sync() {
                tracing::debug!(tick, passes, %status, "tick converged");
                self.tracer.emit(TraceEvent::converged(tick, passes));
                return Ok(TickReport {
                    tick,
                    passes,
                    status,
                });
            }

            if let Some(max) = self.config.max_passes {
                if passes >= max.max(1) {
                    tracing::warn!(tick, passes, "tick did not converge; stopping at pass cap");
                    self.tracer.emit(TraceEvent::diverged(tick, passes));
                    return Err(TickError::NotConverged { tick, passes });
                }
            }
        }
    }
}
