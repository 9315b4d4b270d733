use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tickles_bt::{
    Autonomy, AutonomyConfig, BtNode, BtStatus, Leaf, Parallel, Sequence, DEFAULT_MAX_PASSES,
};
use tickles_core::{MutableRegistry, Mutator, TickError};
use tickles_tools::{TraceEvent, TraceSink};

fn boxed(node: impl BtNode) -> Box<dyn BtNode> {
    Box::new(node)
}

#[test]
fn loop_runs_at_least_once_without_changes() {
    let registry = MutableRegistry::new();
    let passes = Rc::new(Cell::new(0));
    let counter = Rc::clone(&passes);
    let root = Leaf::new(move || {
        counter.set(counter.get() + 1);
        BtStatus::Running
    });

    let mut autonomy = Autonomy::new(boxed(root), registry);
    let report = autonomy.tick().unwrap();
    assert_eq!(report.passes, 1);
    assert_eq!(report.status, BtStatus::Running);
    assert_eq!(passes.get(), 1);

    autonomy.tick().unwrap();
    assert_eq!(passes.get(), 2);
    assert_eq!(autonomy.ticks(), 2);
}

#[test]
fn reads_in_a_pass_never_see_writes_from_the_same_pass() {
    let registry = MutableRegistry::new();
    let value = registry.mutable(0i32);
    let seen = Rc::new(RefCell::new(Vec::new()));

    let writer = {
        let value = value.clone();
        Leaf::new(move || {
            value.set(7);
            BtStatus::Succeeded
        })
    };
    let reader = {
        let value = value.clone();
        let seen = Rc::clone(&seen);
        Leaf::new(move || {
            seen.borrow_mut().push(value.get());
            BtStatus::Succeeded
        })
    };

    let root = Sequence::new(vec![boxed(writer), boxed(reader)]);
    let mut autonomy = Autonomy::new(boxed(root), registry);
    let report = autonomy.tick().unwrap();

    // Pass 1 reads the committed 0 even though the writer ran first; pass 2
    // sees 7 and stages nothing new.
    assert_eq!(*seen.borrow(), vec![0, 7]);
    assert_eq!(report.passes, 2);
    assert_eq!(report.status, BtStatus::Succeeded);
    assert_eq!(value.get(), 7);
}

#[test]
fn chained_cells_converge_one_pass_per_link() {
    let registry = MutableRegistry::new();
    let cells: Vec<Mutator<i32>> = (0..4).map(|_| registry.mutable(0)).collect();
    let input = cells[0].clone();

    // Each link copies its predecessor plus one; evaluated in reverse so every
    // hop needs its own pass.
    let links: Vec<Box<dyn BtNode>> = (1..cells.len())
        .rev()
        .map(|i| {
            let from = cells[i - 1].clone();
            let to = cells[i].clone();
            boxed(Leaf::new(move || {
                to.set(from.get() + 1);
                BtStatus::Succeeded
            }))
        })
        .collect();

    let mut autonomy = Autonomy::new(boxed(Parallel::new(links)), registry);
    let first = autonomy.tick().unwrap();
    assert_eq!(cells[3].get(), 3);
    assert_eq!(first.passes, 4);

    input.set(10);
    let second = autonomy.tick().unwrap();
    assert_eq!(cells[3].get(), 13);
    assert_eq!(second.passes, 5);
    assert_eq!(second.tick, 1);
}

fn oscillating_pair(registry: &MutableRegistry) -> Box<dyn BtNode> {
    let a = registry.mutable(false);
    let b = registry.mutable(false);
    let flip_a = {
        let (a, b) = (a.clone(), b.clone());
        Leaf::new(move || {
            a.set(!b.get());
            BtStatus::Running
        })
    };
    let flip_b = Leaf::new(move || {
        b.set(!a.get());
        BtStatus::Running
    });
    boxed(Parallel::new(vec![boxed(flip_a), boxed(flip_b)]))
}

#[test]
fn oscillation_hits_pass_cap() {
    let registry = MutableRegistry::new();
    let root = oscillating_pair(&registry);
    let mut autonomy =
        Autonomy::new(root, registry).with_config(AutonomyConfig::with_max_passes(8));

    let err = autonomy.tick().unwrap_err();
    assert_eq!(err, TickError::NotConverged { tick: 0, passes: 8 });
    assert_eq!(autonomy.last_status(), Some(BtStatus::Running));

    // The driver stays usable; the next tick is numbered and capped the same way.
    let err = autonomy.tick().unwrap_err();
    assert_eq!(err, TickError::NotConverged { tick: 1, passes: 8 });
}

#[test]
fn default_cap_applies() {
    let registry = MutableRegistry::new();
    let root = oscillating_pair(&registry);
    let mut autonomy = Autonomy::new(root, registry);
    assert_eq!(autonomy.config(), AutonomyConfig::default());

    let err = autonomy.tick().unwrap_err();
    assert_eq!(
        err,
        TickError::NotConverged {
            tick: 0,
            passes: DEFAULT_MAX_PASSES
        }
    );
}

#[test]
fn unbounded_config_still_converges_for_stable_trees() {
    let registry = MutableRegistry::new();
    let out = registry.mutable(0u32);
    let writer = {
        let out = out.clone();
        Leaf::new(move || {
            out.set(42);
            BtStatus::Succeeded
        })
    };
    let mut autonomy =
        Autonomy::new(boxed(writer), registry).with_config(AutonomyConfig::unbounded());

    let report = autonomy.tick().unwrap();
    assert_eq!(report.passes, 2);
    assert_eq!(out.get(), 42);
    assert_eq!(autonomy.tick().unwrap().passes, 1);
}

#[derive(Clone, Default)]
struct RcSink(Rc<RefCell<Vec<TraceEvent>>>);

impl TraceSink for RcSink {
    fn emit(&mut self, event: TraceEvent) {
        self.0.borrow_mut().push(event);
    }
}

#[test]
fn trace_records_passes_and_outcome() {
    let registry = MutableRegistry::new();
    let out = registry.mutable(0u32);
    let writer = Leaf::new(move || {
        out.set(1);
        BtStatus::Succeeded
    });

    let sink = RcSink::default();
    let streamed = Rc::clone(&sink.0);
    let mut autonomy = Autonomy::new(boxed(writer), registry);
    autonomy.enable_trace_log();
    autonomy.set_trace_sink(Box::new(sink));
    autonomy.tick().unwrap();

    let log = autonomy.take_trace_log().unwrap();
    let tags: Vec<&str> = log.events.iter().map(|e| &*e.tag).collect();
    assert_eq!(tags, vec!["tick.pass", "tick.pass", "tick.converged"]);
    assert_eq!(log.events[0].status.as_deref(), Some("Succeeded"));
    assert_eq!(log.events[1].pass, 2);
    assert_eq!(log.outcome(0).map(|e| e.pass), Some(2));
    assert_eq!(streamed.borrow().len(), 3);
}

#[test]
fn trace_records_divergence() {
    let registry = MutableRegistry::new();
    let root = oscillating_pair(&registry);
    let mut autonomy =
        Autonomy::new(root, registry).with_config(AutonomyConfig::with_max_passes(3));
    autonomy.enable_trace_log();
    let _ = autonomy.tick();

    let log = autonomy.trace_log().unwrap();
    assert_eq!(log.with_tag("tick.pass").count(), 3);
    let diverged: Vec<_> = log.with_tag("tick.diverged").collect();
    assert_eq!(diverged.len(), 1);
    assert_eq!(diverged[0].pass, 3);
    assert_eq!(log.outcome(0), Some(diverged[0]));
}
