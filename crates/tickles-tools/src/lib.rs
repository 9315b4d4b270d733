//! Tooling primitives for reactive behavior trees.
//!
//! Records one event per pass plus one outcome event per tick, so tooling
//! can replay how a tick converged or why it was cut off.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{tags, TraceEvent, TraceLog, TraceSink, Tracer};
