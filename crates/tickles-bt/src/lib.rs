//! Behavior tree runtime built on `tickles-core`.
//!
//! Composites ([`Sequence`], [`FallBack`], [`Parallel`]) combine child
//! statuses without side effects of their own; leaves read and stage values on
//! [`Mutator`](tickles_core::Mutator) cells. [`Autonomy`] re-evaluates the tree
//! within one tick until the cells stop changing.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod autonomy;
pub mod bt;
pub mod composite;
pub mod nodes;

pub use autonomy::{Autonomy, AutonomyConfig, TickReport, DEFAULT_MAX_PASSES};
pub use bt::BtNode;
pub use composite::{FallBack, Parallel, Sequence};
pub use nodes::{AlwaysFailed, AlwaysRunning, AlwaysSucceeded, Condition, Leaf};
pub use tickles_core::BtStatus;
