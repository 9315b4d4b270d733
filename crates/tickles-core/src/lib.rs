//! Reactive behavior-tree kernel primitives.
//!
//! A tick evaluates a tree repeatedly until the cells it writes stop changing.
//! This crate holds the pieces that do not know about trees: the node status,
//! the dirty-tracking [`Mutable`] cell with its [`Mutator`] handle, and the
//! [`MutableRegistry`] that reports whether anything changed during a pass.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod error;
pub mod mutable;
pub mod registry;
pub mod status;

pub use error::TickError;
pub use mutable::{Mutable, Mutator};
pub use registry::{MutableId, MutableRegistry, Syncable};
pub use status::BtStatus;
