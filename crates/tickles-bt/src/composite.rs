use tickles_core::BtStatus;

use crate::bt::BtNode;

/// Runs children in order and returns the first result that is not `Succeeded`.
///
/// An empty sequence succeeds.
pub struct Sequence {
    children: Vec<Box<dyn BtNode>>,
}

impl Sequence {
    pub fn new(children: Vec<Box<dyn BtNode>>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl BtNode for Sequence {
    fn tick(&mut self) -> BtStatus {
        for child in self.children.iter_mut() {
            match child.tick() {
                BtStatus::Succeeded => continue,
                other => return other,
            }
        }
        BtStatus::Succeeded
    }
}

/// Runs children in order and returns the first result that is not `Failed`.
///
/// An empty fallback fails.
pub struct FallBack {
    children: Vec<Box<dyn BtNode>>,
}

impl FallBack {
    pub fn new(children: Vec<Box<dyn BtNode>>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl BtNode for FallBack {
    fn tick(&mut self) -> BtStatus {
        for child in self.children.iter_mut() {
            match child.tick() {
                BtStatus::Failed => continue,
                other => return other,
            }
        }
        BtStatus::Failed
    }
}

/// Runs every child on every evaluation, with no short-circuit.
///
/// Any `Failed` child fails the parallel; otherwise it succeeds only when all
/// children succeeded, and is `Running` in every other case. An empty parallel
/// succeeds.
pub struct Parallel {
    children: Vec<Box<dyn BtNode>>,
}

impl Parallel {
    pub fn new(children: Vec<Box<dyn BtNode>>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl BtNode for Parallel {
    fn tick(&mut self) -> BtStatus {
        let mut any_failed = false;
        let mut all_succeeded = true;
        for child in self.children.iter_mut() {
            match child.tick() {
                BtStatus::Failed => any_failed = true,
                BtStatus::Running => all_succeeded = false,
                BtStatus::Succeeded => {}
            }
        }

        if any_failed {
            BtStatus::Failed
        } else if all_succeeded {
            BtStatus::Succeeded
        } else {
            BtStatus::Running
        }
    }
}
