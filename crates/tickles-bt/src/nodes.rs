use tickles_core::BtStatus;

use crate::bt::BtNode;

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysRunning;

impl BtNode for AlwaysRunning {
    fn tick(&mut self) -> BtStatus {
        BtStatus::Running
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysSucceeded;

impl BtNode for AlwaysSucceeded {
    fn tick(&mut self) -> BtStatus {
        BtStatus::Succeeded
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysFailed;

impl BtNode for AlwaysFailed {
    fn tick(&mut self) -> BtStatus {
        BtStatus::Failed
    }
}

/// Leaf that maps a predicate to `Succeeded` / `Failed`.
pub struct Condition<F> {
    cond: F,
}

impl<F> Condition<F> {
    pub fn new(cond: F) -> Self {
        Self { cond }
    }
}

impl<F> BtNode for Condition<F>
where
    F: FnMut() -> bool + 'static,
{
    fn tick(&mut self) -> BtStatus {
        BtStatus::from((self.cond)())
    }
}

/// Leaf backed by a closure. Typically captures [`Mutator`](tickles_core::Mutator)
/// handles, reads committed values and stages outputs.
pub struct Leaf<F> {
    run: F,
}

impl<F> Leaf<F> {
    pub fn new(run: F) -> Self {
        Self { run }
    }
}

impl<F> BtNode for Leaf<F>
where
    F: FnMut() -> BtStatus + 'static,
{
    fn tick(&mut self) -> BtStatus {
        (self.run)()
    }
}
