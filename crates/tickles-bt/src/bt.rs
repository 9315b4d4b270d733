use tickles_core::BtStatus;

/// Anything that can be evaluated to a [`BtStatus`].
///
/// Evaluation is synchronous and must be safe to repeat: the tick driver calls
/// the root once per pass, and a pass may be repeated with unchanged inputs.
pub trait BtNode: 'static {
    fn tick(&mut self) -> BtStatus;
}

impl BtNode for Box<dyn BtNode> {
    fn tick(&mut self) -> BtStatus {
        (**self).tick()
    }
}
