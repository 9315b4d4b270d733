use thiserror::Error;

/// Failures surfaced by a tick driver.
///
/// Contract violations (double registration, removing an unknown cell) are not
/// represented here; they panic, because they indicate a bug in tree assembly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TickError {
    /// The pass cap was reached while cells were still changing. The cells hold
    /// the values committed by the last pass.
    #[error("tick {tick} did not converge after {passes} passes")]
    NotConverged { tick: u64, passes: u32 },
}

pub type Result<T> = std::result::Result<T, TickError>;
