use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of evaluating a behavior node.
///
/// This is a domain status, not an error channel: all three variants are
/// successful evaluations. `Running` means "not finished conceptually"; the
/// evaluation itself always returns immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BtStatus {
    Running,
    Succeeded,
    Failed,
}

impl BtStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BtStatus::Running => "Running",
            BtStatus::Succeeded => "Succeeded",
            BtStatus::Failed => "Failed",
        }
    }

    /// `Succeeded`/`Failed` map to `Some(true)`/`Some(false)`; `Running` has no outcome yet.
    pub fn outcome(self) -> Option<bool> {
        match self {
            BtStatus::Running => None,
            BtStatus::Succeeded => Some(true),
            BtStatus::Failed => Some(false),
        }
    }
}

impl From<bool> for BtStatus {
    fn from(value: bool) -> Self {
        if value {
            BtStatus::Succeeded
        } else {
            BtStatus::Failed
        }
    }
}

impl fmt::Display for BtStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
