use serde::{Deserialize, Serialize};

/// Input: where the robot is and how fast it was last moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub position: i32,
    pub velocity: i32,
}

impl Position {
    pub fn new(position: i32, velocity: i32) -> Self {
        Self { position, velocity }
    }
}

/// Input: battery level, where `1.0` is full.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Charge(pub f64);

impl Default for Charge {
    fn default() -> Self {
        Charge(1.0)
    }
}

/// Internal: latched once the battery runs low, cleared only when full again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChargingState(pub bool);

/// Output: commanded velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Movement {
    pub velocity: i32,
}

impl Movement {
    pub fn new(velocity: i32) -> Self {
        Self { velocity }
    }
}
