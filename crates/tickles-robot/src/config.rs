//! Robot configuration loading.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use tickles_bt::{AutonomyConfig, DEFAULT_MAX_PASSES};

/// Thresholds and speeds for the battery-guarded robot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    /// Location of the recharge station
    pub recharge_position: i32,

    /// Speed cap while driving to the station
    pub max_speed: i32,

    /// Charge at or below which the robot starts charging
    pub low_battery: f64,

    /// Charge at or above which charging stops
    pub full_battery: f64,

    /// Velocity while going about business
    pub business_velocity: i32,

    /// Business movement only happens below this position
    pub business_limit: i32,

    /// Pass cap per tick; `null` disables the cap
    pub max_passes: Option<u32>,

    pub simulation: SimulationConfig,
}

/// Kinematics used by [`Simulation`](crate::Simulation); the tree never reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Charge consumed per unit of distance travelled
    pub drain_per_unit: f64,

    /// Charge consumed every tick
    pub idle_drain: f64,

    /// Charge gained per tick while charging at the station
    pub charge_rate: f64,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            recharge_position: 0,
            max_speed: 5,
            low_battery: 0.2,
            full_battery: 1.0,
            business_velocity: 10,
            business_limit: 500,
            max_passes: Some(DEFAULT_MAX_PASSES),
            simulation: SimulationConfig::default(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            drain_per_unit: 0.01,
            idle_drain: 0.001,
            charge_rate: 0.1,
        }
    }
}

impl RobotConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.max_speed >= 0, "max_speed must be non-negative, got {}", self.max_speed);
        ensure!(
            self.low_battery < self.full_battery,
            "low_battery ({}) must be below full_battery ({})",
            self.low_battery,
            self.full_battery
        );
        ensure!(
            self.max_passes != Some(0),
            "max_passes must be at least 1 (use null for no cap)"
        );
        ensure!(
            self.simulation.charge_rate >= 0.0
                && self.simulation.drain_per_unit >= 0.0
                && self.simulation.idle_drain >= 0.0,
            "simulation rates must be non-negative"
        );
        Ok(())
    }

    pub fn autonomy_config(&self) -> AutonomyConfig {
        AutonomyConfig {
            max_passes: self.max_passes,
        }
    }
}
