use serde::Serialize;
use tickles_core::TickError;

use crate::autonomy::RobotAutonomy;
use crate::config::RobotConfig;
use crate::model::{Charge, Position};

/// State after one simulated tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationStep {
    pub tick: u64,
    pub position: i32,
    pub charge: f64,
    pub velocity: i32,
    pub charging: bool,
    pub passes: u32,
}

/// Closed-loop driver: feeds the robot's own movement back into its inputs.
pub struct Simulation {
    robot: RobotAutonomy,
    position: i32,
    charge: f64,
}

impl Simulation {
    /// Build the robot and run an initial tick on the starting state.
    pub fn new(config: RobotConfig, position: i32, charge: f64) -> Result<Self, TickError> {
        let mut robot = RobotAutonomy::new(config);
        robot.update(Position::new(position, 0), Charge(charge))?;
        Ok(Self {
            robot,
            position,
            charge,
        })
    }

    pub fn robot(&self) -> &RobotAutonomy {
        &self.robot
    }

    /// Apply the last commanded velocity, update the battery, then tick the robot.
    pub fn step(&mut self) -> Result<SimulationStep, TickError> {
        let config = self.robot.config();
        let sim = &config.simulation;
        let velocity = self.robot.movement().velocity;

        self.position = self.position.saturating_add(velocity);
        self.charge -= sim.drain_per_unit * f64::from(velocity.unsigned_abs()) + sim.idle_drain;
        if self.robot.is_charging() && self.position == config.recharge_position {
            self.charge += sim.charge_rate;
        }
        self.charge = self.charge.clamp(0.0, config.full_battery.max(0.0));

        let report = self
            .robot
            .update(Position::new(self.position, velocity), Charge(self.charge))?;

        let step = SimulationStep {
            tick: report.tick,
            position: self.position,
            charge: self.charge,
            velocity: self.robot.movement().velocity,
            charging: self.robot.is_charging(),
            passes: report.passes,
        };
        tracing::trace!(?step, "simulation step");
        Ok(step)
    }

    pub fn run(&mut self, ticks: u64) -> Result<Vec<SimulationStep>, TickError> {
        (0..ticks).map(|_| self.step()).collect()
    }
}
