//! A simulated robot whose control logic is a reactive behavior tree.
//!
//! The robot goes about its business unless the battery check fails, in which
//! case it drives to the recharge station and stays there until fully charged.
//! [`RobotAutonomy`] is the assembler: it allocates the cells, wires them into
//! the leaf nodes and owns the tick driver.

#![forbid(unsafe_code)]

pub mod autonomy;
pub mod config;
pub mod model;
pub mod nodes;
pub mod sim;

pub use autonomy::RobotAutonomy;
pub use config::{RobotConfig, SimulationConfig};
pub use model::{Charge, ChargingState, Movement, Position};
pub use nodes::{BatteryOk, GoAboutBusiness, MoveToRechargeStation};
pub use sim::{Simulation, SimulationStep};
