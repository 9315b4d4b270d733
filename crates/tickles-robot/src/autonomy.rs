use tickles_bt::{Autonomy, BtNode, FallBack, Sequence, TickReport};
use tickles_core::{MutableRegistry, Mutator, TickError};

use crate::config::RobotConfig;
use crate::model::{Charge, ChargingState, Movement, Position};
use crate::nodes::{BatteryOk, GoAboutBusiness, MoveToRechargeStation};

/// Assembled robot: input, internal and output cells plus the tick driver.
///
/// Tree shape:
///
/// ```text
/// Sequence
/// ├── FallBack            (ensure battery)
/// │   ├── BatteryOk
/// │   └── MoveToRechargeStation
/// └── GoAboutBusiness
/// ```
pub struct RobotAutonomy {
    position: Mutator<Position>,
    charge: Mutator<Charge>,
    charging: Mutator<ChargingState>,
    movement: Mutator<Movement>,
    autonomy: Autonomy,
    config: RobotConfig,
}

impl RobotAutonomy {
    pub fn new(config: RobotConfig) -> Self {
        let registry = MutableRegistry::new();
        let position = registry.mutable_default::<Position>();
        let charge = registry.mutable_default::<Charge>();
        let charging = registry.mutable_default::<ChargingState>();
        let movement = registry.mutable_default::<Movement>();

        let ensure_battery = FallBack::new(vec![
            Box::new(BatteryOk::new(
                charge.clone(),
                charging.clone(),
                config.low_battery,
                config.full_battery,
            )) as Box<dyn BtNode>,
            Box::new(MoveToRechargeStation::new(
                position.clone(),
                movement.clone(),
                config.recharge_position,
                config.max_speed,
            )),
        ]);
        let root = Sequence::new(vec![
            Box::new(ensure_battery) as Box<dyn BtNode>,
            Box::new(GoAboutBusiness::new(
                position.clone(),
                movement.clone(),
                config.business_velocity,
                config.business_limit,
            )),
        ]);

        tracing::debug!(cells = registry.len(), "robot autonomy assembled");
        let autonomy = Autonomy::new(Box::new(root), registry).with_config(config.autonomy_config());

        Self {
            position,
            charge,
            charging,
            movement,
            autonomy,
            config,
        }
    }

    /// One external tick with both inputs replaced.
    pub fn update(&mut self, position: Position, charge: Charge) -> Result<TickReport, TickError> {
        self.position.set(position);
        self.charge.set(charge);
        self.tick()
    }

    pub fn set_position(&mut self, position: Position) -> Result<TickReport, TickError> {
        self.position.set(position);
        self.tick()
    }

    pub fn set_charge(&mut self, charge: Charge) -> Result<TickReport, TickError> {
        self.charge.set(charge);
        self.tick()
    }

    /// Run the convergence loop with whatever inputs are currently staged.
    pub fn tick(&mut self) -> Result<TickReport, TickError> {
        self.autonomy.tick()
    }

    pub fn movement(&self) -> Movement {
        self.movement.get()
    }

    pub fn is_charging(&self) -> bool {
        self.charging.get().0
    }

    pub fn position(&self) -> Position {
        self.position.get()
    }

    pub fn charge(&self) -> Charge {
        self.charge.get()
    }

    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    pub fn autonomy(&self) -> &Autonomy {
        &self.autonomy
    }
}

impl Default for RobotAutonomy {
    fn default() -> Self {
        Self::new(RobotConfig::default())
    }
}
