use tickles_bt::{BtNode, BtStatus};
use tickles_core::Mutator;

use crate::model::{Charge, ChargingState, Movement, Position};

/// Succeeds while the battery is usable.
///
/// The charging flag latches: once the charge drops to `low` the node keeps
/// failing until the charge reaches `full`, even if it climbs back above `low`.
pub struct BatteryOk {
    charge: Mutator<Charge>,
    charging: Mutator<ChargingState>,
    low: f64,
    full: f64,
}

impl BatteryOk {
    pub fn new(
        charge: Mutator<Charge>,
        charging: Mutator<ChargingState>,
        low: f64,
        full: f64,
    ) -> Self {
        Self {
            charge,
            charging,
            low,
            full,
        }
    }
}

impl BtNode for BatteryOk {
    fn tick(&mut self) -> BtStatus {
        let Charge(charge) = self.charge.get();
        if charge >= self.full {
            self.charging.set(ChargingState(false));
            return BtStatus::Succeeded;
        }
        if charge <= self.low || self.charging.get().0 {
            self.charging.set(ChargingState(true));
            return BtStatus::Failed;
        }
        BtStatus::Succeeded
    }
}

/// Drives toward the station at no more than `max_speed`, then holds still. Always running.
pub struct MoveToRechargeStation {
    position: Mutator<Position>,
    movement: Mutator<Movement>,
    station: i32,
    max_speed: i32,
}

impl MoveToRechargeStation {
    pub fn new(
        position: Mutator<Position>,
        movement: Mutator<Movement>,
        station: i32,
        max_speed: i32,
    ) -> Self {
        Self {
            position,
            movement,
            station,
            max_speed: max_speed.max(0),
        }
    }
}

impl BtNode for MoveToRechargeStation {
    fn tick(&mut self) -> BtStatus {
        let here = self.position.get().position;
        // Widened so stations and positions at the ends of i32 cannot overflow.
        let distance = i64::from(self.station) - i64::from(here);
        let max_speed = i64::from(self.max_speed);
        let velocity = distance.clamp(-max_speed, max_speed) as i32;
        self.movement.set(Movement::new(velocity));
        BtStatus::Running
    }
}

pub struct GoAboutBusiness {
    position: Mutator<Position>,
    movement: Mutator<Movement>,
    velocity: i32,
    limit: i32,
}

impl GoAboutBusiness {
    pub fn new(
        position: Mutator<Position>,
        movement: Mutator<Movement>,
        velocity: i32,
        limit: i32,
    ) -> Self {
        Self {
            position,
            movement,
            velocity,
            limit,
        }
    }
}

impl BtNode for GoAboutBusiness {
    fn tick(&mut self) -> BtStatus {
        // Past the limit the previous command is left in place.
        if self.position.get().position < self.limit {
            self.movement.set(Movement::new(self.velocity));
        }
        BtStatus::Running
    }
}
