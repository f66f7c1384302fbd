use super::parameters::GearState;
use systems::shared::{MachNumber, Vector3};
use uom::si::f64::*;

pub trait RadarAltitude {
    /// Height above the terrain directly below the aircraft.
    fn radar_altitude(&self) -> Length;
}

pub trait MachSpeed {
    fn mach_number(&self) -> MachNumber;
}

pub trait GearCommand {
    /// True while the gear lever is in the down position.
    fn gear_deployed(&self) -> bool;
}

pub trait GearPhysicalState {
    fn gear_state(&self) -> GearState;
}

pub trait WeightOnWheels {
    /// One flag per landing gear unit, true while that unit touches the ground. Aircraft
    /// without wheels report an empty slice.
    fn ground_contact(&self) -> &[bool];

    fn any_gear_on_ground(&self) -> bool {
        self.ground_contact().iter().any(|c| *c)
    }

    fn airborne(&self) -> bool {
        !self.any_gear_on_ground()
    }
}

pub trait Kinematics {
    fn position(&self) -> Vector3;
    fn velocity(&self) -> Vector3;
}

pub trait ForwardPitch {
    /// Vertical component of the aircraft's unit forward vector.
    fn forward_pitch(&self) -> f64;
}

pub trait ThrottleLever {
    /// Throttle position in [0, 1].
    fn throttle(&self) -> Ratio;
}
