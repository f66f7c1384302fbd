use super::signals::*;
use systems::shared::{MachNumber, Vector3};
use uom::si::f64::*;
use uom::si::length::meter;
use uom::si::ratio::ratio;
use uom::si::velocity::meter_per_second;

/// Speed of sound at sea level in the standard atmosphere.
pub const STANDARD_SPEED_OF_SOUND_MPS: f64 = 340.29;

/// Physical state of the landing gear as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GearState {
    LockedRetracted,
    Extending,
    LockedExtended,
    Retracting,
    /// Gear that retracts into a fixed stowage position, e.g. on amphibians.
    Stowed,
    Damaged,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GearPosition {
    DownLocked,
    UpLocked,
    Transient,
}

impl GearState {
    pub fn position(&self) -> GearPosition {
        match self {
            GearState::LockedExtended => GearPosition::DownLocked,
            GearState::LockedRetracted | GearState::Stowed => GearPosition::UpLocked,
            GearState::Extending | GearState::Retracting | GearState::Damaged => {
                GearPosition::Transient
            }
        }
    }
}

/// One tick worth of flight state pushed by the host.
#[derive(Clone, Debug, PartialEq)]
pub struct FlightSample {
    position: Vector3,
    velocity: Vector3,
    radar_altitude: Length,
    airspeed: Velocity,
    speed_of_sound: Velocity,
    throttle: Option<Ratio>,
    gear_deployed: bool,
    gear_state: GearState,
    forward_pitch: f64,
    ground_contact: Vec<bool>,
}

impl FlightSample {
    pub fn new() -> Self {
        Self {
            position: Vector3::ZERO,
            velocity: Vector3::ZERO,
            radar_altitude: Length::new::<meter>(0.),
            airspeed: Velocity::new::<meter_per_second>(0.),
            speed_of_sound: Velocity::new::<meter_per_second>(STANDARD_SPEED_OF_SOUND_MPS),
            throttle: None,
            gear_deployed: true,
            gear_state: GearState::LockedExtended,
            forward_pitch: 0.,
            ground_contact: vec![true, true, true],
        }
    }

    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
    }

    pub fn set_velocity(&mut self, velocity: Vector3) {
        self.velocity = velocity;
    }

    pub fn set_radar_altitude(&mut self, radar_altitude: Length) {
        self.radar_altitude = radar_altitude;
    }

    pub fn set_airspeed(&mut self, airspeed: Velocity) {
        self.airspeed = airspeed;
    }

    pub fn set_speed_of_sound(&mut self, speed_of_sound: Velocity) {
        self.speed_of_sound = speed_of_sound;
    }

    /// `None` when the host cannot read the throttle.
    pub fn set_throttle(&mut self, throttle: Option<Ratio>) {
        self.throttle = throttle;
    }

    pub fn set_gear_deployed(&mut self, gear_deployed: bool) {
        self.gear_deployed = gear_deployed;
    }

    pub fn set_gear_state(&mut self, gear_state: GearState) {
        self.gear_state = gear_state;
    }

    pub fn set_forward_pitch(&mut self, forward_pitch: f64) {
        self.forward_pitch = forward_pitch;
    }

    pub fn set_ground_contact(&mut self, ground_contact: Vec<bool>) {
        self.ground_contact = ground_contact;
    }
}

impl Default for FlightSample {
    fn default() -> Self {
        FlightSample::new()
    }
}

impl RadarAltitude for FlightSample {
    fn radar_altitude(&self) -> Length {
        self.radar_altitude
    }
}

impl MachSpeed for FlightSample {
    fn mach_number(&self) -> MachNumber {
        MachNumber::from_speeds(self.airspeed, self.speed_of_sound)
    }
}

impl GearCommand for FlightSample {
    fn gear_deployed(&self) -> bool {
        self.gear_deployed
    }
}

impl GearPhysicalState for FlightSample {
    fn gear_state(&self) -> GearState {
        self.gear_state
    }
}

impl WeightOnWheels for FlightSample {
    fn ground_contact(&self) -> &[bool] {
        &self.ground_contact
    }
}

impl Kinematics for FlightSample {
    fn position(&self) -> Vector3 {
        self.position
    }

    fn velocity(&self) -> Vector3 {
        self.velocity
    }
}

impl ForwardPitch for FlightSample {
    fn forward_pitch(&self) -> f64 {
        self.forward_pitch
    }
}

impl ThrottleLever for FlightSample {
    fn throttle(&self) -> Ratio {
        self.throttle.unwrap_or_else(|| Ratio::new::<ratio>(1.))
    }
}
