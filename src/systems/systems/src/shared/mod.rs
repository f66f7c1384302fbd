use std::ops::{Add, Mul};
use uom::si::f64::*;
use uom::si::velocity::meter_per_second;

/// A vector in the host's world frame, in metres or metres per second. The y axis points up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 {
        x: 0.,
        y: 0.,
        z: 0.,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Magnitude of the vector projected onto the horizontal (x/z) plane.
    pub fn horizontal_magnitude(&self) -> f64 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    /// Returns the unit vector pointing the same way, or `None` for a zero-length vector.
    pub fn normalize(&self) -> Option<Self> {
        let magnitude = self.magnitude();
        if magnitude > f64::EPSILON && magnitude.is_finite() {
            Some(*self * (1. / magnitude))
        } else {
            None
        }
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Self) -> Self::Output {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f64) -> Self::Output {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct MachNumber(pub f64);

impl MachNumber {
    /// Computes the Mach number for an airspeed. A non-positive speed of sound yields Mach 0.
    pub fn from_speeds(airspeed: Velocity, speed_of_sound: Velocity) -> Self {
        let speed_of_sound = speed_of_sound.get::<meter_per_second>();
        if speed_of_sound > 0. {
            MachNumber(airspeed.get::<meter_per_second>() / speed_of_sound)
        } else {
            MachNumber(0.)
        }
    }

    /// The whole-number Mach band, i.e. `floor(mach)`.
    pub fn band(&self) -> i32 {
        self.0.floor() as i32
    }

    pub fn is_supersonic(&self) -> bool {
        self.0 >= 1.
    }
}

impl From<f64> for MachNumber {
    fn from(value: f64) -> Self {
        MachNumber(value)
    }
}
