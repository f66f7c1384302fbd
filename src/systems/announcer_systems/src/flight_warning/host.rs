use std::fmt::{Debug, Formatter};
use std::time::Duration;
use systems::shared::Vector3;
use systems::sound_pack::AssetHandle;
use uom::si::f64::*;
use uom::si::length::{foot, meter};

/// Spatial query against the host's world, e.g. a physics ray cast.
pub trait ObstacleProbe {
    /// Distance from `origin` to the first obstacle along `direction` (a unit vector), or `None`
    /// when nothing is hit within `max_distance`.
    fn obstacle_distance(
        &self,
        origin: Vector3,
        direction: Vector3,
        max_distance: Length,
    ) -> Option<Length>;
}

pub trait UnitSystem {
    fn is_imperial(&self) -> bool;
}

/// The host's audio output. A single voice channel is assumed.
pub trait AudioSink {
    fn play(&mut self, asset: &AssetHandle, volume: f64);
    fn is_playing(&self) -> bool;
    fn stop(&mut self);
}

/// Data unowned by the announcer which is needed to handle a single tick.
pub struct UpdateContext<'a> {
    delta: Duration,
    imperial: bool,
    obstacle_probe: Option<&'a dyn ObstacleProbe>,
}

impl<'a> UpdateContext<'a> {
    pub fn new(
        delta: Duration,
        imperial: bool,
        obstacle_probe: Option<&'a dyn ObstacleProbe>,
    ) -> Self {
        Self {
            delta,
            imperial,
            obstacle_probe,
        }
    }

    /// Builds a context from optional host capabilities. A host without a unit system
    /// configuration is treated as metric.
    pub fn from_host(
        delta: Duration,
        unit_system: Option<&dyn UnitSystem>,
        obstacle_probe: Option<&'a dyn ObstacleProbe>,
    ) -> Self {
        Self::new(
            delta,
            unit_system.map_or(false, |u| u.is_imperial()),
            obstacle_probe,
        )
    }

    pub fn delta(&self) -> Duration {
        self.delta
    }

    pub fn is_imperial(&self) -> bool {
        self.imperial
    }

    /// Converts a height into the unit callout thresholds are expressed in.
    pub fn display_altitude(&self, height: Length) -> f64 {
        if self.imperial {
            height.get::<foot>()
        } else {
            height.get::<meter>()
        }
    }

    /// Without a probe nothing is ever hit.
    pub fn obstacle_distance(
        &self,
        origin: Vector3,
        direction: Vector3,
        max_distance: Length,
    ) -> Option<Length> {
        self.obstacle_probe
            .and_then(|probe| probe.obstacle_distance(origin, direction, max_distance))
    }
}

impl<'a> Debug for UpdateContext<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateContext")
            .field("delta", &self.delta)
            .field("imperial", &self.imperial)
            .field("obstacle_probe", &self.obstacle_probe.is_some())
            .finish()
    }
}
