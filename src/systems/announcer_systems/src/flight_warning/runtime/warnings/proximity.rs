use super::*;
use std::time::Duration;
use uom::si::f64::*;
use uom::si::length::meter;

const PULL_UP_COOLDOWN: Duration = Duration::from_millis(1_500);
/// Vertical component of the forward vector above which the nose is considered pitched up, about
/// 20 degrees.
const PITCH_INHIBIT: f64 = 0.34;
const LOOK_AHEAD_BASE_SECONDS: f64 = 3.;
const MIN_SINK_RATE_MPS: f64 = 1.;
const MIN_FORWARD_LOOK_SPEED_MPS: f64 = 30.;

pub(in crate::flight_warning::runtime) trait ProximityWarning {
    fn pull_up_fired(&self) -> bool;
}

/// Predictive "pull up" from either the time to impact at the current sink rate or an obstacle
/// ahead along the flight path.
#[derive(Default)]
pub(in crate::flight_warning::runtime) struct ProximityWarningActivation {
    sink_rate_mode: bool,
    forward_look_mode: bool,
    fired: bool,
    emitted: Vec<Callout>,
}

impl ProximityWarningActivation {
    pub fn update(
        &mut self,
        now: Duration,
        context: &UpdateContext,
        signals: &(impl RadarAltitude + Kinematics + ForwardPitch + WeightOnWheels),
        history: &SignalHistory,
        config: &CalloutConfig,
    ) {
        self.emitted.clear();
        self.sink_rate_mode = false;
        self.forward_look_mode = false;
        self.fired = false;

        if !config.is_enabled(Callout::PullUp)
            || history.pull_up().within(now, PULL_UP_COOLDOWN)
            || signals.forward_pitch() > PITCH_INHIBIT
            || signals.any_gear_on_ground()
        {
            return;
        }

        let look_ahead_seconds = LOOK_AHEAD_BASE_SECONDS * config.pull_up_sensitivity();
        let velocity = signals.velocity();

        let sink_rate = -velocity.y;
        if sink_rate > MIN_SINK_RATE_MPS {
            let time_to_impact = signals.radar_altitude().get::<meter>() / sink_rate;
            self.sink_rate_mode = time_to_impact < look_ahead_seconds;
        }

        if velocity.horizontal_magnitude() > MIN_FORWARD_LOOK_SPEED_MPS {
            if let Some(direction) = velocity.normalize() {
                let look_ahead = Length::new::<meter>(velocity.magnitude() * look_ahead_seconds);
                let origin = signals.position() + direction * config.probe_offset().get::<meter>();
                self.forward_look_mode = context
                    .obstacle_distance(origin, direction, look_ahead)
                    .map_or(false, |distance| distance <= look_ahead);
            }
        }

        self.fired = self.sink_rate_mode || self.forward_look_mode;
        if self.fired {
            tracing::debug!(
                sink_rate = self.sink_rate_mode,
                forward_look = self.forward_look_mode,
                "pull up"
            );
            self.emitted.push(Callout::PullUp);
        }
    }
}

impl ProximityWarning for ProximityWarningActivation {
    fn pull_up_fired(&self) -> bool {
        self.fired
    }
}

impl CalloutEmitter for ProximityWarningActivation {
    fn emitted(&self) -> &[Callout] {
        &self.emitted
    }
}
