use super::*;
use std::time::Duration;
use systems::flight_warning::logic::crossed_below;
use uom::si::ratio::ratio;

/// Throttle at or below this is considered idle.
pub const THROTTLE_IDLE: f64 = 0.05;
const RETARD_REPEAT: Duration = Duration::from_secs(2);

pub(in crate::flight_warning::runtime) trait RetardLatch {
    fn retard_set(&self) -> bool;
    fn retard_reset(&self) -> bool;
    fn retard_fired(&self) -> bool;
}

/// Calls "retard" in the flare until the throttle reaches idle.
#[derive(Default)]
pub(in crate::flight_warning::runtime) struct RetardActivation {
    set: bool,
    reset: bool,
    fired: bool,
    emitted: Vec<Callout>,
}

impl RetardActivation {
    pub fn update(
        &mut self,
        now: Duration,
        context: &UpdateContext,
        signals: &(impl RadarAltitude + GearCommand + ThrottleLever),
        history: &SignalHistory,
        config: &CalloutConfig,
    ) {
        self.emitted.clear();
        let (previous, current) = display_altitudes(context, signals, history);
        let throttle_idle = signals.throttle().get::<ratio>() <= THROTTLE_IDLE;

        self.set = gear_allows_altitude_callouts(signals, config)
            && crossed_below(previous, current, config.retard_altitude());
        self.reset = throttle_idle || current > config.retard_altitude();

        let mut latch = history.retard_latch();
        let armed = latch.update(self.set, self.reset);

        self.fired = armed
            && !throttle_idle
            && config.is_enabled(Callout::Retard)
            && !history.retard().within(now, RETARD_REPEAT);

        if self.fired {
            self.emitted.push(Callout::Retard);
        }
    }
}

impl RetardLatch for RetardActivation {
    fn retard_set(&self) -> bool {
        self.set
    }

    fn retard_reset(&self) -> bool {
        self.reset
    }

    fn retard_fired(&self) -> bool {
        self.fired
    }
}

impl CalloutEmitter for RetardActivation {
    fn emitted(&self) -> &[Callout] {
        &self.emitted
    }
}
