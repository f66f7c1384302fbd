use super::*;
use crate::flight_warning::parameters::GearPosition;
use std::time::Duration;
use systems::flight_warning::logic::{crossed_below, ThresholdCrossingDetector};

/// Hundred-above and minimums are not repeated within this window.
const DECISION_HEIGHT_RETRIGGER: Duration = Duration::from_secs(3);
const CLEARED_TO_LAND_RETRIGGER: Duration = Duration::from_secs(3);
const HUNDRED_ABOVE_OFFSET: f64 = 100.;

pub(in crate::flight_warning::runtime) struct AltitudeCalloutActivation {
    bands: Vec<(Callout, ThresholdCrossingDetector<f64>)>,
    emitted: Vec<Callout>,
}

impl AltitudeCalloutActivation {
    pub fn new() -> Self {
        Self {
            bands: Callout::ALTITUDE_BANDS
                .iter()
                .map(|(callout, threshold)| (*callout, ThresholdCrossingDetector::new(*threshold)))
                .collect(),
            emitted: Vec::new(),
        }
    }

    pub fn update(
        &mut self,
        context: &UpdateContext,
        signals: &(impl RadarAltitude + GearCommand),
        history: &SignalHistory,
        config: &CalloutConfig,
    ) {
        self.emitted.clear();
        if !gear_allows_altitude_callouts(signals, config) {
            return;
        }

        let (previous, current) = display_altitudes(context, signals, history);
        for (callout, detector) in &self.bands {
            let callout = match callout {
                Callout::Altitude2500 => Callout::altitude_2500(config.altitude_2500_style()),
                c => *c,
            };
            if detector.update(previous, current, config.is_enabled(callout)) {
                self.emitted.push(callout);
            }
        }
    }
}

impl CalloutEmitter for AltitudeCalloutActivation {
    fn emitted(&self) -> &[Callout] {
        &self.emitted
    }
}

pub(in crate::flight_warning::runtime) trait DecisionHeightCallouts {
    fn hundred_above_fired(&self) -> bool;
    fn minimums_fired(&self) -> bool;
}

/// "Hundred above" and "minimums", relative to the configured minimums altitude. Each plays at
/// most once per approach.
#[derive(Default)]
pub(in crate::flight_warning::runtime) struct DecisionHeightActivation {
    hundred_above: bool,
    minimums: bool,
    emitted: Vec<Callout>,
}

impl DecisionHeightActivation {
    pub fn update(
        &mut self,
        now: Duration,
        context: &UpdateContext,
        signals: &(impl RadarAltitude + GearCommand),
        history: &SignalHistory,
        config: &CalloutConfig,
    ) {
        self.emitted.clear();
        self.hundred_above = false;
        self.minimums = false;
        if !gear_allows_altitude_callouts(signals, config) {
            return;
        }

        let (previous, current) = display_altitudes(context, signals, history);
        let minimums = ThresholdCrossingDetector::new(config.minimums_altitude());
        let hundred_above =
            ThresholdCrossingDetector::new(config.minimums_altitude() + HUNDRED_ABOVE_OFFSET);

        self.hundred_above = hundred_above.update(
            previous,
            current,
            config.is_enabled(Callout::HundredAbove),
        ) && !history.hundred_above_played()
            && !history.hundred_above().within(now, DECISION_HEIGHT_RETRIGGER);

        self.minimums = minimums.update(previous, current, config.is_enabled(Callout::Minimums))
            && !history.minimums_played()
            && !history.minimums().within(now, DECISION_HEIGHT_RETRIGGER);

        if self.hundred_above {
            self.emitted.push(Callout::HundredAbove);
        }
        if self.minimums {
            self.emitted.push(Callout::Minimums);
        }
    }
}

impl DecisionHeightCallouts for DecisionHeightActivation {
    fn hundred_above_fired(&self) -> bool {
        self.hundred_above
    }

    fn minimums_fired(&self) -> bool {
        self.minimums
    }
}

impl CalloutEmitter for DecisionHeightActivation {
    fn emitted(&self) -> &[Callout] {
        &self.emitted
    }
}

pub(in crate::flight_warning::runtime) trait ClearedToLandCallout {
    fn cleared_to_land_fired(&self) -> bool;
}

#[derive(Default)]
pub(in crate::flight_warning::runtime) struct ClearedToLandActivation {
    fired: bool,
    emitted: Vec<Callout>,
}

impl ClearedToLandActivation {
    pub fn update(
        &mut self,
        now: Duration,
        context: &UpdateContext,
        signals: &(impl RadarAltitude + GearCommand + GearPhysicalState + WeightOnWheels),
        history: &SignalHistory,
        config: &CalloutConfig,
    ) {
        self.emitted.clear();
        let (previous, current) = display_altitudes(context, signals, history);

        self.fired = config.is_enabled(Callout::ClearedToLand)
            && gear_allows_altitude_callouts(signals, config)
            && signals.gear_state().position() == GearPosition::DownLocked
            && signals.airborne()
            && crossed_below(previous, current, config.cleared_to_land_altitude())
            && !history
                .cleared_to_land()
                .within(now, CLEARED_TO_LAND_RETRIGGER);

        if self.fired {
            self.emitted.push(Callout::ClearedToLand);
        }
    }
}

impl ClearedToLandCallout for ClearedToLandActivation {
    fn cleared_to_land_fired(&self) -> bool {
        self.fired
    }
}

impl CalloutEmitter for ClearedToLandActivation {
    fn emitted(&self) -> &[Callout] {
        &self.emitted
    }
}
