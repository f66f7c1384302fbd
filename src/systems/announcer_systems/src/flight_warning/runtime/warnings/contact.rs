use super::*;
use uom::si::length::meter;

/// Height above which a takeoff arms the touchdown callout. Rejects bounces while taxiing.
const ARMING_HEIGHT_M: f64 = 2.;

pub(in crate::flight_warning::runtime) trait ContactArming {
    /// The aircraft left the ground and climbed through the arming height.
    fn arm(&self) -> bool;
    /// First ground contact while armed.
    fn touchdown(&self) -> bool;
}

#[derive(Default)]
pub(in crate::flight_warning::runtime) struct ContactActivation {
    arm: bool,
    touchdown: bool,
    emitted: Vec<Callout>,
}

impl ContactActivation {
    pub fn update(
        &mut self,
        signals: &(impl RadarAltitude + WeightOnWheels),
        history: &SignalHistory,
        config: &CalloutConfig,
    ) {
        self.emitted.clear();
        self.arm = false;
        self.touchdown = false;

        if signals.ground_contact().is_empty() {
            return;
        }

        let grounded = signals.any_gear_on_ground();
        let armed = history.contact_armed();

        if !armed && !grounded && signals.radar_altitude().get::<meter>() > ARMING_HEIGHT_M {
            tracing::debug!("contact callout armed");
            self.arm = true;
        }

        if armed && grounded && !history.was_grounded() {
            tracing::debug!("touchdown");
            self.touchdown = true;
            if config.is_enabled(Callout::Contact) {
                self.emitted.push(Callout::Contact);
            }
        }
    }
}

impl ContactArming for ContactActivation {
    fn arm(&self) -> bool {
        self.arm
    }

    fn touchdown(&self) -> bool {
        self.touchdown
    }
}

impl CalloutEmitter for ContactActivation {
    fn emitted(&self) -> &[Callout] {
        &self.emitted
    }
}
