use super::*;
use crate::flight_warning::parameters::GearPosition;

/// Announces gear lever movements and the gear reaching a locked position.
#[derive(Default)]
pub(in crate::flight_warning::runtime) struct GearTransitionActivation {
    emitted: Vec<Callout>,
}

impl GearTransitionActivation {
    pub fn update(
        &mut self,
        signals: &(impl GearCommand + GearPhysicalState),
        history: &SignalHistory,
        config: &CalloutConfig,
    ) {
        self.emitted.clear();

        let deployed = signals.gear_deployed();
        if deployed != history.gear_deployed() {
            let callout = if deployed {
                Callout::GearDown
            } else {
                Callout::GearUp
            };
            tracing::debug!(%callout, "gear lever moved");
            if config.is_enabled(callout) {
                self.emitted.push(callout);
            }
        }

        let state = signals.gear_state();
        if state != history.gear_state() {
            let callout = match state.position() {
                GearPosition::DownLocked => Some(Callout::GearDownAndLocked),
                GearPosition::UpLocked => Some(Callout::GearUpAndLocked),
                GearPosition::Transient => None,
            };
            tracing::debug!(from = ?history.gear_state(), to = ?state, "gear state changed");
            if let Some(callout) = callout.filter(|c| config.is_enabled(*c)) {
                self.emitted.push(callout);
            }
        }
    }
}

impl CalloutEmitter for GearTransitionActivation {
    fn emitted(&self) -> &[Callout] {
        &self.emitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight_warning::parameters::{FlightSample, GearState};
    use crate::flight_warning::test::*;

    fn run(
        config: &CalloutConfig,
        initial: FlightSample,
        samples: &[FlightSample],
    ) -> Vec<Vec<Callout>> {
        let mut history = SignalHistory::seeded_from(&initial);
        let mut sheet = GearTransitionActivation::default();
        samples
            .iter()
            .map(|sample| {
                sheet.update(sample, &history, config);
                history.update_signals(sample);
                sheet.emitted().to_vec()
            })
            .collect()
    }

    fn lever_down(state: GearState) -> FlightSample {
        test_bed().airborne().gear_lever_down().gear_state(state).sample()
    }

    fn lever_up(state: GearState) -> FlightSample {
        test_bed().airborne().gear_lever_up().gear_state(state).sample()
    }

    #[test]
    fn extension_fires_down_and_locked_only_when_locked() {
        let fired = run(
            &CalloutConfig::default(),
            lever_down(GearState::LockedRetracted),
            &[
                lever_down(GearState::Extending),
                lever_down(GearState::LockedExtended),
            ],
        );
        assert_eq!(fired, vec![vec![], vec![Callout::GearDownAndLocked]]);
    }

    #[test]
    fn full_retraction_cycle() {
        let fired = run(
            &CalloutConfig::default(),
            test_bed().airborne().gear_down().sample(),
            &[
                lever_up(GearState::LockedExtended),
                lever_up(GearState::Retracting),
                test_bed().airborne().gear_up().sample(),
            ],
        );
        assert_eq!(
            fired,
            vec![vec![Callout::GearUp], vec![], vec![Callout::GearUpAndLocked]]
        );
    }

    #[test]
    fn stowed_counts_as_up_and_locked() {
        let fired = run(
            &CalloutConfig::default(),
            lever_up(GearState::Retracting),
            &[lever_up(GearState::Stowed)],
        );
        assert_eq!(fired, vec![vec![Callout::GearUpAndLocked]]);
    }

    #[test]
    fn damage_is_not_announced() {
        let fired = run(
            &CalloutConfig::default(),
            test_bed().airborne().gear_down().sample(),
            &[lever_down(GearState::Damaged)],
        );
        assert_eq!(fired, vec![Vec::<Callout>::new()]);
    }

    #[test]
    fn lever_and_lock_in_one_tick_fire_both() {
        let fired = run(
            &CalloutConfig::default(),
            test_bed().airborne().gear_up().sample(),
            &[test_bed().airborne().gear_down().sample()],
        );
        assert_eq!(fired, vec![vec![Callout::GearDown, Callout::GearDownAndLocked]]);
    }

    #[test]
    fn disabled_lever_callout_still_announces_lock() {
        let mut config = CalloutConfig::default();
        config.set_enabled(Callout::GearDown, false);
        let fired = run(
            &config,
            test_bed().airborne().gear_up().sample(),
            &[test_bed().airborne().gear_down().sample()],
        );
        assert_eq!(fired, vec![vec![Callout::GearDownAndLocked]]);
    }
}
