use super::config::CalloutConfig;
use super::host::{AudioSink, UpdateContext};
use super::signals::*;
use std::time::Duration;
use systems::flight_warning::callouts::{Callout, CalloutEvent};
use systems::sound_pack::ResolvedSoundPack;
use uom::si::ratio::ratio;
use warnings::*;

mod audio;
mod history;
mod warnings;

pub use audio::{CalloutScheduler, PlaybackEvent};
pub use history::SignalHistory;

/// The engine state for one tracked aircraft.
///
/// A runtime is created when an aircraft is acquired and dropped when it is released, which
/// resets every latch and timer at once.
pub struct AnnouncerRuntime {
    now: Duration,
    history: SignalHistory,

    altitude_callouts: AltitudeCalloutActivation,
    decision_height: DecisionHeightActivation,
    mach_callouts: MachCalloutActivation,
    gear_transitions: GearTransitionActivation,
    contact: ContactActivation,
    retard: RetardActivation,
    cleared_to_land: ClearedToLandActivation,
    proximity_warning: ProximityWarningActivation,

    scheduler: CalloutScheduler,
    emitted: Vec<Callout>,
}

impl AnnouncerRuntime {
    pub fn new(
        signals: &(impl RadarAltitude + MachSpeed + GearCommand + GearPhysicalState),
    ) -> Self {
        Self {
            now: Duration::ZERO,
            history: SignalHistory::seeded_from(signals),
            altitude_callouts: AltitudeCalloutActivation::new(),
            decision_height: DecisionHeightActivation::default(),
            mach_callouts: MachCalloutActivation::default(),
            gear_transitions: GearTransitionActivation::default(),
            contact: ContactActivation::default(),
            retard: RetardActivation::default(),
            cleared_to_land: ClearedToLandActivation::default(),
            proximity_warning: ProximityWarningActivation::default(),
            scheduler: CalloutScheduler::new(),
            emitted: Vec::new(),
        }
    }

    /// Runs every detector against the sample, queues what fired and then advances the history.
    pub fn update(
        &mut self,
        context: &UpdateContext,
        signals: &(impl RadarAltitude
              + MachSpeed
              + GearCommand
              + GearPhysicalState
              + WeightOnWheels
              + Kinematics
              + ForwardPitch
              + ThrottleLever),
        config: &CalloutConfig,
    ) {
        self.now += context.delta();
        let now = self.now;
        let history = &self.history;

        self.altitude_callouts.update(context, signals, history, config);
        self.decision_height.update(now, context, signals, history, config);
        self.mach_callouts.update(signals, history, config);
        self.gear_transitions.update(signals, history, config);
        self.contact.update(signals, history, config);
        self.retard.update(now, context, signals, history, config);
        self.cleared_to_land.update(now, context, signals, history, config);
        self.proximity_warning.update(now, context, signals, history, config);

        self.emitted.clear();
        let sheets: [&dyn CalloutEmitter; 8] = [
            &self.altitude_callouts,
            &self.decision_height,
            &self.mach_callouts,
            &self.gear_transitions,
            &self.contact,
            &self.retard,
            &self.cleared_to_land,
            &self.proximity_warning,
        ];
        for sheet in sheets.iter() {
            self.emitted.extend_from_slice(sheet.emitted());
        }
        for callout in &self.emitted {
            self.scheduler.enqueue(CalloutEvent::new(*callout));
        }

        self.update_history(signals);
    }

    /// Advances time and the previous-tick signals without running any detector.
    pub fn track(
        &mut self,
        context: &UpdateContext,
        signals: &(impl RadarAltitude
              + MachSpeed
              + GearCommand
              + GearPhysicalState
              + WeightOnWheels),
    ) {
        self.now += context.delta();
        self.emitted.clear();
        self.history.update_signals(signals);
    }

    fn update_history(
        &mut self,
        signals: &(impl RadarAltitude
              + MachSpeed
              + GearCommand
              + GearPhysicalState
              + WeightOnWheels),
    ) {
        let now = self.now;
        self.history.update_contact_arming(&self.contact);
        self.history.update_approach(now, signals, &self.decision_height);
        self.history.update_retard(now, &self.retard);
        self.history.update_cleared_to_land(now, &self.cleared_to_land);
        self.history.update_pull_up(now, &self.proximity_warning);
        self.history.update_signals(signals);
    }

    /// Advances the playback queue.
    pub fn update_playback(
        &mut self,
        signals: &impl ThrottleLever,
        audio: &mut dyn AudioSink,
        sound_pack: &ResolvedSoundPack,
        volume: f64,
    ) -> Option<PlaybackEvent> {
        self.scheduler
            .update(signals.throttle().get::<ratio>(), audio, sound_pack, volume)
    }

    pub fn enqueue(&mut self, callout: Callout) {
        self.scheduler.enqueue(CalloutEvent::new(callout));
    }

    /// Callouts fired during the last update, in evaluation order.
    pub fn emitted(&self) -> &[Callout] {
        &self.emitted
    }

    pub fn scheduler(&self) -> &CalloutScheduler {
        &self.scheduler
    }

    pub fn history(&self) -> &SignalHistory {
        &self.history
    }
}
