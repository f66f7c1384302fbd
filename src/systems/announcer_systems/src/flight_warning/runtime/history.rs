use super::warnings::{
    ClearedToLandCallout, ContactArming, DecisionHeightCallouts, ProximityWarning, RetardLatch,
};
use crate::flight_warning::parameters::GearState;
use crate::flight_warning::signals::*;
use std::time::Duration;
use systems::flight_warning::logic::{LastFired, MemoryNode};
use systems::shared::MachNumber;
use uom::si::f64::*;

/// Previous-tick values and latches the detectors compare against.
///
/// Only [`AnnouncerRuntime`](super::AnnouncerRuntime) mutates the history, once at the end of each
/// tick, after every sheet has evaluated.
#[derive(Clone, Debug, PartialEq)]
pub struct SignalHistory {
    radar_altitude: Length,
    mach: MachNumber,
    gear_deployed: bool,
    gear_state: GearState,
    grounded: bool,
    contact_armed: MemoryNode,
    retard_armed: MemoryNode,
    minimums_played: MemoryNode,
    hundred_above_played: MemoryNode,
    minimums: LastFired,
    hundred_above: LastFired,
    cleared_to_land: LastFired,
    retard: LastFired,
    pull_up: LastFired,
}

impl SignalHistory {
    /// Starts a fresh history for a newly tracked aircraft. The current sample becomes the previous
    /// tick so nothing crosses on the first update.
    pub fn seeded_from(
        signals: &(impl RadarAltitude + MachSpeed + GearCommand + GearPhysicalState),
    ) -> Self {
        Self {
            radar_altitude: signals.radar_altitude(),
            mach: signals.mach_number(),
            gear_deployed: signals.gear_deployed(),
            gear_state: signals.gear_state(),
            grounded: true,
            contact_armed: MemoryNode::new(false),
            retard_armed: MemoryNode::new(false),
            minimums_played: MemoryNode::new(false),
            hundred_above_played: MemoryNode::new(false),
            minimums: LastFired::default(),
            hundred_above: LastFired::default(),
            cleared_to_land: LastFired::default(),
            retard: LastFired::default(),
            pull_up: LastFired::default(),
        }
    }

    pub fn update_signals(
        &mut self,
        signals: &(impl RadarAltitude
              + MachSpeed
              + GearCommand
              + GearPhysicalState
              + WeightOnWheels),
    ) {
        self.radar_altitude = signals.radar_altitude();
        self.mach = signals.mach_number();
        self.gear_deployed = signals.gear_deployed();
        self.gear_state = signals.gear_state();
        self.grounded = signals.any_gear_on_ground();
    }

    pub(in crate::flight_warning::runtime) fn update_contact_arming(
        &mut self,
        sheet: &impl ContactArming,
    ) {
        self.contact_armed.update(sheet.arm(), sheet.touchdown());
    }

    /// Played flags are cleared for as long as the gear is commanded up.
    pub(in crate::flight_warning::runtime) fn update_approach(
        &mut self,
        now: Duration,
        signals: &impl GearCommand,
        sheet: &impl DecisionHeightCallouts,
    ) {
        let gear_up = !signals.gear_deployed();

        if sheet.hundred_above_fired() {
            self.hundred_above.record(now);
        }
        self.hundred_above_played.update(sheet.hundred_above_fired(), gear_up);

        if sheet.minimums_fired() {
            self.minimums.record(now);
        }
        self.minimums_played.update(sheet.minimums_fired(), gear_up);
    }

    pub(in crate::flight_warning::runtime) fn update_retard(
        &mut self,
        now: Duration,
        sheet: &impl RetardLatch,
    ) {
        self.retard_armed.update(sheet.retard_set(), sheet.retard_reset());
        if sheet.retard_fired() {
            self.retard.record(now);
        }
    }

    pub(in crate::flight_warning::runtime) fn update_cleared_to_land(
        &mut self,
        now: Duration,
        sheet: &impl ClearedToLandCallout,
    ) {
        if sheet.cleared_to_land_fired() {
            self.cleared_to_land.record(now);
        }
    }

    pub(in crate::flight_warning::runtime) fn update_pull_up(
        &mut self,
        now: Duration,
        sheet: &impl ProximityWarning,
    ) {
        if sheet.pull_up_fired() {
            self.pull_up.record(now);
        }
    }

    pub fn radar_altitude(&self) -> Length {
        self.radar_altitude
    }

    pub fn mach(&self) -> MachNumber {
        self.mach
    }

    pub fn gear_deployed(&self) -> bool {
        self.gear_deployed
    }

    pub fn gear_state(&self) -> GearState {
        self.gear_state
    }

    pub fn was_grounded(&self) -> bool {
        self.grounded
    }

    pub fn contact_armed(&self) -> bool {
        self.contact_armed.output()
    }

    pub fn retard_latch(&self) -> MemoryNode {
        self.retard_armed
    }

    pub fn minimums_played(&self) -> bool {
        self.minimums_played.output()
    }

    pub fn hundred_above_played(&self) -> bool {
        self.hundred_above_played.output()
    }

    pub fn minimums(&self) -> &LastFired {
        &self.minimums
    }

    pub fn hundred_above(&self) -> &LastFired {
        &self.hundred_above
    }

    pub fn cleared_to_land(&self) -> &LastFired {
        &self.cleared_to_land
    }

    pub fn retard(&self) -> &LastFired {
        &self.retard
    }

    pub fn pull_up(&self) -> &LastFired {
        &self.pull_up
    }
}
