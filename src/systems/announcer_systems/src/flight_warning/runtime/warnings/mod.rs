use super::history::SignalHistory;
use crate::flight_warning::config::CalloutConfig;
use crate::flight_warning::host::UpdateContext;
use crate::flight_warning::signals::*;
use systems::flight_warning::callouts::Callout;

mod altitude;
mod contact;
mod landing_gear;
mod mach;
mod proximity;
mod retard;

pub(in crate::flight_warning::runtime) use altitude::*;
pub(in crate::flight_warning::runtime) use contact::*;
pub(in crate::flight_warning::runtime) use landing_gear::*;
pub(in crate::flight_warning::runtime) use mach::*;
pub(in crate::flight_warning::runtime) use proximity::*;
pub(in crate::flight_warning::runtime) use retard::*;

/// A sheet that produces callouts. The slice is rebuilt on every update and is empty when
/// nothing fired during the tick.
pub(in crate::flight_warning::runtime) trait CalloutEmitter {
    fn emitted(&self) -> &[Callout];
}

/// Altitude-based callouts are only made with the gear commanded down, unless configured
/// otherwise.
fn gear_allows_altitude_callouts(signals: &impl GearCommand, config: &CalloutConfig) -> bool {
    !config.require_gear_down() || signals.gear_deployed()
}

/// Previous and current radar altitude in display units.
fn display_altitudes(
    context: &UpdateContext,
    signals: &impl RadarAltitude,
    history: &SignalHistory,
) -> (f64, f64) {
    (
        context.display_altitude(history.radar_altitude()),
        context.display_altitude(signals.radar_altitude()),
    )
}
