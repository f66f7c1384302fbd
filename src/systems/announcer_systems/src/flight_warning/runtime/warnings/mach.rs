use super::*;

#[derive(Default)]
pub(in crate::flight_warning::runtime) struct MachCalloutActivation {
    emitted: Vec<Callout>,
}

impl MachCalloutActivation {
    pub fn update(
        &mut self,
        signals: &impl MachSpeed,
        history: &SignalHistory,
        config: &CalloutConfig,
    ) {
        self.emitted.clear();
        let previous = history.mach();
        let current = signals.mach_number();

        if previous.is_supersonic()
            && !current.is_supersonic()
            && config.is_enabled(Callout::Subsonic)
        {
            self.emitted.push(Callout::Subsonic);
        }

        if current.band() > previous.band() {
            if let Some(callout) = Callout::mach(current.band()) {
                if config.is_enabled(callout) {
                    self.emitted.push(callout);
                }
            }
        }
    }
}

impl CalloutEmitter for MachCalloutActivation {
    fn emitted(&self) -> &[Callout] {
        &self.emitted
    }
}
