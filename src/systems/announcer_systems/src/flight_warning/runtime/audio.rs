use super::warnings::THROTTLE_IDLE;
use crate::flight_warning::host::AudioSink;
use std::collections::VecDeque;
use systems::flight_warning::callouts::{Callout, CalloutEvent};
use systems::sound_pack::ResolvedSoundPack;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// The callout was handed to the audio output.
    Started(Callout),
    /// The callout was dequeued but the sound pack has no asset for it.
    Missing(Callout),
}

/// Plays callouts one at a time, oldest first.
///
/// Queuing an altitude callout drops any altitude callouts still waiting, so only the most
/// recent height is announced. The callout currently playing is never evicted.
#[derive(Debug, Default)]
pub struct CalloutScheduler {
    pending: VecDeque<CalloutEvent>,
    playing: Option<CalloutEvent>,
}

impl CalloutScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, event: CalloutEvent) {
        if event.is_altitude() {
            let before = self.pending.len();
            self.pending.retain(|pending| !pending.is_altitude());
            let evicted = before - self.pending.len();
            if evicted > 0 {
                tracing::debug!(
                    callout = %event.callout(),
                    evicted,
                    "superseded altitude callouts"
                );
            }
        }
        tracing::debug!(callout = %event.callout(), "callout queued");
        self.pending.push_back(event);
    }

    /// Advances playback by one tick. `throttle` is the current throttle position in [0, 1].
    ///
    /// Nothing new starts while the audio output still reports a sound, including one started
    /// before this scheduler existed.
    pub fn update(
        &mut self,
        throttle: f64,
        audio: &mut dyn AudioSink,
        sound_pack: &ResolvedSoundPack,
        volume: f64,
    ) -> Option<PlaybackEvent> {
        let idle = throttle <= THROTTLE_IDLE;
        if idle {
            let before = self.pending.len();
            self.pending.retain(|pending| pending.callout() != Callout::Retard);
            if self.pending.len() < before {
                tracing::debug!("dropped pending retard at idle");
            }
        }

        if let Some(playing) = self.playing {
            if playing.callout() == Callout::Retard && idle {
                tracing::debug!("retard interrupted at idle");
                audio.stop();
                self.playing = None;
            } else if !audio.is_playing() {
                self.playing = None;
            }
        }
        if self.playing.is_some() || audio.is_playing() {
            return None;
        }

        let next = self.pending.pop_front()?;
        let callout = next.callout();
        match sound_pack.get(callout) {
            Some(asset) => {
                audio.play(asset, volume);
                self.playing = Some(next);
                Some(PlaybackEvent::Started(callout))
            }
            None => {
                tracing::warn!(%callout, "no sound for callout");
                Some(PlaybackEvent::Missing(callout))
            }
        }
    }

    pub fn playing(&self) -> Option<Callout> {
        self.playing.map(|event| event.callout())
    }

    pub fn pending(&self) -> impl Iterator<Item = Callout> + '_ {
        self.pending.iter().map(|event| event.callout())
    }

    pub fn is_idle(&self) -> bool {
        self.playing.is_none() && self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight_warning::test::*;
    use proptest::prelude::*;
    use systems::flight_warning::callouts::CalloutCategory;

    fn pending(scheduler: &CalloutScheduler) -> Vec<Callout> {
        scheduler.pending().collect()
    }

    mod enqueue_tests {
        use super::*;

        #[test]
        fn altitude_callout_replaces_pending_altitudes_only() {
            let mut scheduler = CalloutScheduler::new();
            scheduler.enqueue(Callout::Altitude500.into());
            scheduler.enqueue(Callout::GearDown.into());
            scheduler.enqueue(Callout::Altitude400.into());
            scheduler.enqueue(Callout::Contact.into());
            scheduler.enqueue(Callout::Minimums.into());

            assert_eq!(
                pending(&scheduler),
                vec![Callout::GearDown, Callout::Contact, Callout::Minimums]
            );
        }

        #[test]
        fn other_callouts_never_evict() {
            let mut scheduler = CalloutScheduler::new();
            scheduler.enqueue(Callout::Altitude500.into());
            scheduler.enqueue(Callout::PullUp.into());
            scheduler.enqueue(Callout::PullUp.into());

            assert_eq!(
                pending(&scheduler),
                vec![Callout::Altitude500, Callout::PullUp, Callout::PullUp]
            );
        }

        #[test]
        fn playing_altitude_is_not_evicted() {
            let mut scheduler = CalloutScheduler::new();
            let mut audio = TestAudioSink::new();
            scheduler.enqueue(Callout::Altitude500.into());
            scheduler.update(1., &mut audio, &full_sound_pack(), 1.);
            audio.set_playing(true);

            scheduler.enqueue(Callout::Altitude400.into());

            assert_eq!(scheduler.playing(), Some(Callout::Altitude500));
            assert_eq!(pending(&scheduler), vec![Callout::Altitude400]);
        }

        proptest! {
            #[test]
            fn at_most_one_altitude_callout_is_pending(
                callouts in proptest::collection::vec(
                    prop_oneof![
                        Just(Callout::Altitude100),
                        Just(Callout::Altitude50),
                        Just(Callout::Minimums),
                        Just(Callout::GearDown),
                        Just(Callout::PullUp),
                        Just(Callout::Retard),
                    ],
                    0..50,
                ),
            ) {
                let mut scheduler = CalloutScheduler::new();
                for callout in &callouts {
                    let others_before: Vec<Callout> = pending(&scheduler)
                        .into_iter()
                        .filter(|c| c.category() == CalloutCategory::Other)
                        .collect();

                    scheduler.enqueue((*callout).into());

                    let after = pending(&scheduler);
                    let altitudes = after
                        .iter()
                        .filter(|c| c.category() == CalloutCategory::Altitude)
                        .count();
                    prop_assert!(altitudes <= 1);
                    let others_after: Vec<Callout> = after
                        .iter()
                        .copied()
                        .filter(|c| c.category() == CalloutCategory::Other)
                        .collect();
                    if callout.category() == CalloutCategory::Altitude {
                        prop_assert_eq!(altitudes, 1);
                        prop_assert_eq!(after.last(), Some(callout));
                        prop_assert_eq!(others_after, others_before);
                    }
                }
            }
        }
    }

    mod playback_tests {
        use super::*;

        #[test]
        fn plays_in_order_one_at_a_time() {
            let mut scheduler = CalloutScheduler::new();
            let mut audio = TestAudioSink::new();
            let pack = full_sound_pack();
            scheduler.enqueue(Callout::GearDown.into());
            scheduler.enqueue(Callout::GearDownAndLocked.into());

            assert_eq!(
                scheduler.update(1., &mut audio, &pack, 1.),
                Some(PlaybackEvent::Started(Callout::GearDown))
            );
            audio.set_playing(true);
            assert_eq!(scheduler.update(1., &mut audio, &pack, 1.), None);
            assert_eq!(scheduler.update(1., &mut audio, &pack, 1.), None);

            audio.set_playing(false);
            assert_eq!(
                scheduler.update(1., &mut audio, &pack, 1.),
                Some(PlaybackEvent::Started(Callout::GearDownAndLocked))
            );
            assert_eq!(
                audio.played(),
                vec![Callout::GearDown, Callout::GearDownAndLocked]
            );
        }

        #[test]
        fn missing_asset_is_skipped() {
            let mut scheduler = CalloutScheduler::new();
            let mut audio = TestAudioSink::new();
            let pack = sound_pack_without(&[Callout::Contact]);
            scheduler.enqueue(Callout::Contact.into());
            scheduler.enqueue(Callout::GearUp.into());

            assert_eq!(
                scheduler.update(1., &mut audio, &pack, 1.),
                Some(PlaybackEvent::Missing(Callout::Contact))
            );
            assert_eq!(scheduler.playing(), None);
            assert_eq!(
                scheduler.update(1., &mut audio, &pack, 1.),
                Some(PlaybackEvent::Started(Callout::GearUp))
            );
            assert_eq!(audio.played(), vec![Callout::GearUp]);
        }

        #[test]
        fn retard_is_cut_at_idle() {
            let mut scheduler = CalloutScheduler::new();
            let mut audio = TestAudioSink::new();
            let pack = full_sound_pack();
            scheduler.enqueue(Callout::Retard.into());
            scheduler.enqueue(Callout::Contact.into());
            scheduler.update(0.6, &mut audio, &pack, 1.);
            audio.set_playing(true);

            assert_eq!(scheduler.update(0.3, &mut audio, &pack, 1.), None);
            assert_eq!(
                scheduler.update(0.05, &mut audio, &pack, 1.),
                Some(PlaybackEvent::Started(Callout::Contact))
            );
            assert_eq!(audio.stops(), 1);
        }

        #[test]
        fn pending_retard_is_dropped_at_idle() {
            let mut scheduler = CalloutScheduler::new();
            let mut audio = TestAudioSink::new();
            let pack = full_sound_pack();
            scheduler.enqueue(Callout::Altitude10.into());
            scheduler.enqueue(Callout::Retard.into());
            scheduler.update(0.6, &mut audio, &pack, 1.);

            assert_eq!(scheduler.update(0., &mut audio, &pack, 1.), None);
            assert!(scheduler.is_idle());
            assert_eq!(audio.played(), vec![Callout::Altitude10]);
        }

        #[test]
        fn waits_for_sound_it_did_not_start() {
            let mut scheduler = CalloutScheduler::new();
            let mut audio = TestAudioSink::new();
            let pack = full_sound_pack();
            audio.set_playing(true);
            scheduler.enqueue(Callout::Contact.into());

            assert_eq!(scheduler.update(1., &mut audio, &pack, 1.), None);
            assert_eq!(pending(&scheduler), vec![Callout::Contact]);

            audio.set_playing(false);
            assert_eq!(
                scheduler.update(1., &mut audio, &pack, 1.),
                Some(PlaybackEvent::Started(Callout::Contact))
            );
        }

        #[test]
        fn other_callouts_are_not_cut_at_idle() {
            let mut scheduler = CalloutScheduler::new();
            let mut audio = TestAudioSink::new();
            let pack = full_sound_pack();
            scheduler.enqueue(Callout::Altitude50.into());
            scheduler.enqueue(Callout::Contact.into());
            scheduler.update(0., &mut audio, &pack, 1.);
            audio.set_playing(true);

            assert_eq!(scheduler.update(0., &mut audio, &pack, 1.), None);
            assert_eq!(audio.stops(), 0);
            assert_eq!(scheduler.playing(), Some(Callout::Altitude50));
        }

        #[test]
        fn passes_volume_to_audio() {
            let mut scheduler = CalloutScheduler::new();
            let mut audio = TestAudioSink::new();
            scheduler.enqueue(Callout::PullUp.into());
            scheduler.update(1., &mut audio, &full_sound_pack(), 0.25);
            assert_eq!(audio.last_volume(), Some(0.25));
        }

        #[test]
        fn becomes_idle_once_drained() {
            let mut scheduler = CalloutScheduler::new();
            let mut audio = TestAudioSink::new();
            scheduler.enqueue(Callout::PullUp.into());
            scheduler.update(1., &mut audio, &full_sound_pack(), 1.);
            assert!(!scheduler.is_idle());
            scheduler.update(1., &mut audio, &full_sound_pack(), 1.);
            assert!(scheduler.is_idle());
        }
    }
}
