use config::CalloutConfig;
use host::{AudioSink, UpdateContext};
use loader::SoundPackLoader;
use parameters::FlightSample;
use runtime::{AnnouncerRuntime, CalloutScheduler, PlaybackEvent};
use std::sync::Arc;
use std::time::Duration;
use systems::flight_warning::callouts::Callout;
use systems::sound_pack::{AssetStore, ResolvedSoundPack, SoundPackMap};

pub mod config;
pub mod host;
pub mod loader;
pub mod parameters;
pub mod runtime;
pub mod signals;

const BANNER_DURATION: Duration = Duration::from_secs(2);

struct DebugBanner {
    text: String,
    remaining: Duration,
}

impl DebugBanner {
    fn for_playback(event: PlaybackEvent) -> Self {
        let text = match event {
            PlaybackEvent::Started(callout) => {
                format!("GPWS: {}", callout.asset_name().to_uppercase())
            }
            PlaybackEvent::Missing(callout) => {
                format!("GPWS: {} (MISSING)", callout.asset_name().to_uppercase())
            }
        };

        Self {
            text,
            remaining: BANNER_DURATION,
        }
    }

    /// Returns false once the banner has been visible for its full duration.
    fn age(&mut self, delta: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(delta);
        self.remaining > Duration::ZERO
    }
}

/// Aural callouts for one aircraft at a time.
///
/// The host acquires an aircraft, hands over an asset store and then calls [`update`] once per
/// sample. The sound pack map always comes from the configuration passed to [`update`]: whenever
/// it differs from the last one requested a new load starts in the background. Ticks are skipped
/// entirely without an aircraft. Until the first sound pack has been loaded the signal history
/// still follows the samples but no detector runs, so nothing crossed while loading is announced
/// late.
///
/// [`update`]: AirDataAnnouncer::update
#[derive(Default)]
pub struct AirDataAnnouncer {
    runtime: Option<AnnouncerRuntime>,
    loader: SoundPackLoader,
    store: Option<Arc<dyn AssetStore + Send + Sync>>,
    requested: Option<SoundPackMap>,
    banner: Option<DebugBanner>,
}

impl AirDataAnnouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking a new aircraft, discarding every latch and queued callout of the previous
    /// one.
    pub fn acquire_aircraft(&mut self, sample: &FlightSample) {
        tracing::info!(replaced = self.runtime.is_some(), "aircraft acquired");
        self.runtime = Some(AnnouncerRuntime::new(sample));
    }

    pub fn release_aircraft(&mut self) {
        if self.runtime.take().is_some() {
            tracing::info!("aircraft released");
        }
    }

    pub fn has_aircraft(&self) -> bool {
        self.runtime.is_some()
    }

    /// Sound packs are loaded from `store` from the next update on. The current pack stays in use
    /// until the first load from it is done.
    pub fn set_asset_store(&mut self, store: Arc<dyn AssetStore + Send + Sync>) {
        self.store = Some(store);
        self.requested = None;
    }

    pub fn install_sound_pack(&mut self, sound_pack: ResolvedSoundPack) {
        self.loader.install(sound_pack);
    }

    pub fn is_ready(&self) -> bool {
        self.loader.is_ready()
    }

    pub fn update(
        &mut self,
        context: &UpdateContext,
        sample: &FlightSample,
        config: &CalloutConfig,
        audio: &mut dyn AudioSink,
    ) -> Option<PlaybackEvent> {
        self.request_configured_sound_pack(config.sound_pack());
        self.loader.poll();
        if let Some(banner) = self.banner.as_mut() {
            if !banner.age(context.delta()) {
                self.banner = None;
            }
        }

        let runtime = self.runtime.as_mut()?;
        let sound_pack = match self.loader.sound_pack() {
            Some(sound_pack) => sound_pack,
            None => {
                runtime.track(context, sample);
                return None;
            }
        };

        runtime.update(context, sample, config);
        let event = runtime.update_playback(sample, audio, sound_pack, config.master_volume());

        if config.debug_mode() {
            if let Some(event) = event {
                let banner = DebugBanner::for_playback(event);
                tracing::info!(banner = %banner.text, "debug banner");
                self.banner = Some(banner);
            }
        }

        event
    }

    fn request_configured_sound_pack(&mut self, map: &SoundPackMap) {
        let store = match self.store.as_ref() {
            Some(store) => store,
            None => return,
        };
        if self.requested.as_ref() == Some(map) {
            return;
        }

        tracing::debug!(master = map.master(), "sound pack map changed");
        // A failed spawn is retried on the next update.
        if self.loader.request(store.clone(), map.clone()).is_ok() {
            self.requested = Some(map.clone());
        }
    }

    /// Queues `callout` as if a detector had fired it. Returns false without an aircraft.
    pub fn preview(&mut self, callout: Callout) -> bool {
        match self.runtime.as_mut() {
            Some(runtime) => {
                runtime.enqueue(callout);
                true
            }
            None => false,
        }
    }

    /// Whether the current sound pack has an asset for `callout`.
    pub fn is_available(&self, callout: Callout) -> bool {
        self.loader
            .sound_pack()
            .map_or(false, |sound_pack| sound_pack.contains(callout))
    }

    pub fn sound_pack(&self) -> Option<&ResolvedSoundPack> {
        self.loader.sound_pack()
    }

    pub fn debug_banner(&self) -> Option<&str> {
        self.banner.as_ref().map(|banner| banner.text.as_str())
    }

    pub fn scheduler(&self) -> Option<&CalloutScheduler> {
        self.runtime.as_ref().map(|runtime| runtime.scheduler())
    }
}
