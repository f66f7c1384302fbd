use announcer_systems::{
    AirDataAnnouncer, AudioSink, CalloutConfig, FlightSample, GearState, UnitSystem,
    UpdateContext,
};
use std::fs;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use systems::flight_warning::callouts::Callout;
use systems::shared::Vector3;
use systems::sound_pack::{AssetHandle, DirectoryAssetStore};
use tempfile::TempDir;
use uom::si::f64::*;
use uom::si::length::foot;
use uom::si::ratio::ratio;

const TICK: Duration = Duration::from_millis(100);

struct Imperial;

impl UnitSystem for Imperial {
    fn is_imperial(&self) -> bool {
        true
    }
}

/// Finishes every sound instantly, so the queue advances by one callout per tick.
#[derive(Default)]
struct RecordingSink {
    played: Vec<Callout>,
}

impl AudioSink for RecordingSink {
    fn play(&mut self, asset: &AssetHandle, _volume: f64) {
        self.played.push(asset.callout());
    }

    fn is_playing(&self) -> bool {
        false
    }

    fn stop(&mut self) {}
}

struct Flight {
    _sound_packs: TempDir,
    announcer: AirDataAnnouncer,
    config: CalloutConfig,
    audio: RecordingSink,
    sample: FlightSample,
}

impl Flight {
    fn new() -> Self {
        let sound_packs = TempDir::new().unwrap();
        let pack = sound_packs.path().join("Altea");
        fs::create_dir_all(&pack).unwrap();
        for callout in Callout::all() {
            fs::write(pack.join(format!("{}.wav", callout.asset_name())), b"RIFF").unwrap();
        }

        let mut config = CalloutConfig::default();
        config.set_minimums_altitude(250.);
        config.sound_pack_mut().set_master("Altea");

        let mut sample = FlightSample::new();
        sample.set_velocity(Vector3::new(0., 0., 60.));
        sample.set_throttle(Some(Ratio::new::<ratio>(0.8)));

        let mut announcer = AirDataAnnouncer::new();
        announcer.set_asset_store(Arc::new(DirectoryAssetStore::new(sound_packs.path())));
        announcer.acquire_aircraft(&sample);

        let mut flight = Self {
            _sound_packs: sound_packs,
            announcer,
            config,
            audio: RecordingSink::default(),
            sample,
        };
        flight.wait_for_sound_pack();
        flight
    }

    fn wait_for_sound_pack(&mut self) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !self.announcer.is_ready() {
            assert!(Instant::now() < deadline, "sound pack did not load");
            self.tick();
            thread::sleep(Duration::from_millis(1));
        }
    }

    fn tick(&mut self) {
        let context = UpdateContext::from_host(TICK, Some(&Imperial), None);
        self.announcer
            .update(&context, &self.sample, &self.config, &mut self.audio);
    }

    /// One tick with the current sample, then holds it until everything queued has played.
    fn fly(&mut self) -> &mut Self {
        self.tick();
        for _ in 0..20 {
            if self.announcer.scheduler().unwrap().is_idle() {
                break;
            }
            self.tick();
        }
        self
    }

    fn at_ft(&mut self, height: f64) -> &mut Self {
        self.sample.set_radar_altitude(Length::new::<foot>(height));
        self.sample.set_ground_contact(vec![false, false, false]);
        self.fly()
    }

    fn touchdown(&mut self) -> &mut Self {
        self.sample.set_radar_altitude(Length::new::<foot>(0.));
        self.sample.set_ground_contact(vec![true, true, true]);
        self.fly()
    }

    fn gear(&mut self, lever_down: bool, state: GearState) -> &mut Self {
        self.sample.set_gear_deployed(lever_down);
        self.sample.set_gear_state(state);
        self.fly()
    }

    fn throttle(&mut self, throttle: f64) -> &mut Self {
        self.sample.set_throttle(Some(Ratio::new::<ratio>(throttle)));
        self
    }
}

#[test]
fn takeoff_approach_and_landing() {
    let mut flight = Flight::new();

    flight.at_ft(50.).at_ft(400.);
    flight
        .gear(false, GearState::Retracting)
        .gear(false, GearState::LockedRetracted);
    flight.at_ft(1500.).at_ft(3000.);
    flight
        .gear(true, GearState::Extending)
        .gear(true, GearState::LockedExtended);

    flight.throttle(0.6);
    for height in [
        2600., 2400., 1500., 900., 600., 450., 380., 340., 290., 240., 190., 90., 70., 45., 35.,
        25., 15.,
    ] {
        flight.at_ft(height);
    }
    flight.throttle(0.).at_ft(5.).touchdown();

    assert_eq!(
        flight.audio.played,
        vec![
            Callout::GearUp,
            Callout::GearUpAndLocked,
            Callout::GearDown,
            Callout::GearDownAndLocked,
            Callout::Altitude2500,
            Callout::Altitude1000,
            Callout::Altitude500,
            Callout::Altitude400,
            Callout::HundredAbove,
            Callout::Altitude300,
            Callout::Minimums,
            Callout::Altitude200,
            Callout::Altitude100,
            Callout::Altitude75,
            Callout::Altitude50,
            Callout::Altitude40,
            Callout::Altitude30,
            Callout::Altitude20,
            Callout::Retard,
            Callout::Altitude10,
            Callout::Contact,
        ]
    );
}

#[test]
fn released_aircraft_is_silent() {
    let mut flight = Flight::new();
    flight.announcer.release_aircraft();

    flight.sample.set_radar_altitude(Length::new::<foot>(600.));
    flight.tick();
    flight.sample.set_radar_altitude(Length::new::<foot>(450.));
    flight.tick();

    assert!(flight.audio.played.is_empty());
}
