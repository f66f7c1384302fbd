pub mod flight_warning;

pub use flight_warning::config::{CalloutConfig, ConfigError};
pub use flight_warning::host::{AudioSink, ObstacleProbe, UnitSystem, UpdateContext};
pub use flight_warning::parameters::{FlightSample, GearState};
pub use flight_warning::runtime::PlaybackEvent;
pub use flight_warning::AirDataAnnouncer;
