use fxhash::FxHashMap;
use ini::{Ini, Properties};
use std::path::Path;
use systems::flight_warning::callouts::{AltitudeCalloutStyle, Callout};
use systems::sound_pack::SoundPackMap;
use thiserror::Error;
use uom::si::f64::*;
use uom::si::length::meter;

pub const DEFAULT_PULL_UP_SENSITIVITY: f64 = 0.486;
pub const PULL_UP_SENSITIVITY_RANGE: (f64, f64) = (0.1, 2.0);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] ini::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] ini::ParseError),

    #[error("invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

/// Read-only settings snapshot consulted by the detectors every tick.
///
/// Altitudes are in display units, i.e. feet for imperial hosts and metres otherwise.
#[derive(Clone, Debug, PartialEq)]
pub struct CalloutConfig {
    enabled: FxHashMap<Callout, bool>,
    altitude_2500_style: AltitudeCalloutStyle,
    minimums_altitude: f64,
    require_gear_down: bool,
    pull_up_sensitivity: f64,
    probe_offset: Length,
    retard_altitude: f64,
    cleared_to_land_altitude: f64,
    master_volume: f64,
    debug_mode: bool,
    sound_pack: SoundPackMap,
}

impl CalloutConfig {
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        Self::from_ini(&ini)
    }

    pub fn from_ini_str(content: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(content)?;
        Self::from_ini(&ini)
    }

    /// Overlays the values present in `ini` onto the defaults.
    pub fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = CalloutConfig::default();

        // [general] section
        if let Some(section) = ini.section(Some("general")) {
            if let Some(v) = parse_f64(section, "general", "master_volume")? {
                config.set_master_volume(v);
            }
            if let Some(v) = parse_bool(section, "general", "debug_mode")? {
                config.debug_mode = v;
            }
            if let Some(v) = section.get("sound_pack") {
                let v = v.trim();
                if !v.is_empty() {
                    config.sound_pack.set_master(v);
                }
            }
        }

        // [altitude] section
        if let Some(section) = ini.section(Some("altitude")) {
            let keyed = Callout::ALTITUDE_BANDS
                .iter()
                .map(|(callout, _)| *callout)
                .chain([Callout::Minimums, Callout::HundredAbove]);
            config.parse_enabled(section, "altitude", keyed)?;

            if let Some(v) = section.get("2500_style") {
                config.altitude_2500_style = match v.trim().to_lowercase().as_str() {
                    "american" => AltitudeCalloutStyle::American,
                    "british" => AltitudeCalloutStyle::British,
                    _ => {
                        return Err(ConfigError::InvalidValue {
                            section: "altitude".to_string(),
                            key: "2500_style".to_string(),
                            value: v.to_string(),
                            reason: "must be one of: american, british".to_string(),
                        })
                    }
                };
            }
            if let Some(v) = parse_f64(section, "altitude", "minimums_altitude")? {
                config.set_minimums_altitude(v);
            }
            if let Some(v) = parse_bool(section, "altitude", "require_gear_down")? {
                config.require_gear_down = v;
            }
        }

        // [mach] section
        if let Some(section) = ini.section(Some("mach")) {
            let keyed = Callout::all()
                .into_iter()
                .filter(|c| matches!(c, Callout::Mach(_) | Callout::Subsonic));
            config.parse_enabled(section, "mach", keyed)?;
        }

        // [gear] section
        if let Some(section) = ini.section(Some("gear")) {
            let keyed = [
                Callout::GearDown,
                Callout::GearUp,
                Callout::GearDownAndLocked,
                Callout::GearUpAndLocked,
                Callout::Contact,
            ];
            config.parse_enabled(section, "gear", keyed)?;
        }

        // [gpws] section
        if let Some(section) = ini.section(Some("gpws")) {
            let keyed = [Callout::PullUp, Callout::Retard, Callout::ClearedToLand];
            config.parse_enabled(section, "gpws", keyed)?;

            if let Some(v) = parse_f64(section, "gpws", "sensitivity")? {
                config.set_pull_up_sensitivity(v);
            }
            if let Some(v) = parse_f64(section, "gpws", "probe_offset")? {
                config.set_probe_offset(Length::new::<meter>(v));
            }
            if let Some(v) = parse_f64(section, "gpws", "retard_altitude")? {
                config.set_retard_altitude(v);
            }
            if let Some(v) = parse_f64(section, "gpws", "cleared_to_land_altitude")? {
                config.set_cleared_to_land_altitude(v);
            }
        }

        // [sound_pack_overrides] section
        if let Some(section) = ini.section(Some("sound_pack_overrides")) {
            for (key, value) in section.iter() {
                match Callout::from_config_key(key) {
                    Some(callout) => config.sound_pack.set_override(callout, value),
                    None => {
                        return Err(ConfigError::InvalidValue {
                            section: "sound_pack_overrides".to_string(),
                            key: key.to_string(),
                            value: value.to_string(),
                            reason: "unknown callout".to_string(),
                        })
                    }
                }
            }
        }

        Ok(config)
    }

    fn parse_enabled(
        &mut self,
        section: &Properties,
        section_name: &str,
        callouts: impl IntoIterator<Item = Callout>,
    ) -> Result<(), ConfigError> {
        for callout in callouts {
            if let Some(v) = parse_bool(section, section_name, &callout.config_key())? {
                self.set_enabled(callout, v);
            }
        }
        Ok(())
    }

    /// The British 2500 callout shares the enable flag of the 2500 band.
    pub fn is_enabled(&self, callout: Callout) -> bool {
        let callout = match callout {
            Callout::Altitude2500Uk => Callout::Altitude2500,
            c => c,
        };
        self.enabled.get(&callout).copied().unwrap_or(true)
    }

    pub fn set_enabled(&mut self, callout: Callout, enabled: bool) {
        self.enabled.insert(callout, enabled);
    }

    pub fn altitude_2500_style(&self) -> AltitudeCalloutStyle {
        self.altitude_2500_style
    }

    pub fn set_altitude_2500_style(&mut self, style: AltitudeCalloutStyle) {
        self.altitude_2500_style = style;
    }

    pub fn minimums_altitude(&self) -> f64 {
        self.minimums_altitude
    }

    pub fn set_minimums_altitude(&mut self, altitude: f64) {
        self.minimums_altitude = clamped("minimums_altitude", altitude, 0., f64::MAX);
    }

    pub fn require_gear_down(&self) -> bool {
        self.require_gear_down
    }

    pub fn set_require_gear_down(&mut self, require: bool) {
        self.require_gear_down = require;
    }

    pub fn pull_up_sensitivity(&self) -> f64 {
        self.pull_up_sensitivity
    }

    pub fn set_pull_up_sensitivity(&mut self, sensitivity: f64) {
        let (min, max) = PULL_UP_SENSITIVITY_RANGE;
        self.pull_up_sensitivity = clamped("sensitivity", sensitivity, min, max);
    }

    /// How far ahead of the aircraft obstacle probes start.
    pub fn probe_offset(&self) -> Length {
        self.probe_offset
    }

    pub fn set_probe_offset(&mut self, offset: Length) {
        let metres = clamped("probe_offset", offset.get::<meter>(), 0., f64::MAX);
        self.probe_offset = Length::new::<meter>(metres);
    }

    pub fn retard_altitude(&self) -> f64 {
        self.retard_altitude
    }

    pub fn set_retard_altitude(&mut self, altitude: f64) {
        self.retard_altitude = clamped("retard_altitude", altitude, 0., f64::MAX);
    }

    pub fn cleared_to_land_altitude(&self) -> f64 {
        self.cleared_to_land_altitude
    }

    pub fn set_cleared_to_land_altitude(&mut self, altitude: f64) {
        self.cleared_to_land_altitude =
            clamped("cleared_to_land_altitude", altitude, 0., f64::MAX);
    }

    pub fn master_volume(&self) -> f64 {
        self.master_volume
    }

    pub fn set_master_volume(&mut self, volume: f64) {
        self.master_volume = clamped("master_volume", volume, 0., 1.);
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn set_debug_mode(&mut self, debug_mode: bool) {
        self.debug_mode = debug_mode;
    }

    pub fn sound_pack(&self) -> &SoundPackMap {
        &self.sound_pack
    }

    pub fn sound_pack_mut(&mut self) -> &mut SoundPackMap {
        &mut self.sound_pack
    }
}

impl Default for CalloutConfig {
    fn default() -> Self {
        let mut enabled = FxHashMap::default();
        for callout in Callout::all() {
            enabled.insert(callout, callout != Callout::ClearedToLand);
        }

        Self {
            enabled,
            altitude_2500_style: AltitudeCalloutStyle::American,
            minimums_altitude: 200.,
            require_gear_down: true,
            pull_up_sensitivity: DEFAULT_PULL_UP_SENSITIVITY,
            probe_offset: Length::new::<meter>(20.),
            retard_altitude: 20.,
            cleared_to_land_altitude: 700.,
            master_volume: 1.,
            debug_mode: false,
            sound_pack: SoundPackMap::default(),
        }
    }
}

fn clamped(key: &str, value: f64, min: f64, max: f64) -> f64 {
    let result = if value.is_nan() { min } else { value.clamp(min, max) };
    if result != value {
        tracing::warn!(key, value, clamped = result, "configuration value out of range");
    }
    result
}

fn parse_bool(
    section: &Properties,
    section_name: &str,
    key: &str,
) -> Result<Option<bool>, ConfigError> {
    let v = match section.get(key) {
        Some(v) => v,
        None => return Ok(None),
    };
    match v.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidValue {
            section: section_name.to_string(),
            key: key.to_string(),
            value: v.to_string(),
            reason: "must be a boolean (true/false)".to_string(),
        }),
    }
}

fn parse_f64(
    section: &Properties,
    section_name: &str,
    key: &str,
) -> Result<Option<f64>, ConfigError> {
    let v = match section.get(key) {
        Some(v) => v,
        None => return Ok(None),
    };
    v.trim()
        .parse::<f64>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue {
            section: section_name.to_string(),
            key: key.to_string(),
            value: v.to_string(),
            reason: "must be a number".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_enable_everything_but_cleared_to_land() {
        let config = CalloutConfig::default();
        assert!(config.is_enabled(Callout::Altitude500));
        assert!(config.is_enabled(Callout::Mach(10)));
        assert!(config.is_enabled(Callout::PullUp));
        assert!(!config.is_enabled(Callout::ClearedToLand));
        assert_eq!(config.sound_pack().master(), "Altea");
        assert_eq!(config.pull_up_sensitivity(), DEFAULT_PULL_UP_SENSITIVITY);
    }

    #[test]
    fn parses_all_sections() {
        let config = CalloutConfig::from_ini_str(
            "[general]\nmaster_volume = 0.5\ndebug_mode = yes\nsound_pack = Boeing\n\
             [altitude]\n500 = false\n2500_style = British\nminimums_altitude = 250\n\
             [mach]\nmach_2 = off\n\
             [gear]\ncontact = 0\n\
             [gpws]\nsensitivity = 1.2\nprobe_offset = 35\ncleared_to_land = true\n\
             [sound_pack_overrides]\nretard = Altea\ncontact = use master\n",
        )
        .unwrap();

        assert_eq!(config.master_volume(), 0.5);
        assert!(config.debug_mode());
        assert_eq!(config.sound_pack().master(), "Boeing");
        assert!(!config.is_enabled(Callout::Altitude500));
        assert_eq!(config.altitude_2500_style(), AltitudeCalloutStyle::British);
        assert_eq!(config.minimums_altitude(), 250.);
        assert!(!config.is_enabled(Callout::Mach(2)));
        assert!(config.is_enabled(Callout::Mach(3)));
        assert!(!config.is_enabled(Callout::Contact));
        assert_eq!(config.pull_up_sensitivity(), 1.2);
        assert_eq!(config.probe_offset().get::<meter>(), 35.);
        assert!(config.is_enabled(Callout::ClearedToLand));
        assert_eq!(config.sound_pack().pack_for(Callout::Retard), "Altea");
        assert_eq!(config.sound_pack().pack_for(Callout::Contact), "Boeing");
    }

    #[test]
    fn british_2500_follows_the_2500_flag() {
        let config = CalloutConfig::from_ini_str("[altitude]\n2500 = false\n").unwrap();
        assert!(!config.is_enabled(Callout::Altitude2500Uk));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = CalloutConfig::from_ini_str(
            "[general]\nmaster_volume = 3\n[gpws]\nsensitivity = 0.01\nprobe_offset = -4\n",
        )
        .unwrap();

        assert_eq!(config.master_volume(), 1.);
        assert_eq!(config.pull_up_sensitivity(), 0.1);
        assert_eq!(config.probe_offset().get::<meter>(), 0.);
    }

    #[test]
    fn unparseable_boolean_is_rejected() {
        let result = CalloutConfig::from_ini_str("[gear]\ngear_down = maybe\n");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "gear_down"
        ));
    }

    #[test]
    fn unparseable_number_is_rejected() {
        let result = CalloutConfig::from_ini_str("[gpws]\nsensitivity = high\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn invalid_value_message_names_section_and_key() {
        let error = CalloutConfig::from_ini_str("[gpws]\nsensitivity = high\n").unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid configuration: gpws.sensitivity = 'high' - must be a number"
        );
    }

    #[test]
    fn unknown_style_is_rejected() {
        let result = CalloutConfig::from_ini_str("[altitude]\n2500_style = australian\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn override_for_unknown_callout_is_rejected() {
        let result = CalloutConfig::from_ini_str("[sound_pack_overrides]\nflaps = Altea\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CalloutConfig::load_from(&dir.path().join("announcer.ini")).unwrap();
        assert_eq!(config, CalloutConfig::default());
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[altitude]\nminimums_altitude = 60").unwrap();

        let config = CalloutConfig::load_from(file.path()).unwrap();

        assert_eq!(config.minimums_altitude(), 60.);
    }
}
