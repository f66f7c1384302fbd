use std::borrow::Cow;
use std::fmt::{Display, Formatter};

pub const MAX_MACH_CALLOUT: u8 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AltitudeCalloutStyle {
    /// "twenty five hundred"
    American,
    /// "two thousand five hundred"
    British,
}

impl Default for AltitudeCalloutStyle {
    fn default() -> Self {
        AltitudeCalloutStyle::American
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CalloutCategory {
    /// Only the most recent pending altitude callout is kept in the queue.
    Altitude,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Callout {
    Altitude10,
    Altitude20,
    Altitude30,
    Altitude40,
    Altitude50,
    Altitude75,
    Altitude100,
    Altitude200,
    Altitude300,
    Altitude400,
    Altitude500,
    Altitude1000,
    Altitude2500,
    Altitude2500Uk,
    HundredAbove,
    Minimums,
    Mach(u8),
    Subsonic,
    GearDown,
    GearUp,
    GearDownAndLocked,
    GearUpAndLocked,
    Contact,
    PullUp,
    Retard,
    ClearedToLand,
}

impl Callout {
    /// The fixed altitude bands in descending order, paired with their threshold in display units.
    pub const ALTITUDE_BANDS: [(Callout, f64); 13] = [
        (Callout::Altitude2500, 2500.),
        (Callout::Altitude1000, 1000.),
        (Callout::Altitude500, 500.),
        (Callout::Altitude400, 400.),
        (Callout::Altitude300, 300.),
        (Callout::Altitude200, 200.),
        (Callout::Altitude100, 100.),
        (Callout::Altitude75, 75.),
        (Callout::Altitude50, 50.),
        (Callout::Altitude40, 40.),
        (Callout::Altitude30, 30.),
        (Callout::Altitude20, 20.),
        (Callout::Altitude10, 10.),
    ];

    /// Every callout a sound pack may provide an asset for.
    pub fn all() -> Vec<Callout> {
        let mut callouts: Vec<Callout> = Callout::ALTITUDE_BANDS
            .iter()
            .rev()
            .map(|(callout, _)| *callout)
            .collect();
        callouts.extend_from_slice(&[
            Callout::Altitude2500Uk,
            Callout::HundredAbove,
            Callout::Minimums,
            Callout::Subsonic,
            Callout::GearDown,
            Callout::GearUp,
            Callout::GearDownAndLocked,
            Callout::GearUpAndLocked,
            Callout::Contact,
            Callout::PullUp,
            Callout::Retard,
            Callout::ClearedToLand,
        ]);
        callouts.extend((1..=MAX_MACH_CALLOUT).map(Callout::Mach));
        callouts
    }

    /// The 2500 callout voiced in the requested style.
    pub fn altitude_2500(style: AltitudeCalloutStyle) -> Callout {
        match style {
            AltitudeCalloutStyle::American => Callout::Altitude2500,
            AltitudeCalloutStyle::British => Callout::Altitude2500Uk,
        }
    }

    /// Returns the callout announcing `band`, if that Mach band has one.
    pub fn mach(band: i32) -> Option<Callout> {
        if band >= 1 && band <= MAX_MACH_CALLOUT as i32 {
            Some(Callout::Mach(band as u8))
        } else {
            None
        }
    }

    pub fn category(&self) -> CalloutCategory {
        match self {
            Callout::Altitude10
            | Callout::Altitude20
            | Callout::Altitude30
            | Callout::Altitude40
            | Callout::Altitude50
            | Callout::Altitude75
            | Callout::Altitude100
            | Callout::Altitude200
            | Callout::Altitude300
            | Callout::Altitude400
            | Callout::Altitude500
            | Callout::Altitude1000
            | Callout::Altitude2500
            | Callout::Altitude2500Uk
            | Callout::HundredAbove
            | Callout::Minimums => CalloutCategory::Altitude,
            _ => CalloutCategory::Other,
        }
    }

    /// File stem of the asset inside a sound pack.
    pub fn asset_name(&self) -> Cow<'static, str> {
        match self {
            Callout::Altitude10 => "10".into(),
            Callout::Altitude20 => "20".into(),
            Callout::Altitude30 => "30".into(),
            Callout::Altitude40 => "40".into(),
            Callout::Altitude50 => "50".into(),
            Callout::Altitude75 => "75".into(),
            Callout::Altitude100 => "100".into(),
            Callout::Altitude200 => "200".into(),
            Callout::Altitude300 => "300".into(),
            Callout::Altitude400 => "400".into(),
            Callout::Altitude500 => "500".into(),
            Callout::Altitude1000 => "1000".into(),
            Callout::Altitude2500 => "2500".into(),
            Callout::Altitude2500Uk => "2500_UK".into(),
            Callout::HundredAbove => "100 above".into(),
            Callout::Minimums => "minimums".into(),
            Callout::Mach(n) => format!("Mach {}", n).into(),
            Callout::Subsonic => "subsonic".into(),
            Callout::GearDown => "Gear Down".into(),
            Callout::GearUp => "Gear Up".into(),
            Callout::GearDownAndLocked => "Gear Down and Locked".into(),
            Callout::GearUpAndLocked => "Gear Up and Locked".into(),
            Callout::Contact => "contact".into(),
            Callout::PullUp => "pull up".into(),
            Callout::Retard => "retard".into(),
            Callout::ClearedToLand => "cleared to land".into(),
        }
    }

    /// Key used for this callout in configuration files.
    pub fn config_key(&self) -> Cow<'static, str> {
        match self {
            Callout::Altitude2500Uk => "2500_uk".into(),
            Callout::HundredAbove => "hundred_above".into(),
            Callout::Mach(n) => format!("mach_{}", n).into(),
            Callout::GearDown => "gear_down".into(),
            Callout::GearUp => "gear_up".into(),
            Callout::GearDownAndLocked => "gear_down_locked".into(),
            Callout::GearUpAndLocked => "gear_up_locked".into(),
            Callout::PullUp => "pull_up".into(),
            Callout::ClearedToLand => "cleared_to_land".into(),
            _ => self.asset_name(),
        }
    }

    pub fn from_config_key(key: &str) -> Option<Callout> {
        let key = key.trim().to_ascii_lowercase();
        Callout::all()
            .into_iter()
            .find(|callout| callout.config_key() == key.as_str())
    }
}

impl Display for Callout {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.asset_name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalloutEvent {
    callout: Callout,
    category: CalloutCategory,
}

impl CalloutEvent {
    pub fn new(callout: Callout) -> Self {
        Self {
            callout,
            category: callout.category(),
        }
    }

    pub fn callout(&self) -> Callout {
        self.callout
    }

    pub fn category(&self) -> CalloutCategory {
        self.category
    }

    pub fn is_altitude(&self) -> bool {
        self.category == CalloutCategory::Altitude
    }
}

impl From<Callout> for CalloutEvent {
    fn from(callout: Callout) -> Self {
        CalloutEvent::new(callout)
    }
}
