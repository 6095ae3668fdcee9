use crate::bands::BAND_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    Heartbeat,
    Connection,
    UserToggle,
    Band(usize),
}

impl Indicator {
    pub const ALL: [Indicator; 3 + BAND_COUNT] = [
        Self::Heartbeat,
        Self::Connection,
        Self::UserToggle,
        Self::Band(0),
        Self::Band(1),
        Self::Band(2),
        Self::Band(3),
        Self::Band(4),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heartbeat => "heartbeat",
            Self::Connection => "connection",
            Self::UserToggle => "user_toggle",
            Self::Band(0) => "band_freezing",
            Self::Band(1) => "band_frost",
            Self::Band(2) => "band_cold",
            Self::Band(3) => "band_mild",
            Self::Band(4) => "band_hot",
            Self::Band(_) => "band_unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorChange {
    pub indicator: Indicator,
    pub on: bool,
}

impl IndicatorChange {
    pub fn new(indicator: Indicator, on: bool) -> Self {
        Self { indicator, on }
    }
}

/// Last-set level of every indicator slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndicatorStates {
    heartbeat: bool,
    connection: bool,
    user_toggle: bool,
    bands: [bool; BAND_COUNT],
}

impl IndicatorStates {
    pub fn get(&self, indicator: Indicator) -> bool {
        match indicator {
            Indicator::Heartbeat => self.heartbeat,
            Indicator::Connection => self.connection,
            Indicator::UserToggle => self.user_toggle,
            Indicator::Band(idx) => self.bands.get(idx).copied().unwrap_or(false),
        }
    }

    /// Records the new level and reports whether it differs from the previous one.
    pub fn set(&mut self, indicator: Indicator, on: bool) -> bool {
        let slot = match indicator {
            Indicator::Heartbeat => &mut self.heartbeat,
            Indicator::Connection => &mut self.connection,
            Indicator::UserToggle => &mut self.user_toggle,
            Indicator::Band(idx) => match self.bands.get_mut(idx) {
                Some(slot) => slot,
                None => return false,
            },
        };
        let changed = *slot != on;
        *slot = on;
        changed
    }

    pub fn active_band(&self) -> Option<usize> {
        self.bands.iter().position(|on| *on)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureReading {
    pub celsius: f32,
    pub fahrenheit: f32,
}

/// Copy of the monitor state taken under the lock, used for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorSnapshot {
    pub latest_temp_f: f32,
    pub min_temp_f: f32,
    pub max_temp_f: f32,
    pub band_seconds: [u64; BAND_COUNT],
    pub heartbeat_count: u64,
    pub samples: u64,
    pub indicators: IndicatorStates,
}

/// Binary output capability. Drivers without a given slot ignore it.
pub trait IndicatorOutput {
    fn set(&mut self, indicator: Indicator, on: bool);
}
