use crate::{
    bands::{classify, BAND_COUNT},
    types::{Indicator, IndicatorChange, IndicatorStates, MonitorSnapshot, TemperatureReading},
};

// So the first reading replaces both extrema.
pub const MIN_TEMP_SENTINEL_F: f32 = 1_000.0;
pub const MAX_TEMP_SENTINEL_F: f32 = -1_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleOutcome {
    pub band: Option<usize>,
}

/// The shared state block: latest reading, extrema, per-band dwell and the
/// liveness counter. Every mutation returns the indicator changes it implies.
#[derive(Debug, Clone)]
pub struct MonitorEngine {
    latest_temp_f: f32,
    min_temp_f: f32,
    max_temp_f: f32,
    band_millis: [u64; BAND_COUNT],
    heartbeat_count: u64,
    samples: u64,
    unclassified_samples: u64,
    open_connections: u32,
    indicators: IndicatorStates,
}

impl Default for MonitorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitorEngine {
    pub fn new() -> Self {
        Self {
            latest_temp_f: 0.0,
            min_temp_f: MIN_TEMP_SENTINEL_F,
            max_temp_f: MAX_TEMP_SENTINEL_F,
            band_millis: [0; BAND_COUNT],
            heartbeat_count: 0,
            samples: 0,
            unclassified_samples: 0,
            open_connections: 0,
            indicators: IndicatorStates::default(),
        }
    }

    /// Drives every slot off, matching the boot-time state of the outputs.
    pub fn power_on(&mut self) -> Vec<IndicatorChange> {
        self.indicators = IndicatorStates::default();
        Indicator::ALL
            .iter()
            .map(|indicator| IndicatorChange::new(*indicator, false))
            .collect()
    }

    pub fn latest_temp_f(&self) -> f32 {
        self.latest_temp_f
    }

    pub fn min_temp_f(&self) -> f32 {
        self.min_temp_f
    }

    pub fn max_temp_f(&self) -> f32 {
        self.max_temp_f
    }

    pub fn band_seconds(&self) -> [u64; BAND_COUNT] {
        self.band_millis.map(|ms| ms / 1_000)
    }

    pub fn heartbeat_count(&self) -> u64 {
        self.heartbeat_count
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }

    pub fn unclassified_samples(&self) -> u64 {
        self.unclassified_samples
    }

    pub fn open_connections(&self) -> u32 {
        self.open_connections
    }

    pub fn indicators(&self) -> &IndicatorStates {
        &self.indicators
    }

    /// One sampling tick. `period_ms` is credited to the matched band only.
    pub fn record_sample(
        &mut self,
        reading: TemperatureReading,
        period_ms: u64,
    ) -> (SampleOutcome, Vec<IndicatorChange>) {
        let temp_f = reading.fahrenheit;
        self.latest_temp_f = temp_f;
        self.min_temp_f = self.min_temp_f.min(temp_f);
        self.max_temp_f = self.max_temp_f.max(temp_f);
        self.samples = self.samples.saturating_add(1);

        let band = classify(temp_f);
        let mut changes = Vec::new();
        match band {
            Some(active) => {
                self.band_millis[active] = self.band_millis[active].saturating_add(period_ms);
                for idx in 0..BAND_COUNT {
                    self.drive(Indicator::Band(idx), idx == active, &mut changes);
                }
            }
            None => {
                self.unclassified_samples = self.unclassified_samples.saturating_add(1);
            }
        }

        (SampleOutcome { band }, changes)
    }

    pub fn beat(&mut self) -> Vec<IndicatorChange> {
        self.heartbeat_count = self.heartbeat_count.wrapping_add(1);
        self.toggle(Indicator::Heartbeat)
    }

    pub fn toggle(&mut self, indicator: Indicator) -> Vec<IndicatorChange> {
        let next = !self.indicators.get(indicator);
        let mut changes = Vec::new();
        self.drive(indicator, next, &mut changes);
        changes
    }

    pub fn set_user_toggle(&mut self, on: bool) -> Vec<IndicatorChange> {
        let mut changes = Vec::new();
        self.drive(Indicator::UserToggle, on, &mut changes);
        changes
    }

    pub fn connection_opened(&mut self) -> Vec<IndicatorChange> {
        self.open_connections = self.open_connections.saturating_add(1);
        let mut changes = Vec::new();
        self.drive(Indicator::Connection, true, &mut changes);
        changes
    }

    pub fn connection_closed(&mut self) -> Vec<IndicatorChange> {
        self.open_connections = self.open_connections.saturating_sub(1);
        let mut changes = Vec::new();
        if self.open_connections == 0 {
            self.drive(Indicator::Connection, false, &mut changes);
        }
        changes
    }

    pub fn snapshot(&self) -> MonitorSnapshot {
        MonitorSnapshot {
            latest_temp_f: self.latest_temp_f,
            min_temp_f: self.min_temp_f,
            max_temp_f: self.max_temp_f,
            band_seconds: self.band_seconds(),
            heartbeat_count: self.heartbeat_count,
            samples: self.samples,
            indicators: self.indicators.clone(),
        }
    }

    fn drive(&mut self, indicator: Indicator, on: bool, changes: &mut Vec<IndicatorChange>) {
        if self.indicators.set(indicator, on) {
            changes.push(IndicatorChange::new(indicator, on));
        }
    }
}
