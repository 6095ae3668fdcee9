use std::f32::consts::TAU;

use garden_common::{
    sensor::raw_for_fahrenheit, Indicator, IndicatorOutput, SensorError, SimulationConfig,
    TemperatureAdc,
};
use tracing::debug;

/// Host stand-in for the on-chip sensor: a slow sine around `base_temp_f`.
pub struct SimulatedAdc {
    config: SimulationConfig,
    tick: u32,
}

impl SimulatedAdc {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config, tick: 0 }
    }

    fn temperature_f(&self) -> f32 {
        let phase = (self.tick % self.config.period_samples) as f32
            / self.config.period_samples as f32;
        self.config.base_temp_f + self.config.swing_f * (phase * TAU).sin()
    }
}

impl TemperatureAdc for SimulatedAdc {
    fn read_raw(&mut self) -> Result<u16, SensorError> {
        let raw = raw_for_fahrenheit(self.temperature_f());
        self.tick = self.tick.wrapping_add(1);
        Ok(raw)
    }
}

/// Indicator driver for hosts without LEDs.
pub struct LogIndicators;

impl IndicatorOutput for LogIndicators {
    fn set(&mut self, indicator: Indicator, on: bool) {
        debug!("indicator {} -> {}", indicator.as_str(), if on { "on" } else { "off" });
    }
}

#[cfg(test)]
mod tests {
    use garden_common::{sensor::convert_raw, SensorReader};

    use super::*;

    #[test]
    fn simulation_sweeps_around_base() {
        let config = SimulationConfig {
            base_temp_f: 60.0,
            swing_f: 20.0,
            period_samples: 4,
        };
        let mut reader = SensorReader::new(SimulatedAdc::new(config));

        let readings: Vec<f32> = (0..4)
            .map(|_| reader.read().unwrap().fahrenheit)
            .collect();

        let expected = [60.0, 80.0, 60.0, 40.0];
        for (reading, expected) in readings.iter().zip(expected) {
            assert!((reading - expected).abs() < 0.2, "{readings:?}");
        }
    }

    #[test]
    fn flat_simulation_holds_base() {
        let mut adc = SimulatedAdc::new(SimulationConfig {
            base_temp_f: 34.0,
            swing_f: 0.0,
            period_samples: 10,
        });
        for _ in 0..3 {
            let reading = convert_raw(adc.read_raw().unwrap());
            assert!((reading.fahrenheit - 34.0).abs() < 0.2);
        }
    }
}
