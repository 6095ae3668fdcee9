use thiserror::Error;

use crate::types::TemperatureReading;

const ADC_FULL_SCALE: f32 = 65_535.0;
const ADC_REFERENCE_VOLTS: f32 = 3.3;
// RP2040 die sensor: 0.706 V at 27 C, falling 1.721 mV per degree.
const SENSOR_VOLTS_AT_27C: f32 = 0.706;
const SENSOR_SLOPE_VOLTS_PER_C: f32 = 0.001_721;

#[derive(Debug, Error)]
pub enum SensorError {
    #[error("analog input unavailable: {0}")]
    Unavailable(String),
}

/// Raw analog capability backing the temperature sensor.
pub trait TemperatureAdc {
    fn read_raw(&mut self) -> Result<u16, SensorError>;
}

pub fn celsius_to_fahrenheit(temp_c: f32) -> f32 {
    32.0 + 1.8 * temp_c
}

pub fn convert_raw(raw: u16) -> TemperatureReading {
    let volts = f32::from(raw) * ADC_REFERENCE_VOLTS / ADC_FULL_SCALE;
    let celsius = 27.0 - (volts - SENSOR_VOLTS_AT_27C) / SENSOR_SLOPE_VOLTS_PER_C;
    TemperatureReading {
        celsius,
        fahrenheit: celsius_to_fahrenheit(celsius),
    }
}

/// Nearest raw sample for a temperature, saturating at the converter limits.
pub fn raw_for_fahrenheit(temp_f: f32) -> u16 {
    let celsius = (temp_f - 32.0) / 1.8;
    let volts = SENSOR_VOLTS_AT_27C - (celsius - 27.0) * SENSOR_SLOPE_VOLTS_PER_C;
    let raw = (volts * ADC_FULL_SCALE / ADC_REFERENCE_VOLTS).round();
    raw.clamp(0.0, ADC_FULL_SCALE) as u16
}

pub struct SensorReader<A> {
    adc: A,
}

impl<A: TemperatureAdc> SensorReader<A> {
    pub fn new(adc: A) -> Self {
        Self { adc }
    }

    pub fn read(&mut self) -> Result<TemperatureReading, SensorError> {
        self.adc.read_raw().map(convert_raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedAdc(Result<u16, ()>);

    impl TemperatureAdc for FixedAdc {
        fn read_raw(&mut self) -> Result<u16, SensorError> {
            self.0
                .map_err(|_| SensorError::Unavailable("disconnected".to_string()))
        }
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.05
    }

    #[test]
    fn reference_voltage_reads_27_celsius() {
        // 0.706 V is raw 14020.
        let reading = convert_raw(14_020);
        assert!(close(reading.celsius, 27.0), "{reading:?}");
        assert!(close(reading.fahrenheit, 80.6), "{reading:?}");
    }

    #[test]
    fn higher_voltage_means_colder() {
        assert!(convert_raw(16_000).celsius < convert_raw(12_000).celsius);
    }

    #[test]
    fn converter_limits_map_to_finite_readings() {
        let low = convert_raw(0);
        let high = convert_raw(u16::MAX);
        assert!(close(low.celsius, 437.23), "{low:?}");
        assert!(high.celsius < -1_000.0);
        assert!(low.fahrenheit.is_finite() && high.fahrenheit.is_finite());
    }

    #[test]
    fn inverse_lands_within_one_count() {
        for temp_f in [-20.0, 34.0, 50.0, 72.0, 100.0] {
            let reading = convert_raw(raw_for_fahrenheit(temp_f));
            assert!((reading.fahrenheit - temp_f).abs() < 0.2, "{temp_f}");
        }
    }

    #[test]
    fn reader_surfaces_adc_failure() {
        let mut reader = SensorReader::new(FixedAdc(Err(())));
        assert!(matches!(reader.read(), Err(SensorError::Unavailable(_))));

        let mut reader = SensorReader::new(FixedAdc(Ok(14_020)));
        assert!(reader.read().is_ok());
    }
}
