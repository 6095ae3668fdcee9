pub mod bands;
pub mod config;
pub mod dwell;
pub mod monitor;
pub mod pages;
pub mod request;
pub mod routes;
pub mod sensor;
pub mod types;

pub use bands::{classify, Band, BAND_COUNT, BAND_TABLE};
pub use config::{MonitorConfig, NetworkConfig, RuntimeConfig, SimulationConfig};
pub use dwell::format_dwell;
pub use monitor::{MonitorEngine, SampleOutcome};
pub use pages::{Response, Status};
pub use request::{RequestError, RequestLine, RequestScanner, ScanState};
pub use routes::*;
pub use sensor::{SensorError, SensorReader, TemperatureAdc};
pub use types::{
    Indicator, IndicatorChange, IndicatorOutput, IndicatorStates, MonitorSnapshot,
    TemperatureReading,
};
