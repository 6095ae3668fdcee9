use std::time::Duration;

use garden_common::{MonitorEngine, SensorReader, TemperatureAdc, BAND_TABLE};
use tokio::{task::JoinHandle, time::Instant};
use tracing::{debug, warn};

use crate::shared::SharedMonitor;

pub fn spawn_heartbeat(monitor: SharedMonitor, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            monitor.apply(MonitorEngine::beat);
        }
    })
}

/// Samples once per `period`, starting one period after spawn so the
/// credited dwell time never runs ahead of the clock.
pub fn spawn_sampler<A>(
    monitor: SharedMonitor,
    mut reader: SensorReader<A>,
    period: Duration,
) -> JoinHandle<()>
where
    A: TemperatureAdc + Send + 'static,
{
    let period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX);

    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        loop {
            interval.tick().await;

            let reading = match reader.read() {
                Ok(reading) => reading,
                Err(err) => {
                    warn!("temperature read failed, keeping previous reading: {err}");
                    continue;
                }
            };

            let outcome = monitor.update(|engine| engine.record_sample(reading, period_ms));
            match outcome.band {
                Some(idx) => debug!(
                    "sample {:.1}F in band {}",
                    reading.fahrenheit, BAND_TABLE[idx].label
                ),
                None => debug!(
                    "sample {:.1}F matches no band, indicators unchanged",
                    reading.fahrenheit
                ),
            }
        }
    })
}
