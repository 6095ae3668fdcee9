use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use garden_common::{IndicatorChange, IndicatorOutput, MonitorEngine, MonitorSnapshot};

struct Inner {
    engine: MonitorEngine,
    output: Box<dyn IndicatorOutput + Send>,
}

/// Handle to the single state block shared by every duty.
///
/// All access goes through short synchronous closures, so the lock is never
/// held across an `.await`. Indicator changes returned by the engine are
/// driven while the lock is still held, keeping outputs in step with state.
#[derive(Clone)]
pub struct SharedMonitor {
    inner: Arc<Mutex<Inner>>,
}

impl SharedMonitor {
    pub fn new(engine: MonitorEngine, output: impl IndicatorOutput + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                engine,
                output: Box::new(output),
            })),
        }
    }

    pub fn update<R>(
        &self,
        mutate: impl FnOnce(&mut MonitorEngine) -> (R, Vec<IndicatorChange>),
    ) -> R {
        let mut inner = self.lock();
        let (result, changes) = mutate(&mut inner.engine);
        for change in changes {
            inner.output.set(change.indicator, change.on);
        }
        result
    }

    pub fn apply(&self, mutate: impl FnOnce(&mut MonitorEngine) -> Vec<IndicatorChange>) {
        self.update(|engine| ((), mutate(engine)));
    }

    pub fn read<R>(&self, view: impl FnOnce(&MonitorEngine) -> R) -> R {
        view(&self.lock().engine)
    }

    pub fn snapshot(&self) -> MonitorSnapshot {
        self.read(MonitorEngine::snapshot)
    }

    /// Lights the connection indicator until the guard is dropped.
    pub fn connection_guard(&self) -> ConnectionGuard {
        self.apply(MonitorEngine::connection_opened);
        ConnectionGuard {
            monitor: self.clone(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Engine mutations are single calls, so a poisoned lock still guards consistent state.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct ConnectionGuard {
    monitor: SharedMonitor,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.monitor.apply(MonitorEngine::connection_closed);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use garden_common::{Indicator, IndicatorOutput};

    /// Output driver that records every level it is asked to drive.
    #[derive(Clone, Default)]
    pub struct RecordingOutput {
        log: Arc<Mutex<Vec<(Indicator, bool)>>>,
    }

    impl RecordingOutput {
        pub fn driven(&self) -> Vec<(Indicator, bool)> {
            self.log.lock().unwrap().clone()
        }

        pub fn driven_for(&self, indicator: Indicator) -> Vec<bool> {
            self.driven()
                .into_iter()
                .filter(|(driven, _)| *driven == indicator)
                .map(|(_, on)| on)
                .collect()
        }
    }

    impl IndicatorOutput for RecordingOutput {
        fn set(&mut self, indicator: Indicator, on: bool) {
            self.log.lock().unwrap().push((indicator, on));
        }
    }
}

#[cfg(test)]
mod tests {
    use garden_common::{Indicator, TemperatureReading};

    use super::testing::RecordingOutput;
    use super::*;

    #[test]
    fn update_drives_engine_changes() {
        let output = RecordingOutput::default();
        let monitor = SharedMonitor::new(MonitorEngine::new(), output.clone());

        let outcome = monitor.update(|engine| {
            engine.record_sample(
                TemperatureReading {
                    celsius: 10.0,
                    fahrenheit: 50.0,
                },
                1_000,
            )
        });

        assert_eq!(outcome.band, Some(2));
        assert_eq!(output.driven(), vec![(Indicator::Band(2), true)]);
        assert_eq!(monitor.snapshot().band_seconds[2], 1);
    }

    #[test]
    fn connection_guard_restores_indicator_on_drop() {
        let output = RecordingOutput::default();
        let monitor = SharedMonitor::new(MonitorEngine::new(), output.clone());

        {
            let _first = monitor.connection_guard();
            let second = monitor.connection_guard();
            drop(second);
            assert!(monitor.snapshot().indicators.get(Indicator::Connection));
        }

        assert!(!monitor.snapshot().indicators.get(Indicator::Connection));
        assert_eq!(output.driven_for(Indicator::Connection), vec![true, false]);
        assert_eq!(monitor.read(MonitorEngine::open_connections), 0);
    }

    #[test]
    fn connection_guard_restores_indicator_on_panic() {
        let monitor = SharedMonitor::new(MonitorEngine::new(), RecordingOutput::default());

        let handle = monitor.clone();
        let result = std::thread::spawn(move || {
            let _guard = handle.connection_guard();
            panic!("handler failed");
        })
        .join();

        assert!(result.is_err());
        assert!(!monitor.snapshot().indicators.get(Indicator::Connection));
    }
}
