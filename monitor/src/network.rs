use std::time::Duration;

use garden_common::{Indicator, NetworkConfig};
use tracing::info;

use crate::shared::SharedMonitor;

/// Station association performed before any duty starts.
pub trait NetworkLink {
    fn is_connected(&mut self) -> bool;
    fn address(&self) -> Option<String>;
}

/// A host already owns its network; the configured station only gets logged.
pub struct HostLink {
    ssid: String,
}

impl HostLink {
    pub fn new(network: &NetworkConfig) -> Self {
        Self {
            ssid: network.wifi_ssid.clone(),
        }
    }
}

impl NetworkLink for HostLink {
    fn is_connected(&mut self) -> bool {
        true
    }

    fn address(&self) -> Option<String> {
        if self.ssid.is_empty() {
            None
        } else {
            Some(format!("host network (station {})", self.ssid))
        }
    }
}

/// Blocks until the link reports connected, blinking the heartbeat indicator
/// once per poll while waiting.
pub async fn wait_for_network(
    link: &mut impl NetworkLink,
    monitor: &SharedMonitor,
    poll_interval: Duration,
) -> u32 {
    let mut polls = 0u32;
    while !link.is_connected() {
        monitor.apply(|engine| engine.toggle(Indicator::Heartbeat));
        tokio::time::sleep(poll_interval).await;
        polls = polls.saturating_add(1);
    }

    let address = link.address().unwrap_or_else(|| "host network".to_string());
    info!("connected: {address}");
    polls
}

#[cfg(test)]
mod tests {
    use garden_common::MonitorEngine;

    use super::*;
    use crate::shared::testing::RecordingOutput;

    struct SlowLink {
        remaining: u32,
    }

    impl NetworkLink for SlowLink {
        fn is_connected(&mut self) -> bool {
            if self.remaining == 0 {
                return true;
            }
            self.remaining -= 1;
            false
        }

        fn address(&self) -> Option<String> {
            Some("192.168.4.20".to_string())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn blinks_heartbeat_until_joined() {
        let output = RecordingOutput::default();
        let monitor = SharedMonitor::new(MonitorEngine::new(), output.clone());
        let mut link = SlowLink { remaining: 3 };

        let polls = wait_for_network(&mut link, &monitor, Duration::from_secs(1)).await;

        assert_eq!(polls, 3);
        assert_eq!(
            output.driven_for(Indicator::Heartbeat),
            vec![true, false, true]
        );
        assert_eq!(monitor.read(MonitorEngine::heartbeat_count), 0);
    }

    #[tokio::test]
    async fn host_link_is_immediately_connected() {
        let monitor = SharedMonitor::new(MonitorEngine::new(), RecordingOutput::default());
        let mut link = HostLink::new(&NetworkConfig::default());

        assert_eq!(
            wait_for_network(&mut link, &monitor, Duration::from_secs(1)).await,
            0
        );
        assert_eq!(link.address(), None);
    }
}
