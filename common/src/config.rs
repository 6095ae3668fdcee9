use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub heartbeat_interval_ms: u64,
    pub sample_interval_ms: u64,
    pub http_bind: [u8; 4],
    pub http_port: u16,
    pub max_connections: usize,
    pub connection_timeout_ms: u64,
    pub max_request_lines: usize,
    pub max_line_bytes: usize,
    pub network_poll_interval_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval_ms: 200,
            sample_interval_ms: 1_000,
            http_bind: [0, 0, 0, 0],
            http_port: 80,
            max_connections: 4,
            connection_timeout_ms: 5_000,
            max_request_lines: 64,
            max_line_bytes: 1_024,
            network_poll_interval_ms: 1_000,
        }
    }
}

impl MonitorConfig {
    pub fn sanitize(&mut self) {
        self.heartbeat_interval_ms = self.heartbeat_interval_ms.clamp(50, 10_000);
        self.sample_interval_ms = self.sample_interval_ms.clamp(100, 60_000);
        self.max_connections = self.max_connections.clamp(1, 16);
        self.connection_timeout_ms = self.connection_timeout_ms.clamp(500, 60_000);
        self.max_request_lines = self.max_request_lines.clamp(4, 256);
        self.max_line_bytes = self.max_line_bytes.clamp(64, 8_192);
        self.network_poll_interval_ms = self.network_poll_interval_ms.clamp(100, 10_000);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub wifi_ssid: String,
    pub wifi_pass: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub base_temp_f: f32,
    pub swing_f: f32,
    pub period_samples: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            base_temp_f: 62.0,
            swing_f: 30.0,
            period_samples: 600,
        }
    }
}

impl SimulationConfig {
    pub fn sanitize(&mut self) {
        self.base_temp_f = self.base_temp_f.clamp(-40.0, 176.0);
        self.swing_f = self.swing_f.clamp(0.0, 100.0);
        self.period_samples = self.period_samples.max(2);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub monitor: MonitorConfig,
    pub network: NetworkConfig,
    pub simulation: SimulationConfig,
}

impl RuntimeConfig {
    pub fn from_json(raw: &[u8]) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_slice(raw)?;
        config.sanitize();
        Ok(config)
    }

    pub fn sanitize(&mut self) {
        self.monitor.sanitize();
        self.simulation.sanitize();
    }
}
