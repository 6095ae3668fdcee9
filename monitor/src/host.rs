use std::{io::ErrorKind, path::PathBuf, time::Duration};

use anyhow::{anyhow, Context};
use garden_common::{MonitorEngine, RuntimeConfig, SensorReader};
use tokio::task::JoinError;
use tracing::{info, warn};

use crate::{
    duties,
    hardware::{LogIndicators, SimulatedAdc},
    network::{wait_for_network, HostLink},
    server::{self, ServerLimits},
    shared::SharedMonitor,
};

pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut runtime = load_runtime_config().await.unwrap_or_else(|err| {
        warn!("failed to load runtime config: {err:#}");
        RuntimeConfig::default()
    });
    if let Some(port) = std::env::var("GARDEN_HTTP_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
    {
        runtime.monitor.http_port = port;
    }
    let config = runtime.monitor;

    let monitor = SharedMonitor::new(MonitorEngine::new(), LogIndicators);
    monitor.apply(MonitorEngine::power_on);

    let mut link = HostLink::new(&runtime.network);
    wait_for_network(
        &mut link,
        &monitor,
        Duration::from_millis(config.network_poll_interval_ms),
    )
    .await;

    let listener = server::bind(&config).await?;
    let addr = listener
        .local_addr()
        .context("failed to read http server address")?;
    info!("server started on http://{addr}");

    let heartbeat = duties::spawn_heartbeat(
        monitor.clone(),
        Duration::from_millis(config.heartbeat_interval_ms),
    );
    let sampler = duties::spawn_sampler(
        monitor.clone(),
        SensorReader::new(SimulatedAdc::new(runtime.simulation)),
        Duration::from_millis(config.sample_interval_ms),
    );
    let http = server::spawn_http_server(
        listener,
        monitor.clone(),
        ServerLimits::from_config(&config),
    );

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for shutdown signal")?;
        }
        exited = heartbeat => return Err(duty_exited("heartbeat", exited)),
        exited = sampler => return Err(duty_exited("sampling", exited)),
        exited = http => return Err(duty_exited("http", exited)),
    }

    let snapshot = monitor.snapshot();
    info!(
        "shutting down after {} samples, {} heartbeats (min {:.1}F, max {:.1}F)",
        snapshot.samples, snapshot.heartbeat_count, snapshot.min_temp_f, snapshot.max_temp_f
    );
    Ok(())
}

fn duty_exited(name: &str, result: Result<(), JoinError>) -> anyhow::Error {
    match result {
        Ok(()) => anyhow!("{name} duty stopped unexpectedly"),
        Err(err) => anyhow!(err).context(format!("{name} duty failed")),
    }
}

fn runtime_config_path() -> PathBuf {
    std::env::var("GARDEN_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./.garden"))
        .join("runtime.json")
}

async fn load_runtime_config() -> anyhow::Result<RuntimeConfig> {
    let path = runtime_config_path();
    match tokio::fs::read(&path).await {
        Ok(raw) => RuntimeConfig::from_json(&raw)
            .with_context(|| format!("invalid runtime config at {}", path.display())),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(RuntimeConfig::default()),
        Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
    }
}
