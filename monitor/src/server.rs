use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use garden_common::{pages, MonitorConfig, RequestScanner, Response, Route, ScanState};
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader},
    net::TcpListener,
    sync::Semaphore,
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::shared::SharedMonitor;

const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
pub struct ServerLimits {
    pub max_connections: usize,
    pub connection_timeout: Duration,
    pub max_request_lines: usize,
    pub max_line_bytes: usize,
}

impl ServerLimits {
    pub fn from_config(config: &MonitorConfig) -> Self {
        Self {
            max_connections: config.max_connections,
            connection_timeout: Duration::from_millis(config.connection_timeout_ms),
            max_request_lines: config.max_request_lines,
            max_line_bytes: config.max_line_bytes,
        }
    }
}

pub async fn bind(config: &MonitorConfig) -> anyhow::Result<TcpListener> {
    let addr = SocketAddr::from((config.http_bind, config.http_port));
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind http server at {addr}"))
}

/// Accept duty: one short-lived handler task per connection, at most
/// `max_connections` at once. Connections beyond the cap are closed unanswered.
pub fn spawn_http_server(
    listener: TcpListener,
    monitor: SharedMonitor,
    limits: ServerLimits,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let permits = Arc::new(Semaphore::new(limits.max_connections));
        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(err) => {
                    warn!("http accept error: {err}");
                    tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                    continue;
                }
            };

            let Ok(permit) = permits.clone().try_acquire_owned() else {
                warn!(
                    "dropping connection from {peer}: {} handlers busy",
                    limits.max_connections
                );
                drop(stream);
                continue;
            };

            let monitor = monitor.clone();
            let limits = limits.clone();
            tokio::spawn(async move {
                let _permit = permit;
                if let Err(err) = serve_connection(stream, &monitor, &limits).await {
                    warn!("connection from {peer} aborted: {err:#}");
                }
            });
        }
    })
}

pub async fn serve_connection<S>(
    stream: S,
    monitor: &SharedMonitor,
    limits: &ServerLimits,
) -> anyhow::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let _connection = monitor.connection_guard();
    tokio::time::timeout(limits.connection_timeout, handle_request(stream, monitor, limits))
        .await
        .with_context(|| {
            format!(
                "connection timed out after {} ms",
                limits.connection_timeout.as_millis()
            )
        })?
}

async fn handle_request<S>(
    stream: S,
    monitor: &SharedMonitor,
    limits: &ServerLimits,
) -> anyhow::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(stream);
    let mut scanner = RequestScanner::new(limits.max_request_lines, limits.max_line_bytes);
    let mut line = Vec::with_capacity(128);
    // One byte past the limit is enough to detect an oversized line.
    let read_limit = limits.max_line_bytes as u64 + 1;

    loop {
        line.clear();
        let read = (&mut reader)
            .take(read_limit)
            .read_until(b'\n', &mut line)
            .await
            .context("failed to read request")?;
        if read == 0 {
            break;
        }
        if scanner.feed(&line)? == ScanState::Dispatched {
            break;
        }
    }

    let request = scanner.finish();
    let path = request.as_ref().map_or("", |request| request.path.as_str());
    let route = Route::resolve(path);
    match &request {
        Some(request) => info!("req {} {} -> {}", request.method, request.path, route.as_str()),
        None => debug!("request without a request line -> {}", route.as_str()),
    }

    let response = respond(route, monitor);
    let mut stream = reader.into_inner();
    stream
        .write_all(&response.into_bytes())
        .await
        .context("failed to write response")?;
    stream.shutdown().await.context("failed to close connection")?;
    Ok(())
}

fn respond(route: Route, monitor: &SharedMonitor) -> Response {
    match route {
        Route::Index => pages::index_page(&monitor.snapshot()),
        Route::GardenTemps => pages::garden_temps_page(&monitor.snapshot()),
        Route::UserToggleOn | Route::UserToggleOff => {
            let on = route == Route::UserToggleOn;
            let snapshot = monitor.update(|engine| {
                let changes = engine.set_user_toggle(on);
                (engine.snapshot(), changes)
            });
            pages::index_page(&snapshot)
        }
        Route::NotFound => pages::not_found_page(),
    }
}
