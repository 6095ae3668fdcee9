mod duties;
mod hardware;
mod host;
mod network;
mod server;
mod shared;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    host::run().await
}
