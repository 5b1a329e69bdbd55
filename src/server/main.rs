use stranger_relay::config::Config;
use stranger_relay::server::telemetry::{init_telemetry, shutdown_telemetry};
use stranger_relay::server::RelayServer;
use tracing::{error, info};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    init_telemetry(&config).await?;

    info!(addr = %config.socket_addr(), "Starting stranger-relay");
    let result = RelayServer::new(config).run(shutdown_signal()).await;

    shutdown_telemetry();
    result.map_err(Into::into)
}
