use crate::config::Config;
use crate::model::NetworkError;
use crate::server::{create_router, Hub};
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

/// The relay's HTTP and WebSocket front end.
#[derive(Debug, Clone)]
pub struct RelayServer {
    config: Config,
    hub: Hub,
}

impl RelayServer {
    pub fn new(config: Config) -> Self {
        let hub = Hub::new(config.outbound_capacity, config.send_timeout());
        Self { config, hub }
    }

    pub fn hub(&self) -> &Hub {
        &self.hub
    }

    pub async fn bind(&self) -> Result<TcpListener, NetworkError> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(addr).await?;
        Ok(listener)
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> Result<(), NetworkError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = self.bind().await?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener. Once `shutdown` resolves, every
    /// remaining client is reaped and its socket closed.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), NetworkError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = listener.local_addr()?;
        info!("Relay listening on {}", addr);

        let reaper = self.hub.clone();
        let router = create_router(self.hub);
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                info!("Shutdown requested");
                let count = reaper.shutdown().await;
                info!(count, "Reaped remaining clients");
            })
            .await?;

        info!("Relay stopped");
        Ok(())
    }
}
