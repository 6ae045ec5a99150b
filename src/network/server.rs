//! HTTP Server
//!
//! Binds the listener and serves the task router.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::api;
use crate::config::Config;
use crate::error::Result;
use crate::store::TaskStore;

/// HTTP server for the task API
pub struct Server {
    listener: TcpListener,
    router: Router,
}

impl Server {
    /// Bind `config.listen_addr` and route requests to `store`
    pub async fn bind(config: &Config, store: Arc<dyn TaskStore>) -> Result<Self> {
        let listener = TcpListener::bind(&config.listen_addr).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            router: api::router(store),
        })
    }

    /// Address actually bound (resolves port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until Ctrl+C
    pub async fn run(self) -> Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Serve until `shutdown` resolves, then finish in-flight requests
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server stopped accepting connections");
        Ok(())
    }
}

/// Resolves on Ctrl+C
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl+C, initiating shutdown..."),
        Err(e) => {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
