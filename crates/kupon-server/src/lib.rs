//! # Kupon Server
//!
//! HTTP server for the Kupon indicator engine.
//!
//! ## Endpoints
//!
//! - `GET /`: liveness banner
//! - `GET /health`: status and version
//! - `GET /bondindicators?isin=`: price, yields and tax of a bond
//! - `GET /coupons?isin=`: full coupon schedule
//! - `GET /amortizations?isin=`: amortization schedule
//! - `GET /dividends?isin=`: declared dividends of a share
//!
//! ## Usage
//!
//! ```ignore
//! use kupon_server::Server;
//!
//! let server = Server::new(config, engine);
//! server.start().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod handlers;
pub mod routes;

use std::future::IntoFuture;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use kupon_engine::IndicatorEngine;

pub use config::{ProviderKind, ServerConfig};

/// The Kupon server.
pub struct Server {
    config: ServerConfig,
    engine: Arc<IndicatorEngine>,
}

impl Server {
    /// Create a new server.
    pub fn new(config: ServerConfig, engine: Arc<IndicatorEngine>) -> Self {
        Self { config, engine }
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::create_router(self.engine.clone())
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Start the server and run until SIGINT or SIGTERM.
    ///
    /// After the signal no new connections are accepted and in-flight
    /// requests get `shutdown_timeout_secs` to finish.
    pub async fn start(&self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr()?;

        info!("Starting Kupon server on {}", addr);

        let listener = TcpListener::bind(addr).await?;

        let signalled = Arc::new(Notify::new());
        let trigger = signalled.clone();
        let serve = axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                info!("Shutdown signal received, draining connections");
                trigger.notify_one();
            })
            .into_future();

        let timeout = self.config.shutdown_timeout();
        tokio::select! {
            result = serve => result,
            _ = async {
                signalled.notified().await;
                tokio::time::sleep(timeout).await;
            } => {
                warn!("Shutdown timeout of {:?} elapsed, closing open connections", timeout);
                Ok(())
            }
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Cannot listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
