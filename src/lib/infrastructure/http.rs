//! HTTP Server

use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Result;
use async_trait::async_trait;
use axum::{extract::Request, routing::get, Router};
use axum_server::Handle;
use clap::Parser;
use tokio::signal;
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};
use tracing::{debug, info_span};

use crate::domain::{communication::delivery::EmailRelay, waitlist::WaitlistService};

use handlers::{landing, panic_handler, v1, waitlist};
use state::AppState;

pub mod errors;
pub mod handlers;
pub mod open_api;
pub mod servers;
pub mod state;
pub mod templates;

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
pub struct HttpServerConfig {
    /// The port to listen on
    #[arg(long, env = "HTTP_PORT", default_value = "3000")]
    pub port: u16,

    /// Directory served under `/public`
    #[arg(long, env = "PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,

    /// PEM certificate; serves HTTPS when set together with the key
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// PEM private key
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,
}

impl HttpServerConfig {
    /// The address to bind on all IPv4 interfaces
    pub fn address(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

/// A server that runs until shut down
#[async_trait]
pub trait Server: Sized + Send {
    /// Serves requests until Ctrl+C or SIGTERM
    async fn run(self) -> Result<()>;
}

/// Create the application's router
pub fn router<W, R>(state: AppState<W, R>) -> Router
where
    W: WaitlistService,
    R: EmailRelay,
{
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
        let uri = request.uri().to_string();
        info_span!("http_request", method = ?request.method(), uri)
    });

    let public = ServeDir::new(&state.config.public_dir);

    Router::new()
        .route(
            "/",
            get(landing::handler).post(waitlist::handler::<W, R>),
        )
        .nest_service("/public", public)
        .nest("/api/v1", v1::router::<W, R>())
        .layer(CatchPanicLayer::custom(panic_handler))
        .layer(trace_layer)
        .with_state(state)
}

/// Resolves on Ctrl+C or SIGTERM, then drains `handle` for up to 10 seconds
#[mutants::skip]
pub async fn shutdown_signal(handle: Option<Handle>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    if let Some(handle) = handle {
        debug!("shutting down gracefully");
        handle.graceful_shutdown(Some(Duration::from_secs(10)));
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use clap::Parser;
    use testresult::TestResult;

    use super::{router, state::tests::mock_state, HttpServerConfig};

    #[tokio::test]
    async fn test_serves_public_files() -> TestResult {
        let state = mock_state();

        let response = TestServer::new(router(state))?
            .get("/public/robots.txt")
            .await;

        response.assert_status_ok();
        assert!(response.text().contains("User-agent"));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_public_file() -> TestResult {
        let state = mock_state();

        let response = TestServer::new(router(state))?
            .get("/public/missing.css")
            .await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

        Ok(())
    }

    #[test]
    fn test_config_defaults() -> TestResult {
        let config = HttpServerConfig::try_parse_from(["grids"])?;

        assert_eq!(config.port, 3000);
        assert_eq!(config.public_dir, PathBuf::from("public"));
        assert_eq!(config.address().to_string(), "0.0.0.0:3000");

        Ok(())
    }
}
