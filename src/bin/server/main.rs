#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Grids landing page, waitlist and email relay server

use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use grids::{
    domain::{communication::delivery::FailoverRelay, waitlist::WaitlistServiceImpl},
    infrastructure::{
        email::config::EmailProvidersConfig,
        http::{
            servers::{http::HttpServer, https::HttpsServer},
            state::{AppConfig, AppState},
            HttpServerConfig, Server,
        },
        notifications::telegram::{TelegramConfig, TelegramNotifier},
        outbound::ReqwestClient,
    },
};
use tracing::{info, warn};

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The HTTP server configuration
    #[clap(flatten)]
    pub server: HttpServerConfig,

    /// Where waitlist signups are announced
    #[clap(flatten)]
    pub telegram: TelegramConfig,

    /// The email providers to relay through
    #[clap(flatten)]
    pub email: EmailProvidersConfig,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to load environment: {}", e);

            return Err(e.into());
        }
    }

    tracing_subscriber::fmt::init();

    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("failed to install the rustls crypto provider"))?;

    let args = Args::parse();

    let http = ReqwestClient::new();

    let notifier = TelegramNotifier::new(args.telegram, http.clone());
    let waitlist = WaitlistServiceImpl::new(Arc::new(notifier));

    let relay = FailoverRelay::new(args.email.configured(http));

    if relay.is_empty() {
        warn!("no email providers configured, /api/v1/emails will answer 503");
    } else {
        info!(providers = relay.len(), "email relay ready");
    }

    let config = AppConfig {
        public_dir: args.server.public_dir.clone(),
    };

    let state = AppState::new(config, waitlist, relay);
    let address = args.server.address();

    match (&args.server.tls_cert_path, &args.server.tls_key_path) {
        (Some(cert_path), Some(key_path)) => {
            HttpsServer::new(address, cert_path, key_path, state)
                .await?
                .run()
                .await
        }
        _ => HttpServer::new(address, state)?.run().await,
    }
}
