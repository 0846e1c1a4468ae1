//! Shadowcheck HTTP service.
//!
//! Wires configuration, the structured API client, the browser launcher and
//! the human verifier into a [`Detector`] and exposes it over HTTP.

mod error;
mod routes;
mod state;

pub use error::ServerError;
pub use routes::{build_app, CheckResponse, CheckSummary};
pub use state::AppState;

use shadowcheck_api::{RecaptchaVerifier, XApiClient};
use shadowcheck_browser::{renderer_available, ChromiumLauncher};
use shadowcheck_core::AppConfig;
use shadowcheck_scanner::{Detector, ProbeSettings};
use std::sync::Arc;
use tracing::info;

/// Initialize tracing subscriber for structured logging.
///
/// `RUST_LOG` wins; otherwise the configured filter is used.
fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

/// Load configuration, start the renderer check and serve until shutdown.
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::load_with_env()?;
    init_tracing(&config.server.log_level);

    info!("Starting Shadowcheck v{}", env!("CARGO_PKG_VERSION"));
    config.validate()?;

    let launcher = Arc::new(ChromiumLauncher::new(config.browser.clone()));
    let renderer_ok = renderer_available(launcher.as_ref()).await;
    if renderer_ok {
        info!("Renderer available");
    } else {
        tracing::warn!("Renderer unavailable, observational probes will be skipped");
    }

    let api = Arc::new(XApiClient::from_config(&config.api)?);
    let verifier = Arc::new(RecaptchaVerifier::from_config(&config.verification)?);
    let settings =
        ProbeSettings::from_config(&config.browser)?.with_renderer_available(renderer_ok);
    let detector = Detector::new(api, launcher, settings);

    let state = AppState::new(Arc::new(detector), verifier, renderer_ok);
    let app = build_app(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Received shutdown signal, starting graceful shutdown");
}
