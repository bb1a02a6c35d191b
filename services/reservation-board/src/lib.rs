//! Reservation Board - restaurant reservation list
//!
//! Fetches the reservation list once when the view is mounted and renders
//! it as HTML, either served over HTTP or printed once.

pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod io;
pub mod render;
pub mod reservation;
pub mod view;

pub use config::{load_config, Config};
pub use error::{BoardError, FetchError, Result};
pub use view::{Phase, ReservationListView, ViewState};

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::client::ReservationClient;
use crate::io::{HttpClient, ReqwestHttpClient};

fn build_view(config: &Config) -> Result<ReservationListView> {
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::with_timeout(
        Duration::from_secs(config.source.timeout_seconds),
    )?);
    let client = ReservationClient::new(&config.source, http);
    Ok(ReservationListView::new(client))
}

/// Mount the view, wait for its single load, and return the rendered fragment
pub async fn render_once(config: &Config) -> Result<String> {
    config.validate()?;
    let view = build_view(config)?;
    view.mount();
    view.settled().await;
    Ok(view.render(&config.display).await)
}

/// Run the reservation board service with the given configuration
pub async fn run(config: Config) -> Result<()> {
    config.validate()?;
    if !config.dashboard.enabled {
        return Err(BoardError::Config(
            "dashboard.enabled is false; nothing to serve (use --once to print instead)"
                .to_string(),
        ));
    }

    let cancel = CancellationToken::new();

    // Setup shutdown handler
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received");
        cancel_for_signal.cancel();
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.dashboard.port));
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        BoardError::Dashboard(format!(
            "Failed to bind dashboard to port {}: {}",
            config.dashboard.port, e
        ))
    })?;

    serve(config, listener, cancel).await
}

/// Mount the view and serve the dashboard on `listener` until `cancel` fires
pub async fn serve(
    config: Config,
    listener: tokio::net::TcpListener,
    cancel: CancellationToken,
) -> Result<()> {
    config.validate()?;
    let view = Arc::new(build_view(&config)?);
    view.mount();

    tracing::info!("Dashboard listening on http://{}", listener.local_addr()?);

    let router = dashboard::build_router(Arc::clone(&view), config.display.clone());
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            cancel.cancelled().await;
        })
        .await?;

    view.unmount();
    tracing::info!("Reservation board stopped");
    Ok(())
}
