use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use crate::server::{
    config::Config, error::AppError, model::route::RouteTable, router, state::AppState,
};

/// Builds the HTTP client used to reach the backend.
///
/// Redirects are not followed so the browser sees the backend's redirects (admin login,
/// trailing-slash fixes) exactly as nginx would relay them. Proxy environment variables
/// are ignored since the backend is reached over the container network.
///
/// The proxy timeout bounds connecting and each wait for upstream data, not the whole
/// exchange, so long responses keep streaming as long as the backend keeps sending.
///
/// # Arguments
/// - `config` - Gateway configuration providing the upstream timeout
///
/// # Returns
/// - `Ok(reqwest::Client)` - Configured client
/// - `Err(AppError::ReqwestErr)` - TLS backend or client initialization failed
pub fn setup_reqwest_client(config: &Config) -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .connect_timeout(config.proxy_timeout)
        .read_timeout(config.proxy_timeout)
        .build()?;

    Ok(client)
}

/// Assembles the gateway router with its state.
pub fn build_app(config: &Config) -> Result<Router, AppError> {
    let http_client = setup_reqwest_client(config)?;
    let routes = RouteTable::foodgram(config);

    Ok(router::router().with_state(AppState::new(
        http_client,
        routes,
        config.max_body_size,
    )))
}

/// Binds the listen address and serves the gateway until Ctrl-C or SIGTERM.
pub async fn serve(config: &Config) -> Result<(), AppError> {
    let app = build_app(config)?;
    let listener = TcpListener::bind(config.listen_addr).await?;

    tracing::info!(
        "Gateway listening on {}, proxying to {}",
        listener.local_addr()?,
        config.backend_url
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Gateway stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received, draining connections");
}
