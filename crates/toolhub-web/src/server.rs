use crate::assets::static_routes;
use crate::routes::{
    account_routes, admin_routes, auth_routes, health_routes, settings_routes, tool_routes,
};
use crate::state::AppState;
use crate::{Result, WebError};
use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// Assemble the full application router for `state`
pub fn build_router(state: AppState) -> Result<Router> {
    let server = &state.config.server;

    let origins = server
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| WebError::Config(format!("Invalid CORS origin '{origin}': {e}")))
        })
        .collect::<Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let body_limit = server.max_body_bytes();
    let static_dir = server.static_dir.clone();

    let app = Router::new()
        .merge(tool_routes())
        .merge(auth_routes())
        .merge(account_routes())
        .merge(settings_routes())
        .merge(admin_routes())
        .with_state(state)
        .merge(health_routes())
        .merge(static_routes(static_dir.as_deref()))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors);

    Ok(app)
}

/// Bind the configured address and serve until `shutdown` resolves
pub async fn serve_until<F>(state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = state
        .config
        .server
        .bind_address()
        .parse()
        .map_err(|e| WebError::Config(format!("Invalid address: {e}")))?;
    let app = build_router(state)?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(WebError::Io)?;
    info!("Starting web server on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(WebError::Io)?;

    info!("Web server stopped");
    Ok(())
}

/// Serve until Ctrl+C or SIGTERM
pub async fn start_server(state: AppState) -> Result<()> {
    serve_until(state, shutdown_signal()).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
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
