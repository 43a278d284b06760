//! Static front-end assets

use axum::Router;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};
use tracing::{info, warn};

/// Serve `dir` for any path no API route claimed. `None` adds nothing.
pub fn static_routes<S>(dir: Option<&str>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let Some(dir) = dir else {
        return Router::new();
    };
    if !Path::new(dir).is_dir() {
        warn!("Static directory {} does not exist", dir);
    }
    info!("Serving static assets from: {}", dir);

    // Unknown paths fall back to index.html so client-side routes resolve
    let index = Path::new(dir).join("index.html");
    let service = ServeDir::new(dir)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(index));
    Router::new().fallback_service(service)
}
