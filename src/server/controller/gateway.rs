use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::server::{
    error::AppError,
    model::route::Target,
    service::{file::FileService, proxy::ProxyService},
    state::AppState,
    util::path::normalize_path,
};

/// Routes every request through the gateway's location table.
///
/// Registered as the router fallback so no path is handled outside the table. The path is
/// normalized first, so dot segments can never move a request into or out of a location,
/// and the normalized form is what gets forwarded or served. Proxied prefixes requested
/// without their trailing slash get a 301 to the slashed form.
pub async fn dispatch(State(state): State<AppState>, req: Request) -> Result<Response, AppError> {
    let raw = req.uri().path();
    let path = normalize_path(raw)
        .ok_or_else(|| AppError::BadRequest(format!("Path '{}' climbs above the root", raw)))?;

    if let Some(canonical) = state.routes.slash_redirect(&path) {
        let location = match req.uri().query() {
            Some(query) => format!("{}?{}", canonical, query),
            None => canonical,
        };
        return Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response());
    }

    let route = state
        .routes
        .resolve(&path)
        .ok_or_else(|| AppError::NotFound(format!("No location matches '{}'", path)))?;

    match &route.location.target {
        Target::Proxy { upstream } => {
            ProxyService::new(&state.http_client, state.max_body_size)
                .forward(upstream, &route.remainder, req)
                .await
        }
        Target::Docs { .. } | Target::Alias { .. } => FileService::new(&route).serve(req).await,
    }
}
