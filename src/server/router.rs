use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::server::{controller::gateway::dispatch, state::AppState};

/// Every request goes through the gateway dispatcher; responses are logged at `info`
/// like an access log.
pub fn router() -> Router<AppState> {
    Router::new().fallback(dispatch).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
}
