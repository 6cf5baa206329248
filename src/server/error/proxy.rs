use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum ProxyError {
    /// The upstream could not be reached (connection refused, DNS failure, reset).
    ///
    /// Results in a 502 Bad Gateway response.
    #[error("Failed to reach upstream {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The upstream sent nothing for longer than the configured proxy timeout before the
    /// response headers arrived.
    ///
    /// Results in a 504 Gateway Timeout response.
    #[error("Upstream {url} timed out")]
    Timeout { url: String },

    /// The request body exceeds `client_max_body_size`.
    ///
    /// Results in a 413 Payload Too Large response.
    #[error("Request body exceeds the limit of {limit} bytes")]
    BodyTooLarge { limit: usize },

    /// The client body stream failed before it was fully read.
    ///
    /// Results in a 400 Bad Request response.
    #[error("Failed to read request body: {0}")]
    ReadBody(#[source] axum::Error),
}

/// Converts proxy errors into HTTP responses.
///
/// Upstream failures are logged with the target URL; the client only sees the status and a
/// short message, as nginx would return its stock error page.
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Unreachable { .. } => {
                tracing::error!("{}", self);
                (StatusCode::BAD_GATEWAY, "Bad gateway")
            }
            Self::Timeout { .. } => {
                tracing::warn!("{}", self);
                (StatusCode::GATEWAY_TIMEOUT, "Gateway timeout")
            }
            Self::BodyTooLarge { .. } => {
                tracing::debug!("{}", self);
                (StatusCode::PAYLOAD_TOO_LARGE, "Request entity too large")
            }
            Self::ReadBody(_) => {
                tracing::debug!("{}", self);
                (StatusCode::BAD_REQUEST, "Bad request")
            }
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
