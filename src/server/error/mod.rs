//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into appropriate HTTP responses. The `AppError` enum serves
//! as the top-level error type that wraps domain-specific errors and implements
//! `IntoResponse` for automatic error handling in the gateway handler.

pub mod collect;
pub mod config;
pub mod deploy;
pub mod file;
pub mod proxy;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        collect::CollectError, config::ConfigError, deploy::DeployError, file::FileError,
        proxy::ProxyError,
    },
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application and provides
/// automatic conversion to HTTP responses. Proxy and file errors handle their own
/// response mapping, while the remaining variants only occur outside request handling
/// (startup, CLI commands) and fall back to a 500.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Upstream forwarding error.
    ///
    /// Delegates to `ProxyError::into_response()` (502, 504, 413 or 400).
    #[error(transparent)]
    ProxyErr(#[from] ProxyError),

    /// Static, media or docs serving error.
    ///
    /// Delegates to `FileError::into_response()` (404, 405 or 500).
    #[error(transparent)]
    FileErr(#[from] FileError),

    /// Static asset collection error.
    #[error(transparent)]
    CollectErr(#[from] CollectError),

    /// Rendering or checking deployment files failed.
    #[error(transparent)]
    DeployErr(#[from] DeployError),

    /// HTTP client construction error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Socket bind or serve error.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// No location matched the request path.
    ///
    /// Results in 404 Not Found. The message is logged, the client gets a fixed body.
    #[error("{0}")]
    NotFound(String),

    /// The request path is malformed, e.g. `..` segments climbing above `/`.
    ///
    /// Results in 400 Bad Request. The message is logged, the client gets a fixed body.
    #[error("{0}")]
    BadRequest(String),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest` variant
/// - 404 Not Found - For `NotFound` variant
/// - Variable - For `ProxyErr` and `FileErr`, delegated to their own `into_response()`
/// - 500 Internal Server Error - For all other error types
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::ProxyErr(err) => err.into_response(),
            Self::FileErr(err) => err.into_response(),
            Self::NotFound(msg) => {
                tracing::debug!("{}", msg);
                (
                    StatusCode::NOT_FOUND,
                    Json(ErrorDto {
                        error: "Not found".to_string(),
                    }),
                )
                    .into_response()
            }
            Self::BadRequest(msg) => {
                tracing::debug!("{}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorDto {
                        error: "Bad request".to_string(),
                    }),
                )
                    .into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message to the
/// client to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
