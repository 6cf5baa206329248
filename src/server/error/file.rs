use std::path::PathBuf;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum FileError {
    /// No file matched the request after trying every candidate.
    ///
    /// Results in a 404 Not Found response.
    #[error("No file found for '{0}'")]
    NotFound(String),

    /// The request path tried to leave the served directory or is not valid UTF-8 once
    /// percent-decoded.
    ///
    /// Reported as 404 Not Found so the layout of the filesystem is not revealed.
    #[error("Rejected unsafe path '{0}'")]
    UnsafePath(String),

    /// Anything other than GET or HEAD on a file location.
    ///
    /// Results in a 405 Method Not Allowed response with an `Allow` header.
    #[error("Method {0} not allowed on file locations")]
    MethodNotAllowed(String),

    /// Filesystem failure other than a missing file.
    ///
    /// Results in a 500 Internal Server Error with details logged server-side.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IntoResponse for FileError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(_) | Self::UnsafePath(_) => {
                tracing::debug!("{}", self);
                (
                    StatusCode::NOT_FOUND,
                    Json(ErrorDto {
                        error: "Not found".to_string(),
                    }),
                )
                    .into_response()
            }
            Self::MethodNotAllowed(_) => {
                let mut response = (
                    StatusCode::METHOD_NOT_ALLOWED,
                    Json(ErrorDto {
                        error: "Method not allowed".to_string(),
                    }),
                )
                    .into_response();
                response
                    .headers_mut()
                    .insert(header::ALLOW, HeaderValue::from_static("GET, HEAD"));
                response
            }
            Self::Io { .. } => {
                tracing::error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorDto {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
