use std::{
    convert::Infallible,
    io,
    path::{Component, Path, PathBuf},
};

use axum::{body::Body, extract::Request, http::Method, response::Response};
use percent_encoding::percent_decode_str;
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::server::{
    error::{file::FileError, AppError},
    model::route::{RouteMatch, Target},
};

const DIRECTORY_INDEX: &str = "index.html";

/// Serves files for docs and alias locations.
pub struct FileService<'a> {
    route: &'a RouteMatch<'a>,
}

impl<'a> FileService<'a> {
    pub fn new(route: &'a RouteMatch<'a>) -> Self {
        Self { route }
    }

    /// Serves the file the route resolves to.
    ///
    /// Content type, conditional requests, ranges and `HEAD` are handled by tower-http's
    /// `ServeFile` once a concrete file has been located.
    ///
    /// # Returns
    /// - `Ok(Response)` - The file response
    /// - `Err(FileError::MethodNotAllowed)` - Method other than GET or HEAD
    /// - `Err(FileError::NotFound)` / `Err(FileError::UnsafePath)` - No servable file
    pub async fn serve(&self, req: Request) -> Result<Response, AppError> {
        if req.method() != Method::GET && req.method() != Method::HEAD {
            return Err(FileError::MethodNotAllowed(req.method().to_string()).into());
        }

        let path = self.locate().await?;
        tracing::debug!("Serving {} from {}", self.route.path, path.display());

        let response = ServeFile::new(&path)
            .oneshot(req)
            .await
            .unwrap_or_else(|never: Infallible| match never {});

        Ok(response.map(Body::new))
    }

    /// Resolves the request to a file on disk, applying the location's try order.
    ///
    /// # Returns
    /// - `Ok(PathBuf)` - First existing regular file among the candidates
    /// - `Err(FileError)` - Unsafe path, no candidate exists, or filesystem failure
    pub async fn locate(&self) -> Result<PathBuf, FileError> {
        match &self.route.location.target {
            Target::Docs { root, index } => {
                let candidate = root.join(sanitize(&self.route.path)?);
                if is_file(&candidate).await? {
                    return Ok(candidate);
                }

                let indexed = candidate.join(index);
                if is_file(&indexed).await? {
                    return Ok(indexed);
                }
            }
            Target::Alias { dir, fallback } => {
                let candidate = dir.join(sanitize(&self.route.remainder)?);
                if is_file(&candidate).await? {
                    return Ok(candidate);
                }

                let indexed = candidate.join(DIRECTORY_INDEX);
                if is_file(&indexed).await? {
                    return Ok(indexed);
                }

                if let Some(fallback) = fallback {
                    let fallback = dir.join(fallback);
                    if is_file(&fallback).await? {
                        return Ok(fallback);
                    }
                }
            }
            Target::Proxy { .. } => {}
        }

        Err(FileError::NotFound(self.route.path.clone()))
    }
}

/// Percent-decodes a URL path and turns it into a relative filesystem path.
///
/// Empty and `.` segments are dropped. Any `..`, backslash, NUL byte or segment that is
/// not a plain file name rejects the whole path, so the result always stays below the
/// directory it is joined to.
pub fn sanitize(encoded: &str) -> Result<PathBuf, FileError> {
    let unsafe_path = || FileError::UnsafePath(encoded.to_string());

    let decoded = percent_decode_str(encoded)
        .decode_utf8()
        .map_err(|_| unsafe_path())?;

    let mut path = PathBuf::new();
    for segment in decoded.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment.contains('\\') || segment.contains('\0') {
            return Err(unsafe_path());
        }

        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => path.push(segment),
            _ => return Err(unsafe_path()),
        }
    }

    Ok(path)
}

async fn is_file(path: &Path) -> Result<bool, FileError> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
            Ok(false)
        }
        Err(source) => Err(FileError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
