//! Stub backend standing in for the application server.
//!
//! Every request is answered with a JSON description of what arrived, so tests can assert
//! on the path, query, headers and body the gateway forwarded. A few paths trigger special
//! behaviour:
//!
//! - paths ending in `/slow/` wait `SLOW_DELAY` before answering
//! - paths ending in `/redirect/` answer `302` with `Location: /admin/login/`
//! - paths ending in `/stream/` send `STREAM_CHUNKS` lines, `STREAM_CHUNK_DELAY` apart

use std::{convert::Infallible, net::SocketAddr, time::Duration};

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, task::JoinHandle};

/// How long `/slow/` paths stall before answering.
pub const SLOW_DELAY: Duration = Duration::from_secs(3);

/// Number of chunks sent by `/stream/` paths.
pub const STREAM_CHUNKS: usize = 4;

/// Pause between two chunks of a `/stream/` response.
pub const STREAM_CHUNK_DELAY: Duration = Duration::from_millis(150);

/// Marker header added to every stub response.
pub const UPSTREAM_HEADER: &str = "x-upstream";

/// Spawns the stub backend on an ephemeral localhost port.
///
/// # Returns
/// - `Ok((SocketAddr, JoinHandle))` - Bound address and the serving task
/// - `Err(std::io::Error)` - Binding the listener failed
pub async fn spawn() -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let app = Router::new().fallback(echo);
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok((addr, handle))
}

/// URL of a localhost port with nothing listening on it.
///
/// The port is bound and released immediately, so connection attempts are refused.
pub fn unreachable_url() -> std::io::Result<String> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);

    Ok(format!("http://{}", addr))
}

async fn echo(req: Request) -> Response {
    let (parts, body) = req.into_parts();
    let path = parts.uri.path().to_string();

    if path.ends_with("/slow/") {
        tokio::time::sleep(SLOW_DELAY).await;
    }

    if path.ends_with("/redirect/") {
        return (
            StatusCode::FOUND,
            [(header::LOCATION, HeaderValue::from_static("/admin/login/"))],
        )
            .into_response();
    }

    if path.ends_with("/stream/") {
        return trickle();
    }

    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_else(|_| Bytes::new());

    let mut headers = Map::new();
    for (name, value) in &parts.headers {
        headers.insert(
            name.as_str().to_string(),
            Value::String(value.to_str().unwrap_or_default().to_string()),
        );
    }

    let mut response = Json(json!({
        "method": parts.method.as_str(),
        "path": path,
        "query": parts.uri.query(),
        "headers": headers,
        "body": String::from_utf8_lossy(&body),
    }))
    .into_response();

    response
        .headers_mut()
        .insert(UPSTREAM_HEADER, HeaderValue::from_static("stub"));
    response
        .headers_mut()
        .insert("keep-alive", HeaderValue::from_static("timeout=5"));

    response
}

/// Body of `chunk-0\n` .. `chunk-N\n` lines, the first one sent right away.
pub fn stream_body() -> String {
    (0..STREAM_CHUNKS).map(|i| format!("chunk-{}\n", i)).collect()
}

fn trickle() -> Response {
    let chunks = futures::stream::unfold(0, |sent| async move {
        if sent == STREAM_CHUNKS {
            return None;
        }
        if sent > 0 {
            tokio::time::sleep(STREAM_CHUNK_DELAY).await;
        }

        let chunk = Bytes::from(format!("chunk-{}\n", sent));
        Some((Ok::<_, Infallible>(chunk), sent + 1))
    });

    let mut response = Body::from_stream(chunks).into_response();
    response
        .headers_mut()
        .insert(UPSTREAM_HEADER, HeaderValue::from_static("stub"));
    response
}
