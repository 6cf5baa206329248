use std::net::{IpAddr, SocketAddr};

use axum::{
    body::{to_bytes, Body},
    extract::{ConnectInfo, Request},
    http::{header, HeaderMap, HeaderName, HeaderValue},
    response::Response,
};
use http_body_util::LengthLimitError;
use url::Url;

use crate::server::error::{proxy::ProxyError, AppError};

/// Headers that describe a single connection and must not be forwarded.
static HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

static X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");
static X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");

/// Forwards requests to an upstream application server.
pub struct ProxyService<'a> {
    http_client: &'a reqwest::Client,
    max_body_size: usize,
}

impl<'a> ProxyService<'a> {
    pub fn new(http_client: &'a reqwest::Client, max_body_size: usize) -> Self {
        Self {
            http_client,
            max_body_size,
        }
    }

    /// Sends the request to `upstream` and relays the answer.
    ///
    /// The request body is buffered up to the configured limit before it is sent. The client
    /// `Host` header is kept, hop-by-hop headers are dropped in both directions and
    /// `X-Forwarded-For`/`X-Forwarded-Proto` are added. Redirects from the upstream are
    /// passed through unchanged.
    ///
    /// # Arguments
    /// - `upstream` - Upstream URL replacing the matched location prefix
    /// - `remainder` - Request path after the location prefix
    /// - `req` - The incoming request
    ///
    /// # Returns
    /// - `Ok(Response)` - Upstream status, headers and streamed body
    /// - `Err(ProxyError::BodyTooLarge)` - Request body over the limit
    /// - `Err(ProxyError::Timeout)` - Upstream did not answer in time
    /// - `Err(ProxyError::Unreachable)` - Upstream connection failed
    pub async fn forward(
        &self,
        upstream: &Url,
        remainder: &str,
        req: Request,
    ) -> Result<Response, AppError> {
        let url = upstream_url(upstream, remainder, req.uri().query());
        let (parts, body) = req.into_parts();

        let client_ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip());

        let body = to_bytes(body, self.max_body_size)
            .await
            .map_err(|e| body_error(e, self.max_body_size))?;

        let headers = request_headers(&parts.headers, client_ip);

        tracing::debug!("Proxying {} {} to {}", parts.method, parts.uri, url);

        let upstream_response = self
            .http_client
            .request(parts.method, url.clone())
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(|e| upstream_error(&url, e))?;

        Ok(relay(upstream_response))
    }
}

/// Joins the upstream path with the remainder and carries the query string over.
///
/// `http://backend:10000/api/` with remainder `recipes/` and query `page=2` becomes
/// `http://backend:10000/api/recipes/?page=2`.
pub fn upstream_url(upstream: &Url, remainder: &str, query: Option<&str>) -> Url {
    let mut url = upstream.clone();
    let path = format!("{}{}", upstream.path(), remainder);
    url.set_path(&path);
    url.set_query(query);
    url
}

/// Copies end-to-end request headers and appends the forwarding headers.
pub fn request_headers(incoming: &HeaderMap, client_ip: Option<IpAddr>) -> HeaderMap {
    let mut headers = end_to_end(incoming);
    headers.remove(header::CONTENT_LENGTH);

    if let Some(ip) = client_ip {
        let client = ip.to_string();
        let mut chain: Vec<&str> = incoming
            .get_all(&X_FORWARDED_FOR)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect();
        chain.push(&client);

        let forwarded_for = chain.join(", ");
        if let Ok(value) = HeaderValue::from_str(&forwarded_for) {
            headers.insert(X_FORWARDED_FOR.clone(), value);
        }
    }

    if !headers.contains_key(&X_FORWARDED_PROTO) {
        headers.insert(X_FORWARDED_PROTO.clone(), HeaderValue::from_static("http"));
    }

    headers
}

/// Drops hop-by-hop headers plus any header named in `Connection`.
fn end_to_end(incoming: &HeaderMap) -> HeaderMap {
    let listed: Vec<String> = incoming
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(|name| name.trim().to_ascii_lowercase())
        .collect();

    let mut headers = HeaderMap::with_capacity(incoming.len());
    for (name, value) in incoming {
        if HOP_BY_HOP.contains(name) || listed.iter().any(|l| l == name.as_str()) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers
}

fn relay(upstream_response: reqwest::Response) -> Response {
    let status = upstream_response.status();
    let headers = end_to_end(upstream_response.headers());

    let mut response = Response::new(Body::from_stream(upstream_response.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

fn body_error(err: axum::Error, limit: usize) -> ProxyError {
    let too_large = std::error::Error::source(&err)
        .map(|source| source.is::<LengthLimitError>())
        .unwrap_or(false);

    if too_large {
        ProxyError::BodyTooLarge { limit }
    } else {
        ProxyError::ReadBody(err)
    }
}

fn upstream_error(url: &Url, err: reqwest::Error) -> ProxyError {
    if err.is_timeout() {
        ProxyError::Timeout {
            url: url.to_string(),
        }
    } else {
        ProxyError::Unreachable {
            url: url.to_string(),
            source: err,
        }
    }
}
