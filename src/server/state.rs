//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds the shared resources the gateway
//! handler needs. The state is initialized once during startup and then cloned for each
//! request through Axum's state extraction.

use std::sync::Arc;

use crate::server::model::route::RouteTable;

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone:
/// - `reqwest::Client` uses an `Arc` internally
/// - `Arc<RouteTable>` is a reference-counted pointer
#[derive(Clone)]
pub struct AppState {
    /// HTTP client for forwarding requests to the backend.
    ///
    /// Configured without redirect following or environment proxies so upstream
    /// responses reach the client unchanged.
    pub http_client: reqwest::Client,

    /// Location table resolved for every request.
    pub routes: Arc<RouteTable>,

    /// Largest request body, in bytes, accepted for proxied requests.
    pub max_body_size: usize,
}

impl AppState {
    pub fn new(http_client: reqwest::Client, routes: RouteTable, max_body_size: usize) -> Self {
        Self {
            http_client,
            routes: Arc::new(routes),
            max_body_size,
        }
    }
}
