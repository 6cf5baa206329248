//! Gateway server and supporting services.
//!
//! The gateway is the single inbound entry point of a Foodgram deployment. It proxies
//! `/admin/` and `/api/` to the backend and serves `/api/docs/`, `/media/` and `/` from
//! mounted volumes.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - The fallback handler resolving each request
//! - **Service Layer** (`service/`) - Proxying, file serving and static asset collection
//! - **Model Layer** (`model/`) - The routing table and its resolution rules
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based gateway configuration
//! - **State** (`state`) - Shared application state (HTTP client, routing table)
//! - **Startup** (`startup`) - HTTP client setup, router assembly and graceful shutdown
//! - **Router** (`router`) - Axum router with request tracing
//!
//! # Request Flow
//!
//! 1. **Router** hands every request to the gateway controller
//! 2. **Controller** resolves the longest matching location
//! 3. **Service** forwards to the backend or serves a file from a volume
//! 4. **Error** variants become JSON error responses with the matching status

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
