//! Types shared across the gateway's HTTP surface.

pub mod api;
