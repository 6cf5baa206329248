//! Server-side domain models.
//!
//! Holds the routing table that maps request paths to proxy, docs and alias targets.

pub mod route;

#[cfg(test)]
mod test;
