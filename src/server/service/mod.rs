//! Service layer for request forwarding, file serving and asset collection.
//!
//! Services sit between the gateway controller and the outside world:
//!
//! - **Proxy**: Forwarding matched requests to the backend application server
//! - **File**: Locating and serving static, media and docs files from mounted volumes
//! - **Collect**: Copying compiled frontend assets into the static volume

pub mod collect;
pub mod file;
pub mod proxy;

#[cfg(test)]
mod test;
