//! Foodgram Stack Manifest
//!
//! Declarative model of the containers that make up a Foodgram deployment. The crate holds
//! no I/O: it describes services, named volumes, mounts and port bindings, and checks that a
//! stack is internally consistent before anything is rendered or started.
//!
//! # Overview
//!
//! - **Stack**: the complete deployment, built with `Stack::foodgram()` for either variant
//! - **Service**: one container with its image source, mounts, ports and lifecycle
//! - **ManifestIssue**: a single consistency problem reported by `Stack::check()`
//!
//! # Usage
//!
//! ```rust,ignore
//! use manifest::prelude::*;
//!
//! let stack = Stack::foodgram(Variant::Production, "foodgram");
//! stack.check().expect("stack is consistent");
//! ```

pub mod check;
pub mod service;
pub mod stack;

#[cfg(test)]
mod test;

pub mod prelude {
    pub use crate::check::ManifestIssue;
    pub use crate::service::{
        ImageSource, Lifecycle, Mount, MountSource, PortBinding, Restart, Service,
    };
    pub use crate::stack::{Stack, Variant, VariantParseError};
}
