//! Foodgram Gateway Test Utils
//!
//! Provides shared testing utilities for the gateway. This crate offers a builder pattern for
//! creating test contexts with temporary volume directories and a stub backend upstream.
//!
//! # Overview
//!
//! The test utilities consist of four main components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment holding the volume directories and upstream address
//! - **TestError**: Error types that can occur during test setup
//! - **upstream**: Stub backend that echoes what it receives as JSON
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn serves_media() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_media_file("recipes/images/cake.jpg", "jpeg")
//!         .with_upstream()
//!         .build()
//!         .await?;
//!
//!     let media = test.media_dir.join("recipes/images/cake.jpg");
//!     // Point the gateway config at the test directories...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod fixture;
pub mod upstream;
