//! Test fixtures providing reusable file contents for the volume directories.
//!
//! Fixtures are plain constants; `TestBuilder::with_foodgram_site()` writes them into the
//! static, media and docs directories in the layout a deployed stack has.

pub mod site;
