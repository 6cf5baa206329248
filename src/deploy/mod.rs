//! Deployment file rendering and pre-flight checks.
//!
//! Turns the stack manifest into a compose file and the gateway routing table into the
//! equivalent nginx server block, and verifies files the stack needs at start-up.

pub mod compose;
pub mod env;
pub mod nginx;

#[cfg(test)]
mod test;
