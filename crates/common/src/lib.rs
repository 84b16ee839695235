//! Shared building blocks for the binaries and the HTTP server.

pub mod types;
pub mod utils;
