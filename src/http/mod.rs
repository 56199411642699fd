//! HTTP hosting subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum::serve, request ID, timeout, trace layers)
//!     → routing::RouterService (fallback service)
//!     → matched handler or 404
//! ```

pub mod server;

pub use server::HttpServer;
