//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Registration and dispatch produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (dispatch counters via the metrics facade)
//! ```

pub mod logging;
pub mod metrics;
