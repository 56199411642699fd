//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_dispatch_total` (counter): dispatched requests by outcome
//!   (`dynamic`, `static`, `none`)
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; a no-op until a recorder is installed
//! - Prometheus exporter is opt-in via configuration

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// How a request was resolved by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Dynamic,
    Static,
    NoMatch,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Dynamic => "dynamic",
            Outcome::Static => "static",
            Outcome::NoMatch => "none",
        }
    }
}

/// Install the Prometheus recorder and its HTTP scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_dispatch(outcome: Outcome) {
    ::metrics::counter!("router_dispatch_total", "outcome" => outcome.as_str()).increment(1);
}
