//! Request duration metrics for the proxy boundary.

use prometheus::{Encoder, HistogramVec, Registry, TextEncoder};

pub const METRICS_LABEL_VERB_GET: &str = "get";
pub const METRICS_LABEL_VERB_LIST: &str = "list";
pub const METRICS_LABEL_VERB_PATCH: &str = "patch";

/// Duration/outcome observations for workspace requests, keyed by verb and
/// HTTP status code.
pub struct ProxyMetrics {
    registry: Registry,
    workspace_request_seconds: HistogramVec,
}

impl ProxyMetrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let workspace_request_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "spaceway_workspace_request_seconds",
                "Time taken to serve workspace requests",
            )
            .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            // status first, verb second; keep label combinations minimal
            &["status", "verb"],
        )
        .expect("valid histogram definition");

        registry
            .register(Box::new(workspace_request_seconds.clone()))
            .expect("histogram registers on a fresh registry");

        Self {
            registry,
            workspace_request_seconds,
        }
    }

    /// Record one served request
    pub fn observe(&self, verb: &str, status: u16, seconds: f64) {
        self.workspace_request_seconds
            .with_label_values(&[&status.to_string(), verb])
            .observe(seconds);
    }

    /// Encode the registry in the Prometheus text exposition format
    pub fn encode_text(&self) -> prometheus::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap_or_default())
    }
}

impl Default for ProxyMetrics {
    fn default() -> Self {
        Self::new()
    }
}
