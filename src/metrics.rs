//! Prometheus metrics for Petstore

use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry};

/// Operation labels used by `requests`
pub const OPERATIONS: [&str; 6] = ["list", "get", "create", "modify", "delete", "delete_all"];

/// Global metrics instance
pub struct Metrics {
    pub registry: Registry,

    // Per-operation request counter, labelled by `op`
    pub requests: IntCounterVec,

    // Outcome counters
    pub not_found: IntCounter,
    pub validation_errors: IntCounter,
    pub storage_errors: IntCounter,

    // Latency histogram
    pub request_latency: Histogram,
}

impl Metrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        let registry = Registry::new();

        let requests = IntCounterVec::new(
            Opts::new("petstore_requests_total", "Total pet API requests"),
            &["op"],
        )
        .unwrap();
        // Pre-create every label so all series show up at zero
        for op in OPERATIONS {
            requests.with_label_values(&[op]);
        }

        let not_found =
            IntCounter::new("petstore_not_found_total", "Lookups of unknown pet ids").unwrap();
        let validation_errors = IntCounter::new(
            "petstore_validation_errors_total",
            "Payloads rejected before reaching the store",
        )
        .unwrap();
        let storage_errors =
            IntCounter::new("petstore_storage_errors_total", "Total storage errors").unwrap();

        let request_latency = Histogram::with_opts(
            HistogramOpts::new(
                "petstore_request_latency_seconds",
                "Pet API request latency in seconds",
            )
            .buckets(vec![
                0.0001, 0.0005, 0.001, 0.002, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
            ]),
        )
        .unwrap();

        // Register all metrics
        registry.register(Box::new(requests.clone())).unwrap();
        registry.register(Box::new(not_found.clone())).unwrap();
        registry
            .register(Box::new(validation_errors.clone()))
            .unwrap();
        registry.register(Box::new(storage_errors.clone())).unwrap();
        registry.register(Box::new(request_latency.clone())).unwrap();

        Self {
            registry,
            requests,
            not_found,
            validation_errors,
            storage_errors,
            request_latency,
        }
    }

    /// Count one request for `op`
    pub fn record_request(&self, op: &str) {
        self.requests.with_label_values(&[op]).inc();
    }

    /// Get Prometheus formatted metrics
    pub fn gather(&self) -> String {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            tracing::error!("Failed to encode metrics: {}", e);
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
