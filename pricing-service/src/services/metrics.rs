//! Prometheus metrics for pricing-service.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram, register_histogram_vec, CounterVec, Histogram,
    HistogramVec, TextEncoder,
};

/// HTTP request counter by method, path and status.
pub static HTTP_REQUESTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pricing_http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .expect("Failed to register http_requests_total")
});

/// HTTP request duration histogram by method and path.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "pricing_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("Failed to register http_request_duration")
});

/// Documents priced, by kind.
pub static DOCUMENTS_COMPUTED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pricing_documents_computed_total",
        "Total number of documents priced by kind",
        &["kind"] // invoice, quotation
    )
    .expect("Failed to register documents_computed_total")
});

/// Line items per priced document.
pub static LINE_ITEMS_PER_DOCUMENT: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "pricing_line_items_per_document",
        "Number of line items per priced document",
        vec![1.0, 2.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0]
    )
    .expect("Failed to register line_items_per_document")
});

/// Coerced input values, by field.
pub static INPUT_WARNINGS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pricing_input_warnings_total",
        "Total number of coerced input values by field",
        &["field"]
    )
    .expect("Failed to register input_warnings_total")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&HTTP_REQUESTS_TOTAL);
    Lazy::force(&HTTP_REQUEST_DURATION);
    Lazy::force(&DOCUMENTS_COMPUTED_TOTAL);
    Lazy::force(&LINE_ITEMS_PER_DOCUMENT);
    Lazy::force(&INPUT_WARNINGS_TOTAL);
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder
        .encode_to_string(&metric_families)
        .unwrap_or_default()
}
