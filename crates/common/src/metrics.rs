use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static ACCOUNTS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "accounts_created_total",
        "Total accounts created"
    )
    .expect("register accounts_created_total")
});

pub static ACCOUNTS_UPDATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "accounts_updated_total",
        "Total successful account updates"
    )
    .expect("register accounts_updated_total")
});

pub static ACCOUNTS_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "accounts_deleted_total",
        "Total accounts deleted together with their customer"
    )
    .expect("register accounts_deleted_total")
});

pub static ACCOUNT_FETCHES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "accounts_fetches_total",
        "Total successful account fetches by mobile number"
    )
    .expect("register accounts_fetches_total")
});

/// Failed operations, labelled by operation and error kind.
pub static ACCOUNT_ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "accounts_errors_total",
        "Total failed account operations",
        &["operation", "kind"]
    )
    .expect("register accounts_errors_total")
});

pub fn record_error(operation: &str, kind: &str) {
    ACCOUNT_ERRORS_TOTAL.with_label_values(&[operation, kind]).inc();
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_text_output() {
        ACCOUNTS_CREATED_TOTAL.inc();
        record_error("create", "conflict");
        let (status, body) = encode_metrics();
        assert_eq!(status, axum::http::StatusCode::OK);
        assert!(body.contains("accounts_created_total"));
        assert!(body.contains("accounts_errors_total"));
    }
}
