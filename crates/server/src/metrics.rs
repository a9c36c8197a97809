use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry), labelled by resource
pub static RECORDS_CREATED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "cookhub_records_created_total",
        "Total records created",
        &["resource"]
    )
    .expect("register records_created_total")
});

pub static RECORDS_DELETED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "cookhub_records_deleted_total",
        "Total records deleted",
        &["resource"]
    )
    .expect("register records_deleted_total")
});

pub static IMAGES_STORED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "cookhub_images_stored_total",
        "Total image files written",
        &["resource"]
    )
    .expect("register images_stored_total")
});

pub static IMAGES_SERVED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "cookhub_images_served_total",
        "Total image files served",
        &["resource"]
    )
    .expect("register images_served_total")
});

pub fn record_created(resource: &str) {
    RECORDS_CREATED_TOTAL.with_label_values(&[resource]).inc();
}

pub fn record_deleted(resource: &str) {
    RECORDS_DELETED_TOTAL.with_label_values(&[resource]).inc();
}

pub fn image_stored(resource: &str) {
    IMAGES_STORED_TOTAL.with_label_values(&[resource]).inc();
}

pub fn image_served(resource: &str) {
    IMAGES_SERVED_TOTAL.with_label_values(&[resource]).inc();
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
