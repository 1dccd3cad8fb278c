//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_messages_total` (counter): evaluated messages by match result
//! - `relay_reloads_total` (counter): reload attempts by outcome
//! - `relay_alert_deliveries_total` (counter): webhook deliveries by result
//! - `relay_keywords` (gauge): size of the live keyword set
//!
//! # Design Decisions
//! - Recording before `init_metrics` runs is a no-op, so subsystems never
//!   need to know whether the exporter is enabled

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter started"),
        Err(e) => tracing::error!(error = %e, "Failed to start metrics exporter"),
    }
}

/// Record one evaluated inbound message.
pub fn record_message(matched: bool) {
    let result = if matched { "match" } else { "no_match" };
    counter!("relay_messages_total", "result" => result).increment(1);
}

/// Record one keyword reload attempt by outcome
/// (changed / unchanged / not_modified / empty / unavailable).
pub fn record_reload(outcome: &'static str) {
    counter!("relay_reloads_total", "outcome" => outcome).increment(1);
}

/// Record one alert webhook delivery by result (ok / rejected / failed).
pub fn record_alert_delivery(result: &'static str) {
    counter!("relay_alert_deliveries_total", "result" => result).increment(1);
}

/// Track the live keyword-set size.
pub fn record_keyword_count(count: usize) {
    gauge!("relay_keywords").set(count as f64);
}
