//! Metrics facade helpers for the HTTP client.
//!
//! Counters are emitted through the `metrics` facade; wiring an exporter is
//! the embedding application's concern.

use metrics::counter;

/// Record one API request against a named endpoint with its outcome
/// ("ok" or "error").
pub fn record_api_request(endpoint: &'static str, outcome: &'static str) {
    counter!("garmin_api_requests_total", "endpoint" => endpoint, "outcome" => outcome)
        .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_api_request_is_noop_without_recorder() {
        record_api_request("activities", "ok");
    }
}
