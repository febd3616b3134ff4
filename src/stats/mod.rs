//! Usage statistics domain model
//!
//! The service serializes every aggregate as a string; this module parses a
//! wire payload once into a [`StatsSnapshot`] and derives everything the
//! dashboard renders from it. Snapshots are immutable - each poll replaces
//! the previous one wholesale, there is no incremental merge.

pub mod poller;

use crate::api::models::StatsPayload;
use chrono::{DateTime, NaiveDate, Utc};

/// Parsed summary counters
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub total_requests: u64,
    pub avg_response_time_ms: f64,
    pub server_errors: u64,
    pub client_errors: u64,
}

/// Requests per endpoint
#[derive(Debug, Clone)]
pub struct EndpointUsage {
    pub endpoint: String,
    pub total: u64,
}

/// Requests per day
#[derive(Debug, Clone)]
pub struct DailyUsage {
    pub day: String,
    pub total: u64,
}

/// One fetched snapshot of aggregated usage
#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    pub summary: StatsSummary,
    pub endpoints: Vec<EndpointUsage>,
    pub daily: Vec<DailyUsage>,
    pub fetched_at: DateTime<Utc>,
}

/// Row of the endpoint usage table
#[derive(Debug, Clone)]
pub struct EndpointRow {
    /// Endpoint with the `/api/` prefix stripped for display
    pub name: String,
    pub full_endpoint: String,
    pub requests: u64,
    /// Share of all requests, 0-100
    pub percentage: f64,
}

/// One slice of the request status breakdown
#[derive(Debug, Clone, Copy)]
pub struct StatusSlice {
    pub name: &'static str,
    pub value: u64,
}

impl StatsSnapshot {
    /// Parse a wire payload. Counters that fail to parse count as zero; the
    /// dashboard should degrade, not disappear, on one bad field.
    pub fn from_wire(payload: StatsPayload) -> Self {
        let summary = StatsSummary {
            total_requests: parse_count(&payload.summary.total_requests),
            avg_response_time_ms: payload.summary.avg_response_time.trim().parse().unwrap_or(0.0),
            server_errors: parse_count(&payload.summary.server_errors),
            client_errors: parse_count(&payload.summary.client_errors),
        };

        let endpoints = payload
            .endpoints
            .into_iter()
            .map(|e| EndpointUsage {
                total: parse_count(&e.total),
                endpoint: e.endpoint,
            })
            .collect();

        let daily = payload
            .daily
            .into_iter()
            .map(|d| DailyUsage {
                total: parse_count(&d.total),
                day: d.day,
            })
            .collect();

        Self {
            summary,
            endpoints,
            daily,
            fetched_at: Utc::now(),
        }
    }

    /// Requests that were neither server nor client errors
    pub fn successful_requests(&self) -> u64 {
        self.summary
            .total_requests
            .saturating_sub(self.summary.server_errors)
            .saturating_sub(self.summary.client_errors)
    }

    /// Share of requests that failed, 0-100
    pub fn error_rate(&self) -> f64 {
        if self.summary.total_requests == 0 {
            return 0.0;
        }
        let errors = self.summary.server_errors + self.summary.client_errors;
        (errors as f64 / self.summary.total_requests as f64) * 100.0
    }

    /// Share of requests that succeeded, 0-100
    pub fn success_rate(&self) -> f64 {
        if self.summary.total_requests == 0 {
            return 0.0;
        }
        (self.successful_requests() as f64 / self.summary.total_requests as f64) * 100.0
    }

    /// Table rows, busiest endpoint first
    pub fn endpoint_rows(&self) -> Vec<EndpointRow> {
        let total = self.summary.total_requests;
        let mut rows: Vec<EndpointRow> = self
            .endpoints
            .iter()
            .map(|usage| EndpointRow {
                name: usage
                    .endpoint
                    .strip_prefix("/api/")
                    .unwrap_or(&usage.endpoint)
                    .to_string(),
                full_endpoint: usage.endpoint.clone(),
                requests: usage.total,
                percentage: if total == 0 {
                    0.0
                } else {
                    (usage.total as f64 / total as f64) * 100.0
                },
            })
            .collect();
        rows.sort_by(|a, b| b.requests.cmp(&a.requests));
        rows
    }

    /// Successful / server errors / client errors, in that order
    pub fn status_breakdown(&self) -> [StatusSlice; 3] {
        [
            StatusSlice {
                name: "Successful",
                value: self.successful_requests(),
            },
            StatusSlice {
                name: "Server Errors",
                value: self.summary.server_errors,
            },
            StatusSlice {
                name: "Client Errors",
                value: self.summary.client_errors,
            },
        ]
    }
}

fn parse_count(raw: &str) -> u64 {
    raw.trim().parse().unwrap_or(0)
}

/// Shorten an ISO date (`2024-01-15`) to a chart label (`Jan 15`); anything
/// unparseable is shown as-is
pub fn short_day_label(day: &str) -> String {
    match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        Ok(date) => date.format("%b %d").to_string(),
        Err(_) => day.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{StatsPayload, WireDaily, WireEndpoint, WireSummary};

    fn payload() -> StatsPayload {
        StatsPayload {
            summary: WireSummary {
                total_requests: "1000".into(),
                avg_response_time: "123.5".into(),
                server_errors: "40".into(),
                client_errors: "60".into(),
            },
            endpoints: vec![
                WireEndpoint {
                    endpoint: "/api/users".into(),
                    total: "250".into(),
                },
                WireEndpoint {
                    endpoint: "/api/orders".into(),
                    total: "750".into(),
                },
            ],
            daily: vec![
                WireDaily {
                    day: "2026-08-01".into(),
                    total: "480".into(),
                },
                WireDaily {
                    day: "2026-08-02".into(),
                    total: "520".into(),
                },
            ],
        }
    }

    #[test]
    fn test_from_wire_parses_string_counters() {
        let snapshot = StatsSnapshot::from_wire(payload());
        assert_eq!(snapshot.summary.total_requests, 1000);
        assert_eq!(snapshot.summary.avg_response_time_ms, 123.5);
        assert_eq!(snapshot.summary.server_errors, 40);
        assert_eq!(snapshot.summary.client_errors, 60);
        assert_eq!(snapshot.endpoints.len(), 2);
        assert_eq!(snapshot.daily[1].total, 520);
    }

    #[test]
    fn test_bad_counters_count_as_zero() {
        let mut wire = payload();
        wire.summary.server_errors = "n/a".into();
        let snapshot = StatsSnapshot::from_wire(wire);
        assert_eq!(snapshot.summary.server_errors, 0);
    }

    #[test]
    fn test_derived_rates() {
        let snapshot = StatsSnapshot::from_wire(payload());
        assert_eq!(snapshot.successful_requests(), 900);
        assert!((snapshot.error_rate() - 10.0).abs() < f64::EPSILON);
        assert!((snapshot.success_rate() - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rates_survive_zero_requests() {
        let mut wire = payload();
        wire.summary.total_requests = "0".into();
        let snapshot = StatsSnapshot::from_wire(wire);
        assert_eq!(snapshot.error_rate(), 0.0);
        assert_eq!(snapshot.success_rate(), 0.0);
    }

    #[test]
    fn test_endpoint_rows_sorted_and_stripped() {
        let snapshot = StatsSnapshot::from_wire(payload());
        let rows = snapshot.endpoint_rows();
        assert_eq!(rows[0].name, "orders");
        assert_eq!(rows[0].full_endpoint, "/api/orders");
        assert!((rows[0].percentage - 75.0).abs() < f64::EPSILON);
        assert_eq!(rows[1].name, "users");
    }

    #[test]
    fn test_status_breakdown_order() {
        let snapshot = StatsSnapshot::from_wire(payload());
        let [ok, server, client] = snapshot.status_breakdown();
        assert_eq!(ok.value, 900);
        assert_eq!(server.value, 40);
        assert_eq!(client.value, 60);
    }

    #[test]
    fn test_short_day_label() {
        assert_eq!(short_day_label("2026-08-01"), "Aug 01");
        assert_eq!(short_day_label("yesterday"), "yesterday");
    }
}
