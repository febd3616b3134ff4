//! Stats polling task
//!
//! Re-fetches `/stats` on a fixed interval and forwards the outcome to the
//! TUI as events. Each tick spawns an independent request: a slow response
//! never delays the next tick, and whichever response resolves last wins.
//! There is no built-in retry - a failed tick surfaces the error state and
//! the next tick is the retry.

use super::StatsSnapshot;
use crate::api::ApiClient;
use crate::events::AppEvent;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

enum Wake {
    Tick,
    Refresh,
    Closed,
}

pub struct StatsPoller {
    api: Arc<ApiClient>,
    api_key: String,
    interval: Duration,
    events: mpsc::Sender<AppEvent>,
    refresh: mpsc::Receiver<()>,
}

impl StatsPoller {
    pub fn new(
        api: Arc<ApiClient>,
        api_key: String,
        interval: Duration,
        events: mpsc::Sender<AppEvent>,
        refresh: mpsc::Receiver<()>,
    ) -> Self {
        Self {
            api,
            api_key,
            interval,
            events,
            refresh,
        }
    }

    /// Run until the UI side goes away.
    ///
    /// The first interval tick fires immediately, so the dashboard gets its
    /// initial snapshot without waiting a full period. A user-triggered
    /// refresh polls at once and restarts the countdown.
    pub async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.interval);

        loop {
            let wake = tokio::select! {
                _ = ticker.tick() => Wake::Tick,
                refresh = self.refresh.recv() => match refresh {
                    Some(()) => Wake::Refresh,
                    None => Wake::Closed,
                },
            };

            match wake {
                Wake::Tick => self.spawn_poll(),
                Wake::Refresh => {
                    self.spawn_poll();
                    ticker.reset();
                }
                Wake::Closed => break,
            }

            if self.events.is_closed() {
                break;
            }
        }

        tracing::debug!("Stats poller shutting down");
    }

    fn spawn_poll(&self) {
        let api = self.api.clone();
        let api_key = self.api_key.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            let event = match api.fetch_stats(&api_key).await {
                Ok(payload) => AppEvent::StatsUpdated {
                    timestamp: Utc::now(),
                    snapshot: StatsSnapshot::from_wire(payload),
                },
                Err(e) => {
                    tracing::warn!("Stats poll failed: {}", e);
                    AppEvent::StatsFailed {
                        timestamp: Utc::now(),
                        message: e.to_string(),
                    }
                }
            };

            // The receiver disappearing just means the UI is gone
            let _ = events.send(event).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn stats_body() -> serde_json::Value {
        serde_json::json!({
            "success": true,
            "data": {
                "summary": {
                    "total_requests": "100",
                    "avg_response_time": "50.0",
                    "server_errors": "5",
                    "client_errors": "5"
                },
                "endpoints": [{ "endpoint": "/api/users", "total": "100" }],
                "daily": [{ "day": "2026-08-01", "total": "100" }]
            }
        })
    }

    async fn run_poller(server: &MockServer) -> (mpsc::Sender<()>, mpsc::Receiver<AppEvent>) {
        let (events_tx, events_rx) = mpsc::channel(16);
        let (refresh_tx, refresh_rx) = mpsc::channel(1);
        let poller = StatsPoller::new(
            Arc::new(ApiClient::new(server.uri())),
            "k1".to_string(),
            Duration::from_secs(60),
            events_tx,
            refresh_rx,
        );
        tokio::spawn(poller.run());
        // Hold the refresh sender open: the poller treats a closed refresh
        // channel as "UI gone" and shuts down. The real app keeps this sender
        // alive for the App's lifetime, so the test must too.
        (refresh_tx, events_rx)
    }

    #[tokio::test]
    async fn test_first_tick_delivers_a_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stats"))
            .and(header("x-api-key", "k1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(stats_body()))
            .mount(&server)
            .await;

        let (_refresh_tx, mut events) = run_poller(&server).await;
        let event = tokio::time::timeout(Duration::from_secs(5), events.recv())
            .await
            .expect("event in time")
            .expect("channel open");

        match event {
            AppEvent::StatsUpdated { snapshot, .. } => {
                assert_eq!(snapshot.summary.total_requests, 100);
            }
            other => panic!("expected StatsUpdated, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_surfaces_as_stats_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stats"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (_refresh_tx, mut events) = run_poller(&server).await;
        let event = tokio::time::timeout(Duration::from_secs(5), events.recv())
            .await
            .expect("event in time")
            .expect("channel open");

        match event {
            AppEvent::StatsFailed { message, .. } => {
                assert!(message.contains("500"), "message: {}", message);
            }
            other => panic!("expected StatsFailed, got {:?}", other),
        }
    }
}
