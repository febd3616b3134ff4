// Reqlytics - Terminal Dashboard for API Usage Analytics
//
// A client for the Reqlytics service: signs the user in, polls aggregated
// usage statistics, renders them in a terminal dashboard, and manages the
// subscription plan.
//
// Architecture:
// - api: thin HTTP client (reqwest) for the Reqlytics endpoints
// - session: persisted credential store, session controller, plan workflow
// - stats: snapshot domain model + fixed-interval polling task
// - checkout: pluggable payment gateway for paid plan upgrades
// - tui (ratatui): dashboard, plans, and help views
// - events: mpsc channel connecting background tasks to the TUI

mod api;
mod checkout;
mod cli;
mod config;
mod events;
mod logging;
mod session;
mod stats;
mod tui;

use anyhow::Result;
use api::{ApiClient, SubscriptionApi};
use checkout::PaystackCheckout;
use chrono::Utc;
use config::Config;
use events::AppEvent;
use logging::LogBuffer;
use session::store::SessionStore;
use session::{Bootstrap, SessionController};
use stats::poller::StatsPoller;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure the config template exists (helps users discover options)
    Config::ensure_config_exists();
    let config = Config::from_env();

    // Subcommands (login, logout, verify, config) run and exit early
    if cli::handle_cli(&config).await? {
        return Ok(());
    }

    // Initialize tracing. In TUI mode logs are captured to an in-memory
    // buffer so they never garble the alternate screen; the guard keeps the
    // optional file writer alive until exit.
    let log_buffer = LogBuffer::new();
    let _file_guard = logging::init(&config.logging, config.enable_tui, log_buffer.clone());

    // Wire the core: persisted store + HTTP client + session controller
    let store = SessionStore::default_location()?;
    let user_email = store.load().user_email;
    let api = Arc::new(ApiClient::new(config.base_url.clone()));
    let subscription_api: Arc<dyn SubscriptionApi> = api.clone();
    let controller = Arc::new(SessionController::new(store, subscription_api));

    // Bootstrap from the persisted session. Missing credentials are the one
    // fatal case - everything past this point degrades gracefully.
    let session = match controller.bootstrap() {
        Bootstrap::Unauthenticated => {
            eprintln!("Not signed in. Run `reqlytics login` first.");
            std::process::exit(1);
        }
        Bootstrap::Authenticated { plan } => {
            tracing::info!("Session restored (cached plan: {})", plan.id());
            controller.session()
        }
    };

    // Event channels: background tasks feed the TUI; the refresh channel
    // lets the TUI ask the poller for an immediate re-poll
    let (event_tx, event_rx) = mpsc::channel(256);
    let (refresh_tx, refresh_rx) = mpsc::channel(4);

    // Reconcile the cached plan against the server, off the render path.
    // Failure leaves the provisional plan in place - non-fatal by design.
    {
        let controller = controller.clone();
        let events = event_tx.clone();
        tokio::spawn(async move {
            let event = match controller.reconcile_plan().await {
                Ok(plan) => AppEvent::PlanReconciled {
                    timestamp: Utc::now(),
                    plan,
                },
                Err(e) => {
                    tracing::warn!("Plan reconciliation failed: {}", e);
                    AppEvent::PlanReconcileFailed {
                        timestamp: Utc::now(),
                        message: e.to_string(),
                    }
                }
            };
            let _ = events.send(event).await;
        });
    }

    // Stats poller: fixed interval, first poll immediately
    let poller = StatsPoller::new(
        api.clone(),
        session.api_key.clone(),
        Duration::from_secs(config.poll_interval_secs),
        event_tx.clone(),
        refresh_rx,
    );
    tokio::spawn(poller.run());

    if config.enable_tui {
        tracing::info!("Starting TUI");
        let gateway = Arc::new(PaystackCheckout::from_config(&config.checkout));
        let app = tui::app::App::new(
            controller.clone(),
            gateway,
            user_email,
            event_tx,
            refresh_tx,
            log_buffer,
            &config,
        );
        tui::run_tui(event_rx, app).await?;

        // Logging out inside the TUI ends the session
        if !controller.session().is_authenticated {
            println!("You have been logged out successfully. Run `reqlytics login` to sign in again.");
        }
    } else {
        run_headless(event_rx).await;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Headless mode: log incoming events until Ctrl+C
async fn run_headless(mut event_rx: mpsc::Receiver<AppEvent>) {
    tracing::info!("TUI disabled, logging snapshots until Ctrl+C");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = event_rx.recv() => match event {
                Some(event) => log_event(&event),
                None => break,
            },
        }
    }
}

fn log_event(event: &AppEvent) {
    match event {
        AppEvent::StatsUpdated {
            timestamp,
            snapshot,
        } => tracing::info!(
            "[{}] stats: {} requests, {:.1}% success, {:.0} ms avg response",
            timestamp.format("%H:%M:%S"),
            snapshot.summary.total_requests,
            snapshot.success_rate(),
            snapshot.summary.avg_response_time_ms
        ),
        AppEvent::StatsFailed { timestamp, message } => {
            tracing::error!("[{}] stats poll failed: {}", timestamp.format("%H:%M:%S"), message)
        }
        AppEvent::PlanReconciled { timestamp, plan } => tracing::info!(
            "[{}] plan confirmed by server: {}",
            timestamp.format("%H:%M:%S"),
            plan.id()
        ),
        AppEvent::PlanReconcileFailed { timestamp, message } => tracing::warn!(
            "[{}] plan reconciliation failed: {}",
            timestamp.format("%H:%M:%S"),
            message
        ),
        AppEvent::PlanChanged { timestamp, plan } => tracing::info!(
            "[{}] plan changed: {}",
            timestamp.format("%H:%M:%S"),
            plan.id()
        ),
        AppEvent::PlanChangeFailed {
            timestamp,
            kind,
            message,
        } => tracing::warn!(
            "[{}] plan change failed ({}): {}",
            timestamp.format("%H:%M:%S"),
            kind,
            message
        ),
    }
}
