// TUI application state
//
// The App owns everything the views render: the latest stats snapshot, the
// session controller handle, plan selection, modal/toast state. Background
// work (plan changes, checkout) is spawned from here and reports back through
// the same AppEvent channel the pollers use, so all state mutation happens on
// the event loop.

use super::components::Toast;
use super::theme::{Theme, ThemeKind};
use super::clipboard;
use crate::checkout::{Checkout, CheckoutRequest, PaymentOutcome, PaystackCheckout};
use crate::config::Config;
use crate::events::AppEvent;
use crate::logging::LogBuffer;
use crate::session::plan::{Plan, PlanState};
use crate::session::{PlanChangeOutcome, SessionController};
use crate::stats::StatsSnapshot;
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Rows per page of the endpoint usage table
pub const ENDPOINT_PAGE_SIZE: usize = 5;

/// Fixed delay before returning to the dashboard after a successful plan
/// change, so the success message is seen
const PLAN_CHANGE_NAV_DELAY: Duration = Duration::from_secs(2);

/// Different views the TUI can display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Plans,
    Help,
}

impl View {
    /// Display name for the title bar
    pub fn name(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Plans => "Plans",
            View::Help => "Help",
        }
    }
}

/// A paid upgrade waiting for the user to confirm or cancel the checkout
#[derive(Debug, Clone)]
pub struct PendingCheckout {
    pub request: CheckoutRequest,
}

/// Main application state for the TUI
pub struct App {
    pub view: View,
    pub should_quit: bool,
    pub theme_kind: ThemeKind,
    pub theme: Theme,

    /// Session and plan state, shared with background tasks
    pub controller: Arc<SessionController>,
    gateway: Arc<PaystackCheckout>,
    /// Signed-in email, needed by the checkout widget
    user_email: Option<String>,

    /// Channel the spawned workflow tasks report back on
    events_tx: mpsc::Sender<AppEvent>,
    /// Asks the poller for an immediate re-poll
    refresh_tx: mpsc::Sender<()>,

    /// Latest snapshot; superseded wholesale by each poll
    pub stats: Option<StatsSnapshot>,
    /// Set when the latest poll failed - the error state takes precedence
    /// over any older snapshot
    pub stats_error: Option<String>,
    last_poll: Option<Instant>,
    pub poll_interval: Duration,

    /// Endpoint table page (0-based)
    pub endpoint_page: usize,

    /// Cursor in the plans view
    pub selected_plan: usize,
    /// Checkout confirmation step, when a paid plan was picked
    pub checkout: Option<PendingCheckout>,

    pub show_api_key: bool,
    pub show_logs: bool,
    pub log_buffer: LogBuffer,

    pub toast: Option<Toast>,
    /// Delayed navigation scheduled by a successful plan change
    pending_view: Option<(Instant, View)>,

    pub start_time: Instant,
}

impl App {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        controller: Arc<SessionController>,
        gateway: Arc<PaystackCheckout>,
        user_email: Option<String>,
        events_tx: mpsc::Sender<AppEvent>,
        refresh_tx: mpsc::Sender<()>,
        log_buffer: LogBuffer,
        config: &Config,
    ) -> Self {
        let theme_kind = ThemeKind::from_name(&config.theme);
        Self {
            view: View::default(),
            should_quit: false,
            theme: theme_kind.theme(),
            theme_kind,
            controller,
            gateway,
            user_email,
            events_tx,
            refresh_tx,
            stats: None,
            stats_error: None,
            last_poll: None,
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            endpoint_page: 0,
            selected_plan: 0,
            checkout: None,
            show_api_key: false,
            show_logs: false,
            log_buffer,
            toast: None,
            pending_view: None,
            start_time: Instant::now(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Event handling
    // ─────────────────────────────────────────────────────────────────────

    /// Apply an event from the background tasks
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::StatsUpdated { snapshot, .. } => {
                self.endpoint_page = self
                    .endpoint_page
                    .min(last_page(snapshot.endpoints.len()));
                self.stats = Some(snapshot);
                self.stats_error = None;
                self.last_poll = Some(Instant::now());
            }
            AppEvent::StatsFailed { message, .. } => {
                self.stats_error = Some(message);
                self.last_poll = Some(Instant::now());
            }
            AppEvent::PlanReconciled { .. } => {
                // Silent convergence - the badge just loses its syncing marker
            }
            AppEvent::PlanReconcileFailed { message, .. } => {
                self.show_toast(format!("Could not confirm plan with server: {}", message));
            }
            AppEvent::PlanChanged { plan, .. } => {
                self.show_toast(format!(
                    "Successfully upgraded to the {} plan",
                    plan.info().name
                ));
                self.checkout = None;
                self.pending_view = Some((Instant::now() + PLAN_CHANGE_NAV_DELAY, View::Dashboard));
            }
            AppEvent::PlanChangeFailed { kind, message, .. } => {
                tracing::warn!("Plan change failed ({}): {}", kind, message);
                self.show_toast(format!("Failed to update plan: {}", message));
            }
        }
    }

    /// Periodic upkeep: expire toasts, fire delayed navigation
    pub fn tick(&mut self) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
        if let Some((when, view)) = self.pending_view {
            if Instant::now() >= when {
                self.pending_view = None;
                self.set_view(view);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Navigation and global actions
    // ─────────────────────────────────────────────────────────────────────

    pub fn set_view(&mut self, view: View) {
        self.view = view;
        if view == View::Plans {
            // Start with the cursor on the current plan
            let current = self.controller.plan_state().plan();
            self.selected_plan = Plan::all()
                .iter()
                .position(|p| *p == current)
                .unwrap_or(0);
            self.checkout = None;
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme_kind = self.theme_kind.toggle();
        self.theme = self.theme_kind.theme();
        self.show_toast(format!("Theme: {}", self.theme_kind.name()));
    }

    /// Ask the poller for an immediate re-poll
    pub fn request_refresh(&mut self) {
        if self.refresh_tx.try_send(()).is_ok() {
            self.show_toast("Refreshing dashboard data...");
        }
    }

    pub fn logout(&mut self) {
        match self.controller.logout() {
            Ok(()) => {
                // Main prints the login hint once the terminal is restored
                self.should_quit = true;
            }
            Err(e) => self.show_toast(format!("Logout failed: {:#}", e)),
        }
    }

    pub fn copy_api_key(&mut self) {
        let api_key = self.controller.session().api_key;
        if clipboard::copy_to_clipboard(&api_key).is_ok() {
            self.show_toast("✓ API key copied to clipboard");
        } else {
            self.show_toast("✗ Failed to copy");
        }
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Dashboard
    // ─────────────────────────────────────────────────────────────────────

    /// Seconds until the poller's next scheduled tick
    pub fn seconds_until_poll(&self) -> u64 {
        match self.last_poll {
            Some(last) => {
                let elapsed = last.elapsed();
                self.poll_interval.saturating_sub(elapsed).as_secs()
            }
            None => 0,
        }
    }

    pub fn next_endpoint_page(&mut self) {
        if let Some(snapshot) = &self.stats {
            let last = last_page(snapshot.endpoints.len());
            if self.endpoint_page < last {
                self.endpoint_page += 1;
            }
        }
    }

    pub fn prev_endpoint_page(&mut self) {
        self.endpoint_page = self.endpoint_page.saturating_sub(1);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Plans and checkout
    // ─────────────────────────────────────────────────────────────────────

    pub fn select_next_plan(&mut self) {
        self.selected_plan = (self.selected_plan + 1) % Plan::all().len();
    }

    pub fn select_prev_plan(&mut self) {
        let count = Plan::all().len();
        self.selected_plan = (self.selected_plan + count - 1) % count;
    }

    /// Enter on a plan card: free plans change directly, paid plans go to
    /// the checkout confirmation step first
    pub fn activate_selected_plan(&mut self) {
        let target = Plan::all()[self.selected_plan];
        let current = self.controller.plan_state().plan();

        if target == current {
            self.show_toast(format!("You are already on the {} plan", target.info().name));
            return;
        }
        if self.controller.is_changing_plan() {
            self.show_toast("A plan change is already in progress");
            return;
        }

        if target.is_paid() {
            match self.gateway.request_for(target, self.user_email.as_deref()) {
                Ok(request) => self.checkout = Some(PendingCheckout { request }),
                Err(e) => self.show_toast(format!("{:#}", e)),
            }
        } else {
            self.spawn_plan_change(target, None);
        }
    }

    /// Enter on the checkout step: drive the gateway, then the workflow
    pub fn confirm_checkout(&mut self) {
        let Some(pending) = self.checkout.take() else {
            return;
        };

        let gateway = self.gateway.clone();
        let controller = self.controller.clone();
        let events = self.events_tx.clone();

        tokio::spawn(async move {
            let request = pending.request;
            let target = request.plan;
            let event = match gateway.initiate(&request).await {
                Ok(PaymentOutcome::Completed(confirmation)) => {
                    run_plan_change(&controller, target, Some(confirmation.into_value())).await
                }
                Ok(PaymentOutcome::Cancelled) => None,
                Err(e) => Some(AppEvent::PlanChangeFailed {
                    timestamp: Utc::now(),
                    kind: "checkout",
                    message: format!("{:#}", e),
                }),
            };
            if let Some(event) = event {
                let _ = events.send(event).await;
            }
        });
    }

    /// Esc on the checkout step
    pub fn cancel_checkout(&mut self) {
        if self.checkout.take().is_some() {
            self.show_toast("You cancelled the payment process");
        }
    }

    fn spawn_plan_change(&self, target: Plan, payment: Option<serde_json::Value>) {
        let controller = self.controller.clone();
        let events = self.events_tx.clone();

        tokio::spawn(async move {
            if let Some(event) = run_plan_change(&controller, target, payment).await {
                let _ = events.send(event).await;
            }
        });
    }

    /// Uptime as HH:MM:SS
    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
    }
}

/// Run the plan change workflow and translate the outcome into an event
async fn run_plan_change(
    controller: &SessionController,
    target: Plan,
    payment: Option<serde_json::Value>,
) -> Option<AppEvent> {
    match controller.change_plan(target, payment).await {
        Ok(PlanChangeOutcome::Changed(plan)) => Some(AppEvent::PlanChanged {
            timestamp: Utc::now(),
            plan,
        }),
        Ok(PlanChangeOutcome::Unchanged) => None,
        Err(e) => Some(AppEvent::PlanChangeFailed {
            timestamp: Utc::now(),
            kind: e.kind(),
            message: e.to_string(),
        }),
    }
}

/// Badge text for the current plan, with a syncing marker until confirmed
pub fn plan_badge(plan_state: PlanState) -> String {
    let name = plan_state.plan().info().name;
    if plan_state.is_confirmed() {
        format!("● {}", name)
    } else {
        format!("● {} (syncing…)", name)
    }
}

fn last_page(rows: usize) -> usize {
    if rows == 0 {
        0
    } else {
        (rows - 1) / ENDPOINT_PAGE_SIZE
    }
}
