// Events that flow from background tasks to the TUI
//
// The stats poller and the session tasks never touch UI state directly; they
// send one of these over an mpsc channel and the TUI applies it on its own
// event loop. Pattern matching on the enum keeps the task/UI boundary
// type-safe.

use crate::session::plan::Plan;
use crate::stats::StatsSnapshot;
use chrono::{DateTime, Utc};

/// Main event type delivered to the TUI event loop
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A stats poll resolved with a fresh snapshot
    StatsUpdated {
        timestamp: DateTime<Utc>,
        snapshot: StatsSnapshot,
    },

    /// A stats poll failed; the dashboard switches to its error state
    StatsFailed {
        timestamp: DateTime<Utc>,
        message: String,
    },

    /// Bootstrap reconciliation confirmed the server's plan
    PlanReconciled {
        timestamp: DateTime<Utc>,
        plan: Plan,
    },

    /// Reconciliation failed; the cached plan stays in place (non-fatal)
    PlanReconcileFailed {
        timestamp: DateTime<Utc>,
        message: String,
    },

    /// A plan change went through
    PlanChanged {
        timestamp: DateTime<Utc>,
        plan: Plan,
    },

    /// A plan change failed; `kind` separates protocol errors from network
    /// and server failures in the notification wording
    PlanChangeFailed {
        timestamp: DateTime<Utc>,
        kind: &'static str,
        message: String,
    },
}
