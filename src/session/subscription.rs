//! Plan change workflow
//!
//! One workflow invocation per user action: check for a no-op, mark the
//! change in flight, call the service, and apply the result to memory and
//! the persisted cache. The in-flight flag is cleared on every exit path via
//! a drop guard, so an early `?` can never leave it stuck.

use super::plan::{Plan, PlanState};
use super::{SessionController, SessionState};
use crate::api::ApiError;
use std::sync::Mutex;

/// What a completed workflow invocation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanChangeOutcome {
    /// Target equals the current plan; no request was issued
    Unchanged,
    /// The subscription now points at the new plan
    Changed(Plan),
}

/// Clears the advisory in-flight flag when the workflow returns
struct InFlightGuard<'a> {
    state: &'a Mutex<SessionState>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.state.lock().unwrap().changing_plan = false;
    }
}

impl SessionController {
    /// Change the subscription to `target`.
    ///
    /// `payment` carries the checkout gateway's confirmation payload for paid
    /// plans; the free plan sends none. On any failure the current plan -
    /// in memory and on disk - is left untouched.
    pub async fn change_plan(
        &self,
        target: Plan,
        payment: Option<serde_json::Value>,
    ) -> Result<PlanChangeOutcome, ApiError> {
        let token = {
            let mut state = self.state.lock().unwrap();

            if state.plan.plan() == target {
                return Ok(PlanChangeOutcome::Unchanged);
            }
            if !state.session.is_authenticated || state.session.token.is_empty() {
                return Err(ApiError::Unauthenticated);
            }

            state.changing_plan = true;
            state.session.token.clone()
        };
        let _in_flight = InFlightGuard { state: &self.state };

        tracing::info!("Changing plan to {}", target.id());
        self.api.change_plan(&token, target, payment.as_ref()).await?;

        if let Err(e) = self.store.save_plan(target) {
            // The server already accepted the change; the cache converges at
            // the next reconcile.
            tracing::warn!("Failed to persist plan cache: {:#}", e);
        }
        self.state.lock().unwrap().plan = PlanState::Confirmed(target);

        Ok(PlanChangeOutcome::Changed(target))
    }
}
