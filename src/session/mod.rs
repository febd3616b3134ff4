//! Client-side session state machine
//!
//! The controller owns the authenticated-or-not state and the subscription
//! plan. Bootstrap follows a two-phase read: the persisted plan is shown
//! immediately as a provisional value, then a background fetch reconciles it
//! against the server. Reconciliation failure is never fatal - only missing
//! credentials force the user back to login.
//!
//! Session states: `Unauthenticated | Authenticated(Cached) ->
//! Authenticated(Confirmed)`, leaving only via explicit logout or absent
//! credentials at the next bootstrap. There is no token expiry handling; an
//! expired token surfaces as a failed fetch like any other.

pub mod plan;
pub mod store;
mod subscription;

pub use subscription::PlanChangeOutcome;

use crate::api::{ApiError, SubscriptionApi};
use anyhow::Result;
use plan::{Plan, PlanState};
use std::sync::{Arc, Mutex};
use store::SessionStore;

/// The authenticated-or-not state of the current user
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub is_authenticated: bool,
    pub token: String,
    pub api_key: String,
}

/// Outcome of reading the persisted session at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bootstrap {
    /// No usable credentials on disk; the caller redirects to login
    Unauthenticated,
    /// Credentials found; `plan` is the provisional (cached) value
    Authenticated { plan: Plan },
}

#[derive(Debug, Default)]
struct SessionState {
    session: Session,
    plan: PlanState,
    /// Advisory flag while a plan change is in flight
    changing_plan: bool,
}

/// Owns session and plan state; shared across tasks behind `Arc`
pub struct SessionController {
    store: SessionStore,
    api: Arc<dyn SubscriptionApi>,
    state: Mutex<SessionState>,
}

impl SessionController {
    pub fn new(store: SessionStore, api: Arc<dyn SubscriptionApi>) -> Self {
        Self {
            store,
            api,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Read the persisted session and initialize in-memory state.
    ///
    /// Synchronous and network-free: with credentials present the session is
    /// immediately authenticated with the stored plan (or `free`) as a
    /// cached value. The caller is expected to run [`reconcile_plan`]
    /// afterwards; with credentials absent, nothing else may be called.
    ///
    /// [`reconcile_plan`]: SessionController::reconcile_plan
    pub fn bootstrap(&self) -> Bootstrap {
        let persisted = self.store.load();

        let token = persisted.token.unwrap_or_default();
        let api_key = persisted.api_key.unwrap_or_default();
        if token.is_empty() || api_key.is_empty() {
            return Bootstrap::Unauthenticated;
        }

        let provisional = persisted
            .user_plan
            .as_deref()
            .map(Plan::from_id)
            .unwrap_or_default();

        let mut state = self.state.lock().unwrap();
        state.session = Session {
            is_authenticated: true,
            token,
            api_key,
        };
        state.plan = PlanState::Cached(provisional);

        Bootstrap::Authenticated { plan: provisional }
    }

    /// Replace the cached plan with the server's authoritative value.
    ///
    /// On success both the in-memory plan and the persisted cache are
    /// overwritten. On failure the provisional value stays in place and the
    /// error is returned for a non-fatal notification.
    pub async fn reconcile_plan(&self) -> Result<Plan, ApiError> {
        let token = {
            let state = self.state.lock().unwrap();
            if !state.session.is_authenticated {
                return Err(ApiError::Unauthenticated);
            }
            state.session.token.clone()
        };

        let plan = self.api.fetch_plan(&token).await?;

        if let Err(e) = self.store.save_plan(plan) {
            tracing::warn!("Failed to persist reconciled plan: {:#}", e);
        }
        self.state.lock().unwrap().plan = PlanState::Confirmed(plan);

        tracing::debug!("Plan reconciled to {}", plan.id());
        Ok(plan)
    }

    /// Clear persisted credentials and reset in-memory state
    pub fn logout(&self) -> Result<()> {
        self.store.clear()?;
        let mut state = self.state.lock().unwrap();
        state.session = Session::default();
        state.plan = PlanState::default();
        state.changing_plan = false;
        tracing::info!("Signed out");
        Ok(())
    }

    /// Current session (read-only view for the presentation layer)
    pub fn session(&self) -> Session {
        self.state.lock().unwrap().session.clone()
    }

    /// Current plan with its cached/confirmed marker
    pub fn plan_state(&self) -> PlanState {
        self.state.lock().unwrap().plan
    }

    /// Whether a plan change is currently in flight (advisory)
    pub fn is_changing_plan(&self) -> bool {
        self.state.lock().unwrap().changing_plan
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted [`SubscriptionApi`] for controller tests

    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    pub struct ScriptedApi {
        pub plan_result: Mutex<Option<Result<Plan, ApiError>>>,
        pub change_result: Mutex<Option<Result<(), ApiError>>>,
        pub fetch_calls: AtomicUsize,
        pub change_calls: AtomicUsize,
        pub last_change: Mutex<Option<(Plan, Option<serde_json::Value>)>>,
    }

    impl ScriptedApi {
        pub fn returning_plan(plan: Plan) -> Self {
            let api = Self::default();
            *api.plan_result.lock().unwrap() = Some(Ok(plan));
            api
        }

        pub fn fetch_count(&self) -> usize {
            self.fetch_calls.load(Ordering::SeqCst)
        }

        pub fn change_count(&self) -> usize {
            self.change_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SubscriptionApi for ScriptedApi {
        async fn fetch_plan(&self, _token: &str) -> Result<Plan, ApiError> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            self.plan_result
                .lock()
                .unwrap()
                .clone()
                .unwrap_or(Err(ApiError::Network("no scripted plan".into())))
        }

        async fn change_plan(
            &self,
            _token: &str,
            plan: Plan,
            payment: Option<&serde_json::Value>,
        ) -> Result<(), ApiError> {
            self.change_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_change.lock().unwrap() = Some((plan, payment.cloned()));
            self.change_result.lock().unwrap().clone().unwrap_or(Ok(()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedApi;
    use super::*;
    use tempfile::TempDir;

    fn controller_with(
        api: ScriptedApi,
        setup: impl FnOnce(&SessionStore),
    ) -> (TempDir, Arc<ScriptedApi>, SessionController) {
        let dir = TempDir::new().expect("tempdir");
        let store = SessionStore::open(dir.path()).expect("open store");
        setup(&store);
        let api = Arc::new(api);
        let controller = SessionController::new(
            SessionStore::open(dir.path()).expect("reopen store"),
            api.clone(),
        );
        (dir, api, controller)
    }

    #[test]
    fn test_bootstrap_without_credentials_is_unauthenticated() {
        let (_dir, api, controller) = controller_with(ScriptedApi::default(), |_| {});

        assert_eq!(controller.bootstrap(), Bootstrap::Unauthenticated);
        assert!(!controller.session().is_authenticated);
        assert_eq!(api.fetch_count(), 0);
    }

    #[test]
    fn test_bootstrap_with_partial_credentials_is_unauthenticated() {
        let (_dir, api, controller) = controller_with(ScriptedApi::default(), |store| {
            store.save_credentials("t1", "", None).unwrap();
        });

        assert_eq!(controller.bootstrap(), Bootstrap::Unauthenticated);
        assert_eq!(api.fetch_count(), 0);
    }

    #[test]
    fn test_bootstrap_uses_stored_plan_as_cached() {
        let (_dir, _api, controller) = controller_with(ScriptedApi::default(), |store| {
            store.save_credentials("t1", "k1", None).unwrap();
            store.save_plan(Plan::Enterprise).unwrap();
        });

        assert_eq!(
            controller.bootstrap(),
            Bootstrap::Authenticated {
                plan: Plan::Enterprise
            }
        );
        assert_eq!(controller.plan_state(), PlanState::Cached(Plan::Enterprise));
        let session = controller.session();
        assert!(session.is_authenticated);
        assert_eq!(session.token, "t1");
        assert_eq!(session.api_key, "k1");
    }

    #[tokio::test]
    async fn test_bootstrap_then_reconcile_converges_to_server_plan() {
        // Stored token/apiKey, no stored plan: provisional free, server says premium
        let (dir, api, controller) =
            controller_with(ScriptedApi::returning_plan(Plan::Premium), |store| {
                store.save_credentials("t1", "k1", None).unwrap();
            });

        assert_eq!(
            controller.bootstrap(),
            Bootstrap::Authenticated { plan: Plan::Free }
        );
        assert_eq!(controller.plan_state(), PlanState::Cached(Plan::Free));

        let reconciled = controller.reconcile_plan().await.unwrap();
        assert_eq!(reconciled, Plan::Premium);
        assert_eq!(api.fetch_count(), 1);
        assert_eq!(
            controller.plan_state(),
            PlanState::Confirmed(Plan::Premium)
        );

        // Persisted cache was overwritten with the server value
        let store = SessionStore::open(dir.path()).unwrap();
        assert_eq!(store.load().user_plan.as_deref(), Some("premium"));
    }

    #[tokio::test]
    async fn test_reconcile_failure_keeps_provisional_plan() {
        let (_dir, api, controller) = controller_with(ScriptedApi::default(), |store| {
            store.save_credentials("t1", "k1", None).unwrap();
            store.save_plan(Plan::Premium).unwrap();
        });
        *api.plan_result.lock().unwrap() = Some(Err(ApiError::Network("connection refused".into())));

        controller.bootstrap();
        assert!(controller.reconcile_plan().await.is_err());
        assert_eq!(controller.plan_state(), PlanState::Cached(Plan::Premium));
    }

    #[tokio::test]
    async fn test_reconcile_without_bootstrap_never_touches_network() {
        let (_dir, api, controller) = controller_with(ScriptedApi::default(), |_| {});

        let err = controller.reconcile_plan().await.unwrap_err();
        assert_eq!(err.kind(), "unauthenticated");
        assert_eq!(api.fetch_count(), 0);
    }

    #[test]
    fn test_logout_clears_store_and_memory() {
        let (dir, _api, controller) = controller_with(ScriptedApi::default(), |store| {
            store.save_credentials("t1", "k1", None).unwrap();
            store.save_plan(Plan::Premium).unwrap();
        });

        controller.bootstrap();
        controller.logout().unwrap();

        assert!(!controller.session().is_authenticated);
        assert_eq!(controller.plan_state(), PlanState::default());

        let store = SessionStore::open(dir.path()).unwrap();
        let persisted = store.load();
        assert!(persisted.token.is_none());
        assert!(persisted.user_plan.is_none());
    }
}
