//! Subscription plans and the plan catalog
//!
//! Plan identifiers are a closed set; anything unexpected from the server or
//! the session file degrades to `Free` rather than failing the session.

use serde::{Deserialize, Serialize};

/// Subscription tier governing usage limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Free,
    Premium,
    Enterprise,
}

impl Plan {
    /// All plans, in display order
    pub fn all() -> &'static [Plan] {
        &[Plan::Free, Plan::Premium, Plan::Enterprise]
    }

    /// Wire/storage identifier
    pub fn id(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Premium => "premium",
            Plan::Enterprise => "enterprise",
        }
    }

    /// Parse a stored or server-sent identifier; unknown values become `Free`
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_lowercase().as_str() {
            "premium" => Plan::Premium,
            "enterprise" => Plan::Enterprise,
            _ => Plan::Free,
        }
    }

    /// Whether changing to this plan goes through checkout first
    pub fn is_paid(&self) -> bool {
        !matches!(self, Plan::Free)
    }

    /// Catalog entry for this plan
    pub fn info(&self) -> &'static PlanInfo {
        let info = &CATALOG[*self as usize];
        debug_assert_eq!(info.plan, *self);
        info
    }
}

/// A plan's value in the session: locally cached until the server confirms it.
///
/// The TUI renders the inner plan either way; `Cached` additionally shows a
/// syncing marker until reconciliation lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanState {
    /// Read from the session file, not yet confirmed by the server
    Cached(Plan),
    /// Confirmed by the server (reconciliation or a successful plan change)
    Confirmed(Plan),
}

impl PlanState {
    pub fn plan(&self) -> Plan {
        match self {
            PlanState::Cached(plan) | PlanState::Confirmed(plan) => *plan,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, PlanState::Confirmed(_))
    }
}

impl Default for PlanState {
    fn default() -> Self {
        PlanState::Cached(Plan::Free)
    }
}

/// Catalog entry: everything the plans view and the checkout step need
#[derive(Debug)]
pub struct PlanInfo {
    pub plan: Plan,
    pub name: &'static str,
    /// Display price (monthly)
    pub price: &'static str,
    pub period: &'static str,
    /// Checkout amount in the smallest currency unit (kobo for NGN)
    pub amount: u64,
    pub popular: bool,
    pub features: &'static [&'static str],
}

/// Indexed by `Plan as usize` - keep the order in sync with the enum
static CATALOG: [PlanInfo; 3] = [
    PlanInfo {
        plan: Plan::Free,
        name: "Free",
        price: "$0",
        period: "/month",
        amount: 0,
        popular: false,
        features: &[
            "100 API requests per month",
            "Basic analytics",
            "Community support",
            "Standard response time",
        ],
    },
    PlanInfo {
        plan: Plan::Premium,
        name: "Premium",
        price: "$29",
        period: "/month",
        amount: 15_000 * 100,
        popular: true,
        features: &[
            "1,000 API requests per month",
            "Advanced analytics",
            "Priority support",
            "Real-time monitoring",
            "Custom alerts",
        ],
    },
    PlanInfo {
        plan: Plan::Enterprise,
        name: "Enterprise",
        price: "$99",
        period: "/month",
        amount: 75_000 * 100,
        popular: false,
        features: &[
            "5,000 API requests per month",
            "Enterprise analytics",
            "24/7 dedicated support",
            "Custom integrations",
            "Advanced security",
            "SLA guarantees",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_roundtrip_ids() {
        for plan in Plan::all() {
            assert_eq!(Plan::from_id(plan.id()), *plan);
        }
    }

    #[test]
    fn test_unknown_plan_falls_back_to_free() {
        assert_eq!(Plan::from_id("platinum"), Plan::Free);
        assert_eq!(Plan::from_id(""), Plan::Free);
    }

    #[test]
    fn test_from_id_is_case_insensitive() {
        assert_eq!(Plan::from_id("Premium"), Plan::Premium);
        assert_eq!(Plan::from_id(" ENTERPRISE "), Plan::Enterprise);
    }

    #[test]
    fn test_catalog_order_matches_enum() {
        for plan in Plan::all() {
            assert_eq!(plan.info().plan, *plan);
        }
    }

    #[test]
    fn test_only_free_skips_checkout() {
        assert!(!Plan::Free.is_paid());
        assert!(Plan::Premium.is_paid());
        assert!(Plan::Enterprise.is_paid());
        assert_eq!(Plan::Free.info().amount, 0);
    }
}
