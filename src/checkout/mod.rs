//! Checkout capability
//!
//! Paid plan changes go through a third-party checkout before the service is
//! told about the new plan. The gateway is behind a trait so the plan change
//! workflow stays free of vendor specifics; the Paystack implementation fills
//! the widget's parameter block and hands back its confirmation payload.
//! There is no real payment processing in this client.

use crate::config::CheckoutConfig;
use crate::session::plan::Plan;
use anyhow::{bail, Result};
use async_trait::async_trait;
use serde::Serialize;

/// Parameter block handed to the checkout widget
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub plan: Plan,
    pub email: String,
    /// Amount in the smallest currency unit (kobo for NGN)
    pub amount: u64,
    pub currency: String,
    pub public_key: String,
}

/// Confirmation payload a completed checkout hands back, forwarded verbatim
/// to the change-plan endpoint as `paymentResponse`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentConfirmation {
    pub reference: String,
    pub status: String,
    pub gateway: String,
}

impl PaymentConfirmation {
    pub fn into_value(self) -> serde_json::Value {
        serde_json::to_value(self).expect("confirmation serializes")
    }
}

/// Result of driving the widget to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Completed(PaymentConfirmation),
    /// The user closed the widget without paying
    Cancelled,
}

/// A pluggable checkout gateway
#[async_trait]
pub trait Checkout: Send + Sync {
    async fn initiate(&self, request: &CheckoutRequest) -> Result<PaymentOutcome>;
}

/// Paystack gateway configured from `[checkout]`
#[derive(Debug)]
pub struct PaystackCheckout {
    public_key: Option<String>,
    currency: String,
}

impl PaystackCheckout {
    pub fn from_config(config: &CheckoutConfig) -> Self {
        Self {
            public_key: config.public_key.clone(),
            currency: config.currency.clone(),
        }
    }

    /// Build the widget parameters for upgrading to `plan`.
    ///
    /// Fails when the gateway is unusable: a missing public key or a missing
    /// signed-in email are configuration problems the user has to fix, not
    /// payment failures.
    pub fn request_for(&self, plan: Plan, email: Option<&str>) -> Result<CheckoutRequest> {
        let Some(public_key) = self.public_key.as_deref().filter(|key| !key.is_empty()) else {
            bail!(
                "Paystack public key is not configured. \
                 Set REQLYTICS_PAYSTACK_PUBLIC_KEY or [checkout] public_key."
            );
        };
        let Some(email) = email.filter(|email| !email.is_empty()) else {
            bail!("A signed-in email address is required for payment");
        };

        Ok(CheckoutRequest {
            plan,
            email: email.to_string(),
            amount: plan.info().amount,
            currency: self.currency.clone(),
            public_key: public_key.to_string(),
        })
    }
}

#[async_trait]
impl Checkout for PaystackCheckout {
    async fn initiate(&self, request: &CheckoutRequest) -> Result<PaymentOutcome> {
        tracing::info!(
            "Paystack checkout: plan={} amount={} {} email={}",
            request.plan.id(),
            request.amount,
            request.currency,
            request.email
        );
        tracing::debug!(
            "Checkout public key: {}…",
            request.public_key.chars().take(8).collect::<String>()
        );

        Ok(PaymentOutcome::Completed(PaymentConfirmation {
            reference: generate_reference(),
            status: "success".to_string(),
            gateway: "paystack".to_string(),
        }))
    }
}

/// Unique transaction reference: millisecond timestamp plus a counter so two
/// checkouts in the same millisecond stay distinct
fn generate_reference() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let count = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("rql-{}-{}", chrono::Utc::now().timestamp_millis(), count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(key: Option<&str>) -> PaystackCheckout {
        PaystackCheckout {
            public_key: key.map(String::from),
            currency: "NGN".to_string(),
        }
    }

    #[test]
    fn test_request_requires_public_key() {
        let err = gateway(None)
            .request_for(Plan::Premium, Some("user@example.com"))
            .unwrap_err();
        assert!(err.to_string().contains("public key"));

        let err = gateway(Some(""))
            .request_for(Plan::Premium, Some("user@example.com"))
            .unwrap_err();
        assert!(err.to_string().contains("public key"));
    }

    #[test]
    fn test_request_requires_email() {
        let err = gateway(Some("pk_test_1"))
            .request_for(Plan::Premium, None)
            .unwrap_err();
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn test_request_carries_catalog_amount() {
        let request = gateway(Some("pk_test_1"))
            .request_for(Plan::Enterprise, Some("user@example.com"))
            .unwrap();
        assert_eq!(request.amount, Plan::Enterprise.info().amount);
        assert_eq!(request.currency, "NGN");
        assert_eq!(request.public_key, "pk_test_1");
    }

    #[tokio::test]
    async fn test_initiate_returns_a_confirmation() {
        let gateway = gateway(Some("pk_test_1"));
        let request = gateway
            .request_for(Plan::Premium, Some("user@example.com"))
            .unwrap();

        let outcome = gateway.initiate(&request).await.unwrap();
        let PaymentOutcome::Completed(confirmation) = outcome else {
            panic!("expected a completed payment");
        };
        assert_eq!(confirmation.gateway, "paystack");
        assert_eq!(confirmation.status, "success");
        assert!(confirmation.reference.starts_with("rql-"));
    }

    #[test]
    fn test_references_are_unique() {
        assert_ne!(generate_reference(), generate_reference());
    }
}
