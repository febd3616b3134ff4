//! Checkout gateway configuration

use serde::Deserialize;

/// Checkout configuration for paid plan upgrades
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Paystack public key; without it paid upgrades are unavailable
    pub public_key: Option<String>,
    /// Charge currency (amounts in the plan catalog are kobo for NGN)
    pub currency: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            public_key: None,
            currency: "NGN".to_string(),
        }
    }
}

/// `[checkout]` section of the config file
#[derive(Debug, Deserialize, Default)]
pub struct FileCheckout {
    pub public_key: Option<String>,
    pub currency: Option<String>,
}

impl CheckoutConfig {
    /// Merge file values with the environment; `env_public_key` wins
    pub(crate) fn from_file(file: Option<FileCheckout>, env_public_key: Option<String>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            public_key: env_public_key.or(file.public_key),
            currency: file.currency.unwrap_or(defaults.currency),
        }
    }
}
