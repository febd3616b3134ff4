//! Config serialization to TOML
//!
//! Single source of truth for the config file format. The generated template
//! doubles as documentation: every option appears, commented out when it
//! only makes sense with a user-provided value.

use super::Config;

impl Config {
    /// Render the full config file, including comments
    pub fn to_toml(&self) -> String {
        let mut out = String::new();

        out.push_str("# Reqlytics dashboard configuration\n");
        out.push_str("# Environment variables override these values.\n\n");

        out.push_str("# Base URL of the Reqlytics service (REQLYTICS_BASE_URL)\n");
        out.push_str(&format!("base_url = \"{}\"\n\n", self.base_url));

        out.push_str("# Seconds between stats polls (REQLYTICS_POLL_INTERVAL)\n");
        out.push_str(&format!("poll_interval_secs = {}\n\n", self.poll_interval_secs));

        out.push_str("# Theme: \"dark\" or \"light\" (REQLYTICS_THEME)\n");
        out.push_str(&format!("theme = \"{}\"\n\n", self.theme));

        out.push_str(&self.logging_to_toml());
        out.push_str(&self.checkout_to_toml());

        out
    }

    fn logging_to_toml(&self) -> String {
        let logging = &self.logging;
        let mut out = String::from("[logging]\n");
        out.push_str("# Level: trace, debug, info, warn, error (RUST_LOG overrides)\n");
        out.push_str(&format!("level = \"{}\"\n", logging.level));
        out.push_str("# Write rotating JSON log files in addition to the TUI/stdout\n");
        out.push_str(&format!("file_enabled = {}\n", logging.file_enabled));
        out.push_str(&format!(
            "file_dir = \"{}\"\n",
            logging.file_dir.display()
        ));
        out.push_str("# Rotation: hourly, daily, never\n");
        out.push_str(&format!(
            "file_rotation = \"{}\"\n",
            logging.file_rotation.as_str()
        ));
        out.push_str(&format!("file_prefix = \"{}\"\n\n", logging.file_prefix));
        out
    }

    fn checkout_to_toml(&self) -> String {
        let checkout = &self.checkout;
        let mut out = String::from("[checkout]\n");
        out.push_str("# Paystack public key for paid upgrades (REQLYTICS_PAYSTACK_PUBLIC_KEY)\n");
        match &checkout.public_key {
            Some(key) => out.push_str(&format!("public_key = \"{}\"\n", key)),
            None => out.push_str("# public_key = \"pk_live_...\"\n"),
        }
        out.push_str(&format!("currency = \"{}\"\n", checkout.currency));
        out
    }
}
