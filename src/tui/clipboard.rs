//! Clipboard helper for copying text to the system clipboard
//!
//! Uses the `arboard` crate for cross-platform support. The clipboard is
//! created fresh each time to avoid holding resources between copies.

use anyhow::{Context, Result};

/// Copy text to the system clipboard
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text.to_string())
        .context("Failed to set clipboard text")?;
    Ok(())
}
