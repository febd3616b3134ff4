//! Persisted session store
//!
//! A small TOML file under the user's config directory standing in for the
//! dashboard's persisted key/value storage. Three well-known keys - `token`,
//! `api_key`, `user_plan` - plus the signed-in email used by checkout. No
//! schema versioning; the file is best-effort scratch space, so an unreadable
//! file behaves like an absent one.

use super::plan::Plan;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const SESSION_FILE: &str = "session.toml";

/// Values read from disk at bootstrap
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedSession {
    pub token: Option<String>,
    pub api_key: Option<String>,
    pub user_plan: Option<String>,
    pub user_email: Option<String>,
}

/// File-backed session persistence
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Open (and create if needed) the store directory
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create session directory {:?}", dir))?;
        Ok(Self {
            path: dir.join(SESSION_FILE),
        })
    }

    /// Store under `~/.config/reqlytics/`
    pub fn default_location() -> Result<Self> {
        let home = dirs::home_dir().context("Failed to determine home directory")?;
        Self::open(home.join(".config").join("reqlytics"))
    }

    /// Read the persisted session. Missing or unparseable files read as empty.
    pub fn load(&self) -> PersistedSession {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => return PersistedSession::default(),
        };

        match toml::from_str(&contents) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Ignoring malformed session file {:?}: {}", self.path, e);
                PersistedSession::default()
            }
        }
    }

    /// Persist credentials after a successful login
    pub fn save_credentials(&self, token: &str, api_key: &str, email: Option<&str>) -> Result<()> {
        let mut session = self.load();
        session.token = Some(token.to_string());
        session.api_key = Some(api_key.to_string());
        if let Some(email) = email {
            session.user_email = Some(email.to_string());
        }
        self.write(&session)
    }

    /// Persist the plan cache, leaving credentials untouched
    pub fn save_plan(&self, plan: Plan) -> Result<()> {
        let mut session = self.load();
        session.user_plan = Some(plan.id().to_string());
        self.write(&session)
    }

    /// Remove everything - logout
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove session file {:?}", self.path)),
        }
    }

    fn write(&self, session: &PersistedSession) -> Result<()> {
        let contents = toml::to_string(session).context("Failed to serialize session")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write session file {:?}", self.path))
    }
}
