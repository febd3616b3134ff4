// CLI module - command-line argument parsing and handlers
//
// Subcommands cover everything that happens outside the dashboard TUI:
// - login: sign in and store credentials
// - logout: clear stored credentials
// - verify: email verification with a mailed token
// - config --show/--reset/--edit/--path: configuration management

use crate::api::ApiClient;
use crate::config::{Config, VERSION};
use crate::session::store::SessionStore;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use std::io::Write;
use std::process::Command;

/// Reqlytics - terminal dashboard for API usage analytics
#[derive(Parser)]
#[command(name = "reqlytics")]
#[command(version = VERSION)]
#[command(about = "Terminal dashboard for Reqlytics API analytics", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store credentials for the dashboard
    Login {
        /// Email address (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },

    /// Clear stored credentials and the plan cache
    Logout,

    /// Verify an email address with the token from the verification mail
    Verify {
        /// Verification token
        token: String,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Handle CLI subcommands. Returns true if a command was handled (exit after).
pub async fn handle_cli(config: &Config) -> Result<bool> {
    let cli = Cli::parse();

    match cli.command {
        None => Ok(false),
        Some(Commands::Login { email }) => {
            handle_login(config, email).await?;
            Ok(true)
        }
        Some(Commands::Logout) => {
            handle_logout()?;
            Ok(true)
        }
        Some(Commands::Verify { token }) => {
            handle_verify(config, &token).await;
            Ok(true)
        }
        Some(Commands::Config {
            show,
            reset,
            edit,
            path,
        }) => {
            handle_config(config, show, reset, edit, path)?;
            Ok(true)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth commands
// ─────────────────────────────────────────────────────────────────────────────

async fn handle_login(config: &Config, email: Option<String>) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => prompt_line("Email: ")?,
    };
    let email = email.trim().to_string();
    let password = prompt_password("Password: ")?;

    if email.is_empty() || password.is_empty() {
        bail!("Please fill in all fields");
    }

    let api = ApiClient::new(config.base_url.clone());
    match api.login(&email, &password).await {
        Ok(credentials) => {
            let store = SessionStore::default_location()?;
            store.save_credentials(&credentials.token, &credentials.api_key, Some(&email))?;
            println!("Login successful. Run `reqlytics` to open the dashboard.");
            Ok(())
        }
        Err(e) => {
            eprintln!("Login failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn handle_logout() -> Result<()> {
    let store = SessionStore::default_location()?;
    store.clear()?;
    println!("You have been logged out successfully.");
    Ok(())
}

async fn handle_verify(config: &Config, token: &str) {
    let api = ApiClient::new(config.base_url.clone());
    match api.verify_email(token).await {
        Ok(()) => println!("Your email has been verified successfully! You can now log in."),
        Err(e) => {
            eprintln!("Verification failed: {}", e);
            std::process::exit(1);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Config command
// ─────────────────────────────────────────────────────────────────────────────

fn handle_config(config: &Config, show: bool, reset: bool, edit: bool, path: bool) -> Result<()> {
    if path {
        match Config::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine config path"),
        }
    } else if show {
        print!("{}", config.to_toml());
    } else if reset {
        let path = Config::config_path().context("Could not determine config path")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, Config::default().to_toml())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Config reset to defaults: {}", path.display());
    } else if edit {
        let path = Config::config_path().context("Could not determine config path")?;
        Config::ensure_config_exists();
        let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
        let status = Command::new(&editor)
            .arg(&path)
            .status()
            .with_context(|| format!("Failed to launch editor `{}`", editor))?;
        if !status.success() {
            bail!("Editor exited with an error");
        }
    } else {
        println!("Usage: reqlytics config [--show|--reset|--edit|--path]");
    }

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Prompts
// ─────────────────────────────────────────────────────────────────────────────

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read input")?;
    Ok(line.trim_end().to_string())
}

/// Read a password without echoing, using raw-mode key events
fn prompt_password(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    std::io::stdout().flush()?;

    crossterm::terminal::enable_raw_mode().context("Failed to enable raw mode")?;
    let mut password = String::new();
    let outcome = loop {
        match crossterm::event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Enter => break Ok(password),
                KeyCode::Backspace => {
                    password.pop();
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    break Err(anyhow::anyhow!("Login cancelled"));
                }
                KeyCode::Char(c) => password.push(c),
                _ => {}
            },
            Ok(_) => {}
            Err(e) => break Err(e.into()),
        }
    };
    crossterm::terminal::disable_raw_mode().context("Failed to disable raw mode")?;
    println!();

    outcome
}
