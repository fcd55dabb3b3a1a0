//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod form;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::api::{ApiClient, HttpTransport};
use crate::config::Settings;
use crate::errors::{PasswordyError, Result};
use crate::notify::{Notice, Operation};
use crate::session::SessionManager;

pub use form::ItemFields;

/// Passwordy CLI: terminal client for a Passwordy vault server.
#[derive(Parser)]
#[command(
    name = "passwordy",
    about = "Terminal client for the Passwordy password vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault server URL (default: http://localhost:8000)
    #[arg(long, env = "PASSWORDY_SERVER", global = true)]
    pub server: Option<String>,

    /// Account to log in as
    #[arg(short, long, env = "PASSWORDY_USERNAME", global = true)]
    pub username: Option<String>,

    /// Config file (default: ~/.config/passwordy/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Show debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Log in and show the account the server reports
    Login,

    /// List vault items
    List {
        /// Only items whose account name contains this text
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Add a new item
    Add {
        #[command(flatten)]
        fields: ItemFields,
    },

    /// Edit an item (the password is kept unless --password or --generate)
    Edit {
        /// Item id, list position, or account name
        item: String,

        #[command(flatten)]
        fields: ItemFields,

        /// Prompt for a new password
        #[arg(short, long)]
        password: bool,
    },

    /// Delete an item
    Delete {
        /// Item id, list position, or account name
        item: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Print an item's password
    Reveal {
        /// Item id, list position, or account name
        item: String,
    },

    /// Copy an item's password to the clipboard
    Copy {
        /// Item id, list position, or account name
        item: String,
    },

    /// Generate a random password (no server needed)
    Generate {
        /// Number of characters (default: 16)
        #[arg(short, long)]
        length: Option<usize>,
    },

    /// Interactive session (stays logged in until you quit)
    Shell,

    /// Check that the server is reachable and show the configuration
    Status,

    /// Manage stored credentials
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Auth subcommands.
#[derive(clap::Subcommand)]
pub enum AuthAction {
    /// Save the account password to the OS keyring (auto-login)
    Keyring {
        /// Remove the password from the keyring instead of saving
        #[arg(long)]
        delete: bool,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load settings from `--config` (or the default location) and apply
/// the `--server` override.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let settings = match &cli.config {
        Some(path) => Settings::load_file(&PathBuf::from(path))?,
        None => match Settings::default_dir() {
            Some(dir) => Settings::load(&dir)?,
            None => Settings::default(),
        },
    };

    match &cli.server {
        Some(url) => settings.with_server_url(url),
        None => Ok(settings),
    }
}

/// Build an API client for the configured server.
pub fn connect(settings: &Settings) -> ApiClient<HttpTransport> {
    let transport = HttpTransport::new(&settings.server_url, settings.timeout());
    ApiClient::new(transport, &settings.api_prefix)
}

/// Get the username, trying in order:
/// 1. `--username` / `PASSWORDY_USERNAME`
/// 2. `username` in the config file
/// 3. Interactive prompt
pub fn resolve_username(cli: &Cli, settings: &Settings) -> Result<String> {
    if let Some(name) = cli.username.as_ref().or(settings.username.as_ref()) {
        if !name.trim().is_empty() {
            return Ok(name.trim().to_string());
        }
    }

    dialoguer::Input::<String>::new()
        .with_prompt("Username")
        .interact_text()
        .map_err(|e| PasswordyError::CommandFailed(format!("username prompt: {e}")))
}

/// Get the account password, trying in order:
/// 1. `PASSWORDY_PASSWORD` env var (scripts/CI)
/// 2. OS keyring (if compiled with `keyring-store` feature)
/// 3. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password(
    server_url: &str,
    username: &str,
    use_keyring: bool,
) -> Result<Zeroizing<String>> {
    // 1. Check the environment variable first.
    if let Ok(pw) = std::env::var("PASSWORDY_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    // 2. Try the OS keyring (if feature enabled).
    #[cfg(feature = "keyring-store")]
    if use_keyring {
        match crate::keyring::get_password(server_url, username) {
            Ok(Some(pw)) => return Ok(Zeroizing::new(pw)),
            Ok(None) => {}
            Err(e) => tracing::debug!(error = %e, "keyring unavailable"),
        }
    }

    #[cfg(not(feature = "keyring-store"))]
    let _ = (server_url, use_keyring);

    // 3. Fall back to interactive prompt.
    let pw = dialoguer::Password::new()
        .with_prompt(format!("Password for {username}"))
        .interact()
        .map_err(|e| PasswordyError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Log in with the resolved credentials and return the confirmed session.
///
/// A failed login is reported with the same message the login form
/// would show, rather than the raw server error.
pub fn sign_in(
    cli: &Cli,
    settings: &Settings,
    api: &ApiClient<HttpTransport>,
) -> Result<SessionManager> {
    let username = resolve_username(cli, settings)?;
    let password = prompt_password(&settings.server_url, &username, true)?;

    let mut session = SessionManager::new();
    if let Err(e) = session.login(api, &username, &password) {
        tracing::debug!(error = %e, "login rejected");
        let notice = Notice::for_failure(Operation::Login, &e);
        return Err(PasswordyError::CommandFailed(notice.message().to_string()));
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_flag_overrides_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "server_url = \"http://config-host:8000\"\n").unwrap();

        let cli = Cli::parse_from([
            "passwordy",
            "--config",
            config.to_str().unwrap(),
            "--server",
            "https://flag-host/",
            "status",
        ]);
        let settings = load_settings(&cli).unwrap();
        assert_eq!(settings.server_url, "https://flag-host");
    }

    #[test]
    fn config_file_used_without_flag() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "server_url = \"http://config-host:8000\"\n").unwrap();

        let mut cli =
            Cli::try_parse_from(["passwordy", "--config", config.to_str().unwrap(), "status"])
                .unwrap();
        // PASSWORDY_SERVER may be set in the test environment.
        cli.server = None;
        let settings = load_settings(&cli).unwrap();
        assert_eq!(settings.server_url, "http://config-host:8000");
    }

    #[test]
    fn username_flag_beats_config() {
        let cli = Cli::parse_from(["passwordy", "--username", "alice", "login"]);
        let settings = Settings {
            username: Some("bob".into()),
            ..Settings::default()
        };
        assert_eq!(resolve_username(&cli, &settings).unwrap(), "alice");
    }

    #[test]
    fn username_from_config_when_flag_absent() {
        let mut cli = Cli::parse_from(["passwordy", "login"]);
        cli.username = None;
        let settings = Settings {
            username: Some("bob".into()),
            ..Settings::default()
        };
        assert_eq!(resolve_username(&cli, &settings).unwrap(), "bob");
    }

    #[test]
    fn edit_parses_flags() {
        let cli = Cli::parse_from([
            "passwordy", "edit", "GitHub", "--account", "GitHub (work)", "--password",
        ]);
        match cli.command {
            Commands::Edit {
                item,
                fields,
                password,
            } => {
                assert_eq!(item, "GitHub");
                assert_eq!(fields.account.as_deref(), Some("GitHub (work)"));
                assert!(password);
                assert!(!fields.generate);
            }
            _ => panic!("expected edit"),
        }
    }
}
