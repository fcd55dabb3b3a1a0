//! `passwordy shell` — interactive session.
//!
//! One login lasts for the whole shell. The item list, revealed passwords
//! and the clipboard live until the shell exits or the session ends.
//! Failures are reported through `TerminalNotifier` and the loop carries on.

use std::time::Instant;

use console::style;
use dialoguer::Confirm;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::api::{ApiClient, HttpTransport};
use crate::cli::form::{prompt_fields, prompt_password_change};
use crate::cli::output::{self, TerminalNotifier};
use crate::cli::{connect, load_settings, prompt_password, resolve_username, Cli};
use crate::clipboard::SystemClipboard;
use crate::config::Settings;
use crate::errors::{PasswordyError, Result};
use crate::generator::generate_password_with_len;
use crate::notify::{Notifier, Operation};
use crate::session::{ExpiryWatch, SessionManager};
use crate::vault::{copy_secret, Modal, Visibility, Workspace};

const HELP: &[(&str, &str)] = &[
    ("list, ls", "refresh and show items"),
    ("search [TEXT]", "filter by account name (no text clears)"),
    ("reveal ITEM", "show or hide a password"),
    ("copy ITEM", "copy a password to the clipboard"),
    ("add", "create an item"),
    ("edit ITEM", "edit an item"),
    ("generate", "fill the open draft with a random password, or print one"),
    ("save", "retry saving the open draft"),
    ("cancel", "discard the open draft"),
    ("delete ITEM", "delete an item"),
    ("whoami", "show the logged-in account"),
    ("login, logout", "start or end the session"),
    ("quit, exit", "leave the shell"),
];

/// Execute the `shell` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli)?;

    let expiry = ExpiryWatch::new();
    let api = connect(&settings).with_unauthorized_hook(expiry.hook());

    let mut rl = DefaultEditor::new()
        .map_err(|e| PasswordyError::CommandFailed(format!("failed to initialize readline: {e}")))?;

    let mut shell = Shell::new(cli, settings, api, expiry);

    println!("{}", style("passwordy shell").bold().green());
    println!("Connected to {}", shell.settings.server_url);
    println!("Type {} for commands, {} to exit.\n", style("help").yellow(), style("quit").yellow());

    shell.start();

    loop {
        match rl.readline(&shell.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let (command, arg) = match trimmed.split_once(char::is_whitespace) {
                    Some((c, a)) => (c, a.trim()),
                    None => (trimmed, ""),
                };
                if matches!(command, "quit" | "exit") {
                    break;
                }

                if let Err(e) = shell.dispatch(command, arg) {
                    output::error(&e.to_string());
                }
                shell.after_command();
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                output::error(&format!("readline: {e}"));
                break;
            }
        }
    }

    if shell.session.is_authenticated() {
        shell.logout();
    }
    Ok(())
}

struct Shell<'a> {
    cli: &'a Cli,
    settings: Settings,
    api: ApiClient<HttpTransport>,
    session: SessionManager,
    vault: Workspace,
    clipboard: Option<SystemClipboard>,
    expiry: ExpiryWatch,
    notifier: TerminalNotifier,
}

impl<'a> Shell<'a> {
    fn new(
        cli: &'a Cli,
        settings: Settings,
        api: ApiClient<HttpTransport>,
        expiry: ExpiryWatch,
    ) -> Self {
        let vault = Workspace::new(settings.copied_window());
        Self {
            cli,
            settings,
            api,
            session: SessionManager::new(),
            vault,
            clipboard: None,
            expiry,
            notifier: TerminalNotifier,
        }
    }

    fn prompt(&self) -> String {
        match self.session.user() {
            Some(user) => format!("{}> ", style(&user.username).green()),
            None => format!("{}> ", style("logged out").dim()),
        }
    }

    /// Resume an existing session if the server knows us, otherwise log in.
    fn start(&mut self) {
        self.session.check(&self.api);
        self.expiry.clear();
        if !self.session.is_authenticated() {
            self.login();
        }
        if self.session.is_authenticated() {
            self.refresh();
        }
    }

    fn dispatch(&mut self, command: &str, arg: &str) -> Result<()> {
        match command {
            "help" | "?" => {
                for (usage, about) in HELP {
                    println!("  {:<16} {}", style(usage).cyan(), about);
                }
                return Ok(());
            }
            "login" => {
                self.login();
                if self.session.is_authenticated() {
                    self.refresh();
                }
                return Ok(());
            }
            "generate" | "gen" if !matches!(self.vault.list.modal(), Modal::Editing(_)) => {
                let password = generate_password_with_len(self.settings.password_length);
                println!("{}", password.as_str());
                return Ok(());
            }
            _ => {}
        }

        if !self.session.is_authenticated() {
            output::warning("Not logged in. Run `login` first.");
            return Ok(());
        }

        match command {
            "list" | "ls" => self.refresh(),
            "search" => {
                self.vault.list.set_query(&self.api, arg);
                self.show();
            }
            "reveal" => self.reveal(arg)?,
            "copy" => self.copy(arg)?,
            "add" => {
                self.vault.list.open_create();
                if let Some(draft) = self.vault.list.draft_mut() {
                    prompt_fields(draft)?;
                    let password = dialoguer::Password::new()
                        .with_prompt("Password (leave blank, then `generate`, for a random one)")
                        .allow_empty_password(true)
                        .interact()
                        .map_err(|e| {
                            PasswordyError::CommandFailed(format!("password prompt: {e}"))
                        })?;
                    if password.is_empty() {
                        output::tip("Draft kept. Run `generate` then `save`, or `cancel`.");
                        return Ok(());
                    }
                    draft.set_password(&password);
                }
                self.save();
            }
            "edit" => {
                let id = self.vault.list.resolve(arg)?.id;
                self.vault.list.open_edit(id)?;
                if let Some(draft) = self.vault.list.draft_mut() {
                    prompt_fields(draft)?;
                    prompt_password_change(draft)?;
                }
                self.save();
            }
            "generate" | "gen" => {
                if let Some(draft) = self.vault.list.draft_mut() {
                    draft.generate_password(self.settings.password_length);
                    output::info("Generated a password for the open draft. Run `save` to keep it.");
                }
            }
            "save" => self.save(),
            "cancel" => {
                self.vault.list.cancel();
                output::info("Cancelled.");
            }
            "delete" | "rm" => self.delete(arg)?,
            "whoami" => {
                if let Some(user) = self.session.user() {
                    output::print_user(user);
                }
            }
            "logout" => self.logout(),
            other => {
                output::warning(&format!("Unknown command '{other}'. Type `help`."));
            }
        }
        Ok(())
    }

    /// Notice a session the server dropped behind our back.
    fn after_command(&mut self) {
        if self
            .vault
            .drop_if_expired(&self.api, &mut self.session, &self.expiry)
        {
            output::warning("Session expired. Run `login` to continue.");
        }
    }

    fn login(&mut self) {
        let outcome = resolve_username(self.cli, &self.settings).and_then(|username| {
            let password = prompt_password(&self.settings.server_url, &username, true)?;
            self.session
                .login(&self.api, &username, &password)
                .map(|user| user.username.clone())
        });
        self.expiry.clear();

        match outcome {
            Ok(username) => output::success(&format!("Logged in as {username}")),
            Err(e) => {
                tracing::debug!(error = %e, "login failed");
                self.notifier.failure(Operation::Login, &e);
            }
        }
    }

    fn logout(&mut self) {
        if let Err(e) = self.session.logout(&self.api) {
            self.notifier.failure(Operation::Logout, &e);
        }
        self.expiry.clear();
        self.vault.clear();
        output::info("Logged out.");
    }

    fn refresh(&mut self) {
        self.vault.list.refresh(&self.api);
        self.show();
    }

    fn show(&self) {
        if self.vault.list.is_loading() {
            output::warning("Items could not be loaded. Try `list` again.");
            return;
        }
        let vault = &self.vault;
        let now = Instant::now();
        output::print_items_table(vault.list.items(), &vault.reveals, &vault.copies, now);
    }

    fn reveal(&mut self, needle: &str) -> Result<()> {
        let item = self.vault.list.resolve(needle)?;
        let (id, name) = (item.id, item.account_name.clone());

        match self.vault.reveals.toggle(&self.api, id) {
            Ok(Visibility::Revealed) => {
                output::info(&format!("{name}: {}", self.vault.reveals.display(id)));
            }
            Ok(Visibility::Masked) => output::info(&format!("{name}: hidden")),
            Err(e) => {
                tracing::debug!(error = %e, %id, "reveal failed");
                self.notifier.failure(Operation::Reveal, &e);
            }
        }
        Ok(())
    }

    fn copy(&mut self, needle: &str) -> Result<()> {
        let item = self.vault.list.resolve(needle)?;
        let (id, name) = (item.id, item.account_name.clone());

        if self.clipboard.is_none() {
            match SystemClipboard::new() {
                Ok(clipboard) => self.clipboard = Some(clipboard),
                Err(e) => {
                    tracing::debug!(error = %e, "clipboard unavailable");
                    self.notifier.failure(Operation::Copy, &e);
                    return Ok(());
                }
            }
        }
        let Some(clipboard) = self.clipboard.as_mut() else {
            return Ok(());
        };

        let now = Instant::now();
        let vault = &mut self.vault;
        match copy_secret(&self.api, &vault.reveals, &mut vault.copies, clipboard, id, now) {
            Ok(()) => {
                output::success(&format!("Copied password for '{name}'"));
                self.show();
            }
            Err(e) => {
                tracing::debug!(error = %e, %id, "copy failed");
                self.notifier.failure(Operation::Copy, &e);
            }
        }
        Ok(())
    }

    /// Submit the open draft. On failure the draft stays open for `save`.
    fn save(&mut self) {
        match self.vault.list.submit(&self.api) {
            Ok(saved) => {
                output::success(&format!("Saved '{}'", saved.account_name));
                self.show();
            }
            Err(e @ PasswordyError::InvalidDraft(_)) => {
                output::error(&e.to_string());
                output::tip("Fix it with `edit`, `generate` then `save`, or `cancel`.");
            }
            Err(e) => {
                tracing::debug!(error = %e, "save failed");
                self.notifier.failure(Operation::Save, &e);
                output::tip("The draft is still open: `save` to retry or `cancel`.");
            }
        }
    }

    fn delete(&mut self, needle: &str) -> Result<()> {
        let id = self.vault.list.resolve(needle)?.id;
        let name = self.vault.list.open_delete(id)?.account_name.clone();

        let confirmed = Confirm::new()
            .with_prompt(format!("Are you sure you want to delete '{name}'?"))
            .default(false)
            .interact()
            .map_err(|e| PasswordyError::CommandFailed(format!("confirm prompt: {e}")))?;
        if !confirmed {
            self.vault.list.cancel();
            output::info("Cancelled.");
            return Ok(());
        }

        match self.vault.delete(&self.api) {
            Ok(_) => {
                output::success(&format!("Deleted '{name}'"));
                self.show();
            }
            Err(e) => {
                tracing::debug!(error = %e, %id, "delete failed");
                self.vault.list.cancel();
                self.notifier.failure(Operation::Delete, &e);
            }
        }
        Ok(())
    }
}
