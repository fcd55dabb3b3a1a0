//! `passwordy completions` — print a completion script for a shell.
//!
//! The script covers every subcommand and flag, including the `auth`
//! subcommands and `--config`, so it has to be regenerated after
//! upgrading:
//!
//!   passwordy completions bash > ~/.local/share/bash-completion/completions/passwordy
//!   passwordy completions zsh > "${fpath[1]}/_passwordy"

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;
use crate::errors::{PasswordyError, Result};

const BIN_NAME: &str = "passwordy";

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    let mut out = io::stdout().lock();
    write_completions(shell, &mut out)?;
    out.flush()
        .map_err(|e| PasswordyError::CommandFailed(format!("writing completions: {e}")))
}

/// Write the completion script for `shell` to `out`.
pub fn write_completions(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    tracing::debug!(%shell, "generating completions");
    clap_complete::generate(shell, &mut cmd, BIN_NAME, out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(shell: Shell) -> String {
        let mut buf = Vec::new();
        write_completions(shell, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn bash_script_knows_subcommands() {
        let bash = script(Shell::Bash);
        assert!(bash.contains("_passwordy"));
        for sub in ["login", "reveal", "copy", "shell", "keyring"] {
            assert!(bash.contains(sub), "missing {sub}");
        }
        assert!(bash.contains("--server"));
    }

    #[test]
    fn every_supported_shell_renders() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            assert!(script(shell).contains(BIN_NAME), "{shell} script is empty");
        }
    }

    #[test]
    fn shell_name_is_parsed_by_clap() {
        use clap::Parser;

        let cli = Cli::try_parse_from(["passwordy", "completions", "fish"]).unwrap();
        assert!(matches!(
            cli.command,
            crate::cli::Commands::Completions { shell: Shell::Fish }
        ));
        assert!(Cli::try_parse_from(["passwordy", "completions", "csh"]).is_err());
    }
}
