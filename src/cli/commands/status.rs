//! `passwordy status` — show the configuration and ping the server.

use comfy_table::{ContentArrangement, Table};

use crate::cli::output;
use crate::cli::{connect, load_settings, Cli};
use crate::errors::Result;

/// Execute the `status` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Setting", "Value"]);
    table.add_row(vec!["Server", settings.server_url.as_str()]);
    table.add_row(vec!["API prefix", settings.api_prefix.as_str()]);
    table.add_row(vec!["Timeout".to_string(), format!("{}s", settings.timeout_secs)]);
    table.add_row(vec![
        "Username".to_string(),
        cli.username
            .clone()
            .or_else(|| settings.username.clone())
            .unwrap_or_else(|| "(prompt)".to_string()),
    ]);
    println!("{table}");

    let api = connect(&settings);
    api.health()?;
    output::success(&format!("Server at {} is up", settings.server_url));
    Ok(())
}
