use clap::Parser;
use passwordy::cli::{AuthAction, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Login => passwordy::cli::commands::login::execute(&cli),
        Commands::List { ref query } => {
            passwordy::cli::commands::list::execute(&cli, query.as_deref())
        }
        Commands::Add { ref fields } => passwordy::cli::commands::add::execute(&cli, fields),
        Commands::Edit {
            ref item,
            ref fields,
            password,
        } => passwordy::cli::commands::edit::execute(&cli, item, fields, password),
        Commands::Delete { ref item, force } => {
            passwordy::cli::commands::delete::execute(&cli, item, force)
        }
        Commands::Reveal { ref item } => passwordy::cli::commands::reveal::execute(&cli, item),
        Commands::Copy { ref item } => passwordy::cli::commands::copy::execute(&cli, item),
        Commands::Generate { length } => passwordy::cli::commands::generate::execute(&cli, length),
        Commands::Shell => passwordy::cli::commands::shell::execute(&cli),
        Commands::Status => passwordy::cli::commands::status::execute(&cli),
        Commands::Auth { ref action } => match action {
            AuthAction::Keyring { delete } => {
                passwordy::cli::commands::auth::execute_keyring(&cli, *delete)
            }
        },
        Commands::Completions { shell } => passwordy::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        passwordy::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Logs go to stderr so they never mix with passwords printed on stdout.
/// `RUST_LOG` overrides the level picked by `--verbose`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("passwordy={level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}
