use clap::Parser;
use credvault::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Init => credvault::cli::commands::init::execute(&cli),
        Commands::Add {
            ref name,
            ref identifier,
        } => credvault::cli::commands::add::execute(&cli, name, identifier),
        Commands::List { archived } => credvault::cli::commands::list::execute(&cli, archived),
        Commands::Update {
            position,
            ref identifier,
            ..
        } => credvault::cli::commands::update::execute(&cli, position, identifier.as_deref()),
        Commands::Delete { position, force } => {
            credvault::cli::commands::delete::execute(&cli, position, force)
        }
        Commands::Copy {
            position,
            archived,
            secret,
        } => credvault::cli::commands::copy::execute(&cli, position, archived, secret),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        credvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Log to stderr.  `RUST_LOG` wins; otherwise warnings only, or debug
/// output for this crate with `--verbose`.
fn init_logging(verbose: bool) {
    let default_directive = if verbose { "credvault=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
