//! ngsictl - main entry point

use clap::Parser;
use log::{debug, info};

use ngsictl::context::run_context_command;
use ngsictl::{
    connect, run_admin_command, run_entities_command, run_query_command,
    run_registrations_command, run_version_command, Cli, Command, ListResource, Result,
};

async fn run(cli: &Cli) -> Result<()> {
    // Context management never talks to a broker
    if let Command::Config { action } = &cli.command {
        return run_context_command(action);
    }

    let mut client = connect(cli)?;
    info!(
        "Using {} broker at {}",
        client.dialect_kind(),
        client.base_url()
    );

    match &cli.command {
        Command::List { resource } => match resource {
            ListResource::Entities(args) => {
                run_entities_command(&mut client, args, cli.batch).await
            }
            ListResource::Registrations(args) => {
                run_registrations_command(&mut client, args, cli.batch).await
            }
        },
        Command::Query(args) => run_query_command(&mut client, args, cli.batch).await,
        Command::Admin { resource } => run_admin_command(&client, resource).await,
        Command::Version(args) => run_version_command(&client, args).await,
        Command::Config { action } => run_context_command(action),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    debug!("Starting ngsictl v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
