//! CrashCue - CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crashcue::cli::{Cli, Commands, ConfigCommands, IgnoreCommands};

/// Environment variable holding the log filter
const LOG_ENV: &str = "CRASHCUE_LOG";

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| EnvFilter::new(default_level.to_string())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match dispatch(cli.command) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Run a command and return the process exit code.
fn dispatch(command: Commands) -> Result<i32> {
    match command {
        Commands::Run { command } => return commands::run::handle(&command),
        Commands::Doctor { json } => return commands::doctor::handle(json),
        Commands::Test => commands::sound::handle_test()?,
        Commands::Mute => commands::sound::handle_mute(true)?,
        Commands::Unmute => commands::sound::handle_mute(false)?,
        Commands::Install { flavor } => commands::install::handle_install(flavor)?,
        Commands::Uninstall { flavor } => commands::install::handle_uninstall(flavor)?,
        Commands::Status { json } => commands::status::handle(json)?,
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show()?,
            ConfigCommands::SetSound { path } => commands::config::handle_set_sound(&path)?,
            ConfigCommands::GetSound => commands::config::handle_get_sound()?,
            ConfigCommands::Reset => commands::config::handle_reset()?,
            ConfigCommands::Ignore(cmd) => match cmd {
                IgnoreCommands::Add { command } => commands::config::handle_ignore_add(&command)?,
                IgnoreCommands::Remove { command } => {
                    commands::config::handle_ignore_remove(&command)?
                }
                IgnoreCommands::List => commands::config::handle_ignore_list()?,
            },
        },
        Commands::Completions { shell } => commands::completions::handle::<Cli>(shell)?,
    }
    Ok(0)
}
