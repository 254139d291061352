use clap::{Parser, Subcommand};
use hotel_intake::{
    cli::{
        output::{self, OutputPreferences},
        run_cli, CliError, SessionOutcome,
    },
    config::ConfigManager,
    init,
    utils::build_info,
};

/// Collects a hotel's public listing details and prepares a review report.
#[derive(Parser, Debug)]
#[command(name = "hotel_intake_cli", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the intake wizard (default)
    Run,
    /// Show the configuration path and values
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
    /// Show build information
    Version,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Restore the default configuration
    Reset,
}

fn main() {
    init();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let manager = ConfigManager::from_env()?;
    let config = manager.load()?;
    output::set_preferences(OutputPreferences::from_config(&config));

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => match run_cli(&config)? {
            SessionOutcome::Submitted(receipt) => {
                tracing::info!(id = %receipt.id, "Intake session finished");
            }
            SessionOutcome::Cancelled => tracing::info!("Intake session cancelled"),
        },
        Command::Config { action: None } => {
            println!("{}", manager.config_path().display());
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Command::Config {
            action: Some(ConfigAction::Reset),
        } => {
            manager.reset()?;
            output::success(format!(
                "Configuration reset to defaults at {}",
                manager.config_path().display()
            ));
        }
        Command::Version => {
            for (label, value) in build_info::current().lines() {
                println!("{label:<9} {value}");
            }
        }
    }
    Ok(())
}
