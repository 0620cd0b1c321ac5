use anyhow::Result;
use clap::{Parser, Subcommand};

use fintrack::cli::{
    handle_config_command, handle_import_command, handle_report_command, ConfigCommands,
    ImportCommands, ReportCommands,
};
use fintrack::config::{FinTrackPaths, Settings};
use fintrack::logging::init_tracing;
use fintrack::storage::Storage;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal finance summaries from exported transactions and bills",
    long_about = "fintrack reads snapshots of your transactions and bills and \
                  turns them into monthly, quarterly and yearly summaries, \
                  rolling trends, upcoming-bill lists and budget checks."
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default settings
    Init,

    /// View or change settings
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Import exported records
    #[command(subcommand)]
    Import(ImportCommands),

    #[command(flatten)]
    Report(ReportCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = FinTrackPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    tracing::debug!(base_dir = %paths.base_dir().display(), "resolved paths");

    match cli.command {
        Some(Commands::Init) => {
            let storage = Storage::new(paths.clone())?;
            if paths.is_initialized() {
                println!("fintrack is already initialized at: {}", paths.base_dir().display());
            } else {
                settings.save(&paths)?;
                println!("Initialized fintrack at: {}", paths.base_dir().display());
            }
            println!();
            println!("Next, import your data:");
            println!("  fintrack import transactions <FILE>");
            println!("  fintrack import bills <FILE>");
            println!("Data directory: {}", storage.paths().data_dir().display());
        }
        Some(Commands::Config(cmd)) => {
            handle_config_command(&paths, &mut settings, cmd)?;
        }
        Some(Commands::Import(cmd)) => {
            let storage = Storage::new(paths)?;
            handle_import_command(&storage, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            let storage = Storage::new(paths)?;
            let today = chrono::Local::now().date_naive();
            handle_report_command(&storage, &settings, cmd, today)?;
        }
        None => {
            println!("fintrack - personal finance summaries");
            println!();
            println!("Run 'fintrack --help' for usage information.");
        }
    }

    Ok(())
}
