use clap::{Parser, Subcommand};
use taskrank_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "taskrank", version, about = "Rank tasks by urgency, importance, effort and dependencies")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score and rank a batch of tasks
    Analyze(commands::analyze::AnalyzeArgs),
    /// Suggest the top tasks from the stored task set
    Suggest(commands::suggest::SuggestArgs),
    /// Stored task set management
    Store {
        #[command(subcommand)]
        action: commands::store::StoreAction,
    },
    /// Scoring strategies
    Strategy {
        #[command(subcommand)]
        action: commands::strategy::StrategyAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_tracing(&config);

    let result = match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args, &config),
        Commands::Suggest(args) => commands::suggest::run(args, &config),
        Commands::Store { action } => commands::store::run(action),
        Commands::Strategy { action } => commands::strategy::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
