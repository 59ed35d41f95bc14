use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "hydrateme", version, about = "HydrateMe water intake tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or replace your profile and daily goal
    Onboard(commands::onboard::OnboardArgs),
    /// Log a drink
    Add(commands::intake::AddArgs),
    /// Tap one of the eight glasses (logs goal / 8)
    Glass {
        /// Glass index, 0-7
        index: usize,
    },
    /// Print today's progress as JSON
    Status,
    /// Print the trailing seven days as JSON
    Week,
    /// List all badges and which are unlocked
    Badges,
    /// Show or override the daily goal
    Goal {
        /// New goal in millilitres
        ml: Option<u32>,
    },
    /// Theme preference
    Theme {
        #[command(subcommand)]
        action: commands::theme::ThemeAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print a random hydration tip
    Tip,
    /// Forget the stored profile and intake record
    Reset,
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("HYDRATEME_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Onboard(args) => commands::onboard::run(args),
        Commands::Add(args) => commands::intake::add(args),
        Commands::Glass { index } => commands::intake::glass(index),
        Commands::Status => commands::status::status(),
        Commands::Week => commands::status::week(),
        Commands::Badges => commands::status::badges(),
        Commands::Goal { ml } => commands::goal::run(ml),
        Commands::Theme { action } => commands::theme::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Tip => commands::tip::run(),
        Commands::Reset => commands::reset(),
        Commands::Completions { shell } => {
            commands::completions::<Cli>(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
