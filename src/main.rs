use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::process::ExitCode;

use stargazer::StargazerError;
use stargazer::commands::{
    cmd_browse, cmd_browse_starred, cmd_config_get, cmd_config_set, cmd_config_show,
};

#[derive(Parser)]
#[command(name = "stargazer")]
#[command(about = "Interactive terminal browser for GitHub repositories")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse an account's repositories
    #[command(visible_alias = "b")]
    Browse {
        /// Account to browse (defaults to the authenticated user)
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Browse only starred repositories
    Starred {
        /// Account whose starred repositories to browse (defaults to the authenticated user)
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (github.token, default.user)
        key: String,
        /// Value to set
        value: String,
    },
    /// Get a configuration value
    Get {
        /// Configuration key (github.token, default.user)
        key: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Browse { user } => cmd_browse(user.as_deref()),
        Commands::Starred { user } => cmd_browse_starred(user.as_deref()),
        Commands::Config { action } => match action {
            ConfigAction::Show => cmd_config_show(),
            ConfigAction::Set { key, value } => cmd_config_set(&key, &value),
            ConfigAction::Get { key } => cmd_config_get(&key),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            if matches!(e, StargazerError::Auth(_)) {
                eprintln!();
                eprintln!("{}", "To authenticate:".yellow());
                eprintln!("  1. Set the GITHUB_TOKEN environment variable");
                eprintln!("  2. Or run: gh auth login");
            }
            ExitCode::FAILURE
        }
    }
}
