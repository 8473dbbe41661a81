use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

mod commands;

use commands::{add, checkout, commit, config, diff, log, status};

#[derive(Parser)]
#[command(name = "svcs")]
#[command(version, about = "A minimal snapshot version control system", long_about = None)]
struct Cli {
    /// Directory holding the repository state (defaults to <work-dir>/vcs)
    #[arg(long, global = true, env = "SVCS_DIR")]
    vcs_dir: Option<PathBuf>,

    /// Working directory whose files are tracked
    #[arg(long, global = true, env = "SVCS_WORK_DIR", default_value = ".")]
    work_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get and set a username
    Config {
        /// New username (prints the current one when omitted)
        name: Option<String>,
    },

    /// Add a file to the index
    Add {
        /// File to track (lists tracked files when omitted)
        file: Option<String>,
    },

    /// Save changes
    Commit {
        /// Commit message
        message: Option<String>,
    },

    /// Show commit logs
    Log {
        /// Number of commits to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Restore files from a commit
    Checkout {
        /// Commit id or unique prefix
        commit_id: Option<String>,
    },

    /// Show which tracked files changed since the last commit
    Status,

    /// Show line changes since the last commit
    Diff {
        /// Lines of context around each change
        #[arg(short = 'U', long, default_value = "3")]
        context: usize,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let repo = commands::open_repository(cli.vcs_dir, cli.work_dir)?;

    match cli.command {
        Commands::Config { name } => {
            config::run(&repo, name)?;
        }
        Commands::Add { file } => {
            add::run(&repo, file)?;
        }
        Commands::Commit { message } => {
            commit::run(&repo, message)?;
        }
        Commands::Log { limit, json } => {
            log::run(&repo, limit, json)?;
        }
        Commands::Checkout { commit_id } => {
            checkout::run(&repo, commit_id)?;
        }
        Commands::Status => {
            status::run(&repo)?;
        }
        Commands::Diff { context } => {
            diff::run(&repo, context)?;
        }
    }

    Ok(())
}
