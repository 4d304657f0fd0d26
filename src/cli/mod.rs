pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "linklabel")]
#[command(about = "Resolve short display titles for links", long_about = None)]
pub struct Cli {
    /// Path to a config file (default: ~/.config/linklabel/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Number of URLs resolved concurrently (overrides the config file)
    #[arg(short, long, global = true)]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve titles for one or more URLs
    Resolve {
        /// URLs to resolve; a scheme is optional
        #[arg(required = true)]
        urls: Vec<String>,

        /// Print one JSON result per line
        #[arg(long)]
        json: bool,

        /// Show where each title came from
        #[arg(long)]
        explain: bool,

        /// Abandon any single URL after this many seconds
        #[arg(long)]
        deadline_secs: Option<u64>,
    },
    /// Derive a title from the URL alone, without network access
    Fallback {
        /// URL to inspect
        url: String,
    },
    /// Run title extraction on a local HTML file
    Extract {
        /// HTML file, or "-" for stdin
        path: std::path::PathBuf,
    },
    /// Show the config file location and effective settings
    Config,
}
