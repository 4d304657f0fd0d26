use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use linklabel::app::AppContext;
use linklabel::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Commands::Fallback { url } = &cli.command {
        commands::fallback(url)?;
        return Ok(());
    }

    let ctx = AppContext::new(cli.config, cli.workers)?;

    match cli.command {
        Commands::Resolve {
            urls,
            json,
            explain,
            deadline_secs,
        } => {
            commands::resolve_urls(&ctx, urls, json, explain, deadline_secs).await?;
        }
        Commands::Extract { path } => {
            commands::extract_file(&ctx, &path)?;
        }
        Commands::Config => {
            commands::show_config(&ctx)?;
        }
        Commands::Fallback { .. } => {}
    }

    Ok(())
}
