mod cli;
mod input;
mod lookup;
mod report;
mod semrush;

pub const USER_AGENT: &str = concat!("kwvol/", env!("CARGO_PKG_VERSION"));

use std::process::ExitCode;

use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kwvol=info".parse()?),
        )
        .init();

    let args = cli::Args::parse();

    match cli::run(&args).await {
        Ok(summary) => {
            info!(
                keywords = summary.keywords,
                rows = summary.rows,
                failed = summary.failed,
                "done"
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("error: {e}");
            Ok(ExitCode::from(e.exit_status()))
        }
    }
}
