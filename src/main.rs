use clap::Parser;
use colored::*;
use hashbench::run_benchmark;
use hashbench::ui::cli::CliArgs;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = CliArgs::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hashbench=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run_benchmark(args).await {
        eprintln!("{} {}", "❌ Fatal error:".bold().red(), e);
        std::process::exit(1);
    }
}
