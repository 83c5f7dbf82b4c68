mod cli;
mod config;
mod error;
mod exec;
mod report;
mod resolve;
mod runner;
mod sink;

use clap::Parser;
use cli::Cli;
use config::Config;
use sink::{ConsoleSink, JsonFileSink, ReportSink};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const EXIT_FAILURE: i32 = 1;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = check(&cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(EXIT_FAILURE);
    }
}

async fn check(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::resolve(cli)?;
    debug!("Config: {:?}", config);

    let sink: Box<dyn ReportSink> = match &cli.output {
        Some(path) => Box::new(JsonFileSink::new(path)?),
        None => Box::new(ConsoleSink),
    };

    let outcome = runner::run(&config, sink.as_ref()).await?;
    debug!("Outcome: {:?}", outcome);
    Ok(())
}
