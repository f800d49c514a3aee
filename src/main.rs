use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use market_proportions::{render, Estimator, Portfolio, PriceBook, ProportionError, YahooProvider};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli).await {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            let code = err
                .downcast_ref::<ProportionError>()
                .map_or(1, ProportionError::exit_code);
            ExitCode::from(code)
        }
    }
}

async fn run(cli: &Cli) -> Result<String> {
    let portfolio = Portfolio::from_path(&cli.portfolio_file)?;

    let estimator = match &cli.prices {
        Some(path) => Estimator::from_source(Arc::new(PriceBook::from_path(path)?)),
        None => Estimator::from_source(Arc::new(YahooProvider::new())),
    }
    .jobs(cli.jobs.into());

    let start_time = std::time::Instant::now();
    let proportions = estimator.market_proportions(&portfolio).await?;
    tracing::debug!(elapsed = ?start_time.elapsed(), "computed proportions");

    render(&proportions, cli.format)
}

// Logs go to stderr so stdout only carries the proportions.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "market_proportions=debug"
    } else {
        "market_proportions=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
