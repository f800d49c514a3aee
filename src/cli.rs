//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

use market_proportions::OutputFormat;

/// Estimate the current market proportions of assets in a portfolio.
#[derive(Debug, Parser)]
#[command(name = "market_proportions")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a YAML file describing the portfolio
    pub portfolio_file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Percent, env = "PROPORTIONS_FORMAT")]
    pub format: OutputFormat,

    /// Read prices from a YAML price book instead of Yahoo Finance
    #[arg(short, long, env = "PROPORTIONS_PRICES")]
    pub prices: Option<PathBuf>,

    /// Number of assets to look up at once
    #[arg(short, long, default_value_t = 1, env = "PROPORTIONS_JOBS",
          value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: u16,

    /// Log every price lookup to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["market_proportions", "portfolio.yaml"]).unwrap();
        assert_eq!(cli.portfolio_file, PathBuf::from("portfolio.yaml"));
        assert_eq!(cli.jobs, 1);
        assert!(cli.prices.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_zero_jobs_rejected() {
        assert!(Cli::try_parse_from(["market_proportions", "p.yaml", "--jobs", "0"]).is_err());
    }

    #[test]
    fn test_portfolio_file_required() {
        assert!(Cli::try_parse_from(["market_proportions"]).is_err());
    }
}
