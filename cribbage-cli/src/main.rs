mod discard;
mod score;
mod stats;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None, propagate_version = true)]
struct Cli {
    /// Log progress to stderr (-v for debug, -vv for trace). Without it,
    /// RUST_LOG is honoured.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: CliCommands,
}

#[derive(Debug, Subcommand)]
enum CliCommands {
    /// Score four held cards with a starter
    Score(score::ScoreArgs),
    /// Average score of every possible discard from a 5 or 6 card deal
    Discard(discard::DiscardArgs),
    /// Deal a random hand and show what to discard
    Deal(discard::DealArgs),
    /// Generate statistics
    Stats {
        #[command(subcommand)]
        command: stats::CliCommands,
    },
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        CliCommands::Score(args) => score::run(args),
        CliCommands::Discard(args) => discard::run_discard(args),
        CliCommands::Deal(args) => discard::run_deal(args),
        CliCommands::Stats { command } => stats::run(command),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_test() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_score_test() {
        let cli = Cli::try_parse_from(["cribbage", "score", "5H", "5S", "5c", "jd", "--starter", "5D"])
            .unwrap();
        assert!(matches!(cli.command, CliCommands::Score(_)));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parse_rejects_bad_cards_test() {
        assert!(Cli::try_parse_from(["cribbage", "discard", "5H", "5S", "5C", "JD", "ZZ"]).is_err());
        assert!(Cli::try_parse_from(["cribbage", "score", "5H", "5S", "5C", "JD"]).is_err());
    }

    #[test]
    fn parse_deal_test() {
        assert!(Cli::try_parse_from(["cribbage", "-vv", "deal", "--players", "3", "--seed", "4"]).is_ok());
        assert!(Cli::try_parse_from(["cribbage", "deal", "--players", "5"]).is_err());
    }
}
