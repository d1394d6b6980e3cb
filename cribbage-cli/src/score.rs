use anyhow::{Context, Result};
use clap::Args;

use cribbage_core::prelude::{Card, Hand, Options, Scorer};

#[derive(Debug, Args)]
pub struct ScoreArgs {
    /// The four cards held, e.g. `5H 5S 10C JD`
    #[arg(required = true)]
    hand: Vec<Card>,

    /// The starter card turned up from the deck
    #[arg(short, long)]
    starter: Card,

    /// Score as the crib, where a flush needs all five cards
    #[arg(long = "crib", default_value = "false")]
    crib: bool,
}

pub fn run(args: &ScoreArgs) -> Result<()> {
    let hand = Hand::from_slice(&args.hand).context("cannot score these cards")?;
    let options = if args.crib {
        Options::CribHand
    } else {
        Options::empty()
    };

    let breakdown = Scorer::breakdown(&hand, args.starter, options)
        .with_context(|| format!("cannot score {hand} with {}", args.starter))?;

    println!("{hand}, with the {} as the starter:", args.starter);
    for (category, points) in [
        ("Fifteens", breakdown.fifteens),
        ("Pairs", breakdown.pairs),
        ("Runs", breakdown.runs),
        ("Flush", breakdown.flush),
        ("Nobs", breakdown.nobs),
    ] {
        println!(" - {category:<8} {points:>2}");
    }
    println!("Total: {}", breakdown.total());

    Ok(())
}
