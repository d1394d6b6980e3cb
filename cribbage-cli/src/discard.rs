use anyhow::{Context, Result};
use clap::Args;
use itertools::Itertools;
use rand::prelude::*;
use tracing::info;

use cribbage_core::prelude::{
    Card, CardCollection, Deck, DiscardOutcome, ExpectationEngine, Options,
};

#[derive(Debug, Args)]
pub struct EvaluationArgs {
    /// Score the kept cards as the crib, where a flush needs all five cards
    #[arg(long = "crib", default_value = "false")]
    crib: bool,

    /// Run on a single thread (for profiling)
    #[arg(long = "single-threaded", default_value = "false")]
    single_threaded: bool,

    /// List discards from best to worst instead of in the order dealt
    #[arg(long = "sort", default_value = "false")]
    sort: bool,
}

impl EvaluationArgs {
    fn options(&self) -> Options {
        let mut options = Options::empty();
        if self.crib {
            options |= Options::CribHand;
        }
        if self.single_threaded {
            options |= Options::SingleThreaded;
        }
        options
    }
}

#[derive(Debug, Args)]
pub struct DiscardArgs {
    /// The 5 or 6 cards dealt, e.g. `5H 5S 5C JD 2C 9S`
    #[arg(required = true)]
    dealt: Vec<Card>,

    #[command(flatten)]
    evaluation: EvaluationArgs,
}

#[derive(Debug, Args)]
pub struct DealArgs {
    /// Number of players. Two players are dealt 6 cards each, three or four
    /// are dealt 5
    #[arg(short = 'p', long = "players", default_value = "2", value_parser = clap::value_parser!(u8).range(2..=4))]
    players: u8,

    /// Seed the shuffle, for a repeatable deal
    #[arg(long = "seed")]
    seed: Option<u64>,

    #[command(flatten)]
    evaluation: EvaluationArgs,
}

fn print_outcomes(dealt: &CardCollection, outcomes: &[DiscardOutcome], sort: bool) {
    let label = |outcome: &DiscardOutcome| outcome.discard.iter().join(" and ");
    let label_columns = outcomes.iter().map(|o| label(o).len()).max().unwrap_or(0);
    let best = ExpectationEngine::best(outcomes);

    let rows: Vec<&DiscardOutcome> = if sort {
        outcomes
            .iter()
            .sorted_by(|a, b| b.average.total_cmp(&a.average))
            .collect()
    } else {
        outcomes.iter().collect()
    };

    if dealt.len() == 6 {
        println!("Average points for each drop combination:");
    } else {
        println!("Average points for each card dropped:");
    }

    for outcome in rows {
        let marker = if best.is_some_and(|b| b.discard == outcome.discard) {
            "  <- best"
        } else {
            ""
        };
        println!(
            " - {:label_width$} {:>6.2} (min {:>2}, max {:>2}){marker}",
            label(outcome),
            outcome.average,
            outcome.min,
            outcome.max,
            label_width = label_columns
        );
    }
}

fn advise(dealt: &CardCollection, evaluation: &EvaluationArgs) -> Result<()> {
    let outcomes =
        ExpectationEngine::evaluate_discards(dealt, Deck::standard(), evaluation.options())
            .with_context(|| format!("cannot evaluate discards from {dealt}"))?;

    print_outcomes(dealt, &outcomes, evaluation.sort);

    Ok(())
}

pub fn run_discard(args: &DiscardArgs) -> Result<()> {
    let dealt = CardCollection::from(args.dealt.as_slice());
    advise(&dealt, &args.evaluation)
}

pub fn run_deal(args: &DealArgs) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let mut deck = Deck::shuffled(&mut rng);
    let count = if args.players == 2 { 6 } else { 5 };
    let dealt = deck.draw_n(count).context("the deck ran out of cards")?;
    info!(players = args.players, seed = ?args.seed, %dealt, "dealt a hand");

    println!("{count} cards dealt: {dealt}");
    advise(&dealt, &args.evaluation)
}
