use std::cell::RefCell;
use std::collections::HashMap;

use anyhow::{Context, Result};
use clap::Subcommand;
use rand::prelude::*;
use rayon::prelude::*;

use cribbage_core::prelude::{Deck, Options, Scorer};

#[derive(Debug, Subcommand)]
pub enum CliCommands {
    /// Generate the distribution of scores for random hands and starters
    HandStats {
        /// Run on a single thread (for profiling)
        #[arg(long = "single-threaded", default_value = "false")]
        single_threaded: bool,

        /// Perform this many iterations, in tens of thousands
        #[arg(short = 'i', long = "iterations", default_value = "100")]
        iterations: usize,

        /// Score every hand as the crib, where a flush needs all five cards
        #[arg(long = "crib", default_value = "false")]
        crib: bool,
    },
}

/// The highest score a hand and starter can make.
const MAX_SCORE: u32 = 29;

#[derive(Debug)]
struct ScoreStats {
    frequency: f64,
    cumulative: f64,
}

fn count_score(mut map: HashMap<u32, usize>, score: Result<u32>) -> Result<HashMap<u32, usize>> {
    *map.entry(score?).or_insert(0) += 1;
    Ok(map)
}

#[allow(clippy::cast_precision_loss)]
fn generate_score_stats<G>(
    single_threaded: bool,
    iterations: usize,
    deal_and_score: G,
) -> Result<(Vec<(u32, ScoreStats)>, f64)>
where
    G: Fn() -> Result<u32> + std::marker::Sync,
{
    let score_map: HashMap<u32, usize> = if single_threaded {
        (0..iterations)
            .map(|_| deal_and_score())
            .try_fold(HashMap::new(), count_score)?
    } else {
        (0..iterations)
            .into_par_iter()
            .map(|_| deal_and_score())
            .try_fold(HashMap::new, count_score)
            .try_reduce(HashMap::new, |mut left, right| {
                for (score, count) in right {
                    *left.entry(score).or_insert(0) += count;
                }

                Ok(left)
            })?
    };

    let total = score_map.values().sum::<usize>() as f64;
    let mean = score_map
        .iter()
        .map(|(score, count)| f64::from(*score) * (*count as f64))
        .sum::<f64>()
        / total;

    let mut cumulative = 0.0;
    let stats = (0..=MAX_SCORE)
        .map(|score| {
            let count = score_map.get(&score).copied().unwrap_or(0);
            let frequency = (count as f64) / total;
            cumulative += frequency;
            (
                score,
                ScoreStats {
                    frequency,
                    cumulative,
                },
            )
        })
        .collect();

    Ok((stats, mean))
}

fn print_score_stats(stats: &[(u32, ScoreStats)], mean: f64) {
    for (
        score,
        ScoreStats {
            frequency,
            cumulative,
        },
    ) in stats
    {
        println!(
            " - {score:>2} {:>7.3}% (at most {score:>2}: {:>7.3}%)",
            frequency * 100.0,
            cumulative * 100.0,
        );
    }
    println!("Mean score: {mean:.3}");
}

fn hand_stats(single_threaded: bool, iterations: usize, options: Options) -> Result<()> {
    thread_local! {
        static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_entropy());
    }

    let deal_and_score = || -> Result<u32> {
        let mut deck = RNG.with_borrow_mut(Deck::shuffled);
        let hand = deck.draw_hand().context("the deck ran out of cards")?;
        let starter = deck.draw().context("the deck ran out of cards")?;

        Ok(Scorer::score_hand(&hand, starter, options)?)
    };

    let (stats, mean) = generate_score_stats(single_threaded, iterations, deal_and_score)?;

    println!("When dealing 4 cards and a starter from a shuffled 52-card standard deck, the scores are:");
    print_score_stats(&stats, mean);

    Ok(())
}

pub fn run(command: &CliCommands) -> Result<()> {
    match command {
        CliCommands::HandStats {
            single_threaded,
            iterations,
            crib,
        } => hand_stats(*single_threaded, *iterations * 10_000, {
            let mut options = Options::empty();
            if *crib {
                options |= Options::CribHand;
            }
            options
        }),
    }
}
