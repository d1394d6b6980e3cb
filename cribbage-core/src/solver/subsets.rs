//! Subset enumeration over the handful of cards a player sees at once.
//!
//! Subsets are selected by bitmask over item indices, so the enumeration
//! order is fixed by the input order and never by hashing.

use itertools::Itertools;

/// The most items any enumeration here accepts: a six-card deal.
pub const MAX_ITEMS: usize = 6;

pub type Subset<T> = heapless::Vec<T, MAX_ITEMS>;

/// Every non-empty subset of `items`, the full set included. Five items give
/// 31 subsets.
///
/// ```
/// # use cribbage_core::prelude::power_set;
/// let subsets: Vec<_> = power_set(&[1, 2, 3]).collect();
/// assert_eq!(subsets.len(), 7);
/// assert!(subsets.iter().any(|s| s.as_slice() == [1, 2, 3]));
/// ```
pub fn power_set<T: Copy>(items: &[T]) -> impl Iterator<Item = Subset<T>> + '_ {
    assert!(items.len() <= MAX_ITEMS);

    (1_u32..(1_u32 << items.len())).map(move |mask| select(items, mask))
}

/// Every unordered pair drawn from `items`.
pub fn pairs<T: Copy>(items: &[T]) -> impl Iterator<Item = (T, T)> + '_ {
    items.iter().copied().tuple_combinations()
}

/// Every way to set `count` of `items` aside, as `(discarded, kept)`.
/// Choices come out in lexicographic order of the discarded indices.
pub fn discards<T: Copy>(
    items: &[T],
    count: usize,
) -> impl Iterator<Item = (Subset<T>, Subset<T>)> + '_ {
    assert!(items.len() <= MAX_ITEMS);

    (0..items.len()).combinations(count).map(move |indices| {
        let mask = indices.iter().fold(0_u32, |mask, i| mask | (1_u32 << i));
        (select(items, mask), select(items, !mask))
    })
}

fn select<T: Copy>(items: &[T], mask: u32) -> Subset<T> {
    items
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1_u32 << i) != 0)
        .map(|(_, item)| *item)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::cards;
    use crate::solver::cards::CardView;

    #[test]
    fn power_set_test() {
        let cards = cards!("AH 2H 3H 4H 5H");
        let subsets: Vec<_> = power_set(cards.view()).collect();
        assert_eq!(subsets.len(), 31);
        assert!(subsets.iter().all(|s| !s.is_empty()));
        assert_eq!(subsets.iter().filter(|s| s.len() == 5).count(), 1);
        assert_eq!(subsets.iter().filter(|s| s.len() == 3).count(), 10);

        let unique: HashSet<Vec<_>> = subsets.iter().map(|s| s.to_vec()).collect();
        assert_eq!(unique.len(), 31);
    }

    #[test]
    fn power_set_of_nothing_test() {
        assert_eq!(power_set::<u8>(&[]).count(), 0);
        assert_eq!(power_set(&[9]).collect::<Vec<_>>(), [Subset::from_slice(&[9]).unwrap()]);
    }

    #[test]
    fn pairs_test() {
        let cards = cards!("AH 2H 3H 4H 5H 6H");
        let pairs: Vec<_> = pairs(cards.view()).collect();
        assert_eq!(pairs.len(), 15);
        assert!(pairs.iter().all(|(a, b)| a != b));

        let unordered: HashSet<_> = pairs
            .iter()
            .map(|(a, b)| if a < b { (*a, *b) } else { (*b, *a) })
            .collect();
        assert_eq!(unordered.len(), 15);
    }

    #[test]
    fn discards_test() {
        let items = [1, 2, 3, 4, 5, 6];

        let two: Vec<_> = discards(&items, 2).collect();
        assert_eq!(two.len(), 15);
        for (discarded, kept) in &two {
            assert_eq!(discarded.len(), 2);
            assert_eq!(kept.len(), 4);
            assert!(kept.iter().all(|k| !discarded.contains(k)));
        }
        assert_eq!(two[0].0.as_slice(), [1, 2]);
        assert_eq!(two[0].1.as_slice(), [3, 4, 5, 6]);
        assert_eq!(two[14].0.as_slice(), [5, 6]);

        // Same pairs, same order.
        let from_pairs: Vec<_> = pairs(&items).map(|(a, b)| [a, b]).collect();
        let from_discards: Vec<_> = two.iter().map(|(d, _)| [d[0], d[1]]).collect();
        assert_eq!(from_pairs, from_discards);

        let one: Vec<_> = discards(&items[..5], 1).collect();
        assert_eq!(one.len(), 5);
        assert_eq!(one[2].0.as_slice(), [3]);
        assert_eq!(one[2].1.as_slice(), [1, 2, 4, 5]);
    }
}
