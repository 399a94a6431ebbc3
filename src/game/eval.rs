//! Best-five hand evaluation.
//!
//! [`evaluate`] takes any number of cards (a hand plus the board, so up
//! to seven) and returns the rank of the best five-card hand contained
//! in them. Ranks compare by category first, then by tie-break values.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::entities::{Card, Value};

/// Hand categories, weakest to strongest.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandCategory {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandCategory::HighCard => "high card",
            HandCategory::OnePair => "pair",
            HandCategory::TwoPair => "two pair",
            HandCategory::ThreeOfAKind => "three of a kind",
            HandCategory::Straight => "straight",
            HandCategory::Flush => "flush",
            HandCategory::FullHouse => "full house",
            HandCategory::FourOfAKind => "four of a kind",
            HandCategory::StraightFlush => "straight flush",
            HandCategory::RoyalFlush => "royal flush",
        };
        write!(f, "{name}")
    }
}

/// A ranked hand. The derived ordering compares `category` first, then
/// `tiebreak` lexicographically; tie-break values are laid out most
/// significant first, so equal ranks mean a genuinely split pot.
#[derive(Clone, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
pub struct HandRank {
    pub category: HandCategory,
    pub tiebreak: Vec<Value>,
}

impl HandRank {
    /// Short human-readable description for showdown display.
    #[must_use]
    pub fn label(&self) -> String {
        let v = |i: usize| value_symbol(self.tiebreak.get(i).copied().unwrap_or(0));
        match self.category {
            HandCategory::RoyalFlush => "royal flush".to_string(),
            HandCategory::StraightFlush => format!("straight flush, {} high", v(0)),
            HandCategory::FourOfAKind => format!("four of a kind, {}s", v(0)),
            HandCategory::FullHouse => format!("full house, {}s over {}s", v(0), v(1)),
            HandCategory::Flush => format!("flush, {} high", v(0)),
            HandCategory::Straight => format!("straight, {} high", v(0)),
            HandCategory::ThreeOfAKind => format!("three of a kind, {}s", v(0)),
            HandCategory::TwoPair => format!("two pair, {}s and {}s", v(0), v(1)),
            HandCategory::OnePair => format!("pair of {}s", v(0)),
            HandCategory::HighCard => format!("{} high", v(0)),
        }
    }
}

const fn value_symbol(value: Value) -> &'static str {
    match value {
        2 => "2",
        3 => "3",
        4 => "4",
        5 => "5",
        6 => "6",
        7 => "7",
        8 => "8",
        9 => "9",
        10 => "T",
        11 => "J",
        12 => "Q",
        13 => "K",
        14 => "A",
        _ => "?",
    }
}

/// Highest rank ending a 5-card run among `values`, or 0 if there is
/// none. The ace plays both high and low; the wheel (A-2-3-4-5) counts
/// with high card 5, strictly weaker than a 6-high straight.
fn straight_high(values: &[Value]) -> Value {
    let mut uniq: Vec<Value> = values.to_vec();
    uniq.sort_unstable();
    uniq.dedup();
    let mut best = 0;
    if [2, 3, 4, 5, 14].iter().all(|v| uniq.binary_search(v).is_ok()) {
        best = 5;
    }
    let mut run = 1;
    for i in 1..uniq.len() {
        if uniq[i] == uniq[i - 1] + 1 {
            run += 1;
        } else {
            run = 1;
        }
        if run >= 5 && uniq[i] > best {
            best = uniq[i];
        }
    }
    best
}

/// Ranks the best five-card hand among `cards`, checking categories from
/// strongest to weakest. Any non-empty input ranks; fewer than five cards
/// simply fall through to the weaker categories.
#[must_use]
pub fn evaluate(cards: &[Card]) -> HandRank {
    let mut counts: BTreeMap<Value, u8> = BTreeMap::new();
    let mut by_suit: [Vec<Value>; 4] = std::array::from_fn(|_| Vec::new());
    for card in cards {
        *counts.entry(card.value()).or_insert(0) += 1;
        by_suit[card.suit() as usize].push(card.value());
    }
    // distinct values, high to low, for kicker selection
    let values_desc: Vec<Value> = counts.keys().rev().copied().collect();

    // straight flush (a 14-high one is the royal)
    let mut best_sf: Value = 0;
    for suited in &by_suit {
        if suited.len() < 5 {
            continue;
        }
        let high = straight_high(suited);
        if high > best_sf {
            best_sf = high;
        }
    }
    if best_sf == 14 {
        return HandRank {
            category: HandCategory::RoyalFlush,
            tiebreak: vec![],
        };
    }
    if best_sf >= 5 {
        return HandRank {
            category: HandCategory::StraightFlush,
            tiebreak: vec![best_sf],
        };
    }

    // multiplicity groups, high rank first
    let mut quads = Vec::new();
    let mut trips = Vec::new();
    let mut pairs = Vec::new();
    for (&value, &count) in counts.iter().rev() {
        match count {
            4.. => quads.push(value),
            3 => trips.push(value),
            2 => pairs.push(value),
            _ => {}
        }
    }

    if let Some(&quad) = quads.first() {
        let mut tiebreak = vec![quad];
        tiebreak.extend(values_desc.iter().copied().find(|&v| v != quad));
        return HandRank {
            category: HandCategory::FourOfAKind,
            tiebreak,
        };
    }

    // the pair half of a full house may come from a second set of trips
    if let Some(&three) = trips.first() {
        if let Some(two) = trips.get(1).copied().or_else(|| pairs.first().copied()) {
            return HandRank {
                category: HandCategory::FullHouse,
                tiebreak: vec![three, two],
            };
        }
    }

    // at most one suit can hold 5+ of 7 cards
    if let Some(suited) = by_suit.iter().find(|s| s.len() >= 5) {
        let mut tiebreak = suited.clone();
        tiebreak.sort_unstable_by(|a, b| b.cmp(a));
        tiebreak.truncate(5);
        return HandRank {
            category: HandCategory::Flush,
            tiebreak,
        };
    }

    let all_values: Vec<Value> = cards.iter().map(|c| c.value()).collect();
    let high = straight_high(&all_values);
    if high >= 5 {
        return HandRank {
            category: HandCategory::Straight,
            tiebreak: vec![high],
        };
    }

    if let Some(&three) = trips.first() {
        let mut tiebreak = vec![three];
        tiebreak.extend(values_desc.iter().copied().filter(|&v| v != three).take(2));
        return HandRank {
            category: HandCategory::ThreeOfAKind,
            tiebreak,
        };
    }

    if pairs.len() >= 2 {
        let (hi, lo) = (pairs[0], pairs[1]);
        let mut tiebreak = vec![hi, lo];
        tiebreak.extend(values_desc.iter().copied().find(|&v| v != hi && v != lo));
        return HandRank {
            category: HandCategory::TwoPair,
            tiebreak,
        };
    }

    if let Some(&pair) = pairs.first() {
        let mut tiebreak = vec![pair];
        tiebreak.extend(values_desc.iter().copied().filter(|&v| v != pair).take(3));
        return HandRank {
            category: HandCategory::OnePair,
            tiebreak,
        };
    }

    HandRank {
        category: HandCategory::HighCard,
        tiebreak: values_desc.into_iter().take(5).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::Suit;

    fn rank(cards: &[Card]) -> HandRank {
        evaluate(cards)
    }

    // === Straights ===

    #[test]
    fn wheel_is_a_five_high_straight() {
        let cards = [
            Card(14, Suit::Spade),
            Card(2, Suit::Heart),
            Card(3, Suit::Club),
            Card(4, Suit::Diamond),
            Card(5, Suit::Spade),
            Card(9, Suit::Heart),
            Card(12, Suit::Club),
        ];
        let r = rank(&cards);
        assert_eq!(r.category, HandCategory::Straight);
        assert_eq!(r.tiebreak, vec![5]);
    }

    #[test]
    fn wheel_loses_to_six_high_straight() {
        let wheel = rank(&[
            Card(14, Suit::Spade),
            Card(2, Suit::Heart),
            Card(3, Suit::Club),
            Card(4, Suit::Diamond),
            Card(5, Suit::Spade),
        ]);
        let six_high = rank(&[
            Card(2, Suit::Heart),
            Card(3, Suit::Club),
            Card(4, Suit::Diamond),
            Card(5, Suit::Spade),
            Card(6, Suit::Heart),
        ]);
        assert!(six_high > wheel);
    }

    #[test]
    fn ace_low_run_into_six_counts_six_high() {
        // A,2,3,4,5,6 holds both the wheel and a 6-high straight
        let r = rank(&[
            Card(14, Suit::Spade),
            Card(2, Suit::Heart),
            Card(3, Suit::Club),
            Card(4, Suit::Diamond),
            Card(5, Suit::Spade),
            Card(6, Suit::Club),
            Card(11, Suit::Heart),
        ]);
        assert_eq!(r.category, HandCategory::Straight);
        assert_eq!(r.tiebreak, vec![6]);
    }

    #[test]
    fn straight_detected_despite_paired_board() {
        let r = rank(&[
            Card(4, Suit::Spade),
            Card(5, Suit::Heart),
            Card(6, Suit::Club),
            Card(6, Suit::Diamond),
            Card(7, Suit::Spade),
            Card(8, Suit::Heart),
            Card(13, Suit::Club),
        ]);
        assert_eq!(r.category, HandCategory::Straight);
        assert_eq!(r.tiebreak, vec![8]);
    }

    // === Flushes ===

    #[test]
    fn royal_flush_outranks_king_high_straight_flush() {
        let royal = rank(&[
            Card(10, Suit::Spade),
            Card(11, Suit::Spade),
            Card(12, Suit::Spade),
            Card(13, Suit::Spade),
            Card(14, Suit::Spade),
            Card(2, Suit::Heart),
            Card(3, Suit::Heart),
        ]);
        let king_high = rank(&[
            Card(9, Suit::Club),
            Card(10, Suit::Club),
            Card(11, Suit::Club),
            Card(12, Suit::Club),
            Card(13, Suit::Club),
        ]);
        assert_eq!(royal.category, HandCategory::RoyalFlush);
        assert_eq!(king_high.category, HandCategory::StraightFlush);
        assert_eq!(king_high.tiebreak, vec![13]);
        assert!(royal > king_high);
    }

    #[test]
    fn steel_wheel_is_a_five_high_straight_flush() {
        let r = rank(&[
            Card(14, Suit::Heart),
            Card(2, Suit::Heart),
            Card(3, Suit::Heart),
            Card(4, Suit::Heart),
            Card(5, Suit::Heart),
            Card(13, Suit::Spade),
            Card(13, Suit::Club),
        ]);
        assert_eq!(r.category, HandCategory::StraightFlush);
        assert_eq!(r.tiebreak, vec![5]);
    }

    #[test]
    fn flush_keeps_five_highest_of_the_suit() {
        let r = rank(&[
            Card(2, Suit::Diamond),
            Card(5, Suit::Diamond),
            Card(7, Suit::Diamond),
            Card(9, Suit::Diamond),
            Card(11, Suit::Diamond),
            Card(13, Suit::Diamond),
            Card(14, Suit::Spade),
        ]);
        assert_eq!(r.category, HandCategory::Flush);
        assert_eq!(r.tiebreak, vec![13, 11, 9, 7, 5]);
    }

    // === Groups ===

    #[test]
    fn four_of_a_kind_with_best_kicker() {
        let r = rank(&[
            Card(9, Suit::Spade),
            Card(9, Suit::Heart),
            Card(9, Suit::Club),
            Card(9, Suit::Diamond),
            Card(14, Suit::Spade),
            Card(5, Suit::Heart),
            Card(2, Suit::Club),
        ]);
        assert_eq!(r.category, HandCategory::FourOfAKind);
        assert_eq!(r.tiebreak, vec![9, 14]);
    }

    #[test]
    fn two_sets_of_trips_make_a_full_house() {
        let r = rank(&[
            Card(8, Suit::Spade),
            Card(8, Suit::Heart),
            Card(8, Suit::Club),
            Card(12, Suit::Diamond),
            Card(12, Suit::Spade),
            Card(12, Suit::Heart),
            Card(3, Suit::Club),
        ]);
        assert_eq!(r.category, HandCategory::FullHouse);
        assert_eq!(r.tiebreak, vec![12, 8]);
    }

    #[test]
    fn trips_take_two_kickers() {
        let r = rank(&[
            Card(7, Suit::Spade),
            Card(7, Suit::Heart),
            Card(7, Suit::Club),
            Card(14, Suit::Diamond),
            Card(10, Suit::Spade),
            Card(4, Suit::Heart),
            Card(2, Suit::Club),
        ]);
        assert_eq!(r.category, HandCategory::ThreeOfAKind);
        assert_eq!(r.tiebreak, vec![7, 14, 10]);
    }

    #[test]
    fn three_pairs_use_top_two_and_best_remaining_kicker() {
        let r = rank(&[
            Card(4, Suit::Spade),
            Card(4, Suit::Heart),
            Card(9, Suit::Club),
            Card(9, Suit::Diamond),
            Card(13, Suit::Spade),
            Card(13, Suit::Heart),
            Card(6, Suit::Club),
        ]);
        assert_eq!(r.category, HandCategory::TwoPair);
        // the third pair's rank is still the best kicker
        assert_eq!(r.tiebreak, vec![13, 9, 4]);
    }

    #[test]
    fn pair_takes_three_kickers() {
        let r = rank(&[
            Card(11, Suit::Spade),
            Card(11, Suit::Heart),
            Card(14, Suit::Club),
            Card(9, Suit::Diamond),
            Card(6, Suit::Spade),
            Card(3, Suit::Heart),
            Card(2, Suit::Club),
        ]);
        assert_eq!(r.category, HandCategory::OnePair);
        assert_eq!(r.tiebreak, vec![11, 14, 9, 6]);
    }

    #[test]
    fn high_card_keeps_top_five() {
        let r = rank(&[
            Card(14, Suit::Spade),
            Card(12, Suit::Heart),
            Card(9, Suit::Club),
            Card(7, Suit::Diamond),
            Card(5, Suit::Spade),
            Card(3, Suit::Heart),
            Card(2, Suit::Club),
        ]);
        assert_eq!(r.category, HandCategory::HighCard);
        assert_eq!(r.tiebreak, vec![14, 12, 9, 7, 5]);
    }

    // === Ordering ===

    #[test]
    fn categories_rank_in_listed_order() {
        assert!(HandCategory::OnePair > HandCategory::HighCard);
        assert!(HandCategory::Flush > HandCategory::Straight);
        assert!(HandCategory::RoyalFlush > HandCategory::StraightFlush);
    }

    #[test]
    fn equal_category_falls_back_to_kickers() {
        let king_kicker = rank(&[
            Card(8, Suit::Spade),
            Card(8, Suit::Heart),
            Card(13, Suit::Club),
            Card(5, Suit::Diamond),
            Card(2, Suit::Spade),
        ]);
        let ace_kicker = rank(&[
            Card(8, Suit::Club),
            Card(8, Suit::Diamond),
            Card(14, Suit::Heart),
            Card(5, Suit::Club),
            Card(2, Suit::Heart),
        ]);
        assert!(ace_kicker > king_kicker);
    }

    #[test]
    fn identical_best_fives_tie() {
        let a = rank(&[
            Card(10, Suit::Spade),
            Card(10, Suit::Heart),
            Card(14, Suit::Club),
            Card(8, Suit::Diamond),
            Card(4, Suit::Spade),
        ]);
        let b = rank(&[
            Card(10, Suit::Club),
            Card(10, Suit::Diamond),
            Card(14, Suit::Spade),
            Card(8, Suit::Heart),
            Card(4, Suit::Club),
        ]);
        assert_eq!(a, b);
    }

    // === Labels ===

    #[test]
    fn labels_name_the_hand() {
        let full = rank(&[
            Card(8, Suit::Spade),
            Card(8, Suit::Heart),
            Card(8, Suit::Club),
            Card(12, Suit::Diamond),
            Card(12, Suit::Spade),
        ]);
        assert_eq!(full.label(), "full house, 8s over Qs");
        let pair = rank(&[
            Card(14, Suit::Spade),
            Card(14, Suit::Heart),
            Card(9, Suit::Club),
        ]);
        assert_eq!(pair.label(), "pair of As");
    }
}
