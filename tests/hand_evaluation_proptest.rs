use holdem_engine::game::entities::{Card, Suit};
use holdem_engine::game::eval::{HandCategory, evaluate};
use proptest::prelude::*;

fn full_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for value in 2..=14 {
            cards.push(Card(value, suit));
        }
    }
    cards
}

fn seven_cards() -> impl Strategy<Value = Vec<Card>> {
    proptest::sample::subsequence(full_deck(), 7)
}

proptest! {
    #[test]
    fn evaluation_ignores_card_order(cards in seven_cards().prop_shuffle()) {
        let mut sorted = cards.clone();
        sorted.sort();
        prop_assert_eq!(evaluate(&cards), evaluate(&sorted));
    }

    #[test]
    fn dropping_a_card_never_improves_the_rank(cards in seven_cards()) {
        let seven = evaluate(&cards);
        for skip in 0..cards.len() {
            let six: Vec<Card> = cards
                .iter()
                .copied()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, c)| c)
                .collect();
            prop_assert!(evaluate(&six) <= seven);
        }
    }

    #[test]
    fn tiebreak_values_are_card_ranks(cards in seven_cards()) {
        let rank = evaluate(&cards);
        prop_assert!(rank.tiebreak.len() <= 5);
        for value in rank.tiebreak {
            prop_assert!((2..=14).contains(&value));
        }
    }

    #[test]
    fn five_suited_cards_rank_at_least_a_flush(
        values in proptest::sample::subsequence((2u8..=14).collect::<Vec<_>>(), 5)
    ) {
        let cards: Vec<Card> = values.iter().map(|&v| Card(v, Suit::Heart)).collect();
        prop_assert!(evaluate(&cards).category >= HandCategory::Flush);
    }

    #[test]
    fn four_of_one_rank_dominates_groups(value in 2u8..=14) {
        let mut cards: Vec<Card> = Suit::ALL.iter().map(|&s| Card(value, s)).collect();
        cards.push(Card(if value == 2 { 3 } else { 2 }, Suit::Heart));
        prop_assert_eq!(evaluate(&cards).category, HandCategory::FourOfAKind);
    }

    #[test]
    fn evaluation_handles_short_inputs(cards in proptest::sample::subsequence(full_deck(), 1..=7)) {
        let rank = evaluate(&cards);
        prop_assert!(rank.category >= HandCategory::HighCard);
    }
}
