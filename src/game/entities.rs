//! Cards, the deck, chip amounts, and per-seat player state.

use std::fmt;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::constants;

/// Chip amounts. Everything is integral; there are no fractional chips.
pub type Chips = u32;

/// Positional seat index into a table's seat list.
pub type SeatIndex = usize;

/// Stable table identity.
pub type TableId = uuid::Uuid;

/// Card rank, 2..=14 where 11-14 are jack, queen, king, and ace. The ace
/// also plays low in the 5-high straight.
pub type Value = u8;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Diamond,
    Heart,
    Spade,
    Club,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Diamond, Suit::Heart, Suit::Spade, Suit::Club];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Suit::Diamond => "D",
            Suit::Heart => "H",
            Suit::Spade => "S",
            Suit::Club => "C",
        };
        write!(f, "{repr}")
    }
}

/// A playing card as (rank, suit). Ordering is by rank first, which is
/// what card comparisons in the evaluator care about.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub Value, pub Suit);

impl Card {
    #[must_use]
    pub fn value(self) -> Value {
        self.0
    }

    #[must_use]
    pub fn suit(self) -> Suit {
        self.1
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self.0 {
            2..=9 => return write!(f, "{}{}", self.0, self.1),
            10 => "T",
            11 => "J",
            12 => "Q",
            13 => "K",
            14 => "A",
            other => return write!(f, "?{other}{}", self.1),
        };
        write!(f, "{value}{}", self.1)
    }
}

/// A 52-card deck with a draw cursor. Cards are never removed; drawing
/// advances the cursor over a shuffled array.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: [Card; constants::DECK_SIZE],
    deck_idx: usize,
}

impl Default for Deck {
    fn default() -> Self {
        let mut cards = [Card(0, Suit::Club); constants::DECK_SIZE];
        let mut idx = 0;
        for suit in Suit::ALL {
            for value in 2..=14 {
                cards[idx] = Card(value, suit);
                idx += 1;
            }
        }
        Self { cards, deck_idx: 0 }
    }
}

impl Deck {
    #[must_use]
    pub fn new_shuffled() -> Self {
        let mut deck = Self::default();
        deck.shuffle();
        deck
    }

    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut rand::rng());
        self.deck_idx = 0;
    }

    /// Draws the next card. Panics if the deck is exhausted, which cannot
    /// happen in a hand: 10 seats use at most 20 hole cards, 3 burns, and
    /// 5 board cards.
    pub fn draw(&mut self) -> Card {
        let card = self.cards[self.deck_idx];
        self.deck_idx += 1;
        card
    }

    /// Discards the next card face down.
    pub fn burn(&mut self) {
        self.deck_idx += 1;
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        constants::DECK_SIZE - self.deck_idx
    }
}

/// Stable external player identity, distinct from the positional seat
/// index, which shifts when seats are vacated.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A betting action taken by the seat whose turn it is.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "action", content = "amount", rename_all = "lowercase")]
pub enum Action {
    Fold,
    Check,
    Call,
    /// Additional chips pushed on top of the seat's current bet.
    Raise(Chips),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => write!(f, "folds"),
            Action::Check => write!(f, "checks"),
            Action::Call => write!(f, "calls"),
            Action::Raise(amount) => write!(f, "raises ${amount}"),
        }
    }
}

/// One seat's state. Fields under "per-hand" reset between hands.
#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub stack: Chips,
    pub connected: bool,
    /// First hand number this seat may be dealt into.
    pub eligible_from_hand: u32,
    // per-hand
    pub hole_cards: Vec<Card>,
    pub current_bet: Chips,
    pub total_bet: Chips,
    pub folded: bool,
    pub all_in: bool,
    pub has_acted: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, stack: Chips, eligible_from_hand: u32) -> Self {
        Self {
            id,
            name: name.into(),
            stack,
            connected: true,
            eligible_from_hand,
            hole_cards: Vec::with_capacity(constants::HOLE_CARD_COUNT),
            current_bet: 0,
            total_bet: 0,
            folded: false,
            all_in: false,
            has_acted: false,
        }
    }

    /// Whether this seat could wager chips right now.
    #[must_use]
    pub fn can_bet(&self) -> bool {
        self.stack > 0 && !self.folded && !self.all_in
    }

    /// Moves up to `amount` chips from the stack into the seat's bet,
    /// marking the seat all-in when the stack empties. Returns the chips
    /// actually moved.
    pub(crate) fn commit(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.current_bet += paid;
        self.total_bet += paid;
        if self.stack == 0 {
            self.all_in = true;
        }
        paid
    }

    pub(crate) fn reset_for_hand(&mut self) {
        self.hole_cards.clear();
        self.current_bet = 0;
        self.total_bet = 0;
        self.folded = false;
        self.all_in = false;
        self.has_acted = false;
    }
}
