use super::entities::Chips;

pub const DEFAULT_SMALL_BLIND: Chips = 10;
pub const DEFAULT_BIG_BLIND: Chips = 20;
pub const DEFAULT_BUY_IN: Chips = 1000;
pub const DEFAULT_MAX_SEATS: usize = 6;

/// Hard cap on seats per table regardless of configuration.
pub const MAX_SEATS: usize = 10;

pub const HOLE_CARD_COUNT: usize = 2;
pub const BOARD_SIZE: usize = 5;
pub const DECK_SIZE: usize = 52;

/// Pause between a hand finishing and the next one being dealt.
pub const DEFAULT_NEXT_HAND_DELAY_SECS: u64 = 4;
