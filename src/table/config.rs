//! Table configuration.

use serde::{Deserialize, Serialize};

use crate::game::constants;
use crate::game::entities::Chips;
use crate::game::errors::TableError;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TableConfig {
    pub name: String,
    pub max_seats: usize,
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Stack granted when a join carries no explicit buy-in.
    pub default_buy_in: Chips,
    /// Pause between a hand finishing and the next one being dealt.
    pub next_hand_delay_secs: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            name: "Default Table".to_string(),
            max_seats: constants::DEFAULT_MAX_SEATS,
            small_blind: constants::DEFAULT_SMALL_BLIND,
            big_blind: constants::DEFAULT_BIG_BLIND,
            default_buy_in: constants::DEFAULT_BUY_IN,
            next_hand_delay_secs: constants::DEFAULT_NEXT_HAND_DELAY_SECS,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), TableError> {
        if self.name.trim().is_empty() {
            return Err(TableError::InvalidConfig("name cannot be empty".into()));
        }
        if self.max_seats < 2 || self.max_seats > constants::MAX_SEATS {
            return Err(TableError::InvalidConfig(format!(
                "max_seats must be between 2 and {}",
                constants::MAX_SEATS
            )));
        }
        if self.small_blind == 0 || self.big_blind <= self.small_blind {
            return Err(TableError::InvalidConfig(
                "big blind must exceed a nonzero small blind".into(),
            ));
        }
        if self.default_buy_in < self.big_blind {
            return Err(TableError::InvalidConfig(
                "buy-in must cover at least the big blind".into(),
            ));
        }
        Ok(())
    }
}
