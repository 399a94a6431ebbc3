//! Engine error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::Chips;
use super::phase::Phase;

/// Rejections surfaced to callers. Operations that return one of these
/// leave the table unchanged.
#[derive(Clone, Debug, Deserialize, Error, Eq, PartialEq, Serialize)]
pub enum TableError {
    #[error("table is full")]
    TableFull,
    #[error("need at least 2 funded, connected players")]
    NotEnoughPlayers,
    #[error("a hand is already in progress")]
    HandInProgress,
    #[error("no betting is open right now")]
    NotBettingPhase,
    #[error("player is not seated at this table")]
    UnknownPlayer,
    #[error("not this player's turn")]
    OutOfTurn,
    #[error("seat has already folded")]
    AlreadyFolded,
    #[error("seat has no chips left to wager")]
    CannotBet,
    #[error("cannot check while ${owed} is owed")]
    CheckNotAllowed { owed: Chips },
    #[error("raise amount must be positive")]
    InvalidRaise,
    #[error("player name cannot be empty")]
    InvalidName,
    #[error("illegal phase transition {from} -> {to}")]
    InvalidPhaseTransition { from: Phase, to: Phase },
    #[error("invalid table config: {0}")]
    InvalidConfig(String),
    #[error("table is closed")]
    TableClosed,
}
