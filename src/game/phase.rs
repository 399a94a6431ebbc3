//! Hand lifecycle phases.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::TableError;

/// Phases of one hand. The only legal edges form the forward chain
/// Waiting -> Preflop -> Flop -> Turn -> River -> Showdown -> Waiting.
/// A hand won by everyone else folding still walks the chain through to
/// Showdown, just without dealing anything on the way.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Waiting,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Phase {
    /// The unique successor of this phase in the chain.
    #[must_use]
    pub const fn successor(self) -> Phase {
        match self {
            Phase::Waiting => Phase::Preflop,
            Phase::Preflop => Phase::Flop,
            Phase::Flop => Phase::Turn,
            Phase::Turn => Phase::River,
            Phase::River => Phase::Showdown,
            Phase::Showdown => Phase::Waiting,
        }
    }

    /// Whether seats may act in this phase.
    #[must_use]
    pub const fn is_betting(self) -> bool {
        matches!(self, Phase::Preflop | Phase::Flop | Phase::Turn | Phase::River)
    }

    /// Steps one edge forward along the chain.
    pub fn advance(&mut self) {
        *self = self.successor();
    }

    /// Moves to `to`, rejecting any edge that is not the successor.
    pub fn transition(&mut self, to: Phase) -> Result<(), TableError> {
        if self.successor() == to {
            *self = to;
            Ok(())
        } else {
            Err(TableError::InvalidPhaseTransition { from: *self, to })
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Waiting => "waiting",
            Phase::Preflop => "preflop",
            Phase::Flop => "flop",
            Phase::Turn => "turn",
            Phase::River => "river",
            Phase::Showdown => "showdown",
        };
        write!(f, "{name}")
    }
}
