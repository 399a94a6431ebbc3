//! Actor messages and subscriber events.

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};

use crate::game::entities::{Action, Chips, PlayerId};
use crate::game::errors::TableError;
use crate::game::table::{AddOutcome, DealtHand, HandResult, TableView};

/// Commands handled by a table actor. Each request variant carries a
/// oneshot channel for its reply.
#[derive(Debug)]
pub enum TableMessage {
    Join {
        player_id: PlayerId,
        name: String,
        buy_in: Option<Chips>,
        response: oneshot::Sender<Result<AddOutcome, TableError>>,
    },
    Leave {
        player_id: PlayerId,
        response: oneshot::Sender<bool>,
    },
    SetConnected {
        player_id: PlayerId,
        connected: bool,
    },
    StartHand {
        response: oneshot::Sender<Result<Vec<DealtHand>, TableError>>,
    },
    TakeAction {
        player_id: PlayerId,
        action: Action,
        response: oneshot::Sender<Result<(), TableError>>,
    },
    GetSnapshot {
        viewer: Option<PlayerId>,
        response: oneshot::Sender<TableView>,
    },
    Subscribe {
        subscriber_id: PlayerId,
        sender: mpsc::Sender<TableEvent>,
    },
    Unsubscribe {
        subscriber_id: PlayerId,
    },
    Close {
        response: oneshot::Sender<()>,
    },
    /// Fired by the deferred next-hand task.
    NextHand,
}

/// Pushed to subscribers so a transport can fan state out. `HandStarted`
/// carries every seat's hole cards; the transport must deliver each
/// [`DealtHand`] only to its own player.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TableEvent {
    HandStarted { dealt: Vec<DealtHand> },
    StateChanged,
    HandFinished { result: HandResult },
    GameOver,
}
