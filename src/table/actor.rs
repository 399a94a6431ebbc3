//! The per-table actor and its handle.
//!
//! One `TableActor` task owns one [`Table`]. All reads and writes go
//! through the inbox, so callers never contend on the game state and at
//! most one mutation is in flight per table.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};

use crate::game::entities::{Action, Chips, PlayerId, TableId};
use crate::game::errors::TableError;
use crate::game::phase::Phase;
use crate::game::table::{AddOutcome, DealtHand, Table, TableView};

use super::config::TableConfig;
use super::messages::{TableEvent, TableMessage};

const INBOX_CAPACITY: usize = 100;

/// Cloneable sending side of a table actor.
#[derive(Clone, Debug)]
pub struct TableHandle {
    sender: mpsc::Sender<TableMessage>,
    table_id: TableId,
}

impl TableHandle {
    #[must_use]
    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    pub async fn send(&self, message: TableMessage) -> Result<(), TableError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| TableError::TableClosed)
    }

    pub async fn join(
        &self,
        player_id: PlayerId,
        name: impl Into<String>,
        buy_in: Option<Chips>,
    ) -> Result<AddOutcome, TableError> {
        let (response, rx) = oneshot::channel();
        self.send(TableMessage::Join {
            player_id,
            name: name.into(),
            buy_in,
            response,
        })
        .await?;
        rx.await.map_err(|_| TableError::TableClosed)?
    }

    pub async fn leave(&self, player_id: PlayerId) -> Result<bool, TableError> {
        let (response, rx) = oneshot::channel();
        self.send(TableMessage::Leave {
            player_id,
            response,
        })
        .await?;
        rx.await.map_err(|_| TableError::TableClosed)
    }

    pub async fn start_hand(&self) -> Result<Vec<DealtHand>, TableError> {
        let (response, rx) = oneshot::channel();
        self.send(TableMessage::StartHand { response }).await?;
        rx.await.map_err(|_| TableError::TableClosed)?
    }

    pub async fn take_action(
        &self,
        player_id: PlayerId,
        action: Action,
    ) -> Result<(), TableError> {
        let (response, rx) = oneshot::channel();
        self.send(TableMessage::TakeAction {
            player_id,
            action,
            response,
        })
        .await?;
        rx.await.map_err(|_| TableError::TableClosed)?
    }

    pub async fn snapshot(&self, viewer: Option<PlayerId>) -> Result<TableView, TableError> {
        let (response, rx) = oneshot::channel();
        self.send(TableMessage::GetSnapshot { viewer, response })
            .await?;
        rx.await.map_err(|_| TableError::TableClosed)
    }

    pub async fn subscribe(
        &self,
        subscriber_id: PlayerId,
        sender: mpsc::Sender<TableEvent>,
    ) -> Result<(), TableError> {
        self.send(TableMessage::Subscribe {
            subscriber_id,
            sender,
        })
        .await
    }

    pub async fn close(&self) -> Result<(), TableError> {
        let (response, rx) = oneshot::channel();
        self.send(TableMessage::Close { response }).await?;
        rx.await.map_err(|_| TableError::TableClosed)
    }
}

/// Owns one table and drains its inbox until closed.
pub struct TableActor {
    id: TableId,
    config: TableConfig,
    table: Table,
    inbox: mpsc::Receiver<TableMessage>,
    /// Weak so a pending next-hand timer never keeps a dead table alive.
    sender: mpsc::WeakSender<TableMessage>,
    subscribers: HashMap<PlayerId, mpsc::Sender<TableEvent>>,
    is_closed: bool,
}

impl TableActor {
    #[must_use]
    pub fn new(id: TableId, config: TableConfig) -> (Self, TableHandle) {
        let (sender, inbox) = mpsc::channel(INBOX_CAPACITY);
        let handle = TableHandle {
            sender: sender.clone(),
            table_id: id,
        };
        let table = Table::new(id, config.small_blind, config.big_blind, config.max_seats);
        let actor = Self {
            id,
            config,
            table,
            inbox,
            sender: sender.downgrade(),
            subscribers: HashMap::new(),
            is_closed: false,
        };
        (actor, handle)
    }

    pub async fn run(mut self) {
        log::info!("table {} '{}' started", self.id, self.config.name);
        while let Some(message) = self.inbox.recv().await {
            self.handle_message(message);
            if self.is_closed {
                break;
            }
        }
        log::info!("table {} '{}' stopped", self.id, self.config.name);
    }

    fn handle_message(&mut self, message: TableMessage) {
        match message {
            TableMessage::Join {
                player_id,
                name,
                buy_in,
                response,
            } => {
                let result = self.handle_join(player_id, &name, buy_in);
                let _ = response.send(result);
            }
            TableMessage::Leave {
                player_id,
                response,
            } => {
                let removed = self.table.remove_player(&player_id);
                if removed {
                    log::info!("table {}: {player_id} left", self.id);
                    self.after_mutation();
                }
                let _ = response.send(removed);
            }
            TableMessage::SetConnected {
                player_id,
                connected,
            } => {
                if self.table.set_connected(&player_id, connected) {
                    log::debug!(
                        "table {}: {player_id} {}",
                        self.id,
                        if connected { "reconnected" } else { "disconnected" }
                    );
                    self.notify(TableEvent::StateChanged);
                }
            }
            TableMessage::StartHand { response } => {
                let result = self.handle_start_hand();
                let _ = response.send(result);
            }
            TableMessage::TakeAction {
                player_id,
                action,
                response,
            } => {
                let result = self.table.apply_action(&player_id, action);
                if result.is_ok() {
                    log::debug!("table {}: {player_id} {action}", self.id);
                    self.after_mutation();
                }
                let _ = response.send(result);
            }
            TableMessage::GetSnapshot { viewer, response } => {
                let _ = response.send(self.table.snapshot(viewer.as_ref()));
            }
            TableMessage::Subscribe {
                subscriber_id,
                sender,
            } => {
                self.subscribers.insert(subscriber_id, sender);
            }
            TableMessage::Unsubscribe { subscriber_id } => {
                self.subscribers.remove(&subscriber_id);
            }
            TableMessage::Close { response } => {
                self.is_closed = true;
                let _ = response.send(());
            }
            TableMessage::NextHand => self.handle_next_hand(),
        }
    }

    fn handle_join(
        &mut self,
        player_id: PlayerId,
        name: &str,
        buy_in: Option<Chips>,
    ) -> Result<AddOutcome, TableError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TableError::InvalidName);
        }
        let buy_in = buy_in.unwrap_or(self.config.default_buy_in);
        let outcome = self.table.add_player(player_id.clone(), name, buy_in)?;
        log::info!("table {}: {player_id} joined as '{name}' ({outcome:?})", self.id);
        self.notify(TableEvent::StateChanged);
        Ok(outcome)
    }

    fn handle_start_hand(&mut self) -> Result<Vec<DealtHand>, TableError> {
        // a table still sitting in showdown restarts by preparing first
        if self.table.phase() == Phase::Showdown && !self.table.prepare_next_hand() {
            self.notify(TableEvent::GameOver);
            return Err(TableError::NotEnoughPlayers);
        }
        let dealt = self.table.start_hand()?;
        log::info!("table {}: hand {} dealt", self.id, self.table.hand_number());
        self.notify(TableEvent::HandStarted {
            dealt: dealt.clone(),
        });
        self.after_mutation();
        Ok(dealt)
    }

    /// Broadcasts the new state and, when the hand just ended, emits the
    /// result and arms the next-hand timer.
    fn after_mutation(&mut self) {
        self.notify(TableEvent::StateChanged);
        if self.table.phase() == Phase::Showdown {
            if let Some(result) = self.table.last_result() {
                self.notify(TableEvent::HandFinished {
                    result: result.clone(),
                });
            }
            self.schedule_next_hand();
        }
    }

    fn schedule_next_hand(&self) {
        let sender = self.sender.clone();
        let delay = Duration::from_secs(self.config.next_hand_delay_secs);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // the table may be gone by now; a missing table is a no-op
            if let Some(sender) = sender.upgrade() {
                let _ = sender.send(TableMessage::NextHand).await;
            }
        });
    }

    fn handle_next_hand(&mut self) {
        // a stale timer after a manual restart finds the hand running
        if self.table.phase() != Phase::Showdown {
            return;
        }
        if !self.table.prepare_next_hand() {
            log::info!("table {}: waiting for funded players", self.id);
            self.notify(TableEvent::GameOver);
            self.notify(TableEvent::StateChanged);
            return;
        }
        match self.table.start_hand() {
            Ok(dealt) => {
                log::info!("table {}: hand {} dealt", self.id, self.table.hand_number());
                self.notify(TableEvent::HandStarted { dealt });
                self.after_mutation();
            }
            Err(err) => {
                log::warn!("table {}: could not start next hand: {err}", self.id);
                self.notify(TableEvent::StateChanged);
            }
        }
    }

    /// Best-effort fan-out. Slow subscribers drop events, closed ones
    /// are pruned.
    fn notify(&mut self, event: TableEvent) {
        self.subscribers
            .retain(|subscriber_id, sender| match sender.try_send(event.clone()) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::warn!("subscriber {subscriber_id} is lagging, dropping event");
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => false,
            });
    }
}
