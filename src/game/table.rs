//! The table state machine.
//!
//! A [`Table`] runs one poker table through seating, blind posting,
//! betting rounds, showdown settlement, and preparation of the next
//! hand. It is driven entirely by discrete operations; concurrency and
//! timing belong to the hosting layer.
//!
//! Operations validate completely before mutating anything, so a
//! returned [`TableError`] always means the table is unchanged.

use serde::{Deserialize, Serialize};

use super::constants;
use super::entities::{Action, Card, Chips, Deck, Player, PlayerId, SeatIndex, TableId};
use super::errors::TableError;
use super::eval::{HandCategory, HandRank, evaluate};
use super::phase::Phase;

/// Outcome of seating a player.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum AddOutcome {
    Added,
    /// The id was already seated; the seat was reclaimed with its stack.
    Reconnected,
}

/// Hole cards dealt to one seat. These are private; the hosting layer
/// must deliver each entry only to its own player.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DealtHand {
    pub player_id: PlayerId,
    pub cards: Vec<Card>,
}

/// One seat's revealed hand at showdown.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ShowdownReveal {
    pub player_id: PlayerId,
    pub name: String,
    pub cards: Vec<Card>,
    pub category: HandCategory,
    pub label: String,
}

/// How the last hand ended.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum HandResult {
    /// Everyone else folded; the pot moved without any reveal.
    AllFolded { winner: PlayerId, amount: Chips },
    /// Hands were compared. `winners` holds every tied seat; `amount` is
    /// the whole pot before the split.
    Showdown {
        winners: Vec<PlayerId>,
        amount: Chips,
        reveals: Vec<ShowdownReveal>,
        board: Vec<Card>,
    },
}

/// One seat as seen by a particular viewer.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SeatView {
    pub id: PlayerId,
    pub name: String,
    pub stack: Chips,
    pub current_bet: Chips,
    pub total_bet: Chips,
    pub folded: bool,
    pub all_in: bool,
    pub connected: bool,
    /// Empty unless the seat belongs to the viewer.
    pub hole_cards: Vec<Card>,
    pub can_bet: bool,
}

/// Full table snapshot for one viewer.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TableView {
    pub id: TableId,
    pub seats: Vec<SeatView>,
    pub community_cards: Vec<Card>,
    pub pot: Chips,
    pub current_bet: Chips,
    pub phase: Phase,
    pub current_player: SeatIndex,
    pub dealer_pos: SeatIndex,
    pub hand_number: u32,
    pub can_start_new_hand: bool,
    pub last_result: Option<HandResult>,
}

#[derive(Clone, Debug)]
pub struct Table {
    id: TableId,
    seats: Vec<Player>,
    deck: Deck,
    community_cards: Vec<Card>,
    pot: Chips,
    current_bet: Chips,
    phase: Phase,
    dealer_pos: SeatIndex,
    current_player: SeatIndex,
    small_blind: Chips,
    big_blind: Chips,
    max_seats: usize,
    hand_number: u32,
    last_result: Option<HandResult>,
}

impl Table {
    #[must_use]
    pub fn new(id: TableId, small_blind: Chips, big_blind: Chips, max_seats: usize) -> Self {
        Self {
            id,
            seats: Vec::new(),
            deck: Deck::default(),
            community_cards: Vec::new(),
            pot: 0,
            current_bet: 0,
            phase: Phase::Waiting,
            dealer_pos: 0,
            current_player: 0,
            small_blind,
            big_blind,
            max_seats: max_seats.min(constants::MAX_SEATS),
            hand_number: 0,
            last_result: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> TableId {
        self.id
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn pot(&self) -> Chips {
        self.pot
    }

    #[must_use]
    pub fn hand_number(&self) -> u32 {
        self.hand_number
    }

    #[must_use]
    pub fn seats(&self) -> &[Player] {
        &self.seats
    }

    #[must_use]
    pub fn last_result(&self) -> Option<&HandResult> {
        self.last_result.as_ref()
    }

    #[must_use]
    pub fn seat_of(&self, id: &PlayerId) -> Option<SeatIndex> {
        self.seats.iter().position(|p| &p.id == id)
    }

    /// Seats a player, or reclaims their seat if the id is already
    /// present (same stack, marked connected). A seat added while a hand
    /// runs sits that hand out and becomes dealable from the next one.
    pub fn add_player(
        &mut self,
        id: PlayerId,
        name: &str,
        buy_in: Chips,
    ) -> Result<AddOutcome, TableError> {
        if let Some(seat) = self.seats.iter_mut().find(|p| p.id == id) {
            seat.connected = true;
            seat.name = name.to_string();
            return Ok(AddOutcome::Reconnected);
        }
        if self.seats.len() >= self.max_seats {
            return Err(TableError::TableFull);
        }
        let mut player = Player::new(id, name, buy_in, self.hand_number + 1);
        if self.phase != Phase::Waiting {
            // joined mid-hand; sits this one out
            player.folded = true;
            player.has_acted = true;
        }
        self.seats.push(player);
        Ok(AddOutcome::Added)
    }

    /// Vacates a seat. A seat leaving mid-hand is folded first so the
    /// hand can finish; chips it already committed stay in the pot.
    pub fn remove_player(&mut self, id: &PlayerId) -> bool {
        let Some(idx) = self.seat_of(id) else {
            return false;
        };
        if self.phase.is_betting() && !self.seats[idx].folded {
            self.seats[idx].folded = true;
            self.seats[idx].has_acted = true;
            self.resolve_after_action(idx);
        }
        self.seats.remove(idx);
        if self.seats.is_empty() {
            self.dealer_pos = 0;
            self.current_player = 0;
        } else {
            if idx < self.dealer_pos {
                self.dealer_pos -= 1;
            }
            self.dealer_pos %= self.seats.len();
            if idx < self.current_player {
                self.current_player -= 1;
            }
            self.current_player %= self.seats.len();
        }
        true
    }

    /// Flags a seat's connection state without vacating it. Disconnected
    /// seats keep their stack but are skipped when hands are dealt.
    pub fn set_connected(&mut self, id: &PlayerId, connected: bool) -> bool {
        match self.seats.iter_mut().find(|p| &p.id == id) {
            Some(seat) => {
                seat.connected = connected;
                true
            }
            None => false,
        }
    }

    fn funded_connected(&self) -> usize {
        self.seats
            .iter()
            .filter(|p| p.stack > 0 && p.connected)
            .count()
    }

    #[must_use]
    pub fn can_start_new_hand(&self) -> bool {
        matches!(self.phase, Phase::Waiting | Phase::Showdown) && self.funded_connected() >= 2
    }

    /// Deals a new hand: resets per-seat state, shuffles, deals two hole
    /// cards to each active seat (one card per seat per pass), posts
    /// blinds, and opens preflop betting. If blind posting already puts
    /// every unfolded seat all-in the hand runs out to showdown here.
    pub fn start_hand(&mut self) -> Result<Vec<DealtHand>, TableError> {
        if self.phase != Phase::Waiting {
            return Err(TableError::HandInProgress);
        }
        if self.funded_connected() < 2 {
            return Err(TableError::NotEnoughPlayers);
        }
        self.phase.transition(Phase::Preflop)?;
        self.hand_number += 1;
        self.deck = Deck::new_shuffled();
        self.community_cards.clear();
        self.current_bet = 0;
        self.last_result = None;

        for seat in &mut self.seats {
            seat.hole_cards.clear();
            seat.current_bet = 0;
            seat.total_bet = 0;
            if seat.eligible_from_hand > self.hand_number {
                // joined too recently; dealable from the next hand
                seat.folded = true;
                seat.all_in = false;
                seat.has_acted = true;
            } else if seat.stack == 0 || !seat.connected {
                seat.folded = true;
                seat.all_in = true;
                seat.has_acted = true;
            } else {
                seat.folded = false;
                seat.all_in = false;
                seat.has_acted = false;
            }
        }

        for _ in 0..constants::HOLE_CARD_COUNT {
            for idx in 0..self.seats.len() {
                if self.seats[idx].folded {
                    continue;
                }
                let card = self.deck.draw();
                self.seats[idx].hole_cards.push(card);
            }
        }

        self.post_blinds();

        if self.unfolded_count() <= 1 {
            self.finish_by_fold();
        } else if self.is_betting_round_complete() {
            self.advance_phase();
            self.fast_forward();
        }

        Ok(self
            .seats
            .iter()
            .filter(|s| !s.hole_cards.is_empty())
            .map(|s| DealtHand {
                player_id: s.id.clone(),
                cards: s.hole_cards.clone(),
            })
            .collect())
    }

    fn blind_eligible(player: &Player, hand_number: u32) -> bool {
        !player.folded
            && !player.all_in
            && player.stack > 0
            && player.connected
            && player.eligible_from_hand <= hand_number
    }

    /// Next seat strictly after `start`, wrapping, that satisfies `pred`.
    fn next_seat_where<F>(&self, start: SeatIndex, pred: F) -> Option<SeatIndex>
    where
        F: Fn(&Player) -> bool,
    {
        let n = self.seats.len();
        if n == 0 {
            return None;
        }
        (1..=n)
            .map(|offset| (start + offset) % n)
            .find(|&idx| pred(&self.seats[idx]))
    }

    fn post_blinds(&mut self) {
        let hand_number = self.hand_number;
        let eligible = |p: &Player| Self::blind_eligible(p, hand_number);
        let eligible_count = self.seats.iter().filter(|p| eligible(p)).count();
        if eligible_count < 2 {
            return;
        }
        let dealer = self.dealer_pos % self.seats.len();
        let heads_up = eligible_count == 2;
        // heads-up the dealer posts the small blind and acts first
        let sb_idx = if heads_up && eligible(&self.seats[dealer]) {
            dealer
        } else {
            match self.next_seat_where(dealer, &eligible) {
                Some(idx) => idx,
                None => return,
            }
        };
        let bb_idx = match self.next_seat_where(sb_idx, &eligible) {
            Some(idx) => idx,
            None => return,
        };

        let small = self.small_blind;
        let big = self.big_blind;
        let paid = self.seats[sb_idx].commit(small);
        self.pot += paid;
        let paid = self.seats[bb_idx].commit(big);
        self.pot += paid;
        // a short big blind is still the live bet
        self.current_bet = self.seats[bb_idx].current_bet;
        if heads_up {
            // heads-up the blind closes the big blind's preflop action
            // unless a raise reopens it
            self.seats[bb_idx].has_acted = true;
        }
        self.current_player = self
            .next_seat_where(bb_idx, |p: &Player| !p.folded && !p.all_in)
            .unwrap_or(bb_idx);
    }

    fn unfolded_count(&self) -> usize {
        self.seats.iter().filter(|p| !p.folded).count()
    }

    fn everyone_all_in(&self) -> bool {
        let mut unfolded = self.seats.iter().filter(|p| !p.folded);
        let Some(first) = unfolded.next() else {
            return false;
        };
        first.all_in && unfolded.all(|p| p.all_in)
    }

    /// A round is complete when every unfolded, non-all-in seat has
    /// acted and covers the live bet. All-in seats are never waited on.
    fn is_betting_round_complete(&self) -> bool {
        if self.unfolded_count() <= 1 {
            return true;
        }
        self.seats
            .iter()
            .filter(|p| !p.folded && !p.all_in)
            .all(|p| p.has_acted && p.current_bet >= self.current_bet)
    }

    /// Applies a betting action for `player_id`. Everything is validated
    /// up front; an error leaves the table exactly as it was.
    pub fn apply_action(&mut self, player_id: &PlayerId, action: Action) -> Result<(), TableError> {
        if !self.phase.is_betting() {
            return Err(TableError::NotBettingPhase);
        }
        let seat_idx = self.seat_of(player_id).ok_or(TableError::UnknownPlayer)?;
        {
            let seat = &self.seats[seat_idx];
            if seat.folded {
                return Err(TableError::AlreadyFolded);
            }
            if seat.all_in || seat.stack == 0 {
                return Err(TableError::CannotBet);
            }
            if seat_idx != self.current_player {
                return Err(TableError::OutOfTurn);
            }
            match action {
                Action::Raise(0) => return Err(TableError::InvalidRaise),
                Action::Check => {
                    let owed = self.current_bet.saturating_sub(seat.current_bet);
                    if owed > 0 {
                        return Err(TableError::CheckNotAllowed { owed });
                    }
                }
                _ => {}
            }
        }

        match action {
            Action::Fold => {
                let seat = &mut self.seats[seat_idx];
                seat.folded = true;
                seat.has_acted = true;
            }
            Action::Check => {
                self.seats[seat_idx].has_acted = true;
            }
            Action::Call => {
                let owed = self
                    .current_bet
                    .saturating_sub(self.seats[seat_idx].current_bet);
                let paid = self.seats[seat_idx].commit(owed);
                self.pot += paid;
                self.seats[seat_idx].has_acted = true;
            }
            Action::Raise(amount) => {
                let paid = self.seats[seat_idx].commit(amount);
                self.pot += paid;
                // the live bet never shrinks; a short all-in "raise"
                // leaves earlier bets standing
                self.current_bet = self.current_bet.max(self.seats[seat_idx].current_bet);
                self.seats[seat_idx].has_acted = true;
                for (idx, seat) in self.seats.iter_mut().enumerate() {
                    if idx != seat_idx && !seat.folded && !seat.all_in {
                        seat.has_acted = false;
                    }
                }
            }
        }

        self.resolve_after_action(seat_idx);
        Ok(())
    }

    /// After any seat's action (or forced fold): ends the hand if only
    /// one seat remains, advances the phase if the round is complete,
    /// otherwise passes the turn along.
    fn resolve_after_action(&mut self, actor_idx: SeatIndex) {
        if self.unfolded_count() <= 1 {
            self.finish_by_fold();
            return;
        }
        if self.is_betting_round_complete() {
            self.advance_phase();
            self.fast_forward();
            return;
        }
        if actor_idx == self.current_player {
            if let Some(next) = self.next_seat_where(actor_idx, |p: &Player| !p.folded && !p.all_in)
            {
                self.current_player = next;
            }
        }
    }

    /// Steps one phase forward with its dealing side effects.
    fn advance_phase(&mut self) {
        match self.phase {
            Phase::Preflop => {
                self.phase.advance();
                self.deck.burn();
                for _ in 0..3 {
                    let card = self.deck.draw();
                    self.community_cards.push(card);
                }
                self.reset_betting_round();
            }
            Phase::Flop | Phase::Turn => {
                self.phase.advance();
                self.deck.burn();
                let card = self.deck.draw();
                self.community_cards.push(card);
                self.reset_betting_round();
            }
            Phase::River => {
                self.phase.advance();
                self.settle_showdown();
            }
            Phase::Waiting | Phase::Showdown => {}
        }
    }

    /// Runs the board out while nobody can act.
    fn fast_forward(&mut self) {
        while self.phase.is_betting() && self.everyone_all_in() {
            self.advance_phase();
        }
    }

    fn reset_betting_round(&mut self) {
        self.current_bet = 0;
        for seat in &mut self.seats {
            seat.current_bet = 0;
            if !seat.folded && !seat.all_in {
                seat.has_acted = false;
            }
        }
        // postflop action starts left of the dealer
        if let Some(idx) = self.next_seat_where(self.dealer_pos, |p: &Player| {
            !p.folded && !p.all_in
        }) {
            self.current_player = idx;
        }
    }

    /// Ends the hand for a sole surviving seat, walking the phase chain
    /// to showdown without dealing anything.
    fn finish_by_fold(&mut self) {
        while self.phase != Phase::Showdown {
            self.phase.advance();
        }
        let amount = self.pot;
        self.pot = 0;
        if let Some(idx) = self.seats.iter().position(|p| !p.folded) {
            self.seats[idx].stack += amount;
            self.last_result = Some(HandResult::AllFolded {
                winner: self.seats[idx].id.clone(),
                amount,
            });
        } else {
            // nobody left to pay; the chips carry into the next pot
            self.pot = amount;
            self.last_result = None;
        }
    }

    /// Evaluates every unfolded seat against the board and pays the pot.
    /// Ties split evenly; indivisible chips go to the tied seats closest
    /// after the dealer, one each.
    fn settle_showdown(&mut self) {
        let contenders: Vec<SeatIndex> = (0..self.seats.len())
            .filter(|&i| !self.seats[i].folded)
            .collect();
        if contenders.is_empty() {
            self.last_result = None;
            return;
        }
        let ranks: Vec<HandRank> = contenders
            .iter()
            .map(|&i| {
                let mut cards = self.community_cards.clone();
                cards.extend(self.seats[i].hole_cards.iter().copied());
                evaluate(&cards)
            })
            .collect();
        let Some(best) = ranks.iter().max() else {
            return;
        };
        let mut winner_idxs: Vec<SeatIndex> = Vec::new();
        for (pos, &seat_idx) in contenders.iter().enumerate() {
            if &ranks[pos] == best {
                winner_idxs.push(seat_idx);
            }
        }
        let n = self.seats.len();
        let first = (self.dealer_pos + 1) % n;
        winner_idxs.sort_by_key(|&i| (i + n - first) % n);

        let amount = self.pot;
        self.pot = 0;
        let share = amount / winner_idxs.len() as Chips;
        let mut remainder = amount % winner_idxs.len() as Chips;
        for &i in &winner_idxs {
            let extra = if remainder > 0 {
                remainder -= 1;
                1
            } else {
                0
            };
            self.seats[i].stack += share + extra;
        }

        let reveals = contenders
            .iter()
            .zip(&ranks)
            .map(|(&i, rank)| {
                let seat = &self.seats[i];
                ShowdownReveal {
                    player_id: seat.id.clone(),
                    name: seat.name.clone(),
                    cards: seat.hole_cards.clone(),
                    category: rank.category,
                    label: rank.label(),
                }
            })
            .collect();
        self.last_result = Some(HandResult::Showdown {
            winners: winner_idxs
                .iter()
                .map(|&i| self.seats[i].id.clone())
                .collect(),
            amount,
            reveals,
            board: self.community_cards.clone(),
        });
    }

    /// Between hands: advances the dealer button and clears per-hand
    /// state. Returns false (and parks the table in Waiting) when fewer
    /// than two funded, connected seats remain.
    pub fn prepare_next_hand(&mut self) -> bool {
        if self.phase.is_betting() {
            return false;
        }
        if self.phase == Phase::Showdown {
            self.phase.advance();
        }
        if self.funded_connected() < 2 {
            return false;
        }
        if !self.seats.is_empty() {
            self.dealer_pos = (self.dealer_pos + 1) % self.seats.len();
        }
        self.community_cards.clear();
        self.current_bet = 0;
        for seat in &mut self.seats {
            seat.reset_for_hand();
        }
        true
    }

    /// Serializable view of the table for one viewer. Hole cards are
    /// only included for the viewer's own seat.
    #[must_use]
    pub fn snapshot(&self, viewer: Option<&PlayerId>) -> TableView {
        TableView {
            id: self.id,
            seats: self
                .seats
                .iter()
                .map(|seat| SeatView {
                    id: seat.id.clone(),
                    name: seat.name.clone(),
                    stack: seat.stack,
                    current_bet: seat.current_bet,
                    total_bet: seat.total_bet,
                    folded: seat.folded,
                    all_in: seat.all_in,
                    connected: seat.connected,
                    hole_cards: if viewer == Some(&seat.id) {
                        seat.hole_cards.clone()
                    } else {
                        Vec::new()
                    },
                    can_bet: seat.can_bet(),
                })
                .collect(),
            community_cards: self.community_cards.clone(),
            pot: self.pot,
            current_bet: self.current_bet,
            phase: self.phase,
            current_player: self.current_player,
            dealer_pos: self.dealer_pos,
            hand_number: self.hand_number,
            can_start_new_hand: self.can_start_new_hand(),
            last_result: self.last_result.clone(),
        }
    }
}
