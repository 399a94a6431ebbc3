//! # Holdem Engine
//!
//! A real-time multiplayer table engine for fixed-limit Texas Hold'em.
//!
//! The engine manages the lifecycle of one table from seating through
//! successive hands: dealing, blind posting, multi-street betting,
//! showdown, and hand ranking. It holds only in-memory, per-table state;
//! transport, persistence, authentication, and matchmaking live outside.
//!
//! ## Architecture
//!
//! - [`game`]: the pure, synchronous engine. [`game::table::Table`] is a
//!   state machine driven by discrete operations (`add_player`,
//!   `start_hand`, `apply_action`, `prepare_next_hand`, `snapshot`), and
//!   [`game::eval`] ranks the best five of up to seven cards.
//! - [`table`]: the hosting layer. Each table runs as one tokio actor
//!   ([`table::TableActor`]) so all mutations are serialized, and
//!   [`table::TableManager`] owns the keyed collection of live tables.
//!
//! ## Example
//!
//! ```
//! use holdem_engine::game::{entities::PlayerId, table::Table};
//! use uuid::Uuid;
//!
//! let mut table = Table::new(Uuid::new_v4(), 10, 20, 6);
//! table.add_player(PlayerId::new("p1"), "Alice", 1000).unwrap();
//! table.add_player(PlayerId::new("p2"), "Bob", 1000).unwrap();
//! let dealt = table.start_hand().unwrap();
//! assert_eq!(dealt.len(), 2);
//! ```

/// Core game engine: cards, hand evaluation, and the table state machine.
pub mod game;
pub use game::{
    constants,
    entities::{self, Action, Card, Chips, PlayerId, Suit, TableId},
    errors::TableError,
    eval::{HandCategory, HandRank},
    phase::Phase,
};

/// Table hosting: configuration, per-table actors, and the table manager.
pub mod table;
pub use table::{TableConfig, TableEvent, TableHandle, TableManager};
