//! Table hosting.
//!
//! Each live table runs as one tokio task ([`TableActor`]) that owns the
//! game state and drains a message inbox, so every mutation is
//! serialized without locks around the game itself. [`TableManager`]
//! keeps the collection of running tables keyed by id.

pub mod actor;
pub mod config;
pub mod manager;
pub mod messages;

pub use actor::{TableActor, TableHandle};
pub use config::TableConfig;
pub use manager::TableManager;
pub use messages::{TableEvent, TableMessage};
