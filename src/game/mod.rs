//! Core game engine.
//!
//! Everything in this module is pure and synchronous: no I/O, no async,
//! no clocks. The hosting layer in [`crate::table`] drives it.

pub mod constants;
pub mod entities;
pub mod errors;
pub mod eval;
pub mod phase;
pub mod table;
