//! Chess rules engine.
//!
//! The board owns an 8x8 array of cells; pieces live in those cells by value
//! and refer back to their square by index. On top of that:
//! - `movement`: what each piece kind can reach and what it attacks
//! - `castling`: the king+rook compound move and its preconditions
//! - `legality`: check detection and the simulate-and-revert legality probe
//! - `board`: move execution, en passant and promotion bookkeeping
//! - `game`: turn order, status and undo for a presentation layer
//!
//! The engine is synchronous. A host sharing one board between threads must
//! hold a single lock across each legality probe, since `is_legal` mutates
//! the board and restores it before returning.

pub mod board;
pub mod castling;
pub mod cell;
pub mod config;
pub mod error;
pub mod game;
pub mod legality;
pub mod movement;
pub mod placement;
pub mod types;

pub use board::*;
pub use castling::*;
pub use cell::*;
pub use config::*;
pub use error::RulesError;
pub use game::*;
pub use placement::*;
pub use types::*;
