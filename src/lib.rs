//! duel-ai - heuristic decision engine for a two-player card game
//!
//! Evaluates the cards and effects available to one player, spends the
//! turn's resources on the best affordable set of actions, and plans attacks,
//! blocks and forced choices. The engine reads the game through
//! [`game::GameView`] and commits through [`game::GameActions`].

pub mod ai;
pub mod core;
pub mod error;
pub mod game;

pub use error::{AiError, Result};
