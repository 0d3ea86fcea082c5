//! The engine's view of the game: collaborator traits, logging and an
//! in-memory table to play against

pub mod logger;
pub mod table;
pub mod view;

pub use logger::{AiLogger, LogEntry, OutputMode, VerbosityLevel};
pub use table::{evaluate_unit, CommittedAction, Table, TableSnapshot};
pub use view::{EvalContext, GameActions, GameView, Phase};
