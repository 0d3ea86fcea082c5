//! Heuristic decision engine
//!
//! Single-ply greedy planning: evaluate candidate actions, pick the best
//! affordable subset, commit its top action and replan. Combat decisions use
//! one-on-one outcome classification. Nothing here searches or simulates
//! future turns.

pub mod attack;
pub mod block;
pub mod candidate;
pub mod choice;
pub mod combat;
pub mod config;
pub mod evaluator;
pub mod optimizer;
pub mod player;
pub mod sequencer;
pub mod target;

pub use attack::AttackPlanner;
pub use block::{BlockMatchup, BlockPlanner};
pub use candidate::{ActionKind, CandidateAction};
pub use choice::{ChoicePrompt, HeuristicTag};
pub use combat::{classify, favorably_blocks, CombatStats, OutcomeCategory};
pub use config::AiConfig;
pub use evaluator::ActionEvaluator;
pub use optimizer::{optimize, select_actions, Selection};
pub use player::{AiPlayer, Decision};
pub use sequencer::{ActionSequencer, SequenceReport, StopReason};
