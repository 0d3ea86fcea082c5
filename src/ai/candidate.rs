//! Scored, costed moves produced by the action evaluator

use crate::core::{CardId, EffectId, Target};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The move a candidate would make if committed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActionKind {
    PlayCard {
        card: CardId,
        target: Option<Target>,
        host: Option<CardId>,
    },
    ModifyEffect {
        effect: EffectId,
    },
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::PlayCard { card, target, host } => {
                write!(f, "play card {card}")?;
                if let Some(target) = target {
                    write!(f, " targeting {target}")?;
                }
                if let Some(host) = host {
                    write!(f, " attached to unit {host}")?;
                }
                Ok(())
            }
            ActionKind::ModifyEffect { effect } => write!(f, "modify effect {effect}"),
        }
    }
}

/// An evaluated move, valid only for the planning cycle that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateAction {
    pub kind: ActionKind,
    pub score: f64,
    pub cost: u32,
}

impl CandidateAction {
    pub fn new(kind: ActionKind, score: f64, cost: u32) -> Self {
        CandidateAction { kind, score, cost }
    }

    /// Neutral stand-in for a candidate whose evaluation failed
    pub fn placeholder(kind: ActionKind) -> Self {
        CandidateAction {
            kind,
            score: 0.0,
            cost: 0,
        }
    }

    pub fn is_worth_playing(&self, budget: u32) -> bool {
        self.score > 0.0 && self.cost <= budget
    }
}

impl fmt::Display for CandidateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (score {:.2}, cost {})", self.kind, self.score, self.cost)
    }
}
