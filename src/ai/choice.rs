//! Heuristics for forced multi-select prompts
//!
//! Each prompt names a [`HeuristicTag`]; the tag selects a pure function from
//! a fixed table. The functions only see the candidates, the bounds and a
//! small [`ChoiceContext`], never the game itself.

use crate::core::CardId;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeuristicTag {
    Draw,
    Discard,
    Replace,
    HighestStats,
}

impl HeuristicTag {
    pub const ALL: [HeuristicTag; 4] = [
        HeuristicTag::Draw,
        HeuristicTag::Discard,
        HeuristicTag::Replace,
        HeuristicTag::HighestStats,
    ];

    /// Position of this tag's entry in [`REGISTRY`]
    pub const fn index(self) -> usize {
        match self {
            HeuristicTag::Draw => 0,
            HeuristicTag::Discard => 1,
            HeuristicTag::Replace => 2,
            HeuristicTag::HighestStats => 3,
        }
    }
}

/// A forced multi-select posed by the environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoicePrompt {
    pub tag: HeuristicTag,
    pub candidates: Vec<CardId>,
    pub min: usize,
    pub max: usize,
}

/// What a heuristic knows about each candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceCandidate {
    pub card: CardId,
    pub cost: u32,
    pub power: i32,
    pub life: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChoiceContext {
    /// Resources available right now
    pub budget: u32,
    /// Average budget distance over the player's known card pool
    pub pool_average: f64,
}

impl ChoiceContext {
    /// How far a card's cost is from what can be spent now
    pub fn budget_distance(&self, cost: u32) -> u32 {
        self.budget.abs_diff(cost)
    }

    pub fn with_pool(budget: u32, pool_costs: &[u32]) -> Self {
        let mut ctx = ChoiceContext {
            budget,
            pool_average: 0.0,
        };
        if !pool_costs.is_empty() {
            let total: f64 = pool_costs
                .iter()
                .map(|&cost| ctx.budget_distance(cost) as f64)
                .sum();
            ctx.pool_average = total / pool_costs.len() as f64;
        }
        ctx
    }
}

pub type ChoiceFn = fn(&ChoiceContext, &[ChoiceCandidate], usize, usize) -> Vec<CardId>;

/// Dispatch table indexed by [`HeuristicTag::index`]
pub const REGISTRY: [ChoiceFn; HeuristicTag::ALL.len()] = [
    choose_draw,
    choose_discard,
    choose_replace,
    choose_highest_stats,
];

pub fn heuristic_for(tag: HeuristicTag) -> ChoiceFn {
    REGISTRY[tag.index()]
}

/// Run the heuristic for `tag`, or return every candidate when there are
/// fewer than `min` of them
pub fn resolve(
    tag: HeuristicTag,
    ctx: &ChoiceContext,
    candidates: &[ChoiceCandidate],
    min: usize,
    max: usize,
) -> Vec<CardId> {
    if candidates.len() < min {
        return candidates.iter().map(|c| c.card).collect();
    }
    heuristic_for(tag)(ctx, candidates, min, max)
}

/// Closest to the current budget first
pub fn choose_draw(ctx: &ChoiceContext, candidates: &[ChoiceCandidate], _min: usize, max: usize) -> Vec<CardId> {
    let mut ranked = candidates.to_vec();
    ranked.sort_by_key(|c| ctx.budget_distance(c.cost));
    ranked.into_iter().take(max).map(|c| c.card).collect()
}

/// Furthest from the current budget first
pub fn choose_discard(ctx: &ChoiceContext, candidates: &[ChoiceCandidate], min: usize, _max: usize) -> Vec<CardId> {
    discard_ranking(ctx, candidates)
        .into_iter()
        .take(min)
        .map(|c| c.card)
        .collect()
}

/// `min` cards are replaced unconditionally; further cards only while they
/// are further from the budget than the pool average
pub fn choose_replace(ctx: &ChoiceContext, candidates: &[ChoiceCandidate], min: usize, max: usize) -> Vec<CardId> {
    let ranked = discard_ranking(ctx, candidates);
    let mandatory = min.min(ranked.len());
    let mut chosen: Vec<CardId> = ranked[..mandatory].iter().map(|c| c.card).collect();

    let mut optional: Vec<ChoiceCandidate> = ranked[mandatory..]
        .iter()
        .copied()
        .filter(|c| ctx.budget_distance(c.cost) as f64 > ctx.pool_average)
        .collect();
    optional.sort_by_key(|c| ctx.budget_distance(c.cost));

    let room = max.saturating_sub(chosen.len());
    chosen.extend(optional.into_iter().take(room).map(|c| c.card));
    chosen
}

/// Largest power + life first
pub fn choose_highest_stats(
    _ctx: &ChoiceContext,
    candidates: &[ChoiceCandidate],
    _min: usize,
    max: usize,
) -> Vec<CardId> {
    let mut ranked = candidates.to_vec();
    ranked.sort_by_key(|c| Reverse(c.power + c.life));
    ranked.into_iter().take(max).map(|c| c.card).collect()
}

fn discard_ranking(ctx: &ChoiceContext, candidates: &[ChoiceCandidate]) -> Vec<ChoiceCandidate> {
    let mut ranked = candidates.to_vec();
    ranked.sort_by_key(|c| Reverse(ctx.budget_distance(c.cost)));
    ranked
}
