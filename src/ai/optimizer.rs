//! Budget optimizer: 0/1 knapsack over candidate actions
//!
//! Costs are integers, so the classic dynamic program over remaining budget
//! gives the exact optimum. The table width is capped at the total cost of
//! the paid items, which keeps large budgets cheap.
//!
//! Selection rules:
//! - zero-cost items with positive score are always taken;
//! - items with non-positive score are never taken;
//! - among equal-value subsets, the one containing the single highest-scoring
//!   item wins.

use crate::ai::candidate::CandidateAction;

/// Score differences below this are treated as ties
const SCORE_EPSILON: f64 = 1e-9;

/// Subset chosen by the optimizer, as indices into its input
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    /// Ascending indices into the input slice
    pub indices: Vec<usize>,
    pub total_score: f64,
    pub total_cost: u32,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[derive(Clone, Copy)]
struct Item {
    index: usize,
    cost: u32,
    score: f64,
}

/// Best subset of `(cost, score)` pairs whose total cost fits in `budget`
pub fn optimize(items: &[(u32, f64)], budget: u32) -> Selection {
    let mut free: Vec<usize> = Vec::new();
    let mut paid: Vec<Item> = Vec::new();
    for (index, &(cost, score)) in items.iter().enumerate() {
        if score <= 0.0 || cost > budget {
            continue;
        }
        if cost == 0 {
            free.push(index);
        } else {
            paid.push(Item { index, cost, score });
        }
    }

    let (best_value, mut best_paid) = solve(&paid, budget);

    // Tie-break toward the subset holding the top-scoring item. A free top
    // item is always included, so only a paid one needs the forced solve.
    let mut top: Option<(usize, f64)> = None;
    for (index, &(cost, score)) in items.iter().enumerate() {
        if score <= 0.0 || cost > budget {
            continue;
        }
        if top.map_or(true, |(_, best)| score > best) {
            top = Some((index, score));
        }
    }

    if let Some((top_index, _)) = top {
        let forced = paid.iter().copied().find(|item| item.index == top_index);
        if let Some(forced) = forced {
            if !best_paid.contains(&top_index) {
                let rest: Vec<Item> = paid
                    .iter()
                    .copied()
                    .filter(|item| item.index != top_index)
                    .collect();
                let (rest_value, mut rest_paid) = solve(&rest, budget - forced.cost);
                if rest_value + forced.score >= best_value - SCORE_EPSILON {
                    rest_paid.push(top_index);
                    best_paid = rest_paid;
                }
            }
        }
    }

    let mut indices = free;
    indices.extend(best_paid);
    indices.sort_unstable();

    let total_score = indices.iter().map(|&i| items[i].1).sum();
    let total_cost = indices.iter().map(|&i| items[i].0).sum();
    debug_assert!(total_cost <= budget);

    Selection {
        indices,
        total_score,
        total_cost,
    }
}

/// Optimizer entry point over candidate actions
pub fn select_actions(candidates: &[CandidateAction], budget: u32) -> Selection {
    let items: Vec<(u32, f64)> = candidates.iter().map(|c| (c.cost, c.score)).collect();
    optimize(&items, budget)
}

/// Exact 0/1 knapsack over strictly positive costs
///
/// Returns the optimal value and the chosen original indices.
fn solve(items: &[Item], budget: u32) -> (f64, Vec<usize>) {
    if items.is_empty() {
        return (0.0, Vec::new());
    }

    let total_cost: u64 = items.iter().map(|item| item.cost as u64).sum();
    let cap = (budget as u64).min(total_cost) as usize;
    let width = cap + 1;

    let mut best = vec![0.0_f64; width];
    let mut keep = vec![false; items.len() * width];

    for (i, item) in items.iter().enumerate() {
        let cost = item.cost as usize;
        if cost > cap {
            continue;
        }
        for w in (cost..=cap).rev() {
            let with_item = best[w - cost] + item.score;
            if with_item > best[w] {
                best[w] = with_item;
                keep[i * width + w] = true;
            }
        }
    }

    let mut chosen = Vec::new();
    let mut w = cap;
    for i in (0..items.len()).rev() {
        if keep[i * width + w] {
            chosen.push(items[i].index);
            w -= items[i].cost as usize;
        }
    }

    (best[cap], chosen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worked_example() {
        let items = [(3, 10.0), (2, 6.0), (4, 9.0)];
        let selection = optimize(&items, 5);
        assert_eq!(selection.indices, vec![0, 1]);
        assert_eq!(selection.total_score, 16.0);
        assert_eq!(selection.total_cost, 5);
    }

    #[test]
    fn test_zero_cost_items_always_taken() {
        let items = [(0, 1.0), (0, 2.5), (0, 0.1)];
        let selection = optimize(&items, 0);
        assert_eq!(selection.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_zero_cost_mixed_with_paid() {
        let items = [(0, 1.0), (2, 5.0), (3, 4.0)];
        let selection = optimize(&items, 2);
        assert_eq!(selection.indices, vec![0, 1]);
    }

    #[test]
    fn test_non_positive_scores_excluded() {
        let items = [(0, 0.0), (1, -3.0), (1, 2.0), (0, -1.0)];
        let selection = optimize(&items, 5);
        assert_eq!(selection.indices, vec![2]);
    }

    #[test]
    fn test_unaffordable_items_excluded() {
        let items = [(6, 100.0), (1, 1.0)];
        let selection = optimize(&items, 5);
        assert_eq!(selection.indices, vec![1]);
    }

    #[test]
    fn test_tie_prefers_subset_with_top_item() {
        // {0} and {1, 2} are both worth 5
        let items = [(1, 3.0), (2, 5.0), (1, 2.0)];
        let selection = optimize(&items, 2);
        assert_eq!(selection.indices, vec![1]);
        assert_eq!(selection.total_score, 5.0);
    }

    #[test]
    fn test_strictly_better_subset_beats_top_item() {
        let items = [(3, 10.0), (2, 6.0), (2, 6.0)];
        let selection = optimize(&items, 4);
        assert_eq!(selection.indices, vec![1, 2]);
        assert_eq!(selection.total_score, 12.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(optimize(&[], 10).is_empty());
    }

    #[test]
    fn test_huge_budget() {
        let items = [(1, 1.0), (2, 2.0)];
        let selection = optimize(&items, u32::MAX);
        assert_eq!(selection.indices, vec![0, 1]);
        assert_eq!(selection.total_cost, 3);
    }
}
