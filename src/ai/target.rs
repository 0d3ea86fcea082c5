//! Best-target selection

use crate::Result;

/// The chosen target and the incremental score it adds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetChoice<T> {
    pub target: Option<T>,
    pub score: f64,
}

impl<T> TargetChoice<T> {
    pub fn none() -> Self {
        TargetChoice {
            target: None,
            score: 0.0,
        }
    }
}

/// Pick the target maximizing `score`
///
/// An empty candidate set yields "no valid target" with score 0. On ties the
/// earliest target wins. The first scoring error is returned.
pub fn best_target<T, F>(targets: &[T], mut score: F) -> Result<TargetChoice<T>>
where
    T: Copy,
    F: FnMut(T) -> Result<f64>,
{
    let mut best = TargetChoice::none();
    for &target in targets {
        let value = score(target)?;
        if best.target.is_none() || value > best.score {
            best = TargetChoice {
                target: Some(target),
                score: value,
            };
        }
    }
    Ok(best)
}
