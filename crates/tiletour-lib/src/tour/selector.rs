use tracing::{debug, warn};

use crate::error::Result;
use crate::grid::{Coord, GridModel};
use crate::path::{find_path, Path};
use crate::tour::{Target, VisitPolicy};

/// Strategy for choosing which remaining target a tour visits next.
pub trait LegSelector: Send + Sync {
    /// Policy this selector implements.
    fn policy(&self) -> VisitPolicy;

    /// Pick the next target out of `remaining`, returning its index and the
    /// path that commits the leg, or `None` when no remaining target is
    /// reachable from `from`.
    fn select_next(
        &self,
        model: &GridModel,
        from: Coord,
        remaining: &[Target],
    ) -> Result<Option<(usize, Path)>>;
}

/// Picks the remaining target with the cheapest committed path.
///
/// Runs a full search per candidate, so each planning step costs one search
/// per remaining target. Ties go to the earliest roster position.
pub struct CostGreedySelector;

impl LegSelector for CostGreedySelector {
    fn policy(&self) -> VisitPolicy {
        VisitPolicy::CostGreedy
    }

    fn select_next(
        &self,
        model: &GridModel,
        from: Coord,
        remaining: &[Target],
    ) -> Result<Option<(usize, Path)>> {
        let mut best: Option<(usize, Path)> = None;
        for (index, target) in remaining.iter().enumerate() {
            let path = find_path(model, from, target.coord())?;
            if path.is_empty() {
                debug!(target = %target.label, "target unreachable this round");
                continue;
            }
            let better = match &best {
                Some((_, incumbent)) => path.cost < incumbent.cost,
                None => true,
            };
            if better {
                best = Some((index, path));
            }
        }
        Ok(best)
    }
}

/// Picks the remaining target nearest by Manhattan distance, falling back
/// to the next-nearest when the nearest cannot be reached.
///
/// Distance ties keep roster order. Skipped unreachable candidates are
/// logged because the straight-line ranking said they should have come
/// first.
pub struct DistanceGreedySelector;

impl LegSelector for DistanceGreedySelector {
    fn policy(&self) -> VisitPolicy {
        VisitPolicy::DistanceGreedy
    }

    fn select_next(
        &self,
        model: &GridModel,
        from: Coord,
        remaining: &[Target],
    ) -> Result<Option<(usize, Path)>> {
        let mut order: Vec<usize> = (0..remaining.len()).collect();
        order.sort_by_key(|&index| from.manhattan_distance(&remaining[index].coord()));

        for index in order {
            let target = &remaining[index];
            let path = find_path(model, from, target.coord())?;
            if path.is_empty() {
                warn!(
                    target = %target.label,
                    distance = from.manhattan_distance(&target.coord()),
                    "nearest-ranked target is unreachable; trying the next one"
                );
                continue;
            }
            return Ok(Some((index, path)));
        }
        Ok(None)
    }
}

/// Instantiate the selector for a policy.
pub fn create_selector(policy: VisitPolicy) -> Box<dyn LegSelector> {
    match policy {
        VisitPolicy::CostGreedy => Box::new(CostGreedySelector),
        VisitPolicy::DistanceGreedy => Box::new(DistanceGreedySelector),
    }
}
