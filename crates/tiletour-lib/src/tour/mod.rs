//! Multi-target visitation planning on top of the pathfinder.

mod selector;

pub use selector::{create_selector, CostGreedySelector, DistanceGreedySelector, LegSelector};

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::{Coord, GridModel};
use crate::path::{find_path, Path};

/// Order in which the planner visits its targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisitPolicy {
    /// Visit the target with the cheapest committed path next.
    #[default]
    CostGreedy,
    /// Visit the nearest target by Manhattan distance next.
    DistanceGreedy,
}

impl fmt::Display for VisitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisitPolicy::CostGreedy => write!(f, "cost-greedy"),
            VisitPolicy::DistanceGreedy => write!(f, "distance-greedy"),
        }
    }
}

/// How many roster targets a tour should visit before heading home.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VisitQuota {
    /// Visit every target on the roster.
    #[default]
    All,
    /// Visit at most this many targets.
    Limit(usize),
}

impl VisitQuota {
    /// Number of visits to plan against a roster of `roster_len` targets.
    pub fn effective(self, roster_len: usize) -> usize {
        match self {
            VisitQuota::All => roster_len,
            VisitQuota::Limit(limit) => limit.min(roster_len),
        }
    }
}

/// Named destination on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub label: String,
    pub x: i32,
    pub y: i32,
}

impl Target {
    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }
}

/// Parameters for one tour plan.
#[derive(Debug, Clone)]
pub struct TourRequest {
    pub start: Coord,
    pub home: Coord,
    pub targets: Vec<Target>,
    pub quota: VisitQuota,
    pub policy: VisitPolicy,
}

impl TourRequest {
    /// Tour that starts and ends at `start`, visiting the whole roster
    /// under the default policy.
    pub fn new(start: Coord, targets: Vec<Target>) -> Self {
        Self {
            start,
            home: start,
            targets,
            quota: VisitQuota::All,
            policy: VisitPolicy::default(),
        }
    }

    pub fn with_home(mut self, home: Coord) -> Self {
        self.home = home;
        self
    }

    pub fn with_quota(mut self, quota: VisitQuota) -> Self {
        self.quota = quota;
        self
    }

    pub fn with_policy(mut self, policy: VisitPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// One committed leg of a tour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TourLeg {
    /// Destination target, or `None` for the closing leg home.
    pub target: Option<Target>,
    pub path: Path,
}

impl TourLeg {
    pub fn cost(&self) -> u32 {
        self.path.cost
    }
}

/// Fully committed tour: the visit legs in order plus the leg home.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TourPlan {
    pub policy: VisitPolicy,
    pub start: Coord,
    pub home: Coord,
    pub legs: Vec<TourLeg>,
    pub total_cost: u32,
}

impl TourPlan {
    /// Labels of the visited targets in visiting order.
    pub fn visited_targets(&self) -> Vec<&str> {
        self.legs
            .iter()
            .filter_map(|leg| leg.target.as_ref().map(|target| target.label.as_str()))
            .collect()
    }
}

/// Plan a tour: visit targets leg by leg under the requested policy, then
/// head home.
///
/// Every leg is committed before the next is considered, so the plan is a
/// chain of locally greedy choices rather than a globally optimal circuit.
/// A target that is unreachable this round stays on the roster and is
/// reconsidered after every later leg; the planner only fails when a visit
/// is still owed and nothing on the roster can be reached.
pub fn plan_tour(model: &GridModel, request: &TourRequest) -> Result<TourPlan> {
    model.grid().class_at(request.start)?;
    model.grid().class_at(request.home)?;

    let selector = create_selector(request.policy);
    let visits = request.quota.effective(request.targets.len());

    debug!(
        policy = %request.policy,
        start = %request.start,
        home = %request.home,
        roster = request.targets.len(),
        visits,
        "planning tour"
    );

    let mut remaining = request.targets.clone();
    let mut position = request.start;
    let mut legs = Vec::with_capacity(visits + 1);

    for round in 0..visits {
        let Some((index, path)) = selector.select_next(model, position, &remaining)? else {
            return Err(Error::NoReachableTarget {
                from: position,
                remaining: remaining.len(),
            });
        };
        let target = remaining.remove(index);
        debug!(round, target = %target.label, cost = path.cost, "leg committed");
        position = target.coord();
        legs.push(TourLeg {
            target: Some(target),
            path,
        });
    }

    let home_path = find_path(model, position, request.home)?;
    if home_path.is_empty() {
        return Err(Error::NoPath {
            from: position,
            to: request.home,
        });
    }
    debug!(cost = home_path.cost, "homeward leg committed");
    legs.push(TourLeg {
        target: None,
        path: home_path,
    });

    let total_cost = legs.iter().map(TourLeg::cost).sum();
    Ok(TourPlan {
        policy: request.policy,
        start: request.start,
        home: request.home,
        legs,
        total_cost,
    })
}
