use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::grid::Coord;
use crate::path::Path;
use crate::tour::{TourPlan, VisitPolicy};

/// Presentation style for textual renderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    PlainText,
    Compact,
}

/// Structured representation of a single committed path that higher-level
/// consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PathSummary {
    pub from: Coord,
    pub to: Coord,
    pub steps: Vec<Coord>,
    pub cost: u32,
}

impl PathSummary {
    /// Convert a search result into a summary, rejecting the no-route
    /// sentinel.
    pub fn from_path(from: Coord, to: Coord, path: &Path) -> Result<Self> {
        if path.is_empty() {
            return Err(Error::NoPath { from, to });
        }
        Ok(Self {
            from,
            to,
            steps: path.steps.clone(),
            cost: path.cost,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RenderMode) -> String {
        match mode {
            RenderMode::PlainText => self.render_plain(),
            RenderMode::Compact => self.render_compact(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Path: {} -> {} ({} steps, cost: {})",
            self.from,
            self.to,
            self.steps.len(),
            self.cost
        );
        let joined = self
            .steps
            .iter()
            .map(|step| step.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        let _ = writeln!(buffer, "{joined}");
        buffer
    }

    fn render_compact(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "{} -> {} steps={} cost={}",
            self.from,
            self.to,
            self.steps.len(),
            self.cost
        );
        buffer
    }
}

/// One leg within a [`TourSummary`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LegSummary {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    pub from: Coord,
    pub to: Coord,
    pub steps: usize,
    pub cost: u32,
}

impl LegSummary {
    fn display_destination(&self) -> &str {
        self.destination.as_deref().unwrap_or("home")
    }
}

/// Structured representation of a planned tour that higher-level consumers
/// can serialise.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TourSummary {
    pub policy: VisitPolicy,
    pub start: Coord,
    pub home: Coord,
    pub visited: Vec<String>,
    pub legs: Vec<LegSummary>,
    pub total_cost: u32,
}

impl TourSummary {
    /// Convert a [`TourPlan`] into a structured summary.
    pub fn from_plan(plan: &TourPlan) -> Result<Self> {
        if plan.legs.is_empty() || plan.legs.iter().any(|leg| leg.path.is_empty()) {
            return Err(Error::EmptyTourPlan);
        }

        let legs = plan
            .legs
            .iter()
            .enumerate()
            .map(|(index, leg)| LegSummary {
                index,
                destination: leg.target.as_ref().map(|target| target.label.clone()),
                from: leg.path.start().expect("validated non-empty leg"),
                to: leg.path.end().expect("validated non-empty leg"),
                steps: leg.path.len(),
                cost: leg.path.cost,
            })
            .collect::<Vec<_>>();

        let visited = plan
            .visited_targets()
            .into_iter()
            .map(str::to_string)
            .collect();

        Ok(Self {
            policy: plan.policy,
            start: plan.start,
            home: plan.home,
            visited,
            legs,
            total_cost: plan.total_cost,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RenderMode) -> String {
        match mode {
            RenderMode::PlainText => self.render_plain(),
            RenderMode::Compact => self.render_compact(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Tour: {} -> {} ({} legs, policy: {}, total cost: {})",
            self.start,
            self.home,
            self.legs.len(),
            self.policy,
            self.total_cost
        );
        for leg in &self.legs {
            let _ = writeln!(
                buffer,
                "{:>3}: {} {} -> {} ({} steps, cost: {})",
                leg.index,
                leg.display_destination(),
                leg.from,
                leg.to,
                leg.steps,
                leg.cost
            );
        }
        buffer
    }

    fn render_compact(&self) -> String {
        let mut buffer = String::new();
        let stops = self
            .legs
            .iter()
            .map(|leg| leg.display_destination().to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        let _ = writeln!(buffer, "{stops} (total cost {})", self.total_cost);
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CostTable, GridModel, TerrainGrid};
    use crate::path::find_path;
    use crate::tour::{plan_tour, Target, TourRequest};

    fn model(text: &str) -> GridModel {
        let grid = TerrainGrid::parse(text).expect("grid parses");
        GridModel::new(grid, CostTable::default()).expect("classes covered")
    }

    fn corridor_plan() -> TourPlan {
        let model = model("11111\n");
        let request = TourRequest::new(
            Coord::new(0, 0),
            vec![Target {
                label: "east".to_string(),
                x: 4,
                y: 0,
            }],
        );
        plan_tour(&model, &request).expect("tour plans")
    }

    #[test]
    fn path_summary_rejects_the_no_route_sentinel() {
        let error = PathSummary::from_path(Coord::new(0, 0), Coord::new(1, 1), &Path::empty())
            .expect_err("empty path");
        assert!(matches!(error, Error::NoPath { .. }));
    }

    #[test]
    fn path_summary_renders_header_and_steps() {
        let model = model("111\n");
        let path = find_path(&model, Coord::new(0, 0), Coord::new(2, 0)).expect("search runs");
        let summary =
            PathSummary::from_path(Coord::new(0, 0), Coord::new(2, 0), &path).expect("non-empty");
        let text = summary.render(RenderMode::PlainText);
        assert!(text.contains("Path: (0, 0) -> (2, 0) (3 steps, cost: 2)"));
        assert!(text.contains("(0, 0) -> (1, 0) -> (2, 0)"));
    }

    #[test]
    fn path_summary_compact_render_is_one_line() {
        let model = model("111\n");
        let path = find_path(&model, Coord::new(0, 0), Coord::new(2, 0)).expect("search runs");
        let summary =
            PathSummary::from_path(Coord::new(0, 0), Coord::new(2, 0), &path).expect("non-empty");
        let text = summary.render(RenderMode::Compact);
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("steps=3 cost=2"));
    }

    #[test]
    fn tour_summary_labels_the_homeward_leg() {
        let summary = TourSummary::from_plan(&corridor_plan()).expect("plan summarises");
        assert_eq!(summary.visited, vec!["east"]);
        assert_eq!(summary.legs.len(), 2);
        assert_eq!(summary.legs[1].destination, None);
        let text = summary.render(RenderMode::PlainText);
        assert!(text.contains("east"));
        assert!(text.contains("home"));
        assert!(text.contains("total cost: 8"));
    }

    #[test]
    fn tour_summary_compact_render_chains_stops() {
        let summary = TourSummary::from_plan(&corridor_plan()).expect("plan summarises");
        let text = summary.render(RenderMode::Compact);
        assert_eq!(text.trim(), "east -> home (total cost 8)");
    }

    #[test]
    fn tour_summary_rejects_planless_input() {
        let plan = TourPlan {
            policy: VisitPolicy::CostGreedy,
            start: Coord::new(0, 0),
            home: Coord::new(0, 0),
            legs: Vec::new(),
            total_cost: 0,
        };
        let error = TourSummary::from_plan(&plan).expect_err("no legs");
        assert!(matches!(error, Error::EmptyTourPlan));
    }

    #[test]
    fn tour_summary_serialises_to_json() {
        let summary = TourSummary::from_plan(&corridor_plan()).expect("plan summarises");
        let json = serde_json::to_value(&summary).expect("summary serialises");
        assert_eq!(json["policy"], "cost-greedy");
        assert_eq!(json["total_cost"], 8);
        assert_eq!(json["legs"][0]["destination"], "east");
        // The homeward leg omits its destination field entirely.
        assert!(json["legs"][1].get("destination").is_none());
    }
}
