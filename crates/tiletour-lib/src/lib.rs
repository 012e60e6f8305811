//! Tiletour library entry points.
//!
//! This crate exposes helpers to load weighted tile grids and cost tables,
//! run the grid pathfinder, and plan multi-target visitation tours.
//! Higher-level consumers (the CLI in particular) should only depend on the
//! functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod grid;
pub mod heap;
pub mod mapfile;
pub mod output;
pub mod path;
pub mod tour;

pub use error::{Error, Result};
pub use grid::{CellCost, Coord, CostTable, GridModel, TerrainGrid};
pub use heap::{MinHeap, Priority};
pub use mapfile::{load_cost_table, load_grid, load_targets};
pub use output::{LegSummary, PathSummary, RenderMode, TourSummary};
pub use path::{find_path, Path};
pub use tour::{
    create_selector, plan_tour, LegSelector, Target, TourLeg, TourPlan, TourRequest, VisitPolicy,
    VisitQuota,
};
