//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use tiletour_lib::grid::{CellCost, CostTable, GridModel, TerrainGrid};
use tiletour_lib::mapfile;
use tiletour_lib::path::Path;
use tiletour_lib::tour::Target;
use tiletour_lib::Coord;

/// Path to fixtures directory used by tests (demo map, target roster).
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Demo map bound to the default cost table.
pub fn demo_model() -> GridModel {
    let grid = mapfile::load_grid(&fixtures_dir().join("demo_map.txt")).expect("load demo map");
    GridModel::new(grid, CostTable::default()).expect("demo map classes covered")
}

/// Target roster spread across the demo map.
#[allow(dead_code)]
pub fn demo_targets() -> Vec<Target> {
    mapfile::load_targets(&fixtures_dir().join("demo_targets.json")).expect("load demo roster")
}

/// Walking start used throughout the demo fixtures.
#[allow(dead_code)]
pub fn demo_start() -> Coord {
    Coord::new(18, 22)
}

/// Model built from inline rows with the default cost table.
#[allow(dead_code)]
pub fn model_from(text: &str) -> GridModel {
    let grid = TerrainGrid::parse(text).expect("grid parses");
    GridModel::new(grid, CostTable::default()).expect("classes covered")
}

/// Assert a committed path is well-formed: endpoints match, every hop is
/// orthogonal, entered cells are traversable, and the cost adds up.
#[allow(dead_code)]
pub fn assert_valid_path(model: &GridModel, path: &Path, start: Coord, goal: Coord) {
    assert_eq!(path.start(), Some(start), "path starts at the start");
    assert_eq!(path.end(), Some(goal), "path ends at the goal");

    let mut total = 0;
    for pair in path.steps.windows(2) {
        assert_eq!(
            pair[0].manhattan_distance(&pair[1]),
            1,
            "consecutive steps are orthogonally adjacent"
        );
        match model.cell_cost(pair[1]).expect("step in bounds") {
            CellCost::Traversable(cost) => total += cost,
            CellCost::Impassable => panic!("path enters impassable cell {}", pair[1]),
        }
    }
    assert_eq!(total, path.cost, "cost equals the sum of entered cells");
}
