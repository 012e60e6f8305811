//! Loading grids, cost tables and target rosters from disk.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::grid::{CostTable, TerrainGrid};
use crate::tour::Target;

/// Load a terrain grid from the row-per-line, digit-per-cell text format.
pub fn load_grid(path: &Path) -> Result<TerrainGrid> {
    let text = fs::read_to_string(path)?;
    let grid = TerrainGrid::parse(&text)?;
    debug!(
        path = %path.display(),
        width = grid.width(),
        height = grid.height(),
        "loaded terrain grid"
    );
    Ok(grid)
}

/// Load a cost table from a JSON object keyed by class digit, with `null`
/// marking impassable classes.
pub fn load_cost_table(path: &Path) -> Result<CostTable> {
    let text = fs::read_to_string(path)?;
    let entries: HashMap<u8, Option<u32>> = serde_json::from_str(&text)?;
    debug!(path = %path.display(), classes = entries.len(), "loaded cost table");
    CostTable::new(entries)
}

/// Load a target roster from a JSON array of labelled coordinates.
pub fn load_targets(path: &Path) -> Result<Vec<Target>> {
    let text = fs::read_to_string(path)?;
    let targets: Vec<Target> = serde_json::from_str(&text)?;
    debug!(path = %path.display(), targets = targets.len(), "loaded target roster");
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::grid::CellCost;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file creates");
        file.write_all(contents.as_bytes()).expect("temp file writes");
        file
    }

    #[test]
    fn load_grid_reads_trimmed_rows() {
        let file = write_temp("  101\n  110\n");
        let grid = load_grid(file.path()).expect("grid loads");
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
    }

    #[test]
    fn load_grid_surfaces_parse_errors() {
        let file = write_temp("101\n10\n");
        let error = load_grid(file.path()).expect_err("ragged grid");
        assert!(matches!(error, Error::MalformedGrid { row: 1, .. }));
    }

    #[test]
    fn missing_grid_file_is_an_io_error() {
        let error = load_grid(Path::new("/nonexistent/map.txt")).expect_err("missing file");
        assert!(matches!(error, Error::Io(_)));
    }

    #[test]
    fn load_cost_table_reads_null_as_impassable() {
        let file = write_temp(r#"{"0": 5, "1": 1, "4": null}"#);
        let table = load_cost_table(file.path()).expect("table loads");
        assert_eq!(table.cost_of(0), Some(CellCost::Traversable(5)));
        assert_eq!(table.cost_of(4), Some(CellCost::Impassable));
        assert_eq!(table.cost_of(2), None);
    }

    #[test]
    fn load_cost_table_rejects_zero_costs() {
        let file = write_temp(r#"{"1": 0}"#);
        let error = load_cost_table(file.path()).expect_err("zero cost");
        assert!(matches!(error, Error::InvalidTerrainCost { .. }));
    }

    #[test]
    fn load_cost_table_rejects_malformed_json() {
        let file = write_temp("not json");
        let error = load_cost_table(file.path()).expect_err("bad json");
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn load_targets_reads_labelled_coordinates() {
        let file = write_temp(r#"[{"label": "alpha", "x": 12, "y": 4}]"#);
        let targets = load_targets(file.path()).expect("roster loads");
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].label, "alpha");
        assert_eq!(targets[0].coord().x, 12);
        assert_eq!(targets[0].coord().y, 4);
    }
}
