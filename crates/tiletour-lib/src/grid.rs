use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Position on the tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance `|dx| + |dy|` to another coordinate.
    pub fn manhattan_distance(&self, other: &Coord) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.y - other.y).unsigned_abs()
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Traversal cost of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellCost {
    /// Cell can be entered for the given positive cost.
    Traversable(u32),
    /// Cell can never be entered.
    Impassable,
}

impl CellCost {
    pub fn is_impassable(self) -> bool {
        matches!(self, CellCost::Impassable)
    }
}

/// Mapping from terrain-class codes to traversal costs.
///
/// `None` entries are the explicit impassable sentinel. Every class that
/// occurs in a grid must be covered; [`GridModel::new`] enforces this.
#[derive(Debug, Clone)]
pub struct CostTable {
    costs: HashMap<u8, Option<u32>>,
}

impl CostTable {
    /// Build a table from raw entries, rejecting non-positive costs.
    pub fn new(costs: HashMap<u8, Option<u32>>) -> Result<Self> {
        for (&class, &cost) in &costs {
            if let Some(0) = cost {
                return Err(Error::InvalidTerrainCost { class, cost: 0 });
            }
        }
        Ok(Self { costs })
    }

    /// Cost entry for a terrain class, or `None` if the class is unmapped.
    pub fn cost_of(&self, class: u8) -> Option<CellCost> {
        self.costs.get(&class).map(|cost| match cost {
            Some(cost) => CellCost::Traversable(*cost),
            None => CellCost::Impassable,
        })
    }
}

impl Default for CostTable {
    /// Built-in town palette: grass 5, asphalt 1, dirt 3, cobblestone 10,
    /// buildings impassable, boardwalk 2.
    fn default() -> Self {
        let costs = HashMap::from([
            (0, Some(5)),
            (1, Some(1)),
            (2, Some(3)),
            (3, Some(10)),
            (4, None),
            (5, Some(2)),
        ]);
        Self { costs }
    }
}

/// Immutable 2D array of terrain-class codes.
#[derive(Debug, Clone)]
pub struct TerrainGrid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl TerrainGrid {
    /// Parse the row-per-line, digit-per-cell text format.
    ///
    /// Surrounding whitespace is trimmed per line; the first row fixes the
    /// grid width and every later row must match it.
    pub fn parse(text: &str) -> Result<Self> {
        let mut width = 0usize;
        let mut cells = Vec::new();
        let mut height = 0usize;

        for (row, line) in text.trim().lines().enumerate() {
            let line = line.trim();
            if row == 0 {
                width = line.chars().count();
            } else if line.chars().count() != width {
                return Err(Error::MalformedGrid {
                    row,
                    reason: format!(
                        "row width {} does not match expected {width}",
                        line.chars().count()
                    ),
                });
            }
            for (column, ch) in line.chars().enumerate() {
                let digit = ch.to_digit(10).ok_or_else(|| Error::MalformedGrid {
                    row,
                    reason: format!("invalid terrain digit {ch:?} at column {column}"),
                })?;
                cells.push(digit as u8);
            }
            height += 1;
        }

        if height == 0 || width == 0 {
            return Err(Error::MalformedGrid {
                row: 0,
                reason: "grid contains no rows".to_string(),
            });
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build a grid from already-materialized rows of class codes.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(Error::MalformedGrid {
                row: 0,
                reason: "grid contains no rows".to_string(),
            });
        }
        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                return Err(Error::MalformedGrid {
                    row,
                    reason: format!("row width {} does not match expected {width}", values.len()),
                });
            }
            cells.extend_from_slice(values);
        }
        Ok(Self {
            width,
            height: rows.len(),
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    /// Terrain class at a coordinate, or `OutOfBounds`.
    pub fn class_at(&self, coord: Coord) -> Result<u8> {
        if !self.in_bounds(coord) {
            return Err(Error::OutOfBounds {
                coord,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.cells[coord.y as usize * self.width + coord.x as usize])
    }

    /// Row-major iterator over every cell's terrain class.
    pub fn cells(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().copied()
    }
}

/// Terrain grid bound to its cost table; the read-only context shared by the
/// pathfinder and the planner.
#[derive(Debug, Clone)]
pub struct GridModel {
    grid: TerrainGrid,
    costs: CostTable,
}

impl GridModel {
    /// Bind a grid to a cost table, verifying that every class present in
    /// the grid is covered.
    pub fn new(grid: TerrainGrid, costs: CostTable) -> Result<Self> {
        for class in grid.cells() {
            if costs.cost_of(class).is_none() {
                return Err(Error::UnmappedTerrainClass { class });
            }
        }
        Ok(Self { grid, costs })
    }

    pub fn grid(&self) -> &TerrainGrid {
        &self.grid
    }

    pub fn costs(&self) -> &CostTable {
        &self.costs
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        self.grid.in_bounds(coord)
    }

    /// Traversal cost of the cell at a coordinate, or `OutOfBounds`.
    pub fn cell_cost(&self, coord: Coord) -> Result<CellCost> {
        let class = self.grid.class_at(coord)?;
        self.costs
            .cost_of(class)
            .ok_or(Error::UnmappedTerrainClass { class })
    }

    /// In-bounds orthogonal neighbours in the fixed probe order right, left,
    /// down, up. The order is part of the search's deterministic behaviour.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        [
            Coord::new(coord.x + 1, coord.y),
            Coord::new(coord.x - 1, coord.y),
            Coord::new(coord.x, coord.y + 1),
            Coord::new(coord.x, coord.y - 1),
        ]
        .into_iter()
        .filter(|candidate| self.grid.in_bounds(*candidate))
    }
}
