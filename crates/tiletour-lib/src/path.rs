use serde::Serialize;
use tracing::{debug, trace};

use crate::error::Result;
use crate::grid::{CellCost, Coord, GridModel};
use crate::heap::{MinHeap, Priority};

/// Route through the grid from start to goal, both inclusive.
///
/// `cost` is the sum of the costs of every entered cell, which excludes the
/// start cell. A path with no steps is the no-route sentinel returned when
/// the goal cannot be reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Path {
    pub steps: Vec<Coord>,
    pub cost: u32,
}

impl Path {
    /// The no-route sentinel.
    pub fn empty() -> Self {
        Self {
            steps: Vec::new(),
            cost: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn start(&self) -> Option<Coord> {
        self.steps.first().copied()
    }

    pub fn end(&self) -> Option<Coord> {
        self.steps.last().copied()
    }
}

/// Discovery state of a cell during one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellState {
    Undiscovered,
    Open,
    Closed,
}

/// Node in the search arena; `parent` indexes the arena entry it was
/// discovered from.
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    coord: Coord,
    g: u32,
    parent: Option<usize>,
}

/// Open-set handle ordered by f = g + h.
#[derive(Debug)]
struct OpenEntry {
    node: usize,
    f: u32,
}

impl Priority for OpenEntry {
    fn priority(&self) -> u32 {
        self.f
    }
}

/// Weighted A* over the 4-connected grid with a Manhattan-distance heuristic.
///
/// The first discovery of a cell fixes its g-value for the rest of the
/// search and closed cells are never re-expanded, so on grids with uneven
/// terrain costs the returned route can cost slightly more than the true
/// optimum. Ties on f resolve by heap structure, which makes the route for
/// a given grid fully deterministic.
///
/// Returns [`Path::empty`] when the goal is unreachable; errors only on
/// out-of-bounds endpoints.
pub fn find_path(model: &GridModel, start: Coord, goal: Coord) -> Result<Path> {
    model.grid().class_at(start)?;
    model.grid().class_at(goal)?;

    if start == goal {
        return Ok(Path {
            steps: vec![start],
            cost: 0,
        });
    }

    debug!(%start, %goal, "searching for path");

    let width = model.width();
    let cell_index = |coord: Coord| coord.y as usize * width + coord.x as usize;

    let mut nodes = vec![SearchNode {
        coord: start,
        g: 0,
        parent: None,
    }];
    let mut states = vec![CellState::Undiscovered; width * model.height()];
    states[cell_index(start)] = CellState::Open;

    let mut open = MinHeap::new();
    open.insert(OpenEntry {
        node: 0,
        f: start.manhattan_distance(&goal),
    });

    while !open.is_empty() {
        let entry = open.extract_min()?;
        let current = nodes[entry.node];

        if current.coord == goal {
            let path = reconstruct(&nodes, entry.node);
            debug!(
                %start,
                %goal,
                steps = path.steps.len(),
                cost = path.cost,
                discovered = nodes.len(),
                "path found"
            );
            return Ok(path);
        }

        states[cell_index(current.coord)] = CellState::Closed;

        for neighbor in model.neighbors(current.coord) {
            if states[cell_index(neighbor)] != CellState::Undiscovered {
                // Already queued or expanded; the g fixed at first
                // discovery stands even if this approach is cheaper.
                continue;
            }
            let step_cost = match model.cell_cost(neighbor)? {
                CellCost::Traversable(cost) => cost,
                CellCost::Impassable => {
                    trace!(cell = %neighbor, "skipping impassable cell");
                    continue;
                }
            };
            let g = current.g + step_cost;
            nodes.push(SearchNode {
                coord: neighbor,
                g,
                parent: Some(entry.node),
            });
            states[cell_index(neighbor)] = CellState::Open;
            open.insert(OpenEntry {
                node: nodes.len() - 1,
                f: g + neighbor.manhattan_distance(&goal),
            });
        }
    }

    debug!(%start, %goal, discovered = nodes.len(), "open set exhausted without reaching goal");
    Ok(Path::empty())
}

fn reconstruct(nodes: &[SearchNode], goal_index: usize) -> Path {
    let mut steps = Vec::new();
    let mut cursor = Some(goal_index);
    while let Some(index) = cursor {
        steps.push(nodes[index].coord);
        cursor = nodes[index].parent;
    }
    steps.reverse();
    Path {
        steps,
        cost: nodes[goal_index].g,
    }
}
