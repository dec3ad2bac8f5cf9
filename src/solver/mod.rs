use grid_util::grid::ValueGrid;
use grid_util::point::Point;
use log::warn;

use crate::grid::{CellIndex, CostGrid};
use crate::SQRT_2;

pub mod astar;
pub mod dijkstra;
pub mod jps;

/// Settings for the cost-grid searches.
///
/// The default is 8-connected movement with an unweighted (admissible) heuristic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchConfig {
    /// Allows diagonal steps. Diagonal steps may pass between two blocked cells that share a
    /// corner; only the destination cell is checked.
    pub allow_diagonal: bool,
    /// Factor applied to the heuristic. Values above 1 turn the search into Weighted A*, which
    /// usually expands fewer nodes but may return a path that is not the cheapest.
    pub heuristic_weight: f32,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            allow_diagonal: true,
            heuristic_weight: 1.0,
        }
    }
}

impl SearchConfig {
    pub fn new(allow_diagonal: bool) -> SearchConfig {
        SearchConfig {
            allow_diagonal,
            ..Default::default()
        }
    }

    pub fn with_heuristic_weight(mut self, heuristic_weight: f32) -> SearchConfig {
        self.heuristic_weight = heuristic_weight;
        self
    }

    /// The weight actually used during search. Negative or non-finite weights fall back to 1.
    pub fn effective_weight(&self) -> f32 {
        if self.heuristic_weight.is_finite() && self.heuristic_weight >= 0.0 {
            self.heuristic_weight
        } else {
            warn!(
                "Ignoring heuristic weight {}, using 1.0",
                self.heuristic_weight
            );
            1.0
        }
    }
}

/// Length of a single step between adjacent cells: 1 for cardinal steps, √2 for diagonal ones.
pub fn step_length(from: Point, to: Point) -> f32 {
    if from.x != to.x && from.y != to.y {
        SQRT_2
    } else {
        1.0
    }
}

/// Sums the cost of walking a dense path on `grid`: every step costs its length times the cost
/// of the cell it enters. Returns [crate::UNREACHABLE] if a step leaves the grid, enters a
/// blocked cell or jumps more than one cell.
pub fn path_cost_along(grid: &CostGrid, path: &[usize]) -> f32 {
    let mut total = 0.0;
    for pair in path.windows(2) {
        let (Some(from), Some(to)) = (grid.point_of(pair[0]), grid.point_of(pair[1])) else {
            return crate::UNREACHABLE;
        };
        if from.move_distance(&to) != 1 || !grid.is_passable(pair[1]) {
            return crate::UNREACHABLE;
        }
        total += step_length(from, to) * grid.get_point(to);
    }
    total
}
