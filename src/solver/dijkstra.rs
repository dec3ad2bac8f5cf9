//! Multi-goal uniform-cost relaxation over the 4-neighbourhood.
//!
//! Unlike [astar](crate::solver::astar::astar), the distance field never moves diagonally:
//! every step costs exactly the cost of the cell it enters.
use fxhash::FxHashSet;
use grid_util::grid::ValueGrid;
use grid_util::point::Point;
use log::debug;

use crate::frontier::{FrontierEntry, PriorityFrontier};
use crate::grid::{checked_cell_count, CellIndex, CostGrid, GridError};
use crate::search::best_first_search;
use crate::solver::astar::neighborhood_and_cost;
use crate::{Path, UNREACHABLE};

/// Minimum accumulated cost from every cell to the nearest goal, laid out like the grid it was
/// computed on. Cells that cannot reach a goal hold [UNREACHABLE], and so does every coordinate
/// outside the map when read through [ValueGrid].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DistanceMap {
    width: usize,
    height: usize,
    distances: Vec<f32>,
}

impl DistanceMap {
    /// Wraps precomputed row-major distances, e.g. a field produced elsewhere and fed to the flow
    /// field generator.
    pub fn from_distances(
        width: usize,
        height: usize,
        distances: Vec<f32>,
    ) -> Result<DistanceMap, GridError> {
        let expected = checked_cell_count(width, height)?;
        if expected != distances.len() {
            return Err(GridError::LengthMismatch {
                expected,
                actual: distances.len(),
            });
        }
        Ok(DistanceMap {
            width,
            height,
            distances,
        })
    }

    pub fn distances(&self) -> &[f32] {
        &self.distances
    }

    /// Distance at `index`, [UNREACHABLE] when out of range.
    pub fn distance(&self, index: usize) -> f32 {
        self.distances.get(index).copied().unwrap_or(UNREACHABLE)
    }

    pub fn is_reached(&self, index: usize) -> bool {
        self.distance(index) < UNREACHABLE
    }
}

impl ValueGrid<f32> for DistanceMap {
    fn new(width: usize, height: usize, default_value: f32) -> Self {
        DistanceMap {
            width,
            height,
            distances: vec![default_value; width * height],
        }
    }
    fn get(&self, x: i32, y: i32) -> f32 {
        self.index_of(Point::new(x, y))
            .map_or(UNREACHABLE, |ix| self.distances[ix])
    }
    fn set(&mut self, x: i32, y: i32, distance: f32) {
        if let Some(ix) = self.index_of(Point::new(x, y)) {
            self.distances[ix] = distance;
        }
    }
    fn width(&self) -> usize {
        self.width
    }
    fn height(&self) -> usize {
        self.height
    }
}

impl CellIndex<f32> for DistanceMap {}

/// In-bounds, passable goal indices with duplicates removed, in input order.
fn goal_indices(grid: &CostGrid, goals: &[Point]) -> Vec<usize> {
    let mut seen = FxHashSet::default();
    goals
        .iter()
        .filter_map(|&g| grid.passable_index(g))
        .filter(|ix| seen.insert(*ix))
        .collect()
}

/// Computes the distance from every cell to the nearest of `goals`. Goals that are out of bounds
/// or blocked are dropped; without any valid goal every cell is [UNREACHABLE].
pub fn dijkstra_map(grid: &CostGrid, goals: &[Point]) -> DistanceMap {
    let mut map: DistanceMap = ValueGrid::new(grid.width(), grid.height(), UNREACHABLE);
    let seeds = goal_indices(grid, goals);
    if seeds.is_empty() {
        debug!("Dijkstra map requested without any valid goal");
        return map;
    }
    let mut frontier = PriorityFrontier::with_capacity(grid.cell_count());
    for ix in seeds {
        map.distances[ix] = 0.0;
        frontier.push(ix, 0.0, 0.0);
    }
    while let Some(FrontierEntry { index, cost, .. }) = frontier.pop() {
        if cost > map.distances[index] {
            continue;
        }
        for (next, step) in neighborhood_and_cost(grid, index, false) {
            let new_dist = cost + step;
            if new_dist < map.distances[next] {
                map.distances[next] = new_dist;
                frontier.push(next, new_dist, new_dist);
            }
        }
    }
    map
}

pub fn dijkstra_map_single(grid: &CostGrid, goal: Point) -> DistanceMap {
    dijkstra_map(grid, &[goal])
}

/// Finds the path from `start` to whichever of `goals` is cheapest to reach, moving over the
/// 4-neighbourhood. Empty when the start is invalid, no goal is valid, or none can be reached.
pub fn dijkstra_path(grid: &CostGrid, start: Point, goals: &[Point]) -> Path {
    let Some(start_ix) = grid.passable_index(start) else {
        debug!("Dijkstra path from {start:?} rejected: start out of bounds or blocked");
        return Path::new();
    };
    let goal_set: FxHashSet<usize> = goal_indices(grid, goals).into_iter().collect();
    if goal_set.is_empty() {
        return Path::new();
    }
    best_first_search(
        &start_ix,
        |_, &node| neighborhood_and_cost(grid, node, false),
        |_| 0.0,
        |node| goal_set.contains(node),
    )
    .map(|(path, _)| path)
    .unwrap_or_default()
}
