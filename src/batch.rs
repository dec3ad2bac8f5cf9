//! Many independent A* queries over one shared grid.
use grid_util::grid::ValueGrid;
use grid_util::point::Point;
use log::warn;

use crate::grid::CostGrid;
use crate::reachability::ComponentMap;
use crate::solver::astar::astar_with_config;
use crate::solver::SearchConfig;
use crate::Path;

/// Runs one A* search per `(starts[i], goals[i])` pair and returns the paths in input order.
/// Pairs beyond the shorter of the two slices are ignored.
pub fn astar_batch(
    grid: &CostGrid,
    starts: &[Point],
    goals: &[Point],
    allow_diagonal: bool,
) -> Vec<Path> {
    astar_batch_with_config(grid, starts, goals, &SearchConfig::new(allow_diagonal))
}

pub fn astar_batch_with_config(
    grid: &CostGrid,
    starts: &[Point],
    goals: &[Point],
    config: &SearchConfig,
) -> Vec<Path> {
    starts
        .iter()
        .zip(goals)
        .map(|(&start, &goal)| astar_with_config(grid, start, goal, config))
        .collect()
}

/// Like [astar_batch], but pairs that `components` places in different components get an empty
/// path without searching. The component map must have been built from `grid` with at least the
/// connectivity of the search; otherwise the pre-check is skipped.
pub fn astar_batch_with_components(
    grid: &CostGrid,
    starts: &[Point],
    goals: &[Point],
    allow_diagonal: bool,
    components: &ComponentMap,
) -> Vec<Path> {
    let same_shape = components.width() == grid.width() && components.height() == grid.height();
    let covers_moves = components.allow_diagonal() || !allow_diagonal;
    if !same_shape || !covers_moves {
        warn!("Component map does not match the batch query, searching every pair");
        return astar_batch(grid, starts, goals, allow_diagonal);
    }
    let config = SearchConfig::new(allow_diagonal);
    starts
        .iter()
        .zip(goals)
        .map(|(&start, &goal)| {
            if !components.connected(start, goal) {
                return Path::new();
            }
            let path = astar_with_config(grid, start, goal, &config);
            if path.is_empty() && components.allow_diagonal() == allow_diagonal {
                warn!("No path from {start:?} to {goal:?} although they share a component");
            }
            path
        })
        .collect()
}
