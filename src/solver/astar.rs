use grid_util::grid::ValueGrid;
use grid_util::point::Point;
use log::debug;
use smallvec::SmallVec;

use crate::grid::{CellIndex, CostGrid, WalkableGrid};
use crate::heuristic::Heuristic;
use crate::search::best_first_search;
use crate::solver::{step_length, SearchConfig};
use crate::{Path, N_SMALLVEC_SIZE};

pub(crate) fn neighborhood_points(point: &Point, allow_diagonal: bool) -> SmallVec<[Point; 8]> {
    if allow_diagonal {
        point.moore_neighborhood_smallvec()
    } else {
        point.neumann_neighborhood_smallvec()
    }
}

/// Passable neighbours of `index` together with the cost of stepping onto them: the step length
/// (1 or √2) times the cost of the destination cell.
pub(crate) fn neighborhood_and_cost(
    grid: &CostGrid,
    index: usize,
    allow_diagonal: bool,
) -> SmallVec<[(usize, f32); N_SMALLVEC_SIZE]> {
    let Some(pos) = grid.point_of(index) else {
        return SmallVec::new();
    };
    neighborhood_points(&pos, allow_diagonal)
        .into_iter()
        .filter_map(|next| {
            let ix = grid.passable_index(next)?;
            Some((ix, step_length(pos, next) * grid.get_point(next)))
        })
        .collect::<SmallVec<[_; N_SMALLVEC_SIZE]>>()
}

/// Validated A* returning both the path and its accumulated cost.
pub(crate) fn astar_search(
    grid: &CostGrid,
    start: Point,
    goal: Point,
    config: &SearchConfig,
) -> Option<(Path, f32)> {
    let (Some(start_ix), Some(goal_ix)) = (grid.passable_index(start), grid.passable_index(goal))
    else {
        debug!("A* from {start:?} to {goal:?} rejected: endpoint out of bounds or blocked");
        return None;
    };
    if start_ix == goal_ix {
        return Some((vec![start_ix], 0.0));
    }
    let heuristic = Heuristic::for_connectivity(config.allow_diagonal);
    let weight = config.effective_weight();
    let result = best_first_search(
        &start_ix,
        |_, &node| neighborhood_and_cost(grid, node, config.allow_diagonal),
        |&node| {
            grid.point_of(node)
                .map_or(0.0, |p| heuristic.estimate(p, goal) * weight)
        },
        |&node| node == goal_ix,
    );
    if result.is_none() {
        debug!("A* from {start:?} to {goal:?}: frontier exhausted, no path");
    }
    result
}

/// Computes the cheapest path from `start` to `goal` as a sequence of cell indices, both
/// endpoints included. Returns an empty path when either endpoint is out of bounds or blocked, or
/// when the goal cannot be reached. Guided by the Manhattan distance on a 4-grid and the
/// octile distance on an 8-grid.
pub fn astar(grid: &CostGrid, start: Point, goal: Point, allow_diagonal: bool) -> Path {
    astar_with_config(grid, start, goal, &SearchConfig::new(allow_diagonal))
}

/// Weighted A*: the heuristic is multiplied by `heuristic_weight`. A weight above 1 overestimates
/// on purpose, trading path quality for fewer expansions, so the returned path may cost more than
/// the optimum (by at most that factor on grids whose cell costs are at least 1).
pub fn astar_weighted(
    grid: &CostGrid,
    start: Point,
    goal: Point,
    allow_diagonal: bool,
    heuristic_weight: f32,
) -> Path {
    let config = SearchConfig::new(allow_diagonal).with_heuristic_weight(heuristic_weight);
    astar_with_config(grid, start, goal, &config)
}

pub fn astar_with_config(
    grid: &CostGrid,
    start: Point,
    goal: Point,
    config: &SearchConfig,
) -> Path {
    astar_search(grid, start, goal, config)
        .map(|(path, _)| path)
        .unwrap_or_default()
}

/// A* on a walkable/blocked grid where every walkable cell costs 1.
pub fn astar_uniform(
    walkable: &WalkableGrid,
    start: Point,
    goal: Point,
    allow_diagonal: bool,
) -> Path {
    astar(&walkable.to_cost_grid(), start, goal, allow_diagonal)
}
