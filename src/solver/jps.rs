//! [Jump Point Search](https://en.wikipedia.org/wiki/Jump_point_search) on a uniform-cost
//! 8-connected grid.
//!
//! The move model matches 8-connected [astar_uniform](crate::solver::astar::astar_uniform):
//! any walkable neighbour can be entered, including diagonally past two blocked corners, so both
//! report the same optimal cost. The returned path holds only the jump points; use
//! [waypoints_to_path](crate::waypoints_to_path) to get the cell-by-cell sequence.
use grid_util::grid::ValueGrid;
use grid_util::point::Point;
use log::debug;
use smallvec::SmallVec;

use crate::grid::{CellIndex, WalkableGrid};
use crate::heuristic::octile;
use crate::search::best_first_search;
use crate::{Path, N_SMALLVEC_SIZE, SQRT_2};

const DIRECTIONS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

fn is_diagonal(dir: Point) -> bool {
    dir.x != 0 && dir.y != 0
}

fn blocked(grid: &WalkableGrid, x: i32, y: i32) -> bool {
    !grid.get(x, y)
}

/// Whether `node`, reached by travelling in `dir`, has a neighbour that can only be reached
/// optimally through it because an adjacent obstacle corner cuts off the alternative.
fn has_forced_neighbor(grid: &WalkableGrid, node: Point, dir: Point) -> bool {
    let (dx, dy) = (dir.x, dir.y);
    let (x, y) = (node.x, node.y);
    if dx != 0 && dy != 0 {
        (blocked(grid, x - dx, y) && grid.get(x - dx, y + dy))
            || (blocked(grid, x, y - dy) && grid.get(x + dx, y - dy))
    } else if dx != 0 {
        (blocked(grid, x, y + 1) && grid.get(x + dx, y + 1))
            || (blocked(grid, x, y - 1) && grid.get(x + dx, y - 1))
    } else {
        (blocked(grid, x + 1, y) && grid.get(x + 1, y + dy))
            || (blocked(grid, x - 1, y) && grid.get(x - 1, y + dy))
    }
}

/// Directions worth exploring from `node` when it was entered travelling in `dir`: the natural
/// continuations plus any forced ones.
fn pruned_directions(grid: &WalkableGrid, node: Point, dir: Point) -> SmallVec<[Point; 8]> {
    let (dx, dy) = (dir.x, dir.y);
    let (x, y) = (node.x, node.y);
    let mut dirs = SmallVec::new();
    if dx != 0 && dy != 0 {
        dirs.push(Point::new(dx, dy));
        dirs.push(Point::new(dx, 0));
        dirs.push(Point::new(0, dy));
        if blocked(grid, x - dx, y) {
            dirs.push(Point::new(-dx, dy));
        }
        if blocked(grid, x, y - dy) {
            dirs.push(Point::new(dx, -dy));
        }
    } else if dx != 0 {
        dirs.push(Point::new(dx, 0));
        if blocked(grid, x, y + 1) {
            dirs.push(Point::new(dx, 1));
        }
        if blocked(grid, x, y - 1) {
            dirs.push(Point::new(dx, -1));
        }
    } else {
        dirs.push(Point::new(0, dy));
        if blocked(grid, x + 1, y) {
            dirs.push(Point::new(1, dy));
        }
        if blocked(grid, x - 1, y) {
            dirs.push(Point::new(-1, dy));
        }
    }
    dirs
}

/// Straight jump in a cardinal direction. Returns the jump point and the number of steps taken.
fn jump_straight(
    grid: &WalkableGrid,
    mut current: Point,
    dir: Point,
    goal: Point,
) -> Option<(Point, u32)> {
    debug_assert!(!is_diagonal(dir));
    let mut steps = 0;
    loop {
        current = current + dir;
        if !grid.is_walkable(current) {
            return None;
        }
        steps += 1;
        if current == goal || has_forced_neighbor(grid, current, dir) {
            return Some((current, steps));
        }
    }
}

/// Travels from `from` in `dir`, skipping cells that need not be expanded, until reaching the
/// goal, a cell with a forced neighbour or (for diagonal travel) a cell from which a straight
/// jump finds either of those. Returns [None] when an obstacle or the border is hit first.
fn jump(grid: &WalkableGrid, from: Point, dir: Point, goal: Point) -> Option<(Point, u32)> {
    if !is_diagonal(dir) {
        return jump_straight(grid, from, dir, goal);
    }
    let mut current = from;
    let mut steps = 0;
    loop {
        current = current + dir;
        if !grid.is_walkable(current) {
            return None;
        }
        steps += 1;
        if current == goal || has_forced_neighbor(grid, current, dir) {
            return Some((current, steps));
        }
        if jump_straight(grid, current, Point::new(dir.x, 0), goal).is_some()
            || jump_straight(grid, current, Point::new(0, dir.y), goal).is_some()
        {
            return Some((current, steps));
        }
    }
}

fn successors(
    grid: &WalkableGrid,
    parent: Option<&usize>,
    node: usize,
    goal: Point,
) -> SmallVec<[(usize, f32); N_SMALLVEC_SIZE]> {
    let Some(pos) = grid.point_of(node) else {
        return SmallVec::new();
    };
    let dirs: SmallVec<[Point; 8]> = match parent.and_then(|&p| grid.point_of(p)) {
        Some(parent_pos) => pruned_directions(grid, pos, parent_pos.dir(&pos)),
        None => DIRECTIONS
            .into_iter()
            .map(|(dx, dy)| Point::new(dx, dy))
            .collect(),
    };
    dirs.into_iter()
        .filter_map(|dir| {
            let (jump_point, steps) = jump(grid, pos, dir, goal)?;
            let step = if is_diagonal(dir) { SQRT_2 } else { 1.0 };
            Some((grid.index_of(jump_point)?, steps as f32 * step))
        })
        .collect()
}

/// Computes a path from `start` to `goal` using Jump Point Search with the octile distance as
/// heuristic. The path contains the start, the jump points and the goal; consecutive entries are
/// always connected by a straight or diagonal line of walkable cells. Returns an empty path when
/// either endpoint is out of bounds or blocked, or when no path exists.
pub fn jps(grid: &WalkableGrid, start: Point, goal: Point) -> Path {
    let (Some(start_ix), Some(goal_ix)) = (grid.index_of(start), grid.index_of(goal)) else {
        debug!("JPS from {start:?} to {goal:?} rejected: endpoint out of bounds");
        return Path::new();
    };
    if !grid.is_walkable(start) || !grid.is_walkable(goal) {
        debug!("JPS from {start:?} to {goal:?} rejected: endpoint blocked");
        return Path::new();
    }
    best_first_search(
        &start_ix,
        |parent, &node| successors(grid, parent, node, goal),
        |&node| grid.point_of(node).map_or(0.0, |p| octile(p, goal)),
        |&node| node == goal_ix,
    )
    .map(|(path, _)| path)
    .unwrap_or_default()
}

/// Total length of a sparse waypoint path whose consecutive points lie on straight or diagonal
/// lines, such as the output of [jps]. Every cell costs 1.
pub fn waypoints_cost(width: usize, waypoints: &[usize]) -> f32 {
    if width == 0 {
        return 0.0;
    }
    let to_point = |ix: usize| Point::new((ix % width) as i32, (ix / width) as i32);
    waypoints
        .windows(2)
        .map(|pair| octile(to_point(pair[0]), to_point(pair[1])))
        .sum()
}
