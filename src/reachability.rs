//! Questions about what can be reached without needing the path itself: bounded-cost floods,
//! single path costs and precomputed
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)).
use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use log::{debug, info};
use petgraph::unionfind::UnionFind;

use crate::frontier::{FrontierEntry, PriorityFrontier};
use crate::grid::{CellIndex, CostGrid};
use crate::solver::astar::{astar_search, neighborhood_and_cost};
use crate::solver::SearchConfig;
use crate::UNREACHABLE;

// Looking forward only is enough to link components: every link is seen from one of its ends.
const NEUMANN_FORWARD: [(i32, i32); 2] = [(1, 0), (0, 1)];
const MOORE_FORWARD: [(i32, i32); 4] = [(1, 0), (-1, 1), (0, 1), (1, 1)];

/// Every cell reachable from `start` over the 4-neighbourhood with an accumulated cost of at most
/// `max_cost`, paired with that cost, in ascending cost order. Entering a cell costs the cell's
/// cost. The start comes first with cost 0. An invalid start gives an empty result; a negative or
/// NaN `max_cost` only admits the start.
pub fn reachable_nodes(grid: &CostGrid, start: Point, max_cost: f32) -> Vec<(usize, f32)> {
    let Some(start_ix) = grid.passable_index(start) else {
        debug!("Reachability from {start:?} rejected: start out of bounds or blocked");
        return Vec::new();
    };
    let mut best = vec![UNREACHABLE; grid.cell_count()];
    let mut visited = Vec::new();
    let mut frontier = PriorityFrontier::new();
    best[start_ix] = 0.0;
    frontier.push(start_ix, 0.0, 0.0);
    while let Some(FrontierEntry { index, cost, .. }) = frontier.pop() {
        if cost > best[index] {
            continue;
        }
        visited.push((index, cost));
        for (next, step) in neighborhood_and_cost(grid, index, false) {
            let new_cost = cost + step;
            // Also rejects everything when max_cost is NaN.
            if !(new_cost <= max_cost) {
                continue;
            }
            if new_cost < best[next] {
                best[next] = new_cost;
                frontier.push(next, new_cost, new_cost);
            }
        }
    }
    visited
}

/// Indices of [reachable_nodes], in the same order.
pub fn reachable_cells(grid: &CostGrid, start: Point, max_cost: f32) -> Vec<usize> {
    reachable_nodes(grid, start, max_cost)
        .into_iter()
        .map(|(ix, _)| ix)
        .collect()
}

/// Whether an 8-connected path from `start` to `goal` exists.
pub fn is_reachable(grid: &CostGrid, start: Point, goal: Point) -> bool {
    astar_search(grid, start, goal, &SearchConfig::new(true)).is_some()
}

/// Cost of the path [astar](crate::solver::astar::astar) would return, or [UNREACHABLE] when
/// there is none.
pub fn path_cost(grid: &CostGrid, start: Point, goal: Point, allow_diagonal: bool) -> f32 {
    astar_search(grid, start, goal, &SearchConfig::new(allow_diagonal))
        .map_or(UNREACHABLE, |(_, cost)| cost)
}

/// [ComponentMap] labels every passable cell with the connected component it belongs to using a
/// [UnionFind] structure, so that queries between disconnected cells can be answered without
/// flood-filling the grid. Built for 4- or 8-connected movement; in the 8-connected case cells
/// touching only at a corner are connected, matching the diagonal moves of the searches.
///
/// The map is a snapshot of the passable cells, kept in a [BoolGrid]: it has to be rebuilt after
/// the grid changes.
#[derive(Clone, Debug)]
pub struct ComponentMap {
    passable: BoolGrid,
    allow_diagonal: bool,
    components: UnionFind<usize>,
}

impl ComponentMap {
    /// Generates the components by joining every passable cell with its passable neighbours.
    pub fn new(grid: &CostGrid, allow_diagonal: bool) -> ComponentMap {
        let (w, h) = (grid.width(), grid.height());
        info!("Generating connected components for {w}x{h} grid");
        let mut passable = BoolGrid::new(w, h, false);
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                passable.set(x, y, grid.is_passable_point(Point::new(x, y)));
            }
        }
        let mut components = UnionFind::new(passable.cell_count());
        let forward: &[(i32, i32)] = if allow_diagonal {
            &MOORE_FORWARD
        } else {
            &NEUMANN_FORWARD
        };
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                let point = Point::new(x, y);
                let Some(parent_ix) = passable_ix(&passable, point) else {
                    continue;
                };
                for &(dx, dy) in forward {
                    if let Some(ix) = passable_ix(&passable, Point::new(x + dx, y + dy)) {
                        components.union(parent_ix, ix);
                    }
                }
            }
        }
        ComponentMap {
            passable,
            allow_diagonal,
            components,
        }
    }

    pub fn width(&self) -> usize {
        self.passable.width()
    }

    pub fn height(&self) -> usize {
        self.passable.height()
    }

    pub fn allow_diagonal(&self) -> bool {
        self.allow_diagonal
    }

    /// Component id of `point`, or [None] when it is out of bounds or blocked.
    pub fn component(&self, point: Point) -> Option<usize> {
        passable_ix(&self.passable, point).map(|ix| self.components.find(ix))
    }

    /// Checks if `a` and `b` are passable and on the same component.
    pub fn connected(&self, a: Point, b: Point) -> bool {
        match (self.component(a), self.component(b)) {
            (Some(ca), Some(cb)) => ca == cb,
            _ => false,
        }
    }
}

fn passable_ix(passable: &BoolGrid, point: Point) -> Option<usize> {
    passable
        .index_of(point)
        .filter(|_| passable.get_point(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with_blocks(width: usize, height: usize, blocked: &[(i32, i32)]) -> CostGrid {
        let mut grid = CostGrid::filled(width, height, 1.0).unwrap();
        for &(x, y) in blocked {
            grid.set(x, y, 0.0);
        }
        grid
    }

    #[test]
    fn flood_is_bounded_and_ordered() {
        let grid = CostGrid::filled(5, 1, 1.0).unwrap();
        let nodes = reachable_nodes(&grid, Point::new(2, 0), 1.0);
        assert_eq!(nodes[0], (2, 0.0));
        let mut rest: Vec<usize> = nodes[1..].iter().map(|&(ix, _)| ix).collect();
        rest.sort_unstable();
        assert_eq!(rest, vec![1, 3]);
        assert!(nodes.windows(2).all(|w| w[0].1 <= w[1].1));
    }

    #[test]
    fn flood_pays_cell_costs() {
        let grid = CostGrid::from_costs(4, 1, vec![1.0, 2.0, 2.0, 1.0]).unwrap();
        assert_eq!(reachable_cells(&grid, Point::new(0, 0), 3.9), vec![0, 1]);
        assert_eq!(reachable_cells(&grid, Point::new(0, 0), 4.0), vec![0, 1, 2]);
        assert_eq!(reachable_nodes(&grid, Point::new(0, 0), 10.0)[3], (3, 5.0));
    }

    #[test]
    fn flood_degenerate_inputs() {
        let grid = grid_with_blocks(3, 3, &[(1, 1)]);
        assert!(reachable_cells(&grid, Point::new(1, 1), 10.0).is_empty());
        assert!(reachable_cells(&grid, Point::new(3, 0), 10.0).is_empty());
        assert_eq!(reachable_cells(&grid, Point::new(0, 0), f32::NAN), vec![0]);
        assert_eq!(reachable_cells(&grid, Point::new(0, 0), -1.0), vec![0]);
        assert_eq!(reachable_cells(&grid, Point::new(0, 0), 0.0), vec![0]);
    }

    #[test]
    fn flood_does_not_cut_corners() {
        let grid = grid_with_blocks(2, 2, &[(1, 0), (0, 1)]);
        assert_eq!(reachable_cells(&grid, Point::new(0, 0), 100.0), vec![0]);
        assert!(is_reachable(&grid, Point::new(0, 0), Point::new(1, 1)));
    }

    #[test]
    fn costs_of_paths() {
        let grid = grid_with_blocks(5, 5, &[]);
        assert_eq!(path_cost(&grid, Point::new(0, 0), Point::new(4, 4), false), 8.0);
        let diagonal = path_cost(&grid, Point::new(0, 0), Point::new(4, 4), true);
        assert!((diagonal - 4.0 * crate::SQRT_2).abs() < 1e-4);
        assert_eq!(path_cost(&grid, Point::new(1, 1), Point::new(1, 1), true), 0.0);
        assert_eq!(path_cost(&grid, Point::new(0, 0), Point::new(9, 9), true), UNREACHABLE);
    }

    #[test]
    fn unreachable_behind_wall() {
        let grid = grid_with_blocks(3, 3, &[(1, 0), (1, 1), (1, 2)]);
        assert!(!is_reachable(&grid, Point::new(0, 0), Point::new(2, 2)));
        assert_eq!(path_cost(&grid, Point::new(0, 0), Point::new(2, 2), true), UNREACHABLE);
    }

    #[test]
    fn infinite_cost_blocks_every_query() {
        let grid = CostGrid::from_costs(3, 1, vec![1.0, f32::INFINITY, 1.0]).unwrap();
        let (start, goal) = (Point::new(0, 0), Point::new(2, 0));
        for allow_diagonal in [false, true] {
            let config = SearchConfig::new(allow_diagonal);
            assert!(astar_search(&grid, start, goal, &config).is_none());
            assert_eq!(path_cost(&grid, start, goal, allow_diagonal), UNREACHABLE);
            assert!(!ComponentMap::new(&grid, allow_diagonal).connected(start, goal));
        }
        assert!(!is_reachable(&grid, start, goal));
        assert_eq!(reachable_cells(&grid, start, f32::INFINITY), vec![0]);
        let components = ComponentMap::new(&grid, true);
        assert_eq!(components.component(Point::new(1, 0)), None);
    }

    #[test]
    fn component_generation() {
        // .#.
        // #.#
        // ...
        let grid = grid_with_blocks(3, 3, &[(1, 0), (0, 1), (2, 1)]);
        let neumann = ComponentMap::new(&grid, false);
        assert!(!neumann.connected(Point::new(0, 0), Point::new(1, 1)));
        assert!(neumann.connected(Point::new(1, 1), Point::new(0, 2)));
        let moore = ComponentMap::new(&grid, true);
        assert!(moore.connected(Point::new(0, 0), Point::new(1, 1)));
        // Anti-diagonal link from (2,0) to (1,1).
        assert!(moore.connected(Point::new(2, 0), Point::new(0, 0)));
        assert!(moore.allow_diagonal());
    }

    #[test]
    fn blocked_and_outside_have_no_component() {
        let grid = grid_with_blocks(2, 1, &[(1, 0)]);
        let components = ComponentMap::new(&grid, true);
        assert!(components.component(Point::new(0, 0)).is_some());
        assert_eq!(components.component(Point::new(1, 0)), None);
        assert_eq!(components.component(Point::new(0, 1)), None);
        assert!(!components.connected(Point::new(0, 0), Point::new(1, 0)));
        assert!(components.connected(Point::new(0, 0), Point::new(0, 0)));
    }
}
