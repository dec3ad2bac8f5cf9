//! # grid_navigation
//!
//! Pathfinding on 2D grids for games and simulations. A [CostGrid](grid::CostGrid) holds a
//! movement-cost multiplier per cell; only positive finite costs can be entered, anything else
//! marks a wall. On top of it the crate offers
//!
//! - [A*](solver::astar) with 4- or 8-connected movement and an optional heuristic weight,
//! - [Dijkstra distance maps](solver::dijkstra) towards one or many goals and
//!   [flow fields](flow_field) derived from them for steering large crowds,
//! - [Jump Point Search](https://en.wikipedia.org/wiki/Jump_point_search) on uniform-cost
//!   [WalkableGrid](grid::WalkableGrid)s,
//! - [path post-processing](post_process), [reachability queries](reachability) with
//!   [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) and
//!   [batched queries](batch).
//!
//! All algorithms are free functions over a read-only grid; grids can be shared between threads
//! without locking.
//!
//! Cells are addressed either by a [grid_util] [Point] or by their row-major index
//! `y * width + x`. Paths are sequences of indices from start to goal inclusive, and an empty
//! path means that no path exists.
pub mod batch;
pub mod flow_field;
pub mod frontier;
pub mod grid;
pub mod heuristic;
pub mod post_process;
pub mod reachability;
pub mod search;
pub mod solver;
pub mod vec2;

pub use crate::batch::{astar_batch, astar_batch_with_components, astar_batch_with_config};
pub use crate::flow_field::{flow_field, flow_field_multi, FlowField};
pub use crate::grid::{CellIndex, CostGrid, GridError, WalkableGrid};
pub use crate::reachability::{is_reachable, path_cost, reachable_cells, ComponentMap};
pub use crate::solver::astar::{astar, astar_uniform, astar_weighted, astar_with_config};
pub use crate::solver::dijkstra::{dijkstra_map, dijkstra_map_single, dijkstra_path, DistanceMap};
pub use crate::solver::jps::{jps, waypoints_cost};
pub use crate::solver::SearchConfig;
pub use crate::vec2::Vec2;
pub use grid_util::grid::ValueGrid;
pub use grid_util::point::Point;

pub const SQRT_2: f32 = std::f32::consts::SQRT_2;

/// Distance of cells from which no goal can be reached, and the cost of a path that does not
/// exist.
pub const UNREACHABLE: f32 = f32::INFINITY;

/// Cell indices from start to goal, both included. Empty when there is no path.
pub type Path = Vec<usize>;

pub(crate) const N_SMALLVEC_SIZE: usize = 8;

/// Turns waypoints into a path on the grid which can be followed step by step. Consecutive
/// waypoints are joined by moving diagonally while both coordinates differ and straight after
/// that, so for waypoints on a common line (such as [jps] output) the path follows that line.
/// Duplicate consecutive waypoints are collapsed.
pub fn waypoints_to_path(width: usize, waypoints: &[usize]) -> Path {
    if width == 0 {
        return Path::new();
    }
    let to_point = |ix: usize| Point::new((ix % width) as i32, (ix / width) as i32);
    let to_index = |p: Point| p.y as usize * width + p.x as usize;
    let Some((&first, rest)) = waypoints.split_first() else {
        return Path::new();
    };
    let mut current = to_point(first);
    let mut path = vec![first];
    for next in rest.iter().map(|&ix| to_point(ix)) {
        while current.move_distance(&next) >= 1 {
            let delta = current.dir(&next);
            current = current + delta;
            path.push(to_index(current));
        }
    }
    path
}
