//! Distance estimates used to guide the searches.
//!
//! Both estimates are admissible for the move model of this crate (cardinal steps cost 1,
//! diagonal steps cost √2, scaled by a cell cost of at least 1). Cell costs below 1 make
//! them overestimate; callers who need optimality on such grids should scale their costs.
use grid_util::point::Point;
use crate::SQRT_2;

/// Sum of the absolute coordinate differences. Used for 4-connected movement.
pub fn manhattan(a: Point, b: Point) -> f32 {
    a.manhattan_distance(&b) as f32
}

/// Cost of taking as many diagonal steps as possible and going straight for the rest.
/// Used for 8-connected movement.
pub fn octile(a: Point, b: Point) -> f32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    dx.max(dy) as f32 + (SQRT_2 - 1.0) * dx.min(dy) as f32
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Heuristic {
    Manhattan,
    Octile,
}

impl Heuristic {
    /// The admissible estimate matching the given movement model.
    pub fn for_connectivity(allow_diagonal: bool) -> Heuristic {
        if allow_diagonal {
            Heuristic::Octile
        } else {
            Heuristic::Manhattan
        }
    }

    pub fn estimate(&self, a: Point, b: Point) -> f32 {
        match self {
            Heuristic::Manhattan => manhattan(a, b),
            Heuristic::Octile => octile(a, b),
        }
    }
}
