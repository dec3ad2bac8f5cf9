//! Flow fields: one steering vector per cell pointing towards the steepest descent of a
//! [DistanceMap], so any number of agents can follow the field towards the goals without
//! searching individually.
use grid_util::grid::ValueGrid;
use grid_util::point::Point;
use log::debug;

use crate::grid::{CellIndex, CostGrid};
use crate::solver::dijkstra::{dijkstra_map, DistanceMap};
use crate::vec2::Vec2;

/// Neighbours in the order they are compared. With `y` growing downward this is
/// N, NE, E, SE, S, SW, W, NW.
const DESCENT_ORDER: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Unit steering vectors laid out like the grid they were derived from. Reading a coordinate
/// outside the field through [ValueGrid] yields the zero vector.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowField {
    width: usize,
    height: usize,
    vectors: Vec<Vec2>,
}

impl FlowField {
    pub fn vectors(&self) -> &[Vec2] {
        &self.vectors
    }

    /// Vector at `index`, zero when out of range.
    pub fn vector(&self, index: usize) -> Vec2 {
        self.vectors.get(index).copied().unwrap_or(Vec2::ZERO)
    }
}

impl ValueGrid<Vec2> for FlowField {
    fn new(width: usize, height: usize, default_value: Vec2) -> Self {
        FlowField {
            width,
            height,
            vectors: vec![default_value; width * height],
        }
    }
    fn get(&self, x: i32, y: i32) -> Vec2 {
        self.index_of(Point::new(x, y))
            .map_or(Vec2::ZERO, |ix| self.vectors[ix])
    }
    fn set(&mut self, x: i32, y: i32, vector: Vec2) {
        if let Some(ix) = self.index_of(Point::new(x, y)) {
            self.vectors[ix] = vector;
        }
    }
    fn width(&self) -> usize {
        self.width
    }
    fn height(&self) -> usize {
        self.height
    }
}

impl CellIndex<Vec2> for FlowField {}

fn steepest_descent(distances: &DistanceMap, pos: Point) -> Vec2 {
    let here = distances.get_point(pos);
    if !here.is_finite() {
        return Vec2::ZERO;
    }
    let mut best = here;
    let mut best_dir = None;
    for (dx, dy) in DESCENT_ORDER {
        let d = distances.get(pos.x + dx, pos.y + dy);
        if d < best {
            best = d;
            best_dir = Some(Vec2::new(dx as f32, dy as f32));
        }
    }
    best_dir.map_or(Vec2::ZERO, |delta| delta.normalized())
}

/// Derives the flow field of a distance map. Every cell with a finite distance points at the
/// first neighbour (in N, NE, E, SE, S, SW, W, NW order) holding the strictly lowest distance.
/// Cells without a strictly lower neighbour, such as goals, and unreached cells get the zero
/// vector.
pub fn flow_field_from_distances(distances: &DistanceMap) -> FlowField {
    let mut field: FlowField = ValueGrid::new(distances.width(), distances.height(), Vec2::ZERO);
    for y in 0..distances.height() as i32 {
        for x in 0..distances.width() as i32 {
            field.set(x, y, steepest_descent(distances, Point::new(x, y)));
        }
    }
    field
}

/// Like [flow_field_from_distances] for a raw row-major slice. A slice whose length does not
/// match `width * height` yields an empty field.
pub fn flow_field_from_slice(distances: &[f32], width: usize, height: usize) -> FlowField {
    match DistanceMap::from_distances(width, height, distances.to_vec()) {
        Ok(map) => flow_field_from_distances(&map),
        Err(err) => {
            debug!("Flow field not generated: {err}");
            FlowField::default()
        }
    }
}

/// Flow field leading towards `goal` over the 4-connected distance map of `grid`.
pub fn flow_field(grid: &CostGrid, goal: Point) -> FlowField {
    flow_field_multi(grid, &[goal])
}

/// Flow field leading towards the nearest of `goals`.
pub fn flow_field_multi(grid: &CostGrid, goals: &[Point]) -> FlowField {
    flow_field_from_distances(&dijkstra_map(grid, goals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UNREACHABLE;

    const EPSILON: f32 = 1e-6;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
    }

    #[test]
    fn goal_and_row_neighbours() {
        let grid = CostGrid::filled(3, 1, 1.0).unwrap();
        let field = flow_field(&grid, Point::new(0, 0));
        let west = Vec2::new(-1.0, 0.0);
        assert_eq!(field.vectors(), &[Vec2::ZERO, west, west]);
    }

    #[test]
    fn diagonal_descent_is_normalized() {
        // Distances on a 3x3 grid towards (2,2), 4-connected: the corner at (0,0) holds 4 and
        // its SE neighbour (1,1) holds 2, the lowest around it.
        let grid = CostGrid::filled(3, 3, 1.0).unwrap();
        let field = flow_field(&grid, Point::new(2, 2));
        let h = std::f32::consts::FRAC_1_SQRT_2;
        assert!(approx(field.get_point(Point::new(0, 0)), Vec2::new(h, h)));
        assert_eq!(field.get_point(Point::new(2, 2)), Vec2::ZERO);
    }

    #[test]
    fn ties_resolve_in_compass_order() {
        // The cell in the middle sees 0.0 both to the N and to the E; N comes first.
        let distances = [
            5.0, 0.0, 5.0, //
            5.0, 1.0, 0.0, //
            5.0, 5.0, 5.0,
        ];
        let field = flow_field_from_slice(&distances, 3, 3);
        assert_eq!(field.get_point(Point::new(1, 1)), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn unreachable_cells_and_plateaus_are_zero() {
        let distances = [UNREACHABLE, 2.0, 2.0, 2.0];
        let field = flow_field_from_slice(&distances, 2, 2);
        assert_eq!(field.vector(0), Vec2::ZERO);
        assert!(field.vectors()[1..].iter().all(|v| v.is_zero()));
    }

    #[test]
    fn mismatched_slice_gives_empty_field() {
        let field = flow_field_from_slice(&[0.0; 5], 2, 2);
        assert!(field.vectors().is_empty());
        assert_eq!(field.vector(0), Vec2::ZERO);
        assert_eq!(field.get(0, 0), Vec2::ZERO);
    }

    #[test]
    fn every_vector_points_strictly_downhill() {
        let mut grid = CostGrid::filled(8, 6, 1.0).unwrap();
        for y in 0..4 {
            grid.set(4, y, 0.0);
        }
        grid.set(2, 3, 3.0);
        let goals = [Point::new(7, 0), Point::new(0, 5)];
        let distances = dijkstra_map(&grid, &goals);
        let field = flow_field_from_distances(&distances);
        for ix in 0..field.cell_count() {
            let v = field.vector(ix);
            if !distances.is_reached(ix) || distances.distance(ix) == 0.0 {
                assert!(v.is_zero());
                continue;
            }
            let pos = field.point_of(ix).unwrap();
            let next = (pos.x + v.x.round() as i32, pos.y + v.y.round() as i32);
            assert!(distances.get(next.0, next.1) < distances.distance(ix));
        }
    }

    #[test]
    fn multi_goal_field_has_a_sink_per_goal() {
        let grid = CostGrid::filled(5, 1, 1.0).unwrap();
        let field = flow_field_multi(&grid, &[Point::new(0, 0), Point::new(4, 0)]);
        assert_eq!(field.vector(0), Vec2::ZERO);
        assert_eq!(field.vector(4), Vec2::ZERO);
        assert_eq!(field.vector(1), Vec2::new(-1.0, 0.0));
        assert_eq!(field.get(3, 0), Vec2::new(1.0, 0.0));
    }
}
