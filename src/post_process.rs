//! Turning search output into something an agent can follow: dropping redundant cells, pulling
//! the path taut around obstacles and converting indices to coordinates.
use itertools::Itertools;

use grid_util::point::Point;

use crate::grid::CellIndex;
use crate::vec2::Vec2;
use crate::Path;

/// Averages every interior point with its two neighbours, `iterations` times. The endpoints stay
/// fixed. Obstacles are not consulted, so the result is only meant for display or steering
/// targets. Paths with fewer than three points are returned unchanged.
pub fn smooth_path(path: &[Vec2], iterations: usize) -> Vec<Vec2> {
    let mut result = path.to_vec();
    if result.len() < 3 {
        return result;
    }
    for _ in 0..iterations {
        let mut smoothed = result.clone();
        for (i, (a, b, c)) in result.iter().tuple_windows().enumerate() {
            smoothed[i + 1] = Vec2::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0);
        }
        result = smoothed;
    }
    result
}

/// Whether the straight line between the cells `from` and `to` avoids every cell of `grid` equal
/// to `blocking_value`. The line is rasterized with Bresenham's algorithm and both endpoints are
/// checked. Cells outside the `width`-wide grid never block.
pub fn has_line_of_sight(
    grid: &[i32],
    width: usize,
    blocking_value: i32,
    from: Point,
    to: Point,
) -> bool {
    let blocks = |x: i64, y: i64| {
        if x < 0 || y < 0 || x as u64 >= width as u64 {
            return false;
        }
        usize::try_from(y as u64 * width as u64 + x as u64)
            .ok()
            .and_then(|ix| grid.get(ix))
            .is_some_and(|&v| v == blocking_value)
    };
    let (x1, y1) = (to.x as i64, to.y as i64);
    let (mut x, mut y) = (from.x as i64, from.y as i64);
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        if blocks(x, y) {
            return false;
        }
        if x == x1 && y == y1 {
            return true;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// String pulling: starting from the first point, repeatedly jumps to the furthest later point
/// that is in line of sight (see [has_line_of_sight]) and keeps only the points jumped to.
/// Coordinates are truncated to cells of the row-major `grid`. Paths with fewer than three
/// points, or a zero `width`, are returned unchanged.
pub fn funnel_smooth(path: &[Vec2], grid: &[i32], width: usize, blocking_value: i32) -> Vec<Vec2> {
    if path.len() < 3 || width == 0 {
        return path.to_vec();
    }
    let cell = |v: &Vec2| Point::new(v.x as i32, v.y as i32);
    let mut result = vec![path[0]];
    let mut current = 0;
    while current < path.len() - 1 {
        let from = cell(&path[current]);
        let furthest = (current + 2..path.len())
            .rev()
            .find(|&i| has_line_of_sight(grid, width, blocking_value, from, cell(&path[i])))
            .unwrap_or(current + 1);
        result.push(path[furthest]);
        current = furthest;
    }
    result
}

/// Removes interior cells where the path continues in the same direction, keeping the first and
/// last cell and every cell where the direction changes. A zero `width` or a path with fewer
/// than three cells is returned unchanged.
pub fn simplify_path(path: &[usize], width: usize) -> Path {
    if path.len() < 3 || width == 0 {
        return path.to_vec();
    }
    let to_point = |ix: usize| Point::new((ix % width) as i32, (ix / width) as i32);
    let mut result = vec![path[0]];
    result.extend(
        path.iter()
            .tuple_windows()
            .filter(|&(&a, &b, &c)| {
                let (a, b, c) = (to_point(a), to_point(b), to_point(c));
                (b.x - a.x, b.y - a.y) != (c.x - b.x, c.y - b.y)
            })
            .map(|(_, &b, _)| b),
    );
    result.extend(path.last());
    result
}

/// Grid coordinates of every cell of `path`. Indices outside `grid` are skipped.
pub fn path_to_points<T: Copy, G: CellIndex<T>>(grid: &G, path: &[usize]) -> Vec<Point> {
    path.iter().filter_map(|&ix| grid.point_of(ix)).collect()
}

/// World positions of the cell centres along `path` for cells of size `cell_size`.
pub fn path_to_vectors(path: &[usize], width: usize, cell_size: f32) -> Vec<Vec2> {
    if width == 0 {
        return Vec::new();
    }
    let half = cell_size * 0.5;
    path.iter()
        .map(|&ix| {
            let (x, y) = (ix % width, ix / width);
            Vec2::new(x as f32 * cell_size + half, y as f32 * cell_size + half)
        })
        .collect()
}
