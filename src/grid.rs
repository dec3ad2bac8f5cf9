use core::fmt;

use grid_util::grid::{BoolGrid, SimpleValueGrid, ValueGrid};
use grid_util::point::Point;

/// Structural problems detected when building a grid from raw parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// The value array does not hold exactly `width * height` cells.
    LengthMismatch { expected: usize, actual: usize },
    /// `width * height` does not fit in a `usize`, or a side does not fit in an `i32` coordinate.
    DimensionOverflow { width: usize, height: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { expected, actual } => write!(
                f,
                "grid expects {expected} cells but {actual} values were supplied"
            ),
            Self::DimensionOverflow { width, height } => {
                write!(f, "grid dimensions {width}x{height} are too large")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Number of cells of a `width` by `height` grid, as long as every cell has an `i32` coordinate.
pub(crate) fn checked_cell_count(width: usize, height: usize) -> Result<usize, GridError> {
    let overflow = GridError::DimensionOverflow { width, height };
    if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
        return Err(overflow);
    }
    width.checked_mul(height).ok_or(overflow)
}

fn checked_len(width: usize, height: usize, actual: usize) -> Result<usize, GridError> {
    let expected = checked_cell_count(width, height)?;
    if expected != actual {
        return Err(GridError::LengthMismatch { expected, actual });
    }
    Ok(expected)
}

/// Row-major cell indices on top of the coordinate bookkeeping of [ValueGrid]. Index `ix`
/// belongs to the point `(ix % width, ix / width)`; conversions return [None] instead of
/// producing a cell outside the grid.
pub trait CellIndex<T: Copy>: ValueGrid<T> {
    fn cell_count(&self) -> usize {
        self.width() * self.height()
    }
    fn index_of(&self, point: Point) -> Option<usize> {
        if self.point_in_bounds(point) {
            Some(point.y as usize * self.width() + point.x as usize)
        } else {
            None
        }
    }
    fn point_of(&self, index: usize) -> Option<Point> {
        if index < self.cell_count() {
            let w = self.width();
            Some(Point::new((index % w) as i32, (index / w) as i32))
        } else {
            None
        }
    }
}

/// Passability rule shared by every cost-based algorithm: only positive, finite costs can be
/// entered.
pub fn cost_is_passable(cost: f32) -> bool {
    cost > 0.0 && cost.is_finite()
}

/// Per-cell movement costs. A cost of zero or less, NaN or infinity marks the cell impassable;
/// positive finite costs multiply the length of every step that enters the cell.
///
/// Implements [ValueGrid] by building on [SimpleValueGrid]. Reading a coordinate outside the
/// grid yields 0, a wall, and writing one is ignored.
#[derive(Clone, Debug)]
pub struct CostGrid {
    grid: SimpleValueGrid<f32>,
}

impl CostGrid {
    /// Builds a grid from row-major costs.
    pub fn from_costs(
        width: usize,
        height: usize,
        costs: Vec<f32>,
    ) -> Result<CostGrid, GridError> {
        checked_len(width, height, costs.len())?;
        let mut grid = CostGrid::filled(width, height, 0.0)?;
        for (ix, cost) in costs.into_iter().enumerate() {
            grid.set((ix % width) as i32, (ix / width) as i32, cost);
        }
        Ok(grid)
    }

    /// A grid where every cell has the same cost.
    pub fn filled(width: usize, height: usize, cost: f32) -> Result<CostGrid, GridError> {
        checked_cell_count(width, height)?;
        Ok(ValueGrid::new(width, height, cost))
    }

    /// Cost of the cell at `index`, [None] when out of range.
    pub fn cost(&self, index: usize) -> Option<f32> {
        self.point_of(index).map(|p| self.get_point(p))
    }

    pub fn is_passable(&self, index: usize) -> bool {
        self.cost(index).is_some_and(cost_is_passable)
    }

    pub fn is_passable_point(&self, point: Point) -> bool {
        self.point_in_bounds(point) && cost_is_passable(self.get_point(point))
    }

    /// Returns the index of `point` only if it lies on the grid and can be entered.
    pub fn passable_index(&self, point: Point) -> Option<usize> {
        self.index_of(point).filter(|&ix| self.is_passable(ix))
    }
}

impl ValueGrid<f32> for CostGrid {
    fn new(width: usize, height: usize, default_value: f32) -> Self {
        CostGrid {
            grid: SimpleValueGrid::new(width, height, default_value),
        }
    }
    fn get(&self, x: i32, y: i32) -> f32 {
        if self.grid.index_in_bounds(x, y) {
            self.grid.get(x, y)
        } else {
            0.0
        }
    }
    fn set(&mut self, x: i32, y: i32, cost: f32) {
        if self.grid.index_in_bounds(x, y) {
            self.grid.set(x, y, cost);
        }
    }
    fn width(&self) -> usize {
        self.grid.width()
    }
    fn height(&self) -> usize {
        self.grid.height()
    }
}

impl CellIndex<f32> for CostGrid {}

impl From<&WalkableGrid> for CostGrid {
    fn from(walkable: &WalkableGrid) -> CostGrid {
        let mut grid: CostGrid = ValueGrid::new(walkable.width(), walkable.height(), 0.0);
        for y in 0..walkable.height() as i32 {
            for x in 0..walkable.width() as i32 {
                if walkable.get(x, y) {
                    grid.set(x, y, 1.0);
                }
            }
        }
        grid
    }
}

impl fmt::Display for CostGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Costs:")?;
        for y in 0..self.height() as i32 {
            let values = (0..self.width() as i32)
                .map(|x| self.get(x, y))
                .collect::<Vec<f32>>();
            writeln!(f, "{:?}", values)?;
        }
        Ok(())
    }
}

/// Uniform-cost grid of walkable ([true]) and blocked ([false]) cells, the input of
/// Jump Point Search and [astar_uniform](crate::solver::astar::astar_uniform).
/// Implements [ValueGrid] by building on [BoolGrid]; coordinates outside the grid read as
/// blocked.
#[derive(Clone, Debug)]
pub struct WalkableGrid {
    grid: BoolGrid,
}

impl WalkableGrid {
    /// Builds a grid from row-major walkability flags.
    pub fn from_cells(
        width: usize,
        height: usize,
        cells: Vec<bool>,
    ) -> Result<WalkableGrid, GridError> {
        checked_len(width, height, cells.len())?;
        let mut grid: WalkableGrid = ValueGrid::new(width, height, false);
        for (ix, walkable) in cells.into_iter().enumerate() {
            grid.set((ix % width) as i32, (ix / width) as i32, walkable);
        }
        Ok(grid)
    }

    /// A grid with every cell walkable.
    pub fn open(width: usize, height: usize) -> Result<WalkableGrid, GridError> {
        checked_cell_count(width, height)?;
        Ok(ValueGrid::new(width, height, true))
    }

    /// Builds the grid from raw integer flags where any non-zero value is walkable.
    pub fn from_flags(
        width: usize,
        height: usize,
        flags: &[i32],
    ) -> Result<WalkableGrid, GridError> {
        WalkableGrid::from_cells(width, height, flags.iter().map(|&v| v != 0).collect())
    }

    /// Out-of-bounds points count as blocked.
    pub fn is_walkable(&self, point: Point) -> bool {
        self.get_point(point)
    }

    /// Like [is_walkable](Self::is_walkable) for a cell index.
    pub fn is_walkable_ix(&self, index: usize) -> bool {
        self.point_of(index).is_some_and(|p| self.get_point(p))
    }

    pub fn to_cost_grid(&self) -> CostGrid {
        CostGrid::from(self)
    }
}

impl ValueGrid<bool> for WalkableGrid {
    fn new(width: usize, height: usize, walkable: bool) -> Self {
        WalkableGrid {
            grid: BoolGrid::new(width, height, walkable),
        }
    }
    fn get(&self, x: i32, y: i32) -> bool {
        self.grid.index_in_bounds(x, y) && self.grid.get(x, y)
    }
    fn set(&mut self, x: i32, y: i32, walkable: bool) {
        if self.grid.index_in_bounds(x, y) {
            self.grid.set(x, y, walkable);
        }
    }
    fn width(&self) -> usize {
        self.grid.width()
    }
    fn height(&self) -> usize {
        self.grid.height()
    }
}

impl CellIndex<bool> for WalkableGrid {}

impl CellIndex<bool> for BoolGrid {}

impl fmt::Display for WalkableGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for y in 0..self.height() as i32 {
            let line: String = (0..self.width() as i32)
                .map(|x| if self.get(x, y) { '.' } else { '#' })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_lengths() {
        assert_eq!(
            CostGrid::from_costs(3, 3, vec![1.0; 8]).unwrap_err(),
            GridError::LengthMismatch {
                expected: 9,
                actual: 8
            }
        );
        assert!(WalkableGrid::from_cells(2, 2, vec![true; 5]).is_err());
        assert!(matches!(
            CostGrid::filled(usize::MAX, 2, 1.0),
            Err(GridError::DimensionOverflow { .. })
        ));
        assert!(matches!(
            WalkableGrid::open(i32::MAX as usize + 1, 1),
            Err(GridError::DimensionOverflow { .. })
        ));
    }

    #[test]
    fn index_round_trip_and_bounds() {
        let grid = CostGrid::filled(4, 3, 1.0).unwrap();
        assert_eq!(grid.index_of(Point::new(3, 2)), Some(11));
        assert_eq!(grid.point_of(11), Some(Point::new(3, 2)));
        assert_eq!(grid.index_of(Point::new(4, 0)), None);
        assert_eq!(grid.index_of(Point::new(-1, 0)), None);
        assert_eq!(grid.point_of(12), None);
    }

    #[test]
    fn costs_are_stored_row_major() {
        let grid = CostGrid::from_costs(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(grid.get(2, 0), 3.0);
        assert_eq!(grid.get_point(Point::new(0, 1)), 4.0);
        assert_eq!(grid.cost(5), Some(6.0));
        assert_eq!(grid.cost(6), None);
        assert_eq!(grid.get(3, 0), 0.0);
    }

    #[test]
    fn passability_follows_cost_sign() {
        let grid = CostGrid::from_costs(4, 1, vec![1.0, 0.0, -2.0, f32::NAN]).unwrap();
        assert!(grid.is_passable(0));
        assert!(!grid.is_passable(1));
        assert!(!grid.is_passable(2));
        assert!(!grid.is_passable(3));
        assert!(!grid.is_passable(4));
        assert_eq!(grid.passable_index(Point::new(0, 0)), Some(0));
        assert_eq!(grid.passable_index(Point::new(1, 0)), None);
    }

    #[test]
    fn infinite_cost_is_a_wall() {
        let costs = vec![1.0, f32::INFINITY, f32::NEG_INFINITY];
        let grid = CostGrid::from_costs(3, 1, costs).unwrap();
        assert!(!grid.is_passable(1));
        assert!(!grid.is_passable_point(Point::new(1, 0)));
        assert!(!grid.is_passable(2));
        assert_eq!(grid.passable_index(Point::new(1, 0)), None);
    }

    #[test]
    fn zero_sized_grid_is_valid_but_empty() {
        let grid = CostGrid::from_costs(0, 5, vec![]).unwrap();
        assert_eq!(grid.cell_count(), 0);
        assert!(!grid.point_in_bounds(Point::new(0, 0)));
        assert_eq!(grid.point_of(0), None);
    }

    #[test]
    fn walkable_converts_to_unit_costs() {
        let walkable = WalkableGrid::from_flags(3, 1, &[1, 0, 7]).unwrap();
        let costs = walkable.to_cost_grid();
        let values: Vec<f32> = (0..3).filter_map(|ix| costs.cost(ix)).collect();
        assert_eq!(values, vec![1.0, 0.0, 1.0]);
        assert!(!walkable.is_walkable(Point::new(1, 0)));
        assert!(!walkable.is_walkable(Point::new(3, 0)));
        assert!(walkable.is_walkable_ix(2));
        assert!(!walkable.is_walkable_ix(3));
    }

    #[test]
    fn writes_outside_the_grid_are_ignored() {
        let mut grid = WalkableGrid::open(2, 2).unwrap();
        grid.set_point(Point::new(5, 5), false);
        grid.set_point(Point::new(1, 0), false);
        assert_eq!(grid.to_string(), "Grid:\n.#\n..\n");
    }
}
