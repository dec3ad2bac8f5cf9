use grid_navigation::{astar, path_cost, CellIndex, CostGrid, Point, ValueGrid};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    let mut grid = CostGrid::filled(3, 3, 1.0).unwrap();
    grid.set(1, 1, 0.0);
    println!("{}", grid);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    let path = astar(&grid, start, end, false);
    println!("Path (cost {}):", path_cost(&grid, start, end, false));
    for ix in path {
        println!("{:?}", grid.point_of(ix).unwrap());
    }
}
