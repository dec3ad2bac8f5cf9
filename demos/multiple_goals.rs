use grid_navigation::{dijkstra_map, dijkstra_path, CellIndex, CostGrid, Point, ValueGrid};

// In this example a path is found to one of two goals on a 3x3 grid with shape
//  ___
// |S G|
// | # |
// |  G|
//  ___
// where
// - \# marks an obstacle
// - S marks the start
// - G marks a goal
// The found path moves to the closest goal, which is the top one.

fn main() {
    let mut grid = CostGrid::filled(3, 3, 1.0).unwrap();
    grid.set(1, 1, 0.0);
    println!("{}", grid);
    let start = Point::new(0, 0);
    let goals = [Point::new(2, 0), Point::new(2, 2)];
    let path = dijkstra_path(&grid, start, &goals);
    if let Some(&last) = path.last() {
        println!("Selected goal: {:?}\n", grid.point_of(last).unwrap());
    }
    println!("Path:");
    for &ix in &path {
        println!("{:?}", grid.point_of(ix).unwrap());
    }
    println!("\nDistance to the nearest goal:");
    let distances = dijkstra_map(&grid, &goals);
    for row in distances.distances().chunks(distances.width()) {
        println!("{:?}", row);
    }
}
