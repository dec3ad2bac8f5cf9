use grid_navigation::post_process::{funnel_smooth, path_to_vectors, simplify_path};
use grid_navigation::{jps, waypoints_to_path, CellIndex, Point, ValueGrid, WalkableGrid};

/// This example illustrates the type of output [jps] gives. It is a minimal representation that
/// can be expanded using [waypoints_to_path].
/// A path is found on a 5x5 grid with shape
/// S
///  #
///
///
///     E
/// where
/// - S marks the start
/// - E marks the end
fn main() {
    let mut grid = WalkableGrid::open(5, 5).unwrap();
    grid.set(1, 1, false);
    println!("{}", grid);
    let start = Point::new(0, 0);
    let end = Point::new(4, 4);
    let waypoints = jps(&grid, start, end);
    println!("Unexpanded path:");
    for &ix in &waypoints {
        println!("{:?}", grid.point_of(ix).unwrap());
    }
    let path = waypoints_to_path(grid.width(), &waypoints);
    println!("Expanded path:");
    for &ix in &path {
        println!("{:?}", grid.point_of(ix).unwrap());
    }
    // Cells where the expanded path turns, and the same path pulled taut in world space.
    println!("Simplified: {:?}", simplify_path(&path, grid.width()));
    let blocking: Vec<i32> = (0..grid.cell_count())
        .map(|ix| i32::from(!grid.is_walkable_ix(ix)))
        .collect();
    let world = path_to_vectors(&path, grid.width(), 1.0);
    println!("Funnel: {:?}", funnel_smooth(&world, &blocking, grid.width(), 1));
}
