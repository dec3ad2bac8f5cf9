use grid_navigation::solver::path_cost_along;
use grid_navigation::{astar_with_config, CellIndex, CostGrid, Point, SearchConfig, ValueGrid};

// The heuristic weight can be set to scale the heuristic, causing nodes that are closer to the
// goal (ignoring obstacles) to be evaluated quicker than in normal operation. This is called
// Weighted A* and it can speed up the algorithm in certain scenarios, at the price of paths that
// may be longer than necessary.

fn set_rectangle(grid: &mut CostGrid, x: i32, y: i32, w: i32, h: i32, cost: f32) {
    for px in x..x + w {
        for py in y..y + h {
            grid.set(px, py, cost);
        }
    }
}

fn main() {
    const N: i32 = 30;
    let mut grid = CostGrid::filled(N as usize, N as usize, 0.0).unwrap();
    set_rectangle(&mut grid, 1, 1, N - 2, N - 2, 1.0);
    set_rectangle(&mut grid, 8, 8, 8, 8, 0.0);
    set_rectangle(&mut grid, 0, 3, 6, 6, 0.0);
    set_rectangle(&mut grid, 10, 0, 6, 6, 0.0);
    set_rectangle(&mut grid, 18, 18, 6, 6, 3.0);
    println!("{}", grid);
    let start = Point::new(1, 1);
    let end = Point::new(N - 3, N - 3);
    for weight in [1.0, 1.3, 3.0] {
        let config = SearchConfig::default().with_heuristic_weight(weight);
        let path = astar_with_config(&grid, start, end, &config);
        println!(
            "Weight {weight}: {} cells, cost {}",
            path.len(),
            path_cost_along(&grid, &path)
        );
        let points: Vec<Point> = path.iter().filter_map(|&ix| grid.point_of(ix)).collect();
        println!("{:?}", points);
    }
}
