/// Fuzzes the searches on many random grids: a path must be found exactly when start and goal
/// share a connected component, and JPS must agree with 8-connected A* on the path cost.
use grid_navigation::solver::path_cost_along;
use grid_navigation::*;
use rand::prelude::*;

fn random_grid(w: usize, h: usize, rng: &mut StdRng) -> WalkableGrid {
    let cells = (0..w * h).map(|_| !rng.gen_bool(0.4)).collect();
    WalkableGrid::from_cells(w, h, cells).unwrap()
}

fn random_costs(w: usize, h: usize, rng: &mut StdRng) -> CostGrid {
    let costs = (0..w * h)
        .map(|_| {
            if rng.gen_bool(0.3) {
                0.0
            } else {
                rng.gen_range(1.0..5.0)
            }
        })
        .collect();
    CostGrid::from_costs(w, h, costs).unwrap()
}

fn visualize_grid(grid: &WalkableGrid, start: &Point, end: &Point) {
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if grid.is_walkable(p) {
                print!(".");
            } else {
                print!("#");
            }
        }
        println!();
    }
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for diagonal in [false, true] {
        for _ in 0..N_GRIDS {
            let mut walkable = random_grid(N, N, &mut rng);
            walkable.set_point(start, true);
            walkable.set_point(end, true);
            let grid = walkable.to_cost_grid();
            let components = ComponentMap::new(&grid, diagonal);
            let reachable = components.connected(start, end);
            let path = astar(&grid, start, end, diagonal);
            // Show the grid if a path is not found
            if path.is_empty() == reachable {
                visualize_grid(&walkable, &start, &end);
            }
            assert_eq!(!path.is_empty(), reachable);
            if diagonal {
                assert_eq!(!jps(&walkable, start, end).is_empty(), reachable);
                assert_eq!(is_reachable(&grid, start, end), reachable);
            }
        }
    }
}

#[test]
fn fuzz_distance() {
    const N: usize = 12;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_GRIDS {
        let walkable = random_grid(N, N, &mut rng);
        let start = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
        let end = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
        let astar_path = astar_uniform(&walkable, start, end, true);
        let jps_path = jps(&walkable, start, end);
        assert_eq!(astar_path.is_empty(), jps_path.is_empty());
        if astar_path.is_empty() {
            continue;
        }
        let astar_cost = path_cost_along(&walkable.to_cost_grid(), &astar_path);
        let jps_cost = waypoints_cost(walkable.width(), &jps_path);
        if (jps_cost - astar_cost).abs() >= 1e-3 {
            println!("Astar distance: {astar_cost}; JPS distance: {jps_cost}");
            println!("Astar path: {astar_path:?}\n JPS path: {jps_path:?}\n");
            visualize_grid(&walkable, &start, &end);
        }
        assert!((jps_cost - astar_cost).abs() < 1e-3);
        let dense = waypoints_to_path(walkable.width(), &jps_path);
        assert!(dense.iter().all(|&ix| walkable.is_walkable_ix(ix)));
    }
}

#[test]
fn fuzz_weighted_costs() {
    const N: usize = 10;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..N_GRIDS {
        let grid = random_costs(N, N, &mut rng);
        let start = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
        let end = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
        for diagonal in [false, true] {
            let path = astar(&grid, start, end, diagonal);
            let cost = path_cost(&grid, start, end, diagonal);
            if path.is_empty() {
                assert_eq!(cost, UNREACHABLE);
                continue;
            }
            assert!((path_cost_along(&grid, &path) - cost).abs() < 1e-3);
            let weighted = astar_weighted(&grid, start, end, diagonal, 2.0);
            assert!(!weighted.is_empty());
            assert!(path_cost_along(&grid, &weighted) >= cost - 1e-3);
        }
        // The distance field around the start holds exact 4-connected path costs.
        let distances = dijkstra_map_single(&grid, start);
        let expected = path_cost(&grid, start, end, false);
        let found = distances.get_point(end);
        assert!(found == expected || (found - expected).abs() < 1e-3);
    }
}
