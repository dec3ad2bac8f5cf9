use grid_navigation::{flow_field_multi, CostGrid, Point, ValueGrid, Vec2};

// A flow field towards two exits on a 12x6 grid with a wall in the middle. Every cell shows the
// direction an agent standing there should move in.

fn arrow(v: Vec2) -> char {
    match (v.x.round() as i32, v.y.round() as i32) {
        (0, -1) => '↑',
        (1, -1) => '↗',
        (1, 0) => '→',
        (1, 1) => '↘',
        (0, 1) => '↓',
        (-1, 1) => '↙',
        (-1, 0) => '←',
        (-1, -1) => '↖',
        _ => '·',
    }
}

fn main() {
    let mut grid = CostGrid::filled(12, 6, 1.0).unwrap();
    for y in 1..5 {
        grid.set(6, y, 0.0);
    }
    let exits = [Point::new(0, 0), Point::new(11, 5)];
    let field = flow_field_multi(&grid, &exits);
    for y in 0..field.height() as i32 {
        let row: String = (0..field.width() as i32)
            .map(|x| {
                let p = Point::new(x, y);
                if !grid.is_passable_point(p) {
                    '#'
                } else if exits.contains(&p) {
                    'X'
                } else {
                    arrow(field.get_point(p))
                }
            })
            .collect();
        println!("{row}");
    }
}
