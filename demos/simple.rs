use grid_astar::{AstarSolver, GridSolver, Layout};

// In this example a path is found on a grid with shape
// S....
// ##.#.
// ...#.
// .###.
// ....E
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
fn main() {
    let layout = Layout::parse(
        "
        S....
        ##.#.
        ...#.
        .###.
        ....E
        ",
    )
    .expect("layout is well-formed");
    print!("{}", layout.grid);
    let (Some(start), Some(end)) = (layout.start, layout.end) else {
        return;
    };
    let solver = AstarSolver::new();
    match solver.get_path_single_goal(&layout.grid, start, end) {
        Some(path) => {
            println!("Path found:");
            for p in path {
                println!("{}", p);
            }
        }
        None => println!("No path available."),
    }
}
