use grid_astar::{
    Control, Expansion, Grid, Manhattan, NodeStatus, Position, SearchContext, SearchObserver,
    SearchOutcome,
};

// Prints the grid after every expansion, the way a visualiser would redraw it. The search
// state is projected to characters here, outside the search:
// - # obstacle, S start, E end
// - o open, x closed, * path

struct Printer {
    grid: Grid,
    start: Position,
    end: Position,
    closed: Vec<Position>,
    open: Vec<Position>,
}

impl Printer {
    fn render(&self, status: impl Fn(Position) -> char) {
        for row in 0..self.grid.rows() {
            let line = (0..self.grid.cols())
                .map(|col| Position::new(row, col))
                .map(|p| {
                    if p == self.start {
                        'S'
                    } else if p == self.end {
                        'E'
                    } else if !self.grid.is_traversable(p) {
                        '#'
                    } else {
                        status(p)
                    }
                })
                .collect::<String>();
            println!("{}", line);
        }
        println!();
    }
}

impl SearchObserver<Position, u32> for Printer {
    fn on_expand(&mut self, step: &Expansion<'_, Position, u32>) -> Control {
        self.closed.push(step.current);
        self.open.extend(step.opened.iter().map(|(p, _)| *p));
        println!("Expanded {} at cost {}", step.current, step.cost);
        self.render(|p| {
            if self.closed.contains(&p) {
                'x'
            } else if self.open.contains(&p) {
                'o'
            } else {
                '.'
            }
        });
        Control::Continue
    }
}

fn main() {
    const N: usize = 8;
    let mut grid = Grid::new(N, N).expect("grid is not empty");
    for row in 1..N - 1 {
        grid.set_barrier(Position::new(row, 4), true)
            .expect("barrier lies on the grid");
    }
    let start = Position::new(3, 1);
    let end = Position::new(4, 6);
    let mut printer = Printer {
        grid: grid.clone(),
        start,
        end,
        closed: Vec::new(),
        open: Vec::new(),
    };
    let mut ctx = SearchContext::new();
    let outcome = ctx.run(&grid, start, end, &Manhattan, &mut printer);
    match outcome {
        Ok(SearchOutcome::Found(path)) => {
            println!("Path of cost {} found:", path.cost());
            printer.render(|p| {
                if path.nodes().contains(&p) {
                    '*'
                } else {
                    match ctx.status(&p) {
                        NodeStatus::Closed => 'x',
                        NodeStatus::Open => 'o',
                        NodeStatus::Unseen => '.',
                    }
                }
            });
        }
        Ok(SearchOutcome::NotFound) => println!("No path available."),
        Ok(SearchOutcome::Cancelled) => println!("Search cancelled."),
        Err(err) => println!("{}", err),
    }
}
