use grid_astar::{dijkstra, shortest_distances, WeightedGraph};

// Distances on a small undirected weighted graph
//
//   D -4- A -3- C -2- B
//   |     |   / |     |
//   2     4  4  5     2
//   |     | /   |     |
//   +---- E     F ----+
//         |     |
//         5     5
//          \   /
//            G
fn main() {
    let mut graph = WeightedGraph::new();
    let v = ['A', 'B', 'C', 'D', 'E', 'F', 'G'].map(|label| graph.add_vertex(label));
    let [a, b, c, d, e, f, g] = v;
    for (x, y, w) in [
        (d, a, 4),
        (d, e, 2),
        (a, c, 3),
        (a, e, 4),
        (c, e, 4),
        (e, g, 5),
        (c, f, 5),
        (c, b, 2),
        (b, f, 2),
        (g, f, 5),
    ] {
        graph.add_edge(x, y, w);
    }

    println!("Dijkstra's algorithm starting from vertex D:\n");
    match shortest_distances(&graph, d) {
        Ok(distances) => {
            for vertex in v {
                let label = graph.label(vertex).copied().unwrap_or('?');
                match distances.get(&vertex) {
                    Some(cost) => println!("Shortest distance from D to {}: {}", label, cost),
                    None => println!("{} is unreachable from D", label),
                }
            }
        }
        Err(err) => println!("{}", err),
    }

    if let Ok(outcome) = dijkstra(&graph, d, f) {
        if let Some(path) = outcome.path() {
            let route = path
                .nodes()
                .iter()
                .filter_map(|v| graph.label(*v))
                .collect::<String>();
            println!("\nCheapest route from D to F: {} (cost {})", route, path.cost());
        }
    }
}
