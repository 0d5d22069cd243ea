use petgraph::algo::{connected_components, is_cyclic_undirected};
use petgraph::graph::{NodeIndex, UnGraph};

use crate::cells::GridCoordinate;
use crate::grid::Maze;
use crate::units::{EdgesCount, NodesCount};


/// The maze as an undirected graph: one node per cell, weighted with its coordinate, and one edge
/// per carved passage. Node indices follow the maze's row major cell order.
pub fn passage_graph(maze: &Maze) -> UnGraph<GridCoordinate, ()> {
    let (NodesCount(nodes), EdgesCount(edges)) = maze.dimensions().graph_size();
    let mut graph = UnGraph::with_capacity(nodes, edges);

    for coord in maze.iter() {
        let _ = graph.add_node(coord);
    }

    for (a, b) in maze.iter_links() {
        if let (Some(a_index), Some(b_index)) = (maze.grid_coordinate_to_index(a),
                                                 maze.grid_coordinate_to_index(b)) {
            let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
        }
    }

    graph
}

/// Does the maze have exactly one simple path between any two cells?
/// True when the passages form a spanning tree: one connected component, no cycles and
/// `cells - 1` passages.
pub fn is_perfect(maze: &Maze) -> bool {
    let graph = passage_graph(maze);
    graph.edge_count() + 1 == graph.node_count() && connected_components(&graph) == 1 &&
    !is_cyclic_undirected(&graph)
}


#[cfg(test)]
mod tests {

    use quickcheck::{quickcheck, TestResult};

    use super::*;
    use crate::generators::{generate_maze, generate_maze_seeded};
    use crate::grid_dimensions::MazeDimensions;

    fn gc(row: usize, col: usize) -> GridCoordinate {
        GridCoordinate::new(row, col)
    }

    fn walled_maze(rows: i64, columns: i64) -> Maze {
        Maze::new(MazeDimensions::new(rows, columns).expect("valid test dimensions"))
    }

    #[test]
    fn graph_mirrors_the_maze() {
        let mut g = walled_maze(2, 3);
        g.link(gc(0, 0), gc(0, 1)).expect("link failed");
        g.link(gc(0, 1), gc(1, 1)).expect("link failed");

        let graph = passage_graph(&g);
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph[NodeIndex::new(4)], gc(1, 1));
        assert!(graph.find_edge(NodeIndex::new(1), NodeIndex::new(4)).is_some());
        assert!(graph.find_edge(NodeIndex::new(0), NodeIndex::new(3)).is_none());
    }

    #[test]
    fn fully_walled_grid_is_not_perfect() {
        assert!(!is_perfect(&walled_maze(3, 3)));
        assert!(is_perfect(&walled_maze(1, 1)));
    }

    #[test]
    fn cycle_is_not_perfect() {
        let mut g = walled_maze(2, 2);
        g.link(gc(0, 0), gc(0, 1)).expect("link failed");
        g.link(gc(0, 1), gc(1, 1)).expect("link failed");
        g.link(gc(1, 1), gc(1, 0)).expect("link failed");
        assert!(is_perfect(&g));

        g.link(gc(1, 0), gc(0, 0)).expect("link failed");
        assert!(!is_perfect(&g));
    }

    #[test]
    fn disconnected_is_not_perfect() {
        let mut g = walled_maze(2, 2);
        g.link(gc(0, 0), gc(0, 1)).expect("link failed");
        g.link(gc(1, 0), gc(1, 1)).expect("link failed");
        assert!(!is_perfect(&g));
    }

    #[test]
    fn generated_mazes_are_perfect() {
        assert!(is_perfect(&generate_maze(1, 30).expect("valid")));
        assert!(is_perfect(&generate_maze(30, 1).expect("valid")));
        assert!(is_perfect(&generate_maze(64, 48).expect("valid")));
    }

    #[test]
    fn quickcheck_generated_mazes_are_perfect() {
        fn prop(rows: u8, columns: u8, seed: u64) -> TestResult {
            let (rows, columns) = (rows % 32, columns % 32);
            if rows == 0 || columns == 0 {
                return TestResult::discard();
            }
            let maze = generate_maze_seeded(rows as i64, columns as i64, seed).expect("valid");
            TestResult::from_bool(is_perfect(&maze))
        }
        quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }
}
