// Flood fill distances over the carved passages of a maze.
//
// A perfect maze has exactly one simple path between any two cells, so the breadth first
// frontier never meets a cell twice through different routes and the first distance written
// for a cell is final. Walking back downhill from any reached cell to the start is the
// unique path between the two.

use std::fmt::{Debug, Display, LowerHex};
use std::ops::Add;

use itertools::Itertools;
use log::debug;
use num::traits::{Bounded, One, Unsigned, Zero};
use smallvec::SmallVec;

use crate::cells::GridCoordinate;
use crate::grid::Maze;
use crate::utils::{self, FnvHashMap};


// Bounds for the distance counter type, gathered in one trait as there are no aliases for bounds.
pub trait MaxDistance
    : Zero + One + Bounded + Unsigned + Add + Debug + Clone + Copy + Display + LowerHex + Ord
    {
}
impl<T: Zero + One + Bounded + Unsigned + Add + Debug + Clone + Copy + Display + LowerHex + Ord> MaxDistance for T {}


#[derive(Debug, Clone)]
pub struct Distances<MaxDistanceT = u32> {
    start_coordinate: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, MaxDistanceT>,
    max_distance: MaxDistanceT,
}

impl<MaxDistanceT: MaxDistance> Distances<MaxDistanceT> {
    /// Distances from `start_coordinate` to every cell reachable through passages.
    /// None if the start is not on the maze.
    pub fn new(maze: &Maze, start_coordinate: GridCoordinate) -> Option<Distances<MaxDistanceT>> {

        if !maze.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = Zero::zero();
        let mut distances = utils::fnv_hashmap(maze.size());
        distances.insert(start_coordinate, Zero::zero());

        // The distances map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell: MaxDistanceT = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                let links = maze.links(*cell_coord).unwrap_or_default();
                for link_coordinate in &*links {
                    if !distances.contains_key(link_coordinate) {
                        distances.insert(*link_coordinate, distance_to_cell + One::one());
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> GridCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> MaxDistanceT {
        self.max_distance
    }

    /// Number of cells reached from the start, the start included.
    #[inline]
    pub fn reached_count(&self) -> usize {
        self.distances.len()
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: GridCoordinate) -> Option<MaxDistanceT> {
        self.distances.get(&coord).cloned()
    }

    /// All cells at the maximum distance, in row major order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[GridCoordinate; 8]> {
        let furthest_distance = self.max();
        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .sorted()
            .collect()
    }
}

/// The cells on the path from the start of `distances_from_start` to `end_point`, both included.
/// None if `end_point` cannot be reached.
pub fn shortest_path<MaxDistanceT: MaxDistance>(maze: &Maze,
                                                distances_from_start: &Distances<MaxDistanceT>,
                                                end_point: GridCoordinate)
                                                -> Option<Vec<GridCoordinate>> {

    distances_from_start.distance_from_start_to(end_point)?;

    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {

        let current_distance_to_start = distances_from_start.distance_from_start_to(current_coord)?;

        let closest_to_start = maze.links(current_coord)?
            .iter()
            .filter_map(|coord| {
                distances_from_start.distance_from_start_to(*coord).map(|d| (*coord, d))
            })
            .min_by_key(|&(_, distance)| distance);

        match closest_to_start {
            Some((closer_coord, closer_distance)) if closer_distance < current_distance_to_start => {
                current_coord = closer_coord;
                path.push(current_coord);
            }
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// The unique route through the maze from its start cell to its end cell.
pub fn solution_path(maze: &Maze) -> Option<Vec<GridCoordinate>> {
    let distances = Distances::<u32>::new(maze, maze.start())?;
    let path = shortest_path(maze, &distances, maze.end());
    if let Some(ref p) = path {
        debug!("solution path from {:?} to {:?} is {} cells long", maze.start(), maze.end(), p.len());
    }
    path
}

/// The longest path in the maze, found by flooding from the start cell to its furthest cell and then
/// flooding again from there.
pub fn longest_path(maze: &Maze) -> Option<Vec<GridCoordinate>> {
    let first_distances = Distances::<u32>::new(maze, maze.start())?;
    let long_path_start_coordinate = *first_distances.furthest_points_on_grid().first()?;

    let distances_from_start = Distances::<u32>::new(maze, long_path_start_coordinate)?;
    let end_point = *distances_from_start.furthest_points_on_grid().first()?;

    shortest_path(maze, &distances_from_start, end_point)
}


#[cfg(test)]
mod tests {

    use quickcheck::{quickcheck, TestResult};

    use super::*;
    use crate::generators::generate_maze_seeded;
    use crate::grid_dimensions::MazeDimensions;

    type SmallDistances = Distances<u8>;

    fn gc(row: usize, col: usize) -> GridCoordinate {
        GridCoordinate::new(row, col)
    }

    fn walled_maze(rows: i64, columns: i64) -> Maze {
        Maze::new(MazeDimensions::new(rows, columns).expect("valid test dimensions"))
    }

    // 2x2 grid with passages on three sides: 00 - 01 - 11 - 10
    fn u_shaped_maze() -> Maze {
        let mut g = walled_maze(2, 2);
        g.link(gc(0, 0), gc(0, 1)).expect("link failed");
        g.link(gc(0, 1), gc(1, 1)).expect("link failed");
        g.link(gc(1, 1), gc(1, 0)).expect("link failed");
        g
    }

    #[test]
    fn start() {
        let g = walled_maze(3, 3);
        let start_coordinate = gc(1, 1);
        let distances = SmallDistances::new(&g, start_coordinate).unwrap();
        assert_eq!(start_coordinate, distances.start());
    }

    #[test]
    fn invalid_start_has_no_distances() {
        let g = walled_maze(3, 3);
        assert!(SmallDistances::new(&g, gc(3, 0)).is_none());
    }

    #[test]
    fn distances_to_unreachable_cells_is_none() {
        let g = walled_maze(3, 3);
        let start_coordinate = gc(0, 0);
        let distances = SmallDistances::new(&g, start_coordinate).unwrap();
        for coord in g.iter() {
            let d = distances.distance_from_start_to(coord);
            if coord != start_coordinate {
                assert!(d.is_none());
            } else {
                assert_eq!(d, Some(0));
            }
        }
        assert_eq!(distances.reached_count(), 1);
    }

    #[test]
    fn distances_along_passages() {
        let g = u_shaped_maze();
        let distances = SmallDistances::new(&g, gc(0, 0)).unwrap();

        assert_eq!(distances.distance_from_start_to(gc(0, 0)), Some(0));
        assert_eq!(distances.distance_from_start_to(gc(0, 1)), Some(1));
        assert_eq!(distances.distance_from_start_to(gc(1, 1)), Some(2));
        assert_eq!(distances.distance_from_start_to(gc(1, 0)), Some(3));
        assert_eq!(distances.max(), 3);
        assert_eq!(&*distances.furthest_points_on_grid(), &[gc(1, 0)]);
    }

    #[test]
    fn path_follows_passages_not_adjacency() {
        let g = u_shaped_maze();
        let distances = SmallDistances::new(&g, gc(0, 0)).unwrap();
        assert_eq!(shortest_path(&g, &distances, gc(1, 0)),
                   Some(vec![gc(0, 0), gc(0, 1), gc(1, 1), gc(1, 0)]));
        assert_eq!(shortest_path(&g, &distances, gc(0, 0)), Some(vec![gc(0, 0)]));
    }

    #[test]
    fn no_path_to_walled_off_cell() {
        let mut g = walled_maze(2, 2);
        g.link(gc(0, 0), gc(0, 1)).expect("link failed");
        let distances = SmallDistances::new(&g, gc(0, 0)).unwrap();
        assert_eq!(shortest_path(&g, &distances, gc(1, 1)), None);
    }

    #[test]
    fn two_by_two_solution_is_two_hops() {
        for seed in 0..20 {
            let maze = generate_maze_seeded(2, 2, seed).expect("valid");
            let path = solution_path(&maze).expect("perfect maze has a solution");
            assert_eq!(path.first(), Some(&gc(0, 0)));
            assert_eq!(path.last(), Some(&gc(1, 1)));
            assert_eq!(path.len(), 3);
        }
    }

    #[test]
    fn longest_path_of_a_corridor_is_the_corridor() {
        let maze = generate_maze_seeded(1, 6, 5).expect("valid");
        let path = longest_path(&maze).expect("corridor has a longest path");
        assert_eq!(path.len(), 6);
        assert_eq!(path.first(), Some(&gc(0, 5)));
        assert_eq!(path.last(), Some(&gc(0, 0)));
    }

    #[test]
    fn quickcheck_solution_path_is_a_walk_of_linked_cells() {
        fn prop(rows: u8, columns: u8, seed: u64) -> TestResult {
            let (rows, columns) = (rows % 16, columns % 16);
            if rows == 0 || columns == 0 {
                return TestResult::discard();
            }
            let maze = generate_maze_seeded(rows as i64, columns as i64, seed).expect("valid");
            let path = match solution_path(&maze) {
                Some(path) => path,
                None => return TestResult::failed(),
            };
            let ends_ok = path.first() == Some(&maze.start()) && path.last() == Some(&maze.end());
            let linked = path.windows(2).all(|pair| maze.is_linked(pair[0], pair[1]));
            let distances = Distances::<u32>::new(&maze, maze.start()).expect("valid start");

            TestResult::from_bool(ends_ok && linked &&
                                  distances.reached_count() == maze.size() &&
                                  distances.distance_from_start_to(maze.end()) ==
                                  Some(path.len() as u32 - 1))
        }
        quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }
}
