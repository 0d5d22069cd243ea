use log::{debug, trace};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::cells::{CoordinateSmallVec, GridCoordinate};
use crate::errors::*;
use crate::grid::Maze;
use crate::grid_dimensions::MazeDimensions;


/// Generate a perfect maze of `rows` by `columns` cells with its own freshly seeded random stream.
///
/// Fails with `InvalidGridSize` before any carving if either side is not positive.
pub fn generate_maze(rows: i64, columns: i64) -> Result<Maze> {
    let mut rng = weak_rng();
    generate_maze_with_rng(rows, columns, &mut rng)
}

/// Generate a perfect maze whose layout is fully determined by `seed`.
pub fn generate_maze_seeded(rows: i64, columns: i64, seed: u64) -> Result<Maze> {
    let mut rng = XorShiftRng::seed_from_u64(seed);
    generate_maze_with_rng(rows, columns, &mut rng)
}

pub fn generate_maze_with_rng<R: Rng>(rows: i64, columns: i64, rng: &mut R) -> Result<Maze> {
    let dimensions = MazeDimensions::new(rows, columns)?;
    let mut maze = Maze::new(dimensions);
    recursive_backtracker(&mut maze, rng)?;
    Ok(maze)
}

/// Apply the recursive backtracker maze generation algorithm to a fully walled grid.
///
/// A random walk that carves into unvisited neighbours. When the walk is boxed in by visited cells it
/// backtracks along its own path (a LIFO stack instead of call recursion, so the grid size never
/// limits the stack depth) until it finds a cell with an unvisited neighbour and carries on from there.
/// Every cell is entered exactly once through exactly one carved wall, which makes the passages a
/// spanning tree: a perfect maze. Long winding corridors with few dead ends are typical of it.
pub fn recursive_backtracker<R: Rng>(maze: &mut Maze, rng: &mut R) -> Result<()> {
    let mut backtracker = Backtracker::new(maze, rng);
    let mut carved = 0usize;
    loop {
        match backtracker.step()? {
            GenerationStep::Carved { .. } => carved += 1,
            GenerationStep::Backtracked(_) => {}
            GenerationStep::Done => break,
        }
    }
    debug!("recursive backtracker carved {} passages in a {}x{} grid",
           carved,
           maze.rows().0,
           maze.columns().0);
    Ok(())
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GenerationState {
    /// The cell on top of the stack has unvisited neighbours to carve into.
    Carving,
    /// The cell on top of the stack is boxed in and is about to be popped.
    Backtracking,
    Done,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GenerationStep {
    Carved { from: GridCoordinate, to: GridCoordinate },
    Backtracked(GridCoordinate),
    Done,
}

/// The recursive backtracker as an explicit state machine, one carve or backtrack per `step`.
///
/// Holds the grid exclusively for the whole run. Iterating yields every step up to, not including,
/// `Done`, which suits animating the generation.
pub struct Backtracker<'a, R: Rng> {
    maze: &'a mut Maze,
    rng: &'a mut R,
    stack: Vec<GridCoordinate>,
}

impl<'a, R: Rng> Backtracker<'a, R> {
    pub fn new(maze: &'a mut Maze, rng: &'a mut R) -> Backtracker<'a, R> {
        let start = maze.start();
        maze.mark_visited(start);
        let mut stack = Vec::with_capacity(maze.size());
        stack.push(start);

        Backtracker { maze, rng, stack }
    }

    pub fn state(&self) -> GenerationState {
        match self.stack.last() {
            Some(&current) if self.unvisited_neighbours(current).is_empty() => {
                GenerationState::Backtracking
            }
            Some(_) => GenerationState::Carving,
            None => GenerationState::Done,
        }
    }

    pub fn step(&mut self) -> Result<GenerationStep> {
        let current = match self.stack.last() {
            Some(&coord) => coord,
            None => return Ok(GenerationStep::Done),
        };

        let neighbours = self.unvisited_neighbours(current);
        if neighbours.is_empty() {
            self.stack.pop();
            trace!("backtracked from {:?}", current);
            return Ok(GenerationStep::Backtracked(current));
        }

        // Uniform choice, no preferred direction order.
        let next = neighbours[self.rng.gen_range(0..neighbours.len())];

        self.maze.link(current, next)?;
        self.maze.mark_visited(next);
        self.stack.push(next);
        trace!("carved {:?} -> {:?}", current, next);

        Ok(GenerationStep::Carved {
            from: current,
            to: next,
        })
    }

    fn unvisited_neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        self.maze
            .neighbours(coord)
            .into_iter()
            .filter(|neighbour| !self.maze.is_visited(*neighbour))
            .collect()
    }
}

impl<'a, R: Rng> Iterator for Backtracker<'a, R> {
    type Item = Result<GenerationStep>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            Ok(GenerationStep::Done) => None,
            step => Some(step),
        }
    }
}

/// Every call gets an independent stream, seeded from the thread local generator.
fn weak_rng() -> XorShiftRng {
    XorShiftRng::seed_from_u64(rand::thread_rng().gen())
}
