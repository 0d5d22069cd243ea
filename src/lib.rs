//! **perfect_mazes** generates rectangular perfect mazes, exactly one path between any two cells,
//! with the iterative recursive backtracker, and exposes what renderers and page layouts need
//! to draw them.

#![recursion_limit = "1024"]

pub mod cells;
pub mod errors;
pub mod generators;
pub mod graphs;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_iterators;
pub mod pathing;
pub mod renderers;
pub mod units;
mod utils;

pub use crate::generators::{generate_maze, generate_maze_seeded, generate_maze_with_rng};
pub use crate::grid::Maze;
