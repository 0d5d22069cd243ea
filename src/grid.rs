use error_chain::bail;
use std::convert::TryFrom;
use std::fmt;
use std::ops::Index;

use crate::cells::{Cell, CompassPrimary, CoordinateOptionSmallVec, CoordinateSmallVec,
                   GridCoordinate};
use crate::errors::*;
use crate::grid_dimensions::MazeDimensions;
use crate::grid_iterators::{self, BatchIter, CellIter};
use crate::units::{CellPixels, ColumnsCount, Height, RowsCount, WallPixels, Width};


/// A rectangular grid of walled cells stored row major in one contiguous buffer.
///
/// Only the crate's generators carve passages. Once handed out a `Maze` is read only, so
/// the wall flags of two neighbouring cells always agree about the wall they share.
#[derive(Clone, Eq, PartialEq)]
pub struct Maze {
    dimensions: MazeDimensions,
    cells: Vec<Cell>,
}

impl fmt::Debug for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Maze :: rows: {:?}, columns: {:?}, links: {:?}",
               self.rows(), self.columns(), self.links_count())
    }
}

impl Maze {
    /// A grid with every wall standing and no cell visited, ready to be carved by
    /// `generators::recursive_backtracker` or stepped through with a `generators::Backtracker`.
    pub fn new(dimensions: MazeDimensions) -> Maze {
        let cells = CellIter::new(dimensions).map(Cell::new).collect();
        Maze { dimensions, cells }
    }

    #[inline]
    pub fn dimensions(&self) -> &MazeDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.dimensions.size().0
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.dimensions.rows()
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.dimensions.columns()
    }

    /// The top left cell.
    #[inline]
    pub fn start(&self) -> GridCoordinate {
        GridCoordinate::new(0, 0)
    }

    /// The bottom right cell.
    #[inline]
    pub fn end(&self) -> GridCoordinate {
        GridCoordinate::new(self.rows().0 - 1, self.columns().0 - 1)
    }

    #[inline]
    pub fn cell(&self, coord: GridCoordinate) -> Option<&Cell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.dimensions)
    }

    #[inline]
    pub fn iter_row(&self) -> BatchIter {
        BatchIter::rows(self.dimensions)
    }

    #[inline]
    pub fn iter_column(&self) -> BatchIter {
        BatchIter::columns(self.dimensions)
    }

    /// Is the grid coordinate within the grid's dimensions.
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        coord.row < self.rows().0 && coord.col < self.columns().0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...maze.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row * self.columns().0 + coord.col)
        } else {
            None
        }
    }

    #[inline]
    pub fn index_to_grid_coordinate(&self, index: usize) -> Option<GridCoordinate> {
        if index < self.size() {
            Some(grid_iterators::index_to_grid_coordinate(&self.dimensions, index))
        } else {
            None
        }
    }

    /// Cells that are to the North, South, East or West of a particular cell, but not
    /// necessarily joined by a passage.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    pub fn neighbours_at_directions(&self,
                                    coord: GridCoordinate,
                                    dirs: &[CompassPrimary])
                                    -> CoordinateOptionSmallVec {
        dirs.iter()
            .map(|direction| self.neighbour_at_direction(coord, *direction))
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<GridCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        coord.offset(direction)
             .filter(|neighbour_coord| self.is_valid_coordinate(*neighbour_coord))
    }

    /// Are two adjacent cells joined by a passage (no wall between them)?
    pub fn is_linked(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        match (self.cell(a), self.cell(b), a.direction_to(b)) {
            (Some(cell_a), Some(_), Some(dir)) => !cell_a.has_wall(dir),
            _ => false,
        }
    }

    pub fn is_neighbour_linked(&self, coord: GridCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour_coord| self.is_linked(coord, neighbour_coord))
    }

    /// Cells that are joined to a particular cell by a passage.
    /// None if the coordinate is not in the grid.
    pub fn links(&self, coord: GridCoordinate) -> Option<CoordinateSmallVec> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        let linked = CompassPrimary::ALL
            .iter()
            .filter(|dir| self.is_neighbour_linked(coord, **dir))
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect();
        Some(linked)
    }

    /// Number of carved passages. Each passage is counted once even though two cells share it.
    pub fn links_count(&self) -> usize {
        self.iter_links().count()
    }

    /// Every carved passage once, as (cell, east or south neighbour) pairs in row major order.
    pub fn iter_links(&self) -> LinksIter {
        LinksIter {
            maze: self,
            cells: self.iter(),
            pending_south: None,
        }
    }

    /// Pixel width and height of the maze drawn with square cells of `cell_size` and walls of
    /// `wall_thickness`. The extra wall thickness covers the outer right and bottom border.
    /// None if either side does not fit in `u32` pixels.
    pub fn footprint(&self, cell_size: CellPixels, wall_thickness: WallPixels) -> Option<(Width, Height)> {
        let (CellPixels(cell), WallPixels(wall)) = (cell_size, wall_thickness);
        let side_pixels = |cells_count: usize| {
            u32::try_from(cells_count)
                .ok()
                .and_then(|count| count.checked_mul(cell))
                .and_then(|pixels| pixels.checked_add(wall))
        };
        let width = side_pixels(self.columns().0)?;
        let height = side_pixels(self.rows().0)?;
        Some((Width(width), Height(height)))
    }

    #[inline]
    pub(crate) fn cell_mut(&mut self, coord: GridCoordinate) -> Option<&mut Cell> {
        self.grid_coordinate_to_index(coord).map(move |index| &mut self.cells[index])
    }

    pub(crate) fn is_visited(&self, coord: GridCoordinate) -> bool {
        self.cell(coord).map_or(false, |cell| cell.visited)
    }

    pub(crate) fn mark_visited(&mut self, coord: GridCoordinate) {
        if let Some(cell) = self.cell_mut(coord) {
            cell.visited = true;
        }
    }

    /// Knock down the wall shared by two adjacent cells, on both sides.
    pub(crate) fn link(&mut self, a: GridCoordinate, b: GridCoordinate) -> Result<()> {
        let direction = match a.direction_to(b) {
            Some(dir) if self.is_valid_coordinate(a) && self.is_valid_coordinate(b) => dir,
            _ => bail!(ErrorKind::InvalidCellLink(a, b)),
        };

        if let Some(cell_a) = self.cell_mut(a) {
            cell_a.remove_wall(direction);
        }
        if let Some(cell_b) = self.cell_mut(b) {
            cell_b.remove_wall(direction.opposite());
        }
        Ok(())
    }
}

/// `maze[row][col]` access to the cells of one row.
impl Index<usize> for Maze {
    type Output = [Cell];

    fn index(&self, row: usize) -> &[Cell] {
        let ColumnsCount(width) = self.columns();
        &self.cells[row * width..(row + 1) * width]
    }
}

pub struct LinksIter<'a> {
    maze: &'a Maze,
    cells: CellIter,
    pending_south: Option<(GridCoordinate, GridCoordinate)>,
}

impl<'a> Iterator for LinksIter<'a> {
    type Item = (GridCoordinate, GridCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(link) = self.pending_south.take() {
            return Some(link);
        }

        while let Some(coord) = self.cells.next() {
            let east = self.maze
                           .neighbour_at_direction(coord, CompassPrimary::East)
                           .filter(|_| self.maze.is_neighbour_linked(coord, CompassPrimary::East));
            let south = self.maze
                            .neighbour_at_direction(coord, CompassPrimary::South)
                            .filter(|_| self.maze.is_neighbour_linked(coord, CompassPrimary::South));

            match (east, south) {
                (Some(e), Some(s)) => {
                    self.pending_south = Some((coord, s));
                    return Some((coord, e));
                }
                (Some(e), None) => return Some((coord, e)),
                (None, Some(s)) => return Some((coord, s)),
                (None, None) => continue,
            }
        }
        None
    }
}

impl<'a> fmt::Debug for LinksIter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LinksIter :: cells iter : {:?}", self.cells)
    }
}
