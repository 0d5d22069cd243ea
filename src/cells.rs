use smallvec::SmallVec;
use std::convert::From;

use crate::units::{ColumnIndex, RowIndex};

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;
pub type CoordinateOptionSmallVec = SmallVec<[Option<GridCoordinate>; 4]>;

/// Zero based position of a cell, `row` counting down from the top of the grid and `col`
/// counting across from the left.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: usize,
    pub col: usize,
}

impl GridCoordinate {
    pub fn new(row: usize, col: usize) -> GridCoordinate {
        GridCoordinate { row, col }
    }

    #[inline]
    pub fn from_row_column_indices(row_index: RowIndex, col_index: ColumnIndex) -> GridCoordinate {
        let (RowIndex(row), ColumnIndex(col)) = (row_index, col_index);
        GridCoordinate::new(row, col)
    }

    /// Creates a new coordinate offset 1 cell away in the given direction.
    /// Returns None if the coordinate would be negative. The upper bounds are the grid's concern.
    pub fn offset(&self, dir: CompassPrimary) -> Option<GridCoordinate> {
        let (row, col) = (self.row, self.col);
        match dir {
            CompassPrimary::North => {
                if row > 0 {
                    Some(GridCoordinate::new(row - 1, col))
                } else {
                    None
                }
            }
            CompassPrimary::South => row.checked_add(1).map(|r| GridCoordinate::new(r, col)),
            CompassPrimary::East => col.checked_add(1).map(|c| GridCoordinate::new(row, c)),
            CompassPrimary::West => {
                if col > 0 {
                    Some(GridCoordinate::new(row, col - 1))
                } else {
                    None
                }
            }
        }
    }

    /// The direction to travel from `self` to reach the adjacent coordinate `other`.
    /// Only the four single axis deltas of ±1 are adjacent, anything else is None.
    pub fn direction_to(&self, other: GridCoordinate) -> Option<CompassPrimary> {
        CompassPrimary::ALL
            .iter()
            .cloned()
            .find(|&dir| self.offset(dir) == Some(other))
    }
}

impl From<(usize, usize)> for GridCoordinate {
    fn from(row_col_pair: (usize, usize)) -> GridCoordinate {
        GridCoordinate::new(row_col_pair.0, row_col_pair.1)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::South,
                                          CompassPrimary::East,
                                          CompassPrimary::West];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }
}

/// Wall flags of one cell. `true` means the wall is standing and the passage is blocked.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Walls {
    pub fn all() -> Walls {
        Walls {
            top: true,
            right: true,
            bottom: true,
            left: true,
        }
    }

    #[inline]
    pub fn has_wall(&self, dir: CompassPrimary) -> bool {
        match dir {
            CompassPrimary::North => self.top,
            CompassPrimary::East => self.right,
            CompassPrimary::South => self.bottom,
            CompassPrimary::West => self.left,
        }
    }

    pub fn count(&self) -> usize {
        [self.top, self.right, self.bottom, self.left].iter().filter(|&&w| w).count()
    }

    pub(crate) fn remove(&mut self, dir: CompassPrimary) {
        match dir {
            CompassPrimary::North => self.top = false,
            CompassPrimary::East => self.right = false,
            CompassPrimary::South => self.bottom = false,
            CompassPrimary::West => self.left = false,
        }
    }
}

impl Default for Walls {
    fn default() -> Walls {
        Walls::all()
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cell {
    coordinate: GridCoordinate,
    walls: Walls,
    // Only meaningful while a generator is carving.
    pub(crate) visited: bool,
}

impl Cell {
    pub fn new(coordinate: GridCoordinate) -> Cell {
        Cell {
            coordinate,
            walls: Walls::all(),
            visited: false,
        }
    }

    #[inline]
    pub fn coordinate(&self) -> GridCoordinate {
        self.coordinate
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.coordinate.row
    }

    #[inline]
    pub fn col(&self) -> usize {
        self.coordinate.col
    }

    #[inline]
    pub fn walls(&self) -> &Walls {
        &self.walls
    }

    #[inline]
    pub fn has_wall(&self, dir: CompassPrimary) -> bool {
        self.walls.has_wall(dir)
    }

    pub(crate) fn remove_wall(&mut self, dir: CompassPrimary) {
        self.walls.remove(dir);
    }
}
