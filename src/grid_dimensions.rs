use std::convert::TryFrom;
use std::mem;

use crate::cells::Cell;
use crate::errors::*;
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};


/// Validated size of a rectangular maze grid.
/// Both sides are at least one cell long, so a top left cell always exists.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MazeDimensions {
    rows: RowsCount,
    columns: ColumnsCount,
}

impl MazeDimensions {
    /// Accepts signed input so that callers handing over raw user numbers get a proper
    /// `InvalidGridSize` for zero or negative sizes rather than a wrapped around `usize`.
    pub fn new(rows: i64, columns: i64) -> Result<MazeDimensions> {
        let invalid = || Error::from(ErrorKind::InvalidGridSize(rows, columns));

        if rows <= 0 || columns <= 0 {
            return Err(invalid());
        }
        let rows_count = usize::try_from(rows).map_err(|_| invalid())?;
        let columns_count = usize::try_from(columns).map_err(|_| invalid())?;

        // The cell buffer of the grid must be allocatable at all: no allocation exceeds isize::MAX bytes.
        let cells_count = rows_count.checked_mul(columns_count).ok_or_else(invalid)?;
        let cells_bytes = cells_count.checked_mul(mem::size_of::<Cell>()).ok_or_else(invalid)?;
        if cells_bytes > isize::MAX as usize {
            return Err(invalid());
        }

        Ok(MazeDimensions {
            rows: RowsCount(rows_count),
            columns: ColumnsCount(columns_count),
        })
    }

    #[inline(always)]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.rows.0 * self.columns.0)
    }

    #[inline(always)]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline(always)]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    /// Node count and the edge count of any spanning tree over the grid.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let cells_count = self.size();
        (cells_count, EdgesCount(cells_count.0 - 1))
    }
}


#[cfg(test)]
mod tests {

    use super::*;

    fn is_invalid_grid_size(result: Result<MazeDimensions>) -> bool {
        match result {
            Err(Error(ErrorKind::InvalidGridSize(..), _)) => true,
            _ => false,
        }
    }

    #[test]
    fn valid_dimensions() {
        let dims = MazeDimensions::new(3, 7).expect("3x7 is valid");
        assert_eq!(dims.rows(), RowsCount(3));
        assert_eq!(dims.columns(), ColumnsCount(7));
        assert_eq!(dims.size(), NodesCount(21));
        assert_eq!(dims.graph_size(), (NodesCount(21), EdgesCount(20)));
    }

    #[test]
    fn single_cell_dimensions() {
        let dims = MazeDimensions::new(1, 1).expect("1x1 is valid");
        assert_eq!(dims.graph_size(), (NodesCount(1), EdgesCount(0)));
    }

    #[test]
    fn zero_and_negative_sizes_are_rejected() {
        assert!(is_invalid_grid_size(MazeDimensions::new(0, 5)));
        assert!(is_invalid_grid_size(MazeDimensions::new(5, 0)));
        assert!(is_invalid_grid_size(MazeDimensions::new(0, 0)));
        assert!(is_invalid_grid_size(MazeDimensions::new(-1, 5)));
        assert!(is_invalid_grid_size(MazeDimensions::new(5, -3)));
        assert!(is_invalid_grid_size(MazeDimensions::new(i64::MIN, i64::MIN)));
    }

    #[test]
    fn unaddressable_cell_count_is_rejected() {
        assert!(is_invalid_grid_size(MazeDimensions::new(i64::MAX, i64::MAX)));
        // The cell count fits a usize but the cell buffer's byte size does not.
        assert!(is_invalid_grid_size(MazeDimensions::new(4_000_000_000, 4_000_000_000)));
        // The byte size fits a usize but is over the isize::MAX allocation limit.
        assert!(is_invalid_grid_size(MazeDimensions::new(1 << 31, 1 << 28)));
        assert!(MazeDimensions::new(1 << 20, 1 << 20).is_ok());
    }

    #[test]
    fn error_message_names_the_dimensions() {
        let err = MazeDimensions::new(0, 5).unwrap_err();
        assert_eq!(err.to_string(),
                   "invalid grid size: 0 rows by 5 columns, both must be positive");
    }
}
