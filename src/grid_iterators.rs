use std::fmt;

use crate::cells::GridCoordinate;
use crate::grid_dimensions::MazeDimensions;
use crate::units::{ColumnIndex, ColumnsCount, RowIndex, RowsCount};


/// Row major iteration over every coordinate of a grid.
#[derive(Copy, Clone)]
pub struct CellIter {
    dimensions: MazeDimensions,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub(crate) fn new(dimensions: MazeDimensions) -> CellIter {
        CellIter {
            dimensions,
            current_cell_number: 0,
            cells_count: dimensions.size().0,
        }
    }
}

impl fmt::Debug for CellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = index_to_grid_coordinate(&self.dimensions, self.current_cell_number);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

#[derive(Debug, Copy, Clone)]
enum BatchIterType {
    Row,
    Column,
}

/// Iteration over whole rows (top to bottom) or whole columns (left to right).
#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    iter_type: BatchIterType,
    current_index: usize,
    rows_size: RowsCount,
    cols_size: ColumnsCount,
}

impl BatchIter {
    pub(crate) fn rows(dimensions: MazeDimensions) -> BatchIter {
        BatchIter::new(BatchIterType::Row, dimensions)
    }

    pub(crate) fn columns(dimensions: MazeDimensions) -> BatchIter {
        BatchIter::new(BatchIterType::Column, dimensions)
    }

    fn new(iter_type: BatchIterType, dimensions: MazeDimensions) -> BatchIter {
        BatchIter {
            iter_type,
            current_index: 0,
            rows_size: dimensions.rows(),
            cols_size: dimensions.columns(),
        }
    }

    fn batches_count(&self) -> usize {
        match self.iter_type {
            BatchIterType::Row => self.rows_size.0,
            BatchIterType::Column => self.cols_size.0,
        }
    }
}

impl ExactSizeIterator for BatchIter {} // default impl using size_hint()
impl Iterator for BatchIter {
    type Item = Vec<GridCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {

        if self.current_index >= self.batches_count() {
            return None;
        }

        let index = self.current_index;
        let coords = match self.iter_type {
            BatchIterType::Row => {
                let ColumnsCount(length) = self.cols_size;
                (0..length)
                    .map(|i| GridCoordinate::from_row_column_indices(RowIndex(index), ColumnIndex(i)))
                    .collect()
            }
            BatchIterType::Column => {
                let RowsCount(length) = self.rows_size;
                (0..length)
                    .map(|i| GridCoordinate::from_row_column_indices(RowIndex(i), ColumnIndex(index)))
                    .collect()
            }
        };
        self.current_index += 1;
        Some(coords)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.batches_count() - self.current_index;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

#[inline]
pub(crate) fn index_to_grid_coordinate(dimensions: &MazeDimensions, index: usize) -> GridCoordinate {
    let ColumnsCount(width) = dimensions.columns();
    GridCoordinate::new(index / width, index % width)
}


#[cfg(test)]
mod tests {

    use super::*;

    fn dims(rows: i64, columns: i64) -> MazeDimensions {
        MazeDimensions::new(rows, columns).expect("valid test dimensions")
    }

    #[test]
    fn cell_iter_is_row_major() {
        let gc = |r, c| GridCoordinate::new(r, c);
        let cells = CellIter::new(dims(2, 3)).collect::<Vec<_>>();
        assert_eq!(cells,
                   &[gc(0, 0), gc(0, 1), gc(0, 2), gc(1, 0), gc(1, 1), gc(1, 2)]);
    }

    #[test]
    fn cell_iter_exact_size() {
        let mut iter = CellIter::new(dims(4, 5));
        assert_eq!(iter.len(), 20);
        iter.next();
        assert_eq!(iter.len(), 19);
    }

    #[test]
    fn row_iter() {
        let gc = |r, c| GridCoordinate::new(r, c);
        let rows = BatchIter::rows(dims(2, 3)).collect::<Vec<_>>();
        assert_eq!(rows,
                   vec![vec![gc(0, 0), gc(0, 1), gc(0, 2)], vec![gc(1, 0), gc(1, 1), gc(1, 2)]]);
    }

    #[test]
    fn column_iter() {
        let gc = |r, c| GridCoordinate::new(r, c);
        let columns = BatchIter::columns(dims(2, 3)).collect::<Vec<_>>();
        assert_eq!(columns,
                   vec![vec![gc(0, 0), gc(1, 0)],
                        vec![gc(0, 1), gc(1, 1)],
                        vec![gc(0, 2), gc(1, 2)]]);
    }

    #[test]
    fn batch_iter_exact_size() {
        let mut columns = BatchIter::columns(dims(2, 3));
        assert_eq!(columns.len(), 3);
        columns.next();
        assert_eq!(columns.len(), 2);
        assert_eq!(BatchIter::rows(dims(2, 3)).len(), 2);
    }
}
