// Create the Error, ErrorKind, ResultExt, and Result types for the library.
// Other modules `use crate::errors::*;` to get at everything `error_chain!` creates.
#![allow(deprecated)]

use error_chain::*;

use crate::cells::GridCoordinate;

error_chain! {

    errors {
        // No addressable top left cell exists for these dimensions.
        InvalidGridSize(rows: i64, columns: i64) {
            description("invalid grid size")
            display("invalid grid size: {} rows by {} columns, both must be positive", rows, columns)
        }

        // Carving was asked to join two cells that are not grid neighbours.
        InvalidCellLink(a: GridCoordinate, b: GridCoordinate) {
            description("invalid cell link")
            display("cannot carve a passage between {:?} and {:?}", a, b)
        }
    }
}
