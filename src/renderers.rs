// Geometry a drawing surface needs to paint a maze. Nothing here touches pixels: a renderer
// strokes the segments, a page layout packs the footprints.

use std::convert::TryFrom;

use crate::cells::{CompassPrimary, GridCoordinate};
use crate::grid::Maze;
use crate::units::{CellPixels, Height, WallPixels, Width};


#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub fn new(x: u32, y: u32) -> Point {
        Point { x, y }
    }
}

/// One straight wall line, from the top left end to the bottom right end.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct WallSegment {
    pub cell: GridCoordinate,
    pub side: CompassPrimary,
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RenderGeometry {
    pub cell_size: CellPixels,
    pub wall_thickness: WallPixels,
}

impl RenderGeometry {
    pub fn new(cell_size: CellPixels, wall_thickness: WallPixels) -> RenderGeometry {
        RenderGeometry {
            cell_size,
            wall_thickness,
        }
    }

    pub fn footprint(&self, maze: &Maze) -> Option<(Width, Height)> {
        maze.footprint(self.cell_size, self.wall_thickness)
    }

    /// Top left corner of a cell. Walls are centred on cell edges, so everything is offset by half
    /// the wall thickness to keep the outer walls inside the footprint.
    /// None if the corner is beyond `u32` pixels.
    pub fn cell_origin(&self, coord: GridCoordinate) -> Option<Point> {
        let (CellPixels(cell), WallPixels(wall)) = (self.cell_size, self.wall_thickness);
        let half_wall = wall / 2;
        let axis_pixels = |index: usize| {
            u32::try_from(index)
                .ok()
                .and_then(|i| i.checked_mul(cell))
                .and_then(|pixels| pixels.checked_add(half_wall))
        };
        Some(Point::new(axis_pixels(coord.col)?, axis_pixels(coord.row)?))
    }
}

impl Default for RenderGeometry {
    fn default() -> RenderGeometry {
        RenderGeometry::new(CellPixels(10), WallPixels(2))
    }
}

/// Every standing wall of the maze, each shared wall exactly once.
///
/// Each cell contributes its top and left walls. Right and bottom walls are only taken from cells
/// on the right and bottom border, interior ones are already a neighbour's left or top wall.
///
/// None when the maze drawn with `geometry` does not fit its footprint in `u32` pixels.
pub fn wall_segments(maze: &Maze, geometry: RenderGeometry) -> Option<Vec<WallSegment>> {
    // Every segment end lies inside the footprint, so once it fits no coordinate can overflow.
    geometry.footprint(maze)?;

    let CellPixels(cell_size) = geometry.cell_size;
    let last_row = maze.rows().0 - 1;
    let last_col = maze.columns().0 - 1;
    let mut segments = Vec::with_capacity(2 * maze.size() + maze.rows().0 + maze.columns().0);

    for cell in maze.cells() {
        let coord = cell.coordinate();
        let walls = cell.walls();
        let origin = geometry.cell_origin(coord)?;
        let (x1, y1) = (origin.x, origin.y);
        let (x2, y2) = (x1 + cell_size, y1 + cell_size);

        let mut push = |side, from, to| {
            segments.push(WallSegment {
                cell: coord,
                side,
                from,
                to,
            })
        };

        if walls.top {
            push(CompassPrimary::North, Point::new(x1, y1), Point::new(x2, y1));
        }
        if walls.left {
            push(CompassPrimary::West, Point::new(x1, y1), Point::new(x1, y2));
        }
        if walls.right && coord.col == last_col {
            push(CompassPrimary::East, Point::new(x2, y1), Point::new(x2, y2));
        }
        if walls.bottom && coord.row == last_row {
            push(CompassPrimary::South, Point::new(x1, y2), Point::new(x2, y2));
        }
    }

    Some(segments)
}
