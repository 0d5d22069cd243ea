use std::fmt;

use crate::cells::{CompassPrimary, CoordinateSmallVec, GridCoordinate};
use crate::grid::Maze;
use crate::pathing::{Distances, MaxDistance};
use crate::units::{ColumnsCount, RowsCount};
use crate::utils::{self, FnvHashSet};


pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: GridCoordinate) -> String {
        String::from("   ")
    }
}

impl<MaxDistanceT: MaxDistance> GridDisplay for Distances<MaxDistanceT> {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if let Some(d) = self.distance_from_start_to(coord) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from("   ")
        }
    }
}


#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<GridCoordinate>,
}
impl PathDisplay {
    pub fn new(path: &[GridCoordinate]) -> Self {
        let mut on_path_coordinates = utils::fnv_hashset(path.len());
        on_path_coordinates.extend(path.iter().cloned());
        PathDisplay { on_path_coordinates }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}


#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_coordinates: CoordinateSmallVec,
    end_coordinates: CoordinateSmallVec,
}
impl StartEndPointsDisplay {
    pub fn new(starts: CoordinateSmallVec, ends: CoordinateSmallVec) -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_coordinates: starts,
            end_coordinates: ends,
        }
    }

    /// Marks the maze's own start and end cells.
    pub fn for_maze(maze: &Maze) -> StartEndPointsDisplay {
        StartEndPointsDisplay::new([maze.start()].iter().cloned().collect(),
                                   [maze.end()].iter().cloned().collect())
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {

        let contains_coordinate =
            |coordinates: &CoordinateSmallVec| coordinates.iter().any(|&c| c == coord);

        if contains_coordinate(&self.start_coordinates) {
            String::from(" S ")
        } else if contains_coordinate(&self.end_coordinates) {
            String::from(" E ")
        } else {
            String::from("   ")
        }
    }
}

/// Path cells drawn as dots with the start and end cells lettered over them.
#[derive(Debug)]
pub struct SolutionDisplay {
    path: PathDisplay,
    end_points: StartEndPointsDisplay,
}
impl SolutionDisplay {
    pub fn new(maze: &Maze, path: &[GridCoordinate]) -> SolutionDisplay {
        SolutionDisplay {
            path: PathDisplay::new(path),
            end_points: StartEndPointsDisplay::for_maze(maze),
        }
    }
}
impl GridDisplay for SolutionDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        let marker = self.end_points.render_cell_body(coord);
        if marker.trim().is_empty() {
            self.path.render_cell_body(coord)
        } else {
            marker
        }
    }
}


/// A maze paired with an optional cell body renderer, displayed as box drawing text.
pub struct MazeText<'a> {
    maze: &'a Maze,
    grid_display: Option<&'a dyn GridDisplay>,
}

impl<'a> MazeText<'a> {
    pub fn new(maze: &'a Maze, grid_display: Option<&'a dyn GridDisplay>) -> MazeText<'a> {
        MazeText { maze, grid_display }
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&MazeText::new(self, None), f)
    }
}

impl<'a> fmt::Display for MazeText<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const WALL_L: &str = "╴";
        const WALL_R: &str = "╶";
        const WALL_U: &str = "╵";
        const WALL_D: &str = "╷";
        const WALL_LR_3: &str = "───";
        const WALL_LR: &str = "─";
        const WALL_UD: &str = "│";
        const WALL_LD: &str = "┐";
        const WALL_RU: &str = "└";
        const WALL_LU: &str = "┘";
        const WALL_RD: &str = "┌";
        const WALL_LRU: &str = "┴";
        const WALL_LRD: &str = "┬";
        const WALL_LRUD: &str = "┼";
        const WALL_RUD: &str = "├";
        const WALL_LUD: &str = "┤";
        let default_cell_body = String::from("   ");

        let maze = self.maze;
        let ColumnsCount(columns_count) = maze.columns();
        let RowsCount(rows_count) = maze.rows();
        let has_wall = |coord: GridCoordinate, dir: CompassPrimary| {
            maze.cell(coord).map_or(true, |cell| cell.has_wall(dir))
        };

        // The northern boundary is drawn once, every row below draws only its own southern walls.
        let mut output = String::from(WALL_RD);
        for col in 0..columns_count {
            let coord = GridCoordinate::new(0, col);
            output.push_str(WALL_LR_3);
            if !has_wall(coord, CompassPrimary::East) {
                output.push_str(WALL_LR);
            } else if col == columns_count - 1 {
                output.push_str(WALL_LD);
            } else {
                output.push_str(WALL_LRD);
            }
        }
        output.push('\n');

        for (index_row, row) in maze.iter_row().enumerate() {

            let is_last_row = index_row == (rows_count - 1);

            // The western boundary of the row, the top section was done by the previous row.
            let mut row_middle_section_render = String::from(WALL_UD);
            let mut row_bottom_section_render = String::new();

            for (index_column, cell_coord) in row.into_iter().enumerate() {

                let is_first_column = index_column == 0;
                let is_last_column = index_column == (columns_count - 1);
                let east_open = !has_wall(cell_coord, CompassPrimary::East);
                let south_open = !has_wall(cell_coord, CompassPrimary::South);

                // Cell Body
                if let Some(displayer) = self.grid_display {
                    row_middle_section_render.push_str(&displayer.render_cell_body(cell_coord));
                } else {
                    row_middle_section_render.push_str(&default_cell_body);
                }
                row_middle_section_render.push_str(if east_open { " " } else { WALL_UD });

                if is_first_column {
                    row_bottom_section_render = if is_last_row {
                        String::from(WALL_RU)
                    } else if south_open {
                        String::from(WALL_UD)
                    } else {
                        String::from(WALL_RUD)
                    };
                }
                row_bottom_section_render.push_str(if south_open { "   " } else { WALL_LR_3 });

                let corner = match (is_last_row, is_last_column) {
                    (true, true) => WALL_LU,
                    (true, false) => if east_open { WALL_LR } else { WALL_LRU },
                    (false, true) => if south_open { WALL_UD } else { WALL_LUD },
                    (false, false) => {
                        // Around the corner south east of this cell: the wall segments leaving it
                        // left and up belong to this cell, right and down to its neighbours.
                        let south_east_from_east =
                            maze.neighbour_at_direction(cell_coord, CompassPrimary::East)
                                .map_or(false, |c| !has_wall(c, CompassPrimary::South));
                        let south_east_from_south =
                            maze.neighbour_at_direction(cell_coord, CompassPrimary::South)
                                .map_or(false, |c| !has_wall(c, CompassPrimary::East));

                        match (!south_open, !south_east_from_east, !east_open, !south_east_from_south) {
                            (true, true, true, true) => WALL_LRUD,
                            (true, true, true, false) => WALL_LRU,
                            (true, true, false, true) => WALL_LRD,
                            (true, false, true, true) => WALL_LUD,
                            (false, true, true, true) => WALL_RUD,
                            (true, true, false, false) => WALL_LR,
                            (false, false, true, true) => WALL_UD,
                            (false, true, true, false) => WALL_RU,
                            (true, false, false, true) => WALL_LD,
                            (true, false, true, false) => WALL_LU,
                            (false, true, false, true) => WALL_RD,
                            (true, false, false, false) => WALL_L,
                            (false, true, false, false) => WALL_R,
                            (false, false, true, false) => WALL_U,
                            (false, false, false, true) => WALL_D,
                            _ => " ",
                        }
                    }
                };

                row_bottom_section_render.push_str(corner);
            }

            output.push_str(&row_middle_section_render);
            output.push('\n');
            output.push_str(&row_bottom_section_render);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::generators::generate_maze_seeded;
    use crate::grid_dimensions::MazeDimensions;
    use crate::pathing;

    fn gc(row: usize, col: usize) -> GridCoordinate {
        GridCoordinate::new(row, col)
    }

    fn walled_maze(rows: i64, columns: i64) -> Maze {
        Maze::new(MazeDimensions::new(rows, columns).expect("valid test dimensions"))
    }

    #[test]
    fn single_cell() {
        let g = walled_maze(1, 1);
        assert_eq!(g.to_string(), "┌───┐\n│   │\n└───┘\n");
    }

    #[test]
    fn horizontal_corridor() {
        let mut g = walled_maze(1, 2);
        g.link(gc(0, 0), gc(0, 1)).expect("link failed");
        assert_eq!(g.to_string(), "┌───────┐\n│       │\n└───────┘\n");
    }

    #[test]
    fn vertical_corridor() {
        let mut g = walled_maze(2, 1);
        g.link(gc(0, 0), gc(1, 0)).expect("link failed");
        assert_eq!(g.to_string(), "┌───┐\n│   │\n│   │\n│   │\n└───┘\n");
    }

    #[test]
    fn u_shaped_two_by_two() {
        let mut g = walled_maze(2, 2);
        g.link(gc(0, 0), gc(1, 0)).expect("link failed");
        g.link(gc(1, 0), gc(1, 1)).expect("link failed");
        g.link(gc(1, 1), gc(0, 1)).expect("link failed");
        let expected = "┌───┬───┐\n\
                        │   │   │\n\
                        │   ╵   │\n\
                        │       │\n\
                        └───────┘\n";
        assert_eq!(g.to_string(), expected);
    }

    #[test]
    fn start_and_end_markers() {
        let mut g = walled_maze(1, 2);
        g.link(gc(0, 0), gc(0, 1)).expect("link failed");
        let markers = StartEndPointsDisplay::for_maze(&g);
        let text = MazeText::new(&g, Some(&markers)).to_string();
        assert_eq!(text, "┌───────┐\n│ S   E │\n└───────┘\n");
    }

    #[test]
    fn solution_overlay() {
        let maze = generate_maze_seeded(1, 3, 11).expect("valid");
        let path = pathing::solution_path(&maze).expect("solvable");
        let display = SolutionDisplay::new(&maze, &path);
        let text = MazeText::new(&maze, Some(&display)).to_string();
        assert_eq!(text, "┌───────────┐\n│ S   .   E │\n└───────────┘\n");
    }

    #[test]
    fn path_display_marks_only_path_cells() {
        let display = PathDisplay::new(&[gc(0, 0), gc(0, 1), gc(0, 1)]);
        assert_eq!(display.render_cell_body(gc(0, 0)), " . ");
        assert_eq!(display.render_cell_body(gc(0, 1)), " . ");
        assert_eq!(display.render_cell_body(gc(1, 1)), "   ");
    }

    #[test]
    fn distances_as_hex() {
        let maze = generate_maze_seeded(1, 12, 3).expect("valid");
        let distances = Distances::<u32>::new(&maze, maze.start()).expect("valid start");
        let text = MazeText::new(&maze, Some(&distances)).to_string();
        let middle_row = text.lines().nth(1).expect("row text");
        assert!(middle_row.contains(" 0 "));
        assert!(middle_row.contains(" a "));
        assert!(middle_row.contains(" b "));
    }

    #[test]
    fn every_row_has_the_same_width() {
        let maze = generate_maze_seeded(9, 13, 8).expect("valid");
        let text = maze.to_string();
        let widths = text.lines().map(|line| line.chars().count()).collect::<Vec<_>>();
        assert_eq!(widths.len(), 1 + 2 * 9);
        assert!(widths.iter().all(|&w| w == 1 + 4 * 13));
    }
}
