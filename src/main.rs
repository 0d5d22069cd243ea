use docopt::Docopt;
use log::{info, warn};
use perfect_mazes::{
    generators,
    graphs,
    grid::Maze,
    grid_displays::{GridDisplay, MazeText, SolutionDisplay, StartEndPointsDisplay},
    pathing,
    renderers::RenderGeometry,
    units::{CellPixels, Height, WallPixels, Width},
};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Perfect Mazes

Usage:
    perfect_mazes_driver -h | --help
    perfect_mazes_driver [(--grid-size=<n>|--grid-width=<w> --grid-height=<h>)] [--seed=<s>] [--mark-start-end|--show-path|--show-distances] [--text-out=<path>] [--save-edges=<path>] [--footprint --cell-pixels=<n> --wall-pixels=<n>]

Options:
    -h --help              Show this screen.
    --grid-size=<n>        The grid size is n * n.
    --grid-width=<w>       The number of columns in a w*h grid [default: 20].
    --grid-height=<h>      The number of rows in a w*h grid [default: 20].
    --seed=<s>             Seed for the random number generator, the same seed always gives the same maze.
    --mark-start-end       Draw an 'S' (start) and 'E' (end) in the top left and bottom right cells.
    --show-path            Show the unique path from the start to the end cell.
    --show-distances       Show the distance (hexadecimal) from the start cell to every other cell.
    --text-out=<path>      Output file path for the textual rendering of the maze instead of stdout.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --footprint            Print the pixel width and height of the maze when drawn.
    --cell-pixels=<n>      Pixel length of one cell side [default: 10].
    --wall-pixels=<n>      Pixel thickness of a wall [default: 2].
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: Option<i64>,
    flag_grid_width: i64,
    flag_grid_height: i64,
    flag_seed: Option<u64>,
    flag_mark_start_end: bool,
    flag_show_path: bool,
    flag_show_distances: bool,
    flag_text_out: String,
    flag_save_edges: String,
    flag_footprint: bool,
    flag_cell_pixels: u32,
    flag_wall_pixels: u32,
}

// Create the Error, ErrorKind, ResultExt, and Result types.
// Library errors come in through `links`, docopt and io failures through `foreign_links`.
mod errors {
    #![allow(deprecated)]
    use error_chain::*;
    error_chain! {

        links {
            Maze(::perfect_mazes::errors::Error, ::perfect_mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }

        errors {
            Unsolvable {
                description("maze has no path from start to end")
                display("generated maze has no path from its start to its end cell")
            }
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (columns, rows) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_grid_width, args.flag_grid_height)
    };

    let maze = match args.flag_seed {
        Some(seed) => generators::generate_maze_seeded(rows, columns, seed)?,
        None => generators::generate_maze(rows, columns)?,
    };
    info!("generated a {}x{} maze with {} passages", rows, columns, maze.links_count());

    if !graphs::is_perfect(&maze) {
        // Never expected, but the whole point of the maze is a unique solution.
        warn!("generated maze is not a spanning tree of its grid");
    }

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze, &args.flag_save_edges)?;
    }

    let text = render_text(&maze, &args)?;
    if args.flag_text_out.is_empty() {
        print!("{}", text);
    } else {
        write_text_to_file(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    if args.flag_footprint {
        let geometry = RenderGeometry::new(CellPixels(args.flag_cell_pixels),
                                           WallPixels(args.flag_wall_pixels));
        match geometry.footprint(&maze) {
            Some((Width(width), Height(height))) => println!("{}x{}", width, height),
            None => warn!("maze footprint does not fit in u32 pixels"),
        }
    }

    Ok(())
}

/// The box drawing text of the maze with whichever cell annotations were asked for.
fn render_text(maze: &Maze, maze_args: &MazeArgs) -> Result<String> {

    let grid_display: Option<Box<dyn GridDisplay>> = if maze_args.flag_show_path {
        let path = pathing::solution_path(maze).ok_or(ErrorKind::Unsolvable)?;
        Some(Box::new(SolutionDisplay::new(maze, &path)))
    } else if maze_args.flag_show_distances {
        let distances = pathing::Distances::<u32>::new(maze, maze.start())
            .ok_or(ErrorKind::Unsolvable)?;
        Some(Box::new(distances))
    } else if maze_args.flag_mark_start_end {
        Some(Box::new(StartEndPointsDisplay::for_maze(maze)))
    } else {
        None
    };

    Ok(MazeText::new(maze, grid_display.as_deref()).to_string())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze: &Maze, file_path: &str) -> Result<()> {

    let mut graph_data = String::new();
    graph_data.push_str(&format!("{} {}\n", maze.size(), maze.links_count()));

    for (src, dst) in maze.iter_links() {
        // Links iter only gives valid coordinates.
        if let (Some(index_a), Some(index_b)) = (maze.grid_coordinate_to_index(src),
                                                 maze.grid_coordinate_to_index(dst)) {
            graph_data.push_str(&format!("{} {}\n", index_a + 1, index_b + 1));
        }
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
