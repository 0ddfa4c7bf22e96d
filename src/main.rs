extern crate docopt;
#[macro_use]
extern crate error_chain;
extern crate env_logger;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate prims_mazes;
#[macro_use]
extern crate serde_derive;

use docopt::Docopt;
use itertools::Itertools;
use std::fs::File;
use std::io::prelude::*;
use std::{io, thread, time};

use prims_mazes::cells::{CellPosition, PositionSmallVec};
use prims_mazes::generators::AlgorithmKind;
use prims_mazes::grid::MazeGrid;
use prims_mazes::grid_displays::{render_text, GridDisplay, PathDisplay, StartEndPointsDisplay,
                                 TextGlyphs};
use prims_mazes::masks::CellMask;
use prims_mazes::pathing;
use prims_mazes::session::{GenerationSession, SessionBuilder};
use prims_mazes::units::{self, Height, Width};

const USAGE: &'static str = "Prim's mazes

Usage:
    mazes_driver -h | --help
    mazes_driver --list-algorithms
    mazes_driver [--width=<w>] [--height=<h>] [--step=<n>] [--start-x=<x> --start-z=<z>] [--seed=<n>] [--algorithm=<name>] [--mask-file=<path>] [--text-out=<path>] [--show-path] [--animate] [--binary-glyphs]

Options:
    -h --help              Show this screen.
    --list-algorithms      Print the available generator names.
    --width=<w>            Grid width, rounded down to an odd value [default: 21].
    --height=<h>           Grid height, rounded down to an odd value [default: 21].
    --step=<n>             Distance between maze cells, 1 to 8 [default: 2].
    --start-x=<x>          x coordinate of the start cell.
    --start-z=<z>          z coordinate of the start cell.
    --seed=<n>             Seed for a reproducible maze.
    --algorithm=<name>     Generator to run [default: frontier-prims].
    --mask-file=<path>     Text file of cells to leave out, one line per row,
                           'x' or '#' marks an absent cell.
    --text-out=<path>      Write the maze to a file instead of stdout.
    --show-path            Mark the longest path through the maze.
    --animate              Print the grid after every step.
    --binary-glyphs        Print walls as 1 and paths as 0.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_list_algorithms: bool,
    flag_width: usize,
    flag_height: usize,
    flag_step: usize,
    flag_start_x: Option<i32>,
    flag_start_z: Option<i32>,
    flag_seed: Option<u64>,
    flag_algorithm: String,
    flag_mask_file: String,
    flag_text_out: String,
    flag_show_path: bool,
    flag_animate: bool,
    flag_binary_glyphs: bool,
}

// Errors of the driver: everything the library reports plus argument parsing and file IO.
mod errors {
    error_chain! {
        links {
            Mazes(::prims_mazes::errors::Error, ::prims_mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use errors::*;

const ANIMATION_FRAME: u64 = 30;

fn main() {
    env_logger::init();

    if let Err(ref e) = run() {
        let stderr = &mut io::stderr();
        let _ = writeln!(stderr, "error: {}", e);
        for cause in e.iter().skip(1) {
            let _ = writeln!(stderr, "caused by: {}", cause);
        }
        ::std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    if args.flag_list_algorithms {
        println!("{}", AlgorithmKind::all().iter().map(|kind| kind.name()).join("\n"));
        return Ok(());
    }

    let mut session = build_session(&args)?;
    let glyphs = if args.flag_binary_glyphs {
        TextGlyphs::binary()
    } else {
        TextGlyphs::default()
    };
    info!("running {} on a {}x{} grid",
          session.algorithm_name(),
          session.snapshot().width(),
          session.snapshot().height());

    if args.flag_animate {
        let frame = time::Duration::from_millis(ANIMATION_FRAME);
        while !session.advance_one()? {
            println!("{}", render_frame(&session, &glyphs));
            thread::sleep(frame);
        }
    } else {
        let _ = session.run_to_completion()?;
    }

    let text = render_maze(session.snapshot(), &glyphs, args.flag_show_path);

    if args.flag_text_out.is_empty() {
        print!("{}", text);
    } else {
        write_text_to_file(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }
    Ok(())
}

fn build_session(args: &MazeArgs) -> Result<GenerationSession> {
    let algorithm = AlgorithmKind::from_name(&args.flag_algorithm).ok_or_else(|| {
            Error::from(format!("Unknown algorithm '{}', expected one of: {}",
                                args.flag_algorithm,
                                AlgorithmKind::all().iter().map(|kind| kind.name()).join(", ")))
        })?;

    let (width, height) = units::odd_dimensions(Width(args.flag_width), Height(args.flag_height));
    if (width.0, height.0) != (args.flag_width, args.flag_height) {
        info!("using odd dimensions {}x{}", width.0, height.0);
    }

    let mut builder = SessionBuilder::new(width, height)
        .step_size(args.flag_step)
        .algorithm(algorithm);

    if let (Some(x), Some(z)) = (args.flag_start_x, args.flag_start_z) {
        builder = builder.start_at(CellPosition::new(x, z));
    }
    if let Some(seed) = args.flag_seed {
        builder = builder.seed(seed);
    }
    if !args.flag_mask_file.is_empty() {
        builder = builder.registry(load_mask(&args.flag_mask_file)?);
    }

    let session = builder.build()?;
    if session.start_was_substituted() {
        warn!("start cell moved to {}", session.start_cell());
    }
    Ok(session)
}

// The grid with the cells written by the latest step marked.
fn render_frame(session: &GenerationSession, glyphs: &TextGlyphs) -> String {
    let fresh = session.last_step().map(|step| step.changed_positions()).unwrap_or_default();
    let marks = PathDisplay::new(&fresh);
    render_text(session.snapshot(), glyphs, Some(&marks as &dyn GridDisplay))
}

fn render_maze(grid: &MazeGrid, glyphs: &TextGlyphs, show_path: bool) -> String {
    if !show_path {
        return render_text(grid, glyphs, None);
    }

    match pathing::longest_path(grid) {
        Some(path) => {
            let ends = |pos: Option<&CellPosition>| {
                pos.cloned().into_iter().collect::<PositionSmallVec>()
            };
            let points = StartEndPointsDisplay::new(ends(path.first()), ends(path.last()));
            let route = PathDisplay::new(&path);
            let layers: Vec<&dyn GridDisplay> = vec![&points, &route];
            render_text(grid, glyphs, Some(&layers as &dyn GridDisplay))
        }
        None => {
            warn!("no path cells to route through");
            render_text(grid, glyphs, None)
        }
    }
}

fn load_mask(file_path: &str) -> Result<CellMask> {
    let mut text = String::new();
    let _ = File::open(file_path)
        .chain_err(|| format!("Failed to open mask file {}", file_path))?
        .read_to_string(&mut text)?;
    Ok(CellMask::from_text(&text)?)
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
