//! **prims_mazes** carves mazes into wall/path grids with randomized Prim's algorithm and a
//! few simpler generators, one bounded step at a time so that hosts can animate the carving.

extern crate bit_set;
#[macro_use]
extern crate error_chain;
extern crate fnv;
#[macro_use]
extern crate itertools;
#[macro_use]
extern crate log;
extern crate petgraph;
extern crate rand;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate smallvec;

#[cfg(test)]
extern crate quickcheck;

pub mod carver;
pub mod cells;
pub mod drunken_crawl;
pub mod errors;
pub mod frontier;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod masks;
pub mod pathing;
pub mod prims;
pub mod random_fill;
pub mod session;
pub mod shared;
pub mod topology;
pub mod units;
pub mod utils;
pub mod wall_list;

pub use cells::{CellPosition, CellState};
pub use generators::{AlgorithmKind, MazeAlgorithm};
pub use grid::MazeGrid;
pub use session::{CompletionEvent, GenerationSession, SessionBuilder, SessionState};
pub use shared::SharedSession;
pub use units::{Height, StepSize, Width};
