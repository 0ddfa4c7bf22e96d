use std::fmt;

use cells::{CellPosition, PositionSmallVec};
use grid::MazeGrid;
use pathing::Distances;
use utils::FnvHashSet;

/// Overlay content drawn over the plain wall/path glyph of a cell.
pub trait GridDisplay {
    /// The glyph to draw at `pos`, or None to leave the cell as it is.
    fn render_cell_body(&self, _: CellPosition) -> Option<char> {
        None
    }
}

/// Layered overlays, the first one with something to say wins.
impl<'a> GridDisplay for Vec<&'a dyn GridDisplay> {
    fn render_cell_body(&self, pos: CellPosition) -> Option<char> {
        self.iter().filter_map(|display| display.render_cell_body(pos)).next()
    }
}

/// The two characters a grid is printed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextGlyphs {
    pub wall: char,
    pub path: char,
}

impl Default for TextGlyphs {
    fn default() -> TextGlyphs {
        TextGlyphs {
            wall: '#',
            path: ' ',
        }
    }
}

impl TextGlyphs {
    /// `1` for walls and `0` for paths, the raw cell values.
    pub fn binary() -> TextGlyphs {
        TextGlyphs {
            wall: '1',
            path: '0',
        }
    }
}

/// One line per grid row from z = 0 down, one character per cell, every line newline
/// terminated.
pub fn render_text(grid: &MazeGrid,
                   glyphs: &TextGlyphs,
                   overlay: Option<&dyn GridDisplay>)
                   -> String {
    let mut output = String::with_capacity((grid.width() + 1) * grid.height());
    for z in 0..grid.height() {
        for pos in grid.row(z) {
            let glyph = overlay.and_then(|display| display.render_cell_body(pos))
                .unwrap_or_else(|| if grid.is_path(pos) {
                    glyphs.path
                } else {
                    glyphs.wall
                });
            output.push(glyph);
        }
        output.push('\n');
    }
    output
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render_text(self, &TextGlyphs::default(), None))
    }
}

/// Distances as base 36 digits, wrapping every 36 steps.
impl GridDisplay for Distances {
    fn render_cell_body(&self, pos: CellPosition) -> Option<char> {
        self.distance_from_start_to(pos).and_then(|d| ::std::char::from_digit(d % 36, 36))
    }
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_positions: FnvHashSet<CellPosition>,
}

impl PathDisplay {
    pub fn new(path: &[CellPosition]) -> Self {
        PathDisplay { on_path_positions: path.iter().cloned().collect() }
    }
}

impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, pos: CellPosition) -> Option<char> {
        if self.on_path_positions.contains(&pos) {
            Some('.')
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_positions: PositionSmallVec,
    end_positions: PositionSmallVec,
}

impl StartEndPointsDisplay {
    pub fn new(starts: PositionSmallVec, ends: PositionSmallVec) -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_positions: starts,
            end_positions: ends,
        }
    }
}

impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, pos: CellPosition) -> Option<char> {
        if self.start_positions.contains(&pos) {
            Some('S')
        } else if self.end_positions.contains(&pos) {
            Some('E')
        } else {
            None
        }
    }
}
