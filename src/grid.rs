use bit_set::BitSet;
use std::fmt;

use cells::{CellPosition, CellState};
use errors::*;
use units::{Height, Width};

/// The maze floor: a fixed size rectangle of cells, each either a wall or a path.
///
/// Storage is a bitmap of path cells in row major order (z rows of x cells). Every in-range
/// coordinate has a state; reads and writes outside the rectangle are errors, never clamped.
#[derive(Clone, PartialEq, Eq)]
pub struct MazeGrid {
    width: usize,
    height: usize,
    paths: BitSet,
}

impl fmt::Debug for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MazeGrid :: width: {:?}, height: {:?}, path cells: {:?}",
               self.width, self.height, self.paths.len())
    }
}

impl MazeGrid {
    /// An all wall grid.
    pub fn new(width: Width, height: Height) -> Result<MazeGrid> {
        let (Width(w), Height(h)) = (width, height);
        if w < 1 || h < 1 {
            bail!(ErrorKind::InvalidDimension(w, h));
        }
        Ok(MazeGrid {
            width: w,
            height: h,
            paths: BitSet::with_capacity(w * h),
        })
    }

    #[inline]
    pub fn dimensions(&self) -> (Width, Height) {
        (Width(self.width), Height(self.height))
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.width * self.height
    }

    /// Is the coordinate within [0, width) x [0, height).
    #[inline]
    pub fn contains(&self, pos: CellPosition) -> bool {
        pos.x >= 0 && pos.z >= 0 && (pos.x as usize) < self.width && (pos.z as usize) < self.height
    }

    /// Convert a grid coordinate to a row major index in the range 0..grid.size().
    /// Returns None if the coordinate is outside the grid.
    #[inline]
    pub fn position_to_index(&self, pos: CellPosition) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.z as usize * self.width + pos.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn index_to_position(&self, index: usize) -> CellPosition {
        CellPosition::new((index % self.width) as i32, (index / self.width) as i32)
    }

    pub fn get(&self, pos: CellPosition) -> Result<CellState> {
        let index = self.checked_index(pos)?;
        Ok(self.state_at_index(index))
    }

    /// The single mutation point for carving. Returns the state the cell held before.
    pub fn set(&mut self, pos: CellPosition, state: CellState) -> Result<CellState> {
        let index = self.checked_index(pos)?;
        let previous = self.state_at_index(index);
        match state {
            CellState::Path => {
                let _ = self.paths.insert(index);
            }
            CellState::Wall => {
                let _ = self.paths.remove(index);
            }
        }
        Ok(previous)
    }

    /// Bounds-tolerant read: anything outside the grid counts as wall.
    #[inline]
    pub fn is_path(&self, pos: CellPosition) -> bool {
        self.position_to_index(pos).map_or(false, |index| self.paths.contains(index))
    }

    /// Number of cells currently carved to path.
    #[inline]
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Turn every cell back into a wall.
    pub fn fill_walls(&mut self) {
        self.paths.clear();
    }

    /// All positions in row major order.
    pub fn iter(&self) -> Positions {
        Positions {
            width: self.width,
            current: 0,
            count: self.size(),
        }
    }

    /// The positions of one grid row, west to east.
    pub fn row(&self, z: usize) -> Vec<CellPosition> {
        (0..self.width).map(|x| CellPosition::new(x as i32, z as i32)).collect()
    }

    /// Path cells in row major order.
    pub fn path_cells<'a>(&'a self) -> Box<dyn Iterator<Item = CellPosition> + 'a> {
        Box::new(self.paths.iter().map(move |index| self.index_to_position(index)))
    }

    #[inline]
    fn state_at_index(&self, index: usize) -> CellState {
        if self.paths.contains(index) {
            CellState::Path
        } else {
            CellState::Wall
        }
    }

    fn checked_index(&self, pos: CellPosition) -> Result<usize> {
        self.position_to_index(pos)
            .ok_or_else(|| ErrorKind::OutOfBounds(pos, self.width, self.height).into())
    }
}

/// Row major iterator over every position of a grid.
#[derive(Debug, Clone)]
pub struct Positions {
    width: usize,
    current: usize,
    count: usize,
}

impl Iterator for Positions {
    type Item = CellPosition;

    fn next(&mut self) -> Option<CellPosition> {
        if self.current < self.count {
            let pos = CellPosition::new((self.current % self.width) as i32,
                                        (self.current / self.width) as i32);
            self.current += 1;
            Some(pos)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.current;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for Positions {} // default impl using size_hint()
