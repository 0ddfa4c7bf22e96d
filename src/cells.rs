use smallvec::SmallVec;
use std::convert::From;
use std::fmt;

/// An (x, z) location on the maze floor. Equality and hashing are by value so positions work
/// as set members and map keys.
///
/// Coordinates are signed: neighbour offsets can step off the low edges of a grid and the
/// result still needs to be representable so that bounds checks can reject it.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellPosition {
    pub x: i32,
    pub z: i32,
}

pub type PositionSmallVec = SmallVec<[CellPosition; 4]>;

impl CellPosition {
    pub fn new(x: i32, z: i32) -> CellPosition {
        CellPosition { x: x, z: z }
    }

    #[inline]
    pub fn offset(&self, dx: i32, dz: i32) -> CellPosition {
        CellPosition::new(self.x + dx, self.z + dz)
    }

    #[inline]
    pub fn manhattan_distance(&self, other: CellPosition) -> u32 {
        ((self.x - other.x).abs() + (self.z - other.z).abs()) as u32
    }

    /// The unit step from `self` towards `other` along an axis, if the two cells are distinct
    /// and share a row or a column.
    pub fn axis_direction_to(&self, other: CellPosition) -> Option<(i32, i32)> {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        match (dx, dz) {
            (0, 0) => None,
            (_, 0) => Some((dx.signum(), 0)),
            (0, _) => Some((0, dz.signum())),
            _ => None,
        }
    }

    /// Every position on the straight line from `self` to `other`, both ends included.
    /// Returns None for identical or diagonal pairs.
    pub fn segment_to(&self, other: CellPosition) -> Option<Vec<CellPosition>> {
        self.axis_direction_to(other).map(|(dx, dz)| {
            let length = self.manhattan_distance(other) as i32;
            (0..length + 1).map(|i| self.offset(dx * i, dz * i)).collect()
        })
    }
}

impl From<(i32, i32)> for CellPosition {
    fn from(x_z_pair: (i32, i32)) -> CellPosition {
        CellPosition::new(x_z_pair.0, x_z_pair.1)
    }
}

impl fmt::Display for CellPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// What occupies a grid cell.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Serialize, Deserialize)]
pub enum CellState {
    Wall,
    Path,
}

impl Default for CellState {
    fn default() -> CellState {
        CellState::Wall
    }
}

/// A single cell write, as reported to presentation layers after a step.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
pub struct CellChange {
    pub position: CellPosition,
    pub state: CellState,
}

impl CellChange {
    pub fn new(position: CellPosition, state: CellState) -> CellChange {
        CellChange {
            position: position,
            state: state,
        }
    }
}
