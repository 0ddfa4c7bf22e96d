use std::cmp;

use errors::*;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub usize);

/// Grid distance between two logically adjacent carve-able cells.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
pub struct StepSize(usize);

pub const MIN_STEP_SIZE: usize = 1;
pub const MAX_STEP_SIZE: usize = 8;

impl StepSize {
    pub fn new(step: usize) -> Result<StepSize> {
        if step < MIN_STEP_SIZE || step > MAX_STEP_SIZE {
            bail!(ErrorKind::InvalidStepSize(step));
        }
        Ok(StepSize(step))
    }

    /// Neighbours one cell apart.
    pub fn tight() -> StepSize {
        StepSize(MIN_STEP_SIZE)
    }

    #[inline]
    pub fn get(&self) -> usize {
        self.0
    }

    /// Tight mode carves 1-apart corridors, every cell is a potential maze cell.
    #[inline]
    pub fn is_tight(&self) -> bool {
        self.0 == 1
    }
}

impl Default for StepSize {
    fn default() -> StepSize {
        StepSize(2)
    }
}

/// Round a dimension down to the nearest odd value, `((n - 1) / 2) * 2 + 1`.
///
/// Corridors carved 2 apart need odd sized grids: even indices are walls, odd indices are
/// paths. Anything below 1 becomes 1.
pub fn odd_floor(n: usize) -> usize {
    let n = cmp::max(n, 1);
    ((n - 1) / 2) * 2 + 1
}

/// Normalise a width/height pair to odd dimensions.
pub fn odd_dimensions(width: Width, height: Height) -> (Width, Height) {
    (Width(odd_floor(width.0)), Height(odd_floor(height.0)))
}
