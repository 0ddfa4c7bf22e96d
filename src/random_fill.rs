use rand::{Rng, XorShiftRng};

use cells::{CellChange, CellPosition, CellState};
use errors::*;
use generators::{GenerationState, MazeAlgorithm, Progress, StepOutcome, StepResult};
use grid::MazeGrid;
use masks::CellRegistry;

/// Cells open when a roll in 0..100 comes out above this.
const OPEN_THRESHOLD: u32 = 50;

/// Unstructured noise: every cell independently becomes path a little under half the time.
/// One grid row is filled per step.
#[derive(Debug, Clone, Default)]
pub struct RandomFill {
    next_row: usize,
    rows: usize,
    state: GenerationState,
}

impl RandomFill {
    pub fn new() -> RandomFill {
        RandomFill::default()
    }
}

impl MazeAlgorithm for RandomFill {
    fn name(&self) -> &'static str {
        "random-fill"
    }

    fn state(&self) -> GenerationState {
        self.state
    }

    fn uses_start_cell(&self) -> bool {
        false
    }

    fn seed(&mut self,
            grid: &mut MazeGrid,
            _: &dyn CellRegistry,
            _: CellPosition,
            _: &mut XorShiftRng)
            -> Result<StepResult> {
        self.next_row = 0;
        self.rows = grid.height();
        self.state = GenerationState::Seeded;
        Ok(StepResult::default())
    }

    fn step(&mut self,
            grid: &mut MazeGrid,
            registry: &dyn CellRegistry,
            rng: &mut XorShiftRng)
            -> Result<StepOutcome> {
        match self.state {
            GenerationState::Idle | GenerationState::Done => return Ok(StepOutcome::Done),
            GenerationState::Seeded | GenerationState::Stepping => {}
        }
        if self.next_row >= self.rows {
            self.state = GenerationState::Done;
            return Ok(StepOutcome::Done);
        }
        self.state = GenerationState::Stepping;

        let mut result = StepResult::default();
        for pos in grid.row(self.next_row) {
            let roll: u32 = rng.gen_range(0, 100);
            if roll > OPEN_THRESHOLD && registry.contains_cell(pos) &&
               grid.set(pos, CellState::Path)? != CellState::Path {
                result.changes.push(CellChange::new(pos, CellState::Path));
            }
        }
        self.next_row += 1;
        Ok(StepOutcome::Advanced(result))
    }

    fn reset(&mut self) {
        *self = RandomFill::default();
    }

    fn progress(&self) -> Progress {
        Progress {
            incorporated: self.next_row,
            pending: self.rows - self.next_row,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use masks::AllCells;
    use units::{Height, Width};
    use utils::seeded_rng;

    #[test]
    fn one_row_per_step() {
        let mut grid = MazeGrid::new(Width(40), Height(6)).unwrap();
        let mut rng = seeded_rng(13);
        let mut fill = RandomFill::new();
        let _ = fill.seed(&mut grid, &AllCells, CellPosition::new(0, 0), &mut rng).unwrap();

        for row in 0..6 {
            match fill.step(&mut grid, &AllCells, &mut rng).unwrap() {
                StepOutcome::Advanced(result) => {
                    assert!(result.changes.iter().all(|c| c.position.z == row));
                }
                StepOutcome::Done => panic!("finished early at row {}", row),
            }
        }
        assert!(fill.step(&mut grid, &AllCells, &mut rng).unwrap().is_done());
        assert_eq!(fill.progress(), Progress { incorporated: 6, pending: 0 });
    }

    #[test]
    fn fills_a_bit_under_half() {
        let mut grid = MazeGrid::new(Width(100), Height(100)).unwrap();
        let mut rng = seeded_rng(99);
        let mut fill = RandomFill::new();
        let _ = fill.seed(&mut grid, &AllCells, CellPosition::new(0, 0), &mut rng).unwrap();
        while !fill.step(&mut grid, &AllCells, &mut rng).unwrap().is_done() {}

        // 49 of 100 rolls open a cell
        let ratio = grid.path_count() as f64 / grid.size() as f64;
        assert!(ratio > 0.44 && ratio < 0.54, "open ratio {}", ratio);
    }
}
