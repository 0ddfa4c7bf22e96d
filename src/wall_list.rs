use rand::{Rng, XorShiftRng};

use cells::{CellChange, CellPosition, CellState};
use errors::*;
use generators::{GenerationState, MazeAlgorithm, Progress, StepOutcome, StepResult};
use grid::MazeGrid;
use masks::CellRegistry;
use topology::NeighborTopology;
use units::StepSize;
use utils::{self, FnvHashSet};

/// Open count reported for outer ring cells so that they never qualify for opening.
const BOUNDARY_OPEN_COUNT: usize = 5;

/// Cell level randomized Prim's over a list of candidate walls.
///
/// Neighbours are one cell apart, and there is no wall/cell lattice: a listed wall is opened
/// when exactly one of its four neighbours is already path, which keeps corridors one cell
/// wide without any alignment. The outer ring is never opened.
#[derive(Debug, Clone)]
pub struct WallListPrims {
    topology: NeighborTopology,
    walls: Vec<CellPosition>,
    listed: FnvHashSet<CellPosition>,
    opened: usize,
    state: GenerationState,
}

impl Default for WallListPrims {
    fn default() -> WallListPrims {
        WallListPrims::new()
    }
}

impl WallListPrims {
    pub fn new() -> WallListPrims {
        WallListPrims {
            topology: NeighborTopology::new(StepSize::tight()),
            walls: vec![],
            listed: utils::fnv_hashset(64),
            opened: 0,
            state: GenerationState::Idle,
        }
    }

    /// Path cells among the four unit neighbours, or `BOUNDARY_OPEN_COUNT` on the outer ring.
    pub fn open_neighbour_count(&self, pos: CellPosition, grid: &MazeGrid) -> usize {
        if !self.topology.is_interior(pos, grid) {
            return BOUNDARY_OPEN_COUNT;
        }
        self.topology
            .neighbours(pos, grid)
            .iter()
            .filter(|n| grid.is_path(**n))
            .count()
    }

    fn list_walls_around(&mut self,
                         pos: CellPosition,
                         grid: &MazeGrid,
                         registry: &dyn CellRegistry)
                         -> Vec<CellPosition> {
        let candidates = self.topology.neighbours(pos, grid);
        let mut added = vec![];
        for wall in candidates {
            if self.topology.is_interior(wall, grid) && !grid.is_path(wall) &&
               registry.contains_cell(wall) && self.listed.insert(wall) {
                self.walls.push(wall);
                added.push(wall);
            }
        }
        added
    }
}

impl MazeAlgorithm for WallListPrims {
    fn name(&self) -> &'static str {
        "wall-list-prims"
    }

    fn state(&self) -> GenerationState {
        self.state
    }

    fn seed(&mut self,
            grid: &mut MazeGrid,
            registry: &dyn CellRegistry,
            start: CellPosition,
            _: &mut XorShiftRng)
            -> Result<StepResult> {
        self.reset();
        let previous = grid.set(start, CellState::Path)?;
        self.opened = 1;

        let mut result = StepResult::default();
        result.cell = Some(start);
        if previous != CellState::Path {
            result.changes.push(CellChange::new(start, CellState::Path));
        }
        result.frontier_added = self.list_walls_around(start, grid, registry);
        self.state = GenerationState::Seeded;
        Ok(result)
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
        if self.walls.is_empty() {
            self.state = GenerationState::Done;
            return Ok(StepOutcome::Done);
        }
        self.state = GenerationState::Stepping;

        let wall = self.walls.remove(rng.gen_range(0, self.walls.len()));
        let _ = self.listed.remove(&wall);

        let mut result = StepResult::default();
        if self.open_neighbour_count(wall, grid) == 1 {
            if grid.set(wall, CellState::Path)? != CellState::Path {
                result.changes.push(CellChange::new(wall, CellState::Path));
            }
            self.opened += 1;
            result.cell = Some(wall);
            result.linked_from = self.topology
                .neighbours(wall, grid)
                .into_iter()
                .find(|n| grid.is_path(*n) && *n != wall);
            result.frontier_added = self.list_walls_around(wall, grid, registry);
            trace!("opened wall {}", wall);
        } else {
            result.frontier_dropped.push(wall);
        }
        Ok(StepOutcome::Advanced(result))
    }

    fn reset(&mut self) {
        self.walls.clear();
        self.listed.clear();
        self.opened = 0;
        self.state = GenerationState::Idle;
    }

    fn progress(&self) -> Progress {
        Progress {
            incorporated: self.opened,
            pending: self.walls.len(),
        }
    }
}
