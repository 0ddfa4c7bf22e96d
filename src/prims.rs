//! Randomized Prim's carving on a corridor lattice.
//!
//! Maze cells sit `step` grid units apart; carving a link between two of them also opens the
//! wall cells in between. The frontier is every unvisited lattice cell next to the maze.

use rand::XorShiftRng;

use carver::Carver;
use cells::CellPosition;
use errors::*;
use frontier::{self, FrontierSet};
use generators::{GenerationState, MazeAlgorithm, Progress, StepOutcome, StepResult};
use grid::MazeGrid;
use masks::CellRegistry;
use topology::NeighborTopology;
use units::StepSize;

/// Prim's with a re-validated frontier: each step only picks among frontier cells that still
/// touch the visited region, and discards the rest.
#[derive(Debug, Clone)]
pub struct FrontierPrims {
    carver: Carver,
    frontier: FrontierSet,
    state: GenerationState,
}

impl FrontierPrims {
    pub fn new(step: StepSize) -> FrontierPrims {
        FrontierPrims {
            carver: Carver::new(NeighborTopology::new(step)),
            frontier: FrontierSet::default(),
            state: GenerationState::Idle,
        }
    }

    pub fn frontier(&self) -> &FrontierSet {
        &self.frontier
    }
}

impl MazeAlgorithm for FrontierPrims {
    fn name(&self) -> &'static str {
        "frontier-prims"
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
        let result = self.carver.seed(&mut self.frontier, grid, registry, start)?;
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

        let outcome = self.carver.step(&mut self.frontier, grid, registry, rng)?;
        self.state = if outcome.is_done() {
            GenerationState::Done
        } else {
            GenerationState::Stepping
        };
        Ok(outcome)
    }

    fn reset(&mut self) {
        self.frontier.clear();
        self.state = GenerationState::Idle;
    }

    fn progress(&self) -> Progress {
        Progress {
            incorporated: self.frontier.visited_len(),
            pending: self.frontier.frontier_len(),
        }
    }
}

/// Prim's that never re-validates: any frontier cell may be picked, and one without a carved
/// neighbour is simply thrown away. Finishes when the frontier runs dry.
#[derive(Debug, Clone)]
pub struct EagerPrims {
    carver: Carver,
    frontier: FrontierSet,
    state: GenerationState,
}

impl EagerPrims {
    pub fn new(step: StepSize) -> EagerPrims {
        EagerPrims {
            carver: Carver::new(NeighborTopology::new(step)),
            frontier: FrontierSet::default(),
            state: GenerationState::Idle,
        }
    }
}

impl MazeAlgorithm for EagerPrims {
    fn name(&self) -> &'static str {
        "eager-prims"
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
        let result = self.carver.seed(&mut self.frontier, grid, registry, start)?;
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

        let cell = match frontier::pick_uniform(self.frontier.frontier(), rng) {
            Some(cell) => cell,
            None => {
                self.state = GenerationState::Done;
                return Ok(StepOutcome::Done);
            }
        };
        let _ = self.frontier.remove_frontier(cell);
        self.state = GenerationState::Stepping;

        let around = self.carver.neighbours(cell, grid, registry);
        let linked = self.frontier.visited_among(&around);
        let neighbour = match frontier::pick_uniform(&linked, rng) {
            Some(neighbour) => neighbour,
            None => {
                debug!("discarding isolated frontier cell {}", cell);
                let mut result = StepResult::default();
                result.frontier_dropped.push(cell);
                return Ok(StepOutcome::Advanced(result));
            }
        };

        let changes = Carver::carve_segment(grid, neighbour, cell)?;
        let _ = self.frontier.visit(cell);
        let added = self.frontier.extend_frontier(around);

        Ok(StepOutcome::Advanced(StepResult {
            cell: Some(cell),
            linked_from: Some(neighbour),
            changes: changes,
            frontier_added: added.into_iter().collect(),
            frontier_dropped: vec![],
        }))
    }

    fn reset(&mut self) {
        self.frontier.clear();
        self.state = GenerationState::Idle;
    }

    fn progress(&self) -> Progress {
        Progress {
            incorporated: self.frontier.visited_len(),
            pending: self.frontier.frontier_len(),
        }
    }
}
