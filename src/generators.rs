//! Maze generation strategies.
//!
//! Every generator carves into a `MazeGrid` one bounded step at a time behind the
//! `MazeAlgorithm` trait, so a host can run any of them to completion or tick them frame by
//! frame without knowing which one it drives.

use rand::XorShiftRng;

use cells::{CellChange, CellPosition};
use drunken_crawl::DrunkenCrawl;
use errors::*;
use grid::MazeGrid;
use masks::CellRegistry;
use prims::{EagerPrims, FrontierPrims};
use random_fill::RandomFill;
use units::StepSize;
use wall_list::WallListPrims;

/// Lifecycle of one generator run.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
pub enum GenerationState {
    /// Nothing seeded yet, or reset.
    Idle,
    /// Start cell carved, no step taken.
    Seeded,
    /// At least one step applied.
    Stepping,
    /// Nothing left to carve. Further steps are no-ops.
    Done,
}

impl Default for GenerationState {
    fn default() -> GenerationState {
        GenerationState::Idle
    }
}

/// What one step (or the seed) changed.
#[derive(Eq, PartialEq, Clone, Debug, Default, Serialize, Deserialize)]
pub struct StepResult {
    /// The cell incorporated into the maze by this step.
    pub cell: Option<CellPosition>,
    /// The already carved cell that `cell` was connected to.
    pub linked_from: Option<CellPosition>,
    /// Cell writes that changed state, in the order they happened.
    pub changes: Vec<CellChange>,
    /// Cells that became carving candidates.
    pub frontier_added: Vec<CellPosition>,
    /// Candidates discarded without being carved.
    pub frontier_dropped: Vec<CellPosition>,
}

impl StepResult {
    pub fn changed_positions(&self) -> Vec<CellPosition> {
        self.changes.iter().map(|change| change.position).collect()
    }
}

/// Outcome of asking a generator for one more step.
#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub enum StepOutcome {
    Advanced(StepResult),
    Done,
}

impl StepOutcome {
    #[inline]
    pub fn is_done(&self) -> bool {
        *self == StepOutcome::Done
    }
}

/// Size of a generator's working state, for progress reporting.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Progress {
    /// Cells (or rows, or crawls) already incorporated.
    pub incorporated: usize,
    /// Work still queued.
    pub pending: usize,
}

/// A steppable maze generator.
///
/// The grid, registry and random source are owned by the caller and lent per call; a
/// generator only keeps the bookkeeping of its own run.
pub trait MazeAlgorithm: Send {
    fn name(&self) -> &'static str;

    fn state(&self) -> GenerationState;

    fn is_done(&self) -> bool {
        self.state() == GenerationState::Done
    }

    /// Whether the run grows out of the start cell given to `seed`.
    fn uses_start_cell(&self) -> bool {
        true
    }

    /// Begin a run on an all wall grid. `start` has already been validated by the caller.
    fn seed(&mut self,
            grid: &mut MazeGrid,
            registry: &dyn CellRegistry,
            start: CellPosition,
            rng: &mut XorShiftRng)
            -> Result<StepResult>;

    /// Apply one bounded unit of work. Once `Done` is returned every further call returns
    /// `Done` again without touching the grid.
    fn step(&mut self,
            grid: &mut MazeGrid,
            registry: &dyn CellRegistry,
            rng: &mut XorShiftRng)
            -> Result<StepOutcome>;

    /// Forget the current run and go back to `Idle`.
    fn reset(&mut self);

    fn progress(&self) -> Progress;

    /// How many steps a run may take on `grid` before it is considered stuck.
    fn step_budget(&self, grid: &MazeGrid) -> usize {
        grid.size() * 4
    }
}

/// The selectable generator strategies.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Serialize, Deserialize)]
pub enum AlgorithmKind {
    /// Randomized Prim's that re-validates the frontier against the visited region every step.
    FrontierPrims,
    /// Randomized Prim's that tries any frontier cell and discards it when it has no carved
    /// neighbour.
    EagerPrims,
    /// Cell level Prim's over a list of walls, opening a wall that touches exactly one path.
    WallListPrims,
    /// A handful of random walkers drifting across the grid.
    DrunkenCrawl,
    /// Every cell a coin flip.
    RandomFill,
}

const ALL_KINDS: [AlgorithmKind; 5] = [AlgorithmKind::FrontierPrims,
                                       AlgorithmKind::EagerPrims,
                                       AlgorithmKind::WallListPrims,
                                       AlgorithmKind::DrunkenCrawl,
                                       AlgorithmKind::RandomFill];

impl Default for AlgorithmKind {
    fn default() -> AlgorithmKind {
        AlgorithmKind::FrontierPrims
    }
}

impl AlgorithmKind {
    pub fn all() -> &'static [AlgorithmKind] {
        &ALL_KINDS
    }

    pub fn name(&self) -> &'static str {
        match *self {
            AlgorithmKind::FrontierPrims => "frontier-prims",
            AlgorithmKind::EagerPrims => "eager-prims",
            AlgorithmKind::WallListPrims => "wall-list-prims",
            AlgorithmKind::DrunkenCrawl => "drunken-crawl",
            AlgorithmKind::RandomFill => "random-fill",
        }
    }

    pub fn from_name(name: &str) -> Option<AlgorithmKind> {
        ALL_KINDS.iter().cloned().find(|kind| kind.name() == name)
    }

    /// Instantiate the generator. Only the Prim's frontier variants honour the step size,
    /// the others work cell by cell.
    pub fn build(&self, step: StepSize) -> Box<dyn MazeAlgorithm> {
        match *self {
            AlgorithmKind::FrontierPrims => Box::new(FrontierPrims::new(step)),
            AlgorithmKind::EagerPrims => Box::new(EagerPrims::new(step)),
            AlgorithmKind::WallListPrims => Box::new(WallListPrims::new()),
            AlgorithmKind::DrunkenCrawl => Box::new(DrunkenCrawl::new()),
            AlgorithmKind::RandomFill => Box::new(RandomFill::new()),
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
    fn kind_names_round_trip() {
        for kind in AlgorithmKind::all() {
            assert_eq!(AlgorithmKind::from_name(kind.name()), Some(*kind));
            assert_eq!(kind.build(StepSize::default()).name(), kind.name());
        }
        assert_eq!(AlgorithmKind::from_name("binary-tree"), None);
        assert_eq!(AlgorithmKind::default(), AlgorithmKind::FrontierPrims);
    }

    #[test]
    fn every_generator_terminates_and_stays_done() {
        for kind in AlgorithmKind::all() {
            let mut grid = MazeGrid::new(Width(15), Height(13)).unwrap();
            let mut rng = seeded_rng(11);
            let mut algorithm = kind.build(StepSize::default());
            assert_eq!(algorithm.state(), GenerationState::Idle);

            let _ = algorithm.seed(&mut grid, &AllCells, CellPosition::new(1, 1), &mut rng)
                .unwrap();
            assert_eq!(algorithm.state(), GenerationState::Seeded);

            let cap = algorithm.step_budget(&grid);
            let mut steps = 0;
            while !algorithm.step(&mut grid, &AllCells, &mut rng).unwrap().is_done() {
                steps += 1;
                assert!(steps < cap, "{} did not terminate", kind.name());
            }
            assert!(algorithm.is_done());

            let before = grid.clone();
            assert!(algorithm.step(&mut grid, &AllCells, &mut rng).unwrap().is_done());
            assert_eq!(grid, before);

            algorithm.reset();
            assert_eq!(algorithm.state(), GenerationState::Idle);
            assert_eq!(algorithm.progress(), Progress::default());
        }
    }
}
