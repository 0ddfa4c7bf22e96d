use rand::XorShiftRng;

use cells::{CellChange, CellPosition, CellState, PositionSmallVec};
use errors::*;
use frontier::{self, FrontierSet};
use generators::{StepOutcome, StepResult};
use grid::MazeGrid;
use masks::CellRegistry;
use topology::NeighborTopology;

/// Applies randomized Prim's steps to a grid and a frontier set it is lent.
///
/// The carver only knows the topology; all per-run state lives in the `FrontierSet` and the
/// `MazeGrid` handed to each call.
#[derive(Debug, Clone, Copy)]
pub struct Carver {
    topology: NeighborTopology,
}

impl Carver {
    pub fn new(topology: NeighborTopology) -> Carver {
        Carver { topology: topology }
    }

    #[inline]
    pub fn topology(&self) -> &NeighborTopology {
        &self.topology
    }

    /// In-bounds neighbours the registry knows about.
    pub fn neighbours(&self,
                      pos: CellPosition,
                      grid: &MazeGrid,
                      registry: &dyn CellRegistry)
                      -> PositionSmallVec {
        self.topology
            .neighbours(pos, grid)
            .into_iter()
            .filter(|n| registry.contains_cell(*n))
            .collect()
    }

    /// Carve the start cell and queue its neighbours. Clears any previous run first.
    pub fn seed(&self,
                frontier: &mut FrontierSet,
                grid: &mut MazeGrid,
                registry: &dyn CellRegistry,
                start: CellPosition)
                -> Result<StepResult> {
        let previous = grid.set(start, CellState::Path)?;
        frontier.clear();
        let _ = frontier.visit(start);
        let added = frontier.extend_frontier(self.neighbours(start, grid, registry));

        info!("seeded at {} with {} frontier cells", start, added.len());

        let mut result = StepResult::default();
        result.cell = Some(start);
        if previous != CellState::Path {
            result.changes.push(CellChange::new(start, CellState::Path));
        }
        result.frontier_added = added.into_iter().collect();
        Ok(result)
    }

    /// One carve: pick a frontier cell still touching the maze, connect it to one of its
    /// visited neighbours and queue its own neighbours.
    ///
    /// `Done` when no frontier cell touches the visited region any more. Frontier cells that
    /// do not touch it are dropped, never re-queued.
    pub fn step(&self,
                frontier: &mut FrontierSet,
                grid: &mut MazeGrid,
                registry: &dyn CellRegistry,
                rng: &mut XorShiftRng)
                -> Result<StepOutcome> {
        let valid = frontier.connected_frontier(|f| self.neighbours(f, grid, registry));
        let dropped = frontier.retain_frontier(&valid);
        if !dropped.is_empty() {
            warn!("dropped {} frontier cells with no visited neighbour", dropped.len());
        }

        let cell = match frontier::pick_uniform(&valid, rng) {
            Some(cell) => cell,
            None => {
                info!("no frontier cell touches the maze, carving complete");
                return Ok(StepOutcome::Done);
            }
        };

        let linked = frontier.visited_among(&self.neighbours(cell, grid, registry));
        let neighbour = match frontier::pick_uniform(&linked, rng) {
            Some(neighbour) => neighbour,
            None => return Ok(StepOutcome::Done),
        };

        let changes = Carver::carve_segment(grid, neighbour, cell)?;
        let _ = frontier.visit(cell);
        let added = frontier.extend_frontier(self.neighbours(cell, grid, registry));

        debug!("carved {} -> {}", neighbour, cell);

        Ok(StepOutcome::Advanced(StepResult {
            cell: Some(cell),
            linked_from: Some(neighbour),
            changes: changes,
            frontier_added: added.into_iter().collect(),
            frontier_dropped: dropped,
        }))
    }

    /// Turn every cell on the straight line from `from` to `to` (both included) into path.
    ///
    /// Identical or diagonal pairs fail with `InvalidCarve`, and a segment leaving the grid
    /// fails with `OutOfBounds`; in both cases nothing is written. Returns the cells whose
    /// state changed.
    pub fn carve_segment(grid: &mut MazeGrid,
                         from: CellPosition,
                         to: CellPosition)
                         -> Result<Vec<CellChange>> {
        let segment = from.segment_to(to)
            .ok_or_else(|| Error::from(ErrorKind::InvalidCarve(from, to)))?;

        if let Some(outside) = segment.iter().cloned().find(|pos| !grid.contains(*pos)) {
            bail!(ErrorKind::OutOfBounds(outside, grid.width(), grid.height()));
        }

        let mut changes = Vec::with_capacity(segment.len());
        for pos in segment {
            if grid.set(pos, CellState::Path)? != CellState::Path {
                changes.push(CellChange::new(pos, CellState::Path));
            }
        }
        Ok(changes)
    }
}
