use rand::{Rng, XorShiftRng};

use cells::{CellPosition, PositionSmallVec};
use utils::{self, FnvHashSet};

/// Working state of a randomized Prim's run: the cells already incorporated into the maze and
/// the cells waiting next to them.
///
/// Invariant: a cell is never both visited and frontier. Visited only grows until `clear`.
///
/// The frontier keeps insertion order next to its membership set so that, for a given random
/// stream, picks are reproducible.
#[derive(Debug, Clone)]
pub struct FrontierSet {
    visited: FnvHashSet<CellPosition>,
    frontier: Vec<CellPosition>,
    in_frontier: FnvHashSet<CellPosition>,
}

impl Default for FrontierSet {
    fn default() -> FrontierSet {
        FrontierSet::with_capacity(0)
    }
}

impl FrontierSet {
    pub fn with_capacity(capacity: usize) -> FrontierSet {
        FrontierSet {
            visited: utils::fnv_hashset(capacity),
            frontier: Vec::with_capacity(capacity),
            in_frontier: utils::fnv_hashset(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.visited.clear();
        self.frontier.clear();
        self.in_frontier.clear();
    }

    #[inline]
    pub fn is_visited(&self, pos: CellPosition) -> bool {
        self.visited.contains(&pos)
    }

    #[inline]
    pub fn is_frontier(&self, pos: CellPosition) -> bool {
        self.in_frontier.contains(&pos)
    }

    #[inline]
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    #[inline]
    pub fn is_frontier_empty(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Frontier cells in the order they were discovered.
    #[inline]
    pub fn frontier(&self) -> &[CellPosition] {
        &self.frontier
    }

    pub fn visited(&self) -> &FnvHashSet<CellPosition> {
        &self.visited
    }

    /// Incorporate a cell into the maze. It leaves the frontier if it was there.
    /// Returns false if the cell was already visited.
    pub fn visit(&mut self, pos: CellPosition) -> bool {
        let _ = self.remove_frontier(pos);
        self.visited.insert(pos)
    }

    /// Queue a cell unless it is already visited or queued.
    pub fn push_frontier(&mut self, pos: CellPosition) -> bool {
        if self.visited.contains(&pos) || !self.in_frontier.insert(pos) {
            return false;
        }
        self.frontier.push(pos);
        true
    }

    /// Queue every candidate that is neither visited nor queued yet, returning the ones added.
    pub fn extend_frontier<I>(&mut self, candidates: I) -> PositionSmallVec
        where I: IntoIterator<Item = CellPosition>
    {
        candidates.into_iter()
            .filter(|pos| self.push_frontier(*pos))
            .collect()
    }

    pub fn remove_frontier(&mut self, pos: CellPosition) -> bool {
        if !self.in_frontier.remove(&pos) {
            return false;
        }
        if let Some(index) = self.frontier.iter().position(|f| *f == pos) {
            let _ = self.frontier.remove(index);
        }
        true
    }

    /// Frontier cells that still touch the visited region through at least one of their
    /// neighbours, in frontier order.
    pub fn connected_frontier<F>(&self, mut neighbours: F) -> Vec<CellPosition>
        where F: FnMut(CellPosition) -> PositionSmallVec
    {
        self.frontier
            .iter()
            .cloned()
            .filter(|f| neighbours(*f).iter().any(|n| self.visited.contains(n)))
            .collect()
    }

    /// Drop every frontier cell not in `keep`, returning the dropped cells.
    pub fn retain_frontier(&mut self, keep: &[CellPosition]) -> Vec<CellPosition> {
        if keep.len() == self.frontier.len() {
            return vec![];
        }
        let keep_set: FnvHashSet<CellPosition> = keep.iter().cloned().collect();
        let (kept, dropped): (Vec<CellPosition>, Vec<CellPosition>) =
            self.frontier.iter().cloned().partition(|f| keep_set.contains(f));
        for pos in &dropped {
            let _ = self.in_frontier.remove(pos);
        }
        self.frontier = kept;
        dropped
    }

    /// Those of `candidates` that are visited.
    pub fn visited_among(&self, candidates: &[CellPosition]) -> PositionSmallVec {
        candidates.iter().cloned().filter(|n| self.visited.contains(n)).collect()
    }
}

/// Uniform choice over a candidate list.
pub fn pick_uniform(candidates: &[CellPosition], rng: &mut XorShiftRng) -> Option<CellPosition> {
    if candidates.is_empty() {
        None
    } else {
        Some(candidates[rng.gen_range(0, candidates.len())])
    }
}
