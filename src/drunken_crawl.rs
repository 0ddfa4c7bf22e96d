use rand::{Rng, XorShiftRng};
use std::collections::VecDeque;

use cells::{CellChange, CellPosition, CellState};
use errors::*;
use generators::{GenerationState, MazeAlgorithm, Progress, StepOutcome, StepResult};
use grid::MazeGrid;
use masks::CellRegistry;

/// Which grid edge a crawler starts from and which way it drifts.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Crawl {
    /// Enters on the x = 1 column at a random z and drifts towards +x.
    Vertical,
    /// Enters on the z = 1 row at a random x and drifts towards +z.
    Horizontal,
}

const CRAWL_ORDER: [Crawl; 5] = [Crawl::Vertical,
                                 Crawl::Vertical,
                                 Crawl::Horizontal,
                                 Crawl::Horizontal,
                                 Crawl::Horizontal];

/// Random walkers opening every interior cell they step on.
///
/// Each walker moves along one axis per step with even odds: along its drift axis it only
/// moves forward or stays put, across it any of -1, 0, +1. A walker stops as soon as it
/// leaves the interior. The result is not a perfect maze.
#[derive(Debug, Clone)]
pub struct DrunkenCrawl {
    queue: VecDeque<Crawl>,
    crawler: Option<(Crawl, CellPosition)>,
    finished: usize,
    state: GenerationState,
}

impl Default for DrunkenCrawl {
    fn default() -> DrunkenCrawl {
        DrunkenCrawl::new()
    }
}

impl DrunkenCrawl {
    pub fn new() -> DrunkenCrawl {
        DrunkenCrawl {
            queue: VecDeque::with_capacity(CRAWL_ORDER.len()),
            crawler: None,
            finished: 0,
            state: GenerationState::Idle,
        }
    }

    fn spawn(crawl: Crawl, grid: &MazeGrid, rng: &mut XorShiftRng) -> CellPosition {
        let (w, h) = (grid.width() as i32, grid.height() as i32);
        match crawl {
            Crawl::Vertical => CellPosition::new(1, rng.gen_range(1, h - 1)),
            Crawl::Horizontal => CellPosition::new(rng.gen_range(1, w - 1), 1),
        }
    }

    fn drift(crawl: Crawl, pos: CellPosition, rng: &mut XorShiftRng) -> CellPosition {
        let along_x = rng.gen_range(0, 100) < 50;
        match (crawl, along_x) {
            (Crawl::Vertical, true) => pos.offset(rng.gen_range(0, 2), 0),
            (Crawl::Vertical, false) => pos.offset(0, rng.gen_range(-1, 2)),
            (Crawl::Horizontal, true) => pos.offset(rng.gen_range(-1, 2), 0),
            (Crawl::Horizontal, false) => pos.offset(0, rng.gen_range(0, 2)),
        }
    }

    fn in_interior(pos: CellPosition, grid: &MazeGrid) -> bool {
        let (w, h) = (grid.width() as i32, grid.height() as i32);
        pos.x >= 1 && pos.x < w - 1 && pos.z >= 1 && pos.z < h - 1
    }
}

impl MazeAlgorithm for DrunkenCrawl {
    fn name(&self) -> &'static str {
        "drunken-crawl"
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
        self.reset();
        if grid.width() >= 3 && grid.height() >= 3 {
            self.queue.extend(CRAWL_ORDER.iter().cloned());
        } else {
            info!("{}x{} grid has no interior to crawl", grid.width(), grid.height());
        }
        self.state = GenerationState::Seeded;
        Ok(StepResult::default())
    }

    /// Open the cell under the current crawler and move it once, spawning the next crawler
    /// first if none is active.
    fn step(&mut self,
            grid: &mut MazeGrid,
            registry: &dyn CellRegistry,
            rng: &mut XorShiftRng)
            -> Result<StepOutcome> {
        match self.state {
            GenerationState::Idle | GenerationState::Done => return Ok(StepOutcome::Done),
            GenerationState::Seeded | GenerationState::Stepping => {}
        }

        let (crawl, pos) = match self.crawler {
            Some(active) => active,
            None => {
                match self.queue.pop_front() {
                    Some(crawl) => (crawl, DrunkenCrawl::spawn(crawl, grid, rng)),
                    None => {
                        self.state = GenerationState::Done;
                        return Ok(StepOutcome::Done);
                    }
                }
            }
        };
        self.state = GenerationState::Stepping;

        let mut result = StepResult::default();
        if registry.contains_cell(pos) {
            if grid.set(pos, CellState::Path)? != CellState::Path {
                result.changes.push(CellChange::new(pos, CellState::Path));
            }
            result.cell = Some(pos);
        }

        let next = DrunkenCrawl::drift(crawl, pos, rng);
        if DrunkenCrawl::in_interior(next, grid) {
            self.crawler = Some((crawl, next));
        } else {
            trace!("{:?} crawler left the interior at {}", crawl, next);
            self.crawler = None;
            self.finished += 1;
        }
        Ok(StepOutcome::Advanced(result))
    }

    fn reset(&mut self) {
        self.queue.clear();
        self.crawler = None;
        self.finished = 0;
        self.state = GenerationState::Idle;
    }

    fn progress(&self) -> Progress {
        Progress {
            incorporated: self.finished,
            pending: self.queue.len() + self.crawler.map_or(0, |_| 1),
        }
    }

    /// Walkers only move forward on half of their steps, so runs take longer than the grid
    /// size alone suggests.
    fn step_budget(&self, grid: &MazeGrid) -> usize {
        grid.size() * 4 + (grid.width() + grid.height()) * CRAWL_ORDER.len() * 16
    }
}
