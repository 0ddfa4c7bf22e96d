//! Route finding and structural checks over the carved path cells of a grid.
//!
//! Path cells are connected when they are unit neighbours; walls block.

use petgraph::algo;
use petgraph::graph::{NodeIndex, UnGraph};

use cells::{CellPosition, PositionSmallVec};
use grid::MazeGrid;
use topology::NeighborTopology;
use units::StepSize;
use utils::{self, FnvHashMap};

fn unit_topology() -> NeighborTopology {
    NeighborTopology::new(StepSize::tight())
}

/// Path cells unit-adjacent to `pos`, in the fixed neighbour order.
pub fn open_neighbours(grid: &MazeGrid, pos: CellPosition) -> PositionSmallVec {
    unit_topology()
        .neighbours(pos, grid)
        .into_iter()
        .filter(|n| grid.is_path(*n))
        .collect()
}

/// The path cells as an undirected graph, one node per cell and one edge per pair of
/// adjacent path cells.
pub fn path_graph(grid: &MazeGrid)
                  -> (UnGraph<CellPosition, ()>, FnvHashMap<CellPosition, NodeIndex>) {
    let mut graph = UnGraph::with_capacity(grid.path_count(), grid.path_count() * 2);
    let mut nodes = utils::fnv_hashmap(grid.path_count());
    for pos in grid.path_cells() {
        let _ = nodes.insert(pos, graph.add_node(pos));
    }

    // only look east and south so every edge is added once
    for (pos, node) in &nodes {
        for neighbour in &[pos.offset(1, 0), pos.offset(0, 1)] {
            if let Some(other) = nodes.get(neighbour) {
                let _ = graph.add_edge(*node, *other, ());
            }
        }
    }
    (graph, nodes)
}

/// Number of separate connected regions of path cells. 0 for an all wall grid.
pub fn path_components(grid: &MazeGrid) -> usize {
    let (graph, _) = path_graph(grid);
    algo::connected_components(&graph)
}

/// Path cells with exactly one open neighbour, in row major order.
pub fn dead_ends(grid: &MazeGrid) -> Vec<CellPosition> {
    grid.path_cells()
        .filter(|pos| open_neighbours(grid, *pos).len() == 1)
        .collect()
}

/// Breadth first distances from a start cell to every path cell reachable from it.
#[derive(Debug, Clone)]
pub struct Distances {
    start: CellPosition,
    distances: FnvHashMap<CellPosition, u32>,
    max_distance: u32,
}

impl Distances {
    /// None if `start` is not a path cell.
    pub fn new(grid: &MazeGrid, start: CellPosition) -> Option<Distances> {
        if !grid.is_path(start) {
            return None;
        }

        let mut distances = utils::fnv_hashmap(grid.path_count());
        let _ = distances.insert(start, 0);
        let mut max = 0;

        // every edge costs one step, so the first distance written to a cell is final and the
        // map doubles as the visited set
        let mut frontier = vec![start];
        while !frontier.is_empty() {
            let mut next_frontier = vec![];
            for pos in &frontier {
                let distance_to_cell = distances.get(pos).cloned().unwrap_or(0);
                if distance_to_cell > max {
                    max = distance_to_cell;
                }
                for neighbour in open_neighbours(grid, *pos) {
                    if !distances.contains_key(&neighbour) {
                        let _ = distances.insert(neighbour, distance_to_cell + 1);
                        next_frontier.push(neighbour);
                    }
                }
            }
            frontier = next_frontier;
        }

        Some(Distances {
            start: start,
            distances: distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> CellPosition {
        self.start
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, pos: CellPosition) -> Option<u32> {
        self.distances.get(&pos).cloned()
    }

    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// Cells at the maximum distance, in row major order.
    pub fn furthest_points_on_grid(&self, grid: &MazeGrid) -> PositionSmallVec {
        grid.path_cells()
            .filter(|pos| self.distance_from_start_to(*pos) == Some(self.max_distance))
            .collect()
    }
}

/// Walk back downhill from `end` to the start of `distances_from_start`. None if `end` is
/// unreachable.
pub fn shortest_path(grid: &MazeGrid,
                     distances_from_start: &Distances,
                     end: CellPosition)
                     -> Option<Vec<CellPosition>> {
    let mut current_distance = distances_from_start.distance_from_start_to(end)?;
    let mut current = end;
    let mut path = vec![end];

    while current_distance > 0 {
        current = open_neighbours(grid, current)
            .into_iter()
            .find(|n| {
                distances_from_start.distance_from_start_to(*n) == Some(current_distance - 1)
            })?;
        current_distance -= 1;
        path.push(current);
    }

    path.reverse();
    Some(path)
}

/// The longest route in a perfect maze: the furthest cell from an arbitrary start, then the
/// furthest cell from that one. With loops or several regions the result is only a long
/// path, not necessarily the longest.
pub fn longest_path(grid: &MazeGrid) -> Option<Vec<CellPosition>> {
    let arbitrary_start = grid.path_cells().next()?;
    let first_distances = Distances::new(grid, arbitrary_start)?;
    let path_start = *first_distances.furthest_points_on_grid(grid).first()?;

    let distances_from_start = Distances::new(grid, path_start)?;
    let end = *distances_from_start.furthest_points_on_grid(grid).first()?;
    shortest_path(grid, &distances_from_start, end)
}
