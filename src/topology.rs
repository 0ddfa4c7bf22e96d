use cells::{CellPosition, PositionSmallVec};
use grid::MazeGrid;
use units::StepSize;

/// The four axis-aligned neighbours of a cell, `step` grid units away.
///
/// Neighbour order is fixed: +x, -x, +z, -z. Anything needing a stable tie-break can rely on
/// it. The topology holds nothing but the offsets, so changing the step size means building a
/// new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborTopology {
    step: StepSize,
    offsets: [(i32, i32); 4],
}

impl NeighborTopology {
    pub fn new(step: StepSize) -> NeighborTopology {
        let s = step.get() as i32;
        NeighborTopology {
            step: step,
            offsets: [(s, 0), (-s, 0), (0, s), (0, -s)],
        }
    }

    #[inline]
    pub fn step_size(&self) -> StepSize {
        self.step
    }

    /// Up to four positions one offset away from `pos` that lie within the grid.
    pub fn neighbours(&self, pos: CellPosition, grid: &MazeGrid) -> PositionSmallVec {
        self.offsets
            .iter()
            .map(|&(dx, dz)| pos.offset(dx, dz))
            .filter(|neighbour| self.is_in_bounds(*neighbour, grid))
            .collect()
    }

    /// Inclusive of the outer ring: 0 <= x < width, 0 <= z < height.
    #[inline]
    pub fn is_in_bounds(&self, pos: CellPosition, grid: &MazeGrid) -> bool {
        grid.contains(pos)
    }

    /// Strictly inside the outer wall ring: 0 < x < width - 1, 0 < z < height - 1.
    #[inline]
    pub fn is_interior(&self, pos: CellPosition, grid: &MazeGrid) -> bool {
        let (w, h) = (grid.width() as i32, grid.height() as i32);
        pos.x > 0 && pos.x < w - 1 && pos.z > 0 && pos.z < h - 1
    }

    /// Does the grid have any interior cell at all.
    #[inline]
    pub fn has_interior(&self, grid: &MazeGrid) -> bool {
        grid.width() >= 3 && grid.height() >= 3
    }

    /// Cells on the carving lattice: with corridors two or more apart the maze cells sit on odd
    /// coordinates and the even lines in between are walls. Tight mode uses every cell.
    #[inline]
    pub fn is_lattice_aligned(&self, pos: CellPosition) -> bool {
        self.step.is_tight() || (pos.x.rem_euclid(2) == 1 && pos.z.rem_euclid(2) == 1)
    }

    /// Are `a` and `b` exactly one offset apart.
    pub fn are_neighbours(&self, a: CellPosition, b: CellPosition) -> bool {
        self.offsets.iter().any(|&(dx, dz)| a.offset(dx, dz) == b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use units::{Height, Width};

    fn topology(step: usize) -> NeighborTopology {
        NeighborTopology::new(StepSize::new(step).unwrap())
    }

    fn grid(w: usize, h: usize) -> MazeGrid {
        MazeGrid::new(Width(w), Height(h)).unwrap()
    }

    #[test]
    fn neighbour_order_is_fixed() {
        let t = topology(2);
        let g = grid(11, 11);
        let gc = |x, z| CellPosition::new(x, z);
        assert_eq!(&*t.neighbours(gc(5, 5), &g), &[gc(7, 5), gc(3, 5), gc(5, 7), gc(5, 3)]);
    }

    #[test]
    fn neighbours_stay_in_bounds() {
        let t = topology(2);
        let g = grid(11, 11);
        let gc = |x, z| CellPosition::new(x, z);

        // corners
        assert_eq!(&*t.neighbours(gc(1, 1), &g), &[gc(3, 1), gc(1, 3)]);
        assert_eq!(&*t.neighbours(gc(9, 9), &g), &[gc(7, 9), gc(9, 7)]);
        assert_eq!(&*t.neighbours(gc(0, 0), &g), &[gc(2, 0), gc(0, 2)]);
        assert_eq!(&*t.neighbours(gc(10, 10), &g), &[gc(8, 10), gc(10, 8)]);

        // along an edge
        assert_eq!(&*t.neighbours(gc(5, 1), &g), &[gc(7, 1), gc(3, 1), gc(5, 3)]);
    }

    #[test]
    fn wide_steps() {
        let t = topology(4);
        let g = grid(11, 11);
        let gc = |x, z| CellPosition::new(x, z);
        assert_eq!(&*t.neighbours(gc(1, 1), &g), &[gc(5, 1), gc(1, 5)]);
        assert_eq!(&*t.neighbours(gc(5, 5), &g), &[gc(9, 5), gc(1, 5), gc(5, 9), gc(5, 1)]);
        assert_eq!(t.neighbours(gc(1, 1), &grid(3, 3)).len(), 0);
        assert!(t.are_neighbours(gc(1, 1), gc(5, 1)));
        assert!(!t.are_neighbours(gc(1, 1), gc(3, 1)));
    }

    #[test]
    fn tight_steps() {
        let t = topology(1);
        let g = grid(3, 3);
        let gc = |x, z| CellPosition::new(x, z);
        assert_eq!(&*t.neighbours(gc(1, 1), &g), &[gc(2, 1), gc(0, 1), gc(1, 2), gc(1, 0)]);
        assert!(t.is_lattice_aligned(gc(0, 2)));
    }

    #[test]
    fn bounds_and_interior() {
        let t = topology(2);
        let g = grid(5, 4);
        let gc = |x, z| CellPosition::new(x, z);

        assert!(t.is_in_bounds(gc(0, 0), &g));
        assert!(t.is_in_bounds(gc(4, 3), &g));
        assert!(!t.is_in_bounds(gc(5, 0), &g));
        assert!(!t.is_in_bounds(gc(0, -1), &g));

        assert!(!t.is_interior(gc(0, 1), &g));
        assert!(!t.is_interior(gc(4, 1), &g));
        assert!(!t.is_interior(gc(1, 3), &g));
        assert!(t.is_interior(gc(1, 1), &g));
        assert!(t.is_interior(gc(3, 2), &g));

        assert!(t.has_interior(&g));
        assert!(!t.has_interior(&grid(2, 9)));
    }

    #[test]
    fn lattice_alignment() {
        let t = topology(2);
        assert!(t.is_lattice_aligned(CellPosition::new(1, 3)));
        assert!(!t.is_lattice_aligned(CellPosition::new(2, 3)));
        assert!(!t.is_lattice_aligned(CellPosition::new(0, 0)));
        assert!(t.is_lattice_aligned(CellPosition::new(-1, 1)));
    }
}
