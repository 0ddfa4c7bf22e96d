use bit_set::BitSet;
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::collections::HashSet;

use cells::CellPosition;
use errors::*;
use units::{Height, Width};

/// Which grid cells "exist" for the host.
///
/// A host that mirrors the grid with its own objects (one handle per cell) hands the mapping
/// in so the carver only ever touches cells the host can show. Only presence is queried, the
/// handles themselves are opaque.
pub trait CellRegistry {
    fn contains_cell(&self, pos: CellPosition) -> bool;
}

/// Every cell exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllCells;

impl CellRegistry for AllCells {
    #[inline]
    fn contains_cell(&self, _: CellPosition) -> bool {
        true
    }
}

impl<H, S: BuildHasher> CellRegistry for HashMap<CellPosition, H, S> {
    #[inline]
    fn contains_cell(&self, pos: CellPosition) -> bool {
        self.contains_key(&pos)
    }
}

impl<S: BuildHasher> CellRegistry for HashSet<CellPosition, S> {
    #[inline]
    fn contains_cell(&self, pos: CellPosition) -> bool {
        self.contains(&pos)
    }
}

/// A bitmap of cells that are switched off.
#[derive(Debug, Clone)]
pub struct CellMask {
    mask: BitSet,
    pub width: usize,
    pub height: usize,
}

impl CellMask {
    /// A mask with nothing masked out.
    pub fn new(width: Width, height: Height) -> CellMask {
        CellMask {
            mask: BitSet::with_capacity(width.0 * height.0),
            width: width.0,
            height: height.0,
        }
    }

    /// Parse a mask from text, one line per grid row (z), one character per cell (x).
    ///
    /// `x`, `X` and `#` mark a cell as absent, any other character leaves it present. Short
    /// lines pad with present cells; the mask is as wide as its longest line.
    pub fn from_text(text: &str) -> Result<CellMask> {
        let rows: Vec<Vec<char>> = text.lines()
            .map(|line| line.trim_end_matches('\r').chars().collect())
            .collect();
        let height = rows.len();
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        if width == 0 || height == 0 {
            bail!(ErrorKind::InvalidMask(0, String::from("mask text has no cells")));
        }

        let mut mask = CellMask::new(Width(width), Height(height));
        for (z, row) in rows.iter().enumerate() {
            for (x, glyph) in row.iter().enumerate() {
                if glyph.is_control() {
                    let reason = format!("control character at column {}", x + 1);
                    bail!(ErrorKind::InvalidMask(z + 1, reason));
                }
                if CellMask::is_masking_glyph(*glyph) {
                    mask.mask_cell(CellPosition::new(x as i32, z as i32));
                }
            }
        }

        Ok(mask)
    }

    #[inline]
    fn is_masking_glyph(glyph: char) -> bool {
        glyph == 'x' || glyph == 'X' || glyph == '#'
    }

    /// Switch a cell off. Positions outside the mask are ignored.
    pub fn mask_cell(&mut self, pos: CellPosition) {
        if let Some(bit_index) = self.bit_index(pos) {
            let _ = self.mask.insert(bit_index);
        }
    }

    /// Is the given position masked out / turned off?
    ///
    /// A position is not masked if it is outside the bounds of the mask's 2d space.
    pub fn is_masked(&self, pos: CellPosition) -> bool {
        self.bit_index(pos).map_or(false, |bit_index| self.mask.contains(bit_index))
    }

    /// Number of unmasked cells within a `width` x `height` space. Cells outside the mask's
    /// own area count as unmasked.
    pub fn count_unmasked_within_dimensions(&self, width: Width, height: Height) -> usize {
        iproduct!(0..height.0, 0..width.0)
            .filter(|&(z, x)| !self.is_masked(CellPosition::new(x as i32, z as i32)))
            .count()
    }

    fn bit_index(&self, pos: CellPosition) -> Option<usize> {
        let within = pos.x >= 0 && pos.z >= 0 && (pos.x as usize) < self.width &&
                     (pos.z as usize) < self.height;
        if within {
            Some(pos.z as usize * self.width + pos.x as usize)
        } else {
            None
        }
    }
}

impl CellRegistry for CellMask {
    #[inline]
    fn contains_cell(&self, pos: CellPosition) -> bool {
        !self.is_masked(pos)
    }
}
