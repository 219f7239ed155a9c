/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`, x is the column and y the row.
pub type Coord2 = (Coord, Coord);

/// Grids are stored row-major, so `(x, y)` maps to the `[y, x]` element.
pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

/// Shape of a `(width, height)` grid as an ndarray dimension.
pub fn grid_shape((width, height): Coord2) -> (usize, usize) {
    (height.into(), width.into())
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub const fn in_bounds((x, y): Coord2, (width, height): Coord2) -> bool {
    x < width && y < height
}

/// Iterates the up-to-8 in-bounds neighbors of a cell, clipped at the edges.
///
/// Walks the 3x3 window around `center` row by row, skipping the center itself.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    window: u8,
}

impl NeighborIter {
    const WINDOW_CELLS: u8 = 9;
    const CENTER: u8 = 4;

    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            window: 0,
        }
    }

    /// Cell at window slot `slot`, `None` when it falls off the grid.
    fn cell_at(&self, slot: u8) -> Option<Coord2> {
        let (x, y) = self.center;
        let x = x.checked_add(slot % 3)?.checked_sub(1)?;
        let y = y.checked_add(slot / 3)?.checked_sub(1)?;
        in_bounds((x, y), self.bounds).then_some((x, y))
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while self.window < Self::WINDOW_CELLS {
            let slot = self.window;
            self.window += 1;
            if slot == Self::CENTER {
                continue;
            }
            if let Some(coords) = self.cell_at(slot) {
                return Some(coords);
            }
        }
        None
    }
}
