use ndarray::Array2;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Row-major linear index into a board, `row * cols + col`.
pub type CellIndex = usize;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Linear index of `coords` on a board with `cols` columns.
pub const fn index_of((row, col): Coord2, cols: Coord) -> CellIndex {
    row as CellIndex * cols as CellIndex + col as CellIndex
}

/// Inverse of [`index_of`]. The caller guarantees `index` is in bounds.
pub const fn coords_of(index: CellIndex, cols: Coord) -> Coord2 {
    let cols = cols as CellIndex;
    ((index / cols) as Coord, (index % cols) as Coord)
}

pub trait NeighborIterExt {
    /// Up to 8 surrounding cells, clipped at the edges.
    fn iter_neighbors(&self, coords: Coord2) -> NeighborIter;

    /// Up to 4 cells sharing an edge (north, south, west, east).
    fn iter_orthogonal(&self, coords: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, grid_bounds(self), &DISPLACEMENTS)
    }

    fn iter_orthogonal(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, grid_bounds(self), &ORTHOGONAL_DISPLACEMENTS)
    }
}

fn grid_bounds<T>(grid: &Array2<T>) -> Coord2 {
    let (rows, cols) = grid.dim();
    // boards are built from a `GameConfig`, so both axes fit in a `Coord`
    (rows as Coord, cols as Coord)
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ORTHOGONAL_DISPLACEMENTS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    displacements: &'static [(isize, isize)],
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2, displacements: &'static [(isize, isize)]) -> Self {
        Self {
            center,
            bounds,
            displacements,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *self.displacements.get(usize::from(self.index))?;
            self.index += 1;

            let next_item = apply_delta(self.center, delta, self.bounds);
            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
