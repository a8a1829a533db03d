use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Single axis length used for board width and height.
pub type Coord = u8;

/// Count type used for mine counts and total-tile counts.
pub type CellCount = u16;

/// Row-major tile index, `row * width + column`.
pub type TileId = u16;

/// Up to eight neighbouring tile ids, kept inline.
pub type Neighbors = SmallVec<[TileId; 8]>;

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Board size, fixed for the lifetime of a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: Coord,
    pub height: Coord,
}

impl Dimensions {
    pub const fn new(width: Coord, height: Coord) -> Self {
        Self { width, height }
    }

    pub const fn tile_count(self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn contains(self, id: TileId) -> bool {
        id < self.tile_count()
    }

    pub const fn row_of(self, id: TileId) -> Coord {
        (id / self.width as TileId) as Coord
    }

    pub const fn column_of(self, id: TileId) -> Coord {
        (id % self.width as TileId) as Coord
    }

    /// Returns the id at `(row, column)` if it lies on the board.
    pub const fn id_at(self, row: Coord, column: Coord) -> Option<TileId> {
        if row < self.height && column < self.width {
            Some(row as TileId * self.width as TileId + column as TileId)
        } else {
            None
        }
    }

    /// `ndarray` shape `[height, width]`, so a standard layout array iterates in id order.
    pub const fn shape(self) -> [usize; 2] {
        [self.height as usize, self.width as usize]
    }

    pub fn to_nd_index(self, id: TileId) -> [usize; 2] {
        [self.row_of(id).into(), self.column_of(id).into()]
    }

    pub fn iter_neighbors(self, id: TileId) -> NeighborIter {
        NeighborIter::new((self.row_of(id), self.column_of(id)), self)
    }

    pub fn neighbors(self, id: TileId) -> Neighbors {
        self.iter_neighbors(id).collect()
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `(row, column)`, returning the neighbour id only when it stays on the board.
fn apply_delta(center: (Coord, Coord), delta: (i8, i8), dims: Dimensions) -> Option<TileId> {
    let (row, column) = center;
    let (d_row, d_column) = delta;

    let next_row = row.checked_add_signed(d_row)?;
    let next_column = column.checked_add_signed(d_column)?;

    dims.id_at(next_row, next_column)
}

/// Moore neighbourhood of a tile, clipped at the board edges.
#[derive(Debug)]
pub struct NeighborIter {
    center: (Coord, Coord),
    dims: Dimensions,
    index: u8,
}

impl NeighborIter {
    fn new(center: (Coord, Coord), dims: Dimensions) -> Self {
        Self {
            center,
            dims,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = TileId;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.dims);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
