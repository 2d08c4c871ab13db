//! Board representation for 4x4x4 connect-four

pub mod bitboard;
pub mod board;
pub mod record;


use std::fmt;

use serde::{Deserialize, Serialize};

// Re-exports
pub use bitboard::Bitboard;
pub use board::{BoardState, GameStatus, Played, StateKey};
pub use record::{GameRecord, HistoryEntry};

/// Cells along each edge of the cube
pub const BOARD_SIZE: usize = 4;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE * BOARD_SIZE; // 64
/// Marks in a row needed to win
pub const WIN_LENGTH: usize = 4;

/// The two marks a player can place. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Get opponent mark
    #[inline]
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Single-character symbol used in state keys
    #[inline]
    pub fn symbol(self) -> u8 {
        match self {
            Mark::X => b'X',
            Mark::O => b'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mark::X => "X",
            Mark::O => "O",
        })
    }
}

/// A cell of the cube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl Coord {
    #[inline]
    pub fn new(x: u8, y: u8, z: u8) -> Self {
        debug_assert!(Self::is_valid(x as i32, y as i32, z as i32));
        Self { x, y, z }
    }

    /// Canonical index: x outermost, z innermost
    #[inline]
    pub fn to_index(self) -> usize {
        (self.x as usize * BOARD_SIZE + self.y as usize) * BOARD_SIZE + self.z as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            x: (idx / (BOARD_SIZE * BOARD_SIZE)) as u8,
            y: ((idx / BOARD_SIZE) % BOARD_SIZE) as u8,
            z: (idx % BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn is_valid(x: i32, y: i32, z: i32) -> bool {
        let n = BOARD_SIZE as i32;
        (0..n).contains(&x) && (0..n).contains(&y) && (0..n).contains(&z)
    }

    /// Whether this cell lies inside the cube. Fields are public and
    /// deserialization does not validate, so a `Coord` can point outside.
    #[inline]
    pub fn in_bounds(self) -> bool {
        Self::is_valid(self.x as i32, self.y as i32, self.z as i32)
    }

    /// Step `steps` cells along `axis`, or `None` when that leaves the cube.
    #[inline]
    pub fn offset(self, axis: Axis, steps: i32) -> Option<Coord> {
        let x = self.x as i32 + axis.0 as i32 * steps;
        let y = self.y as i32 + axis.1 as i32 * steps;
        let z = self.z as i32 + axis.2 as i32 * steps;
        if Self::is_valid(x, y, z) {
            Some(Coord::new(x as u8, y as u8, z as u8))
        } else {
            None
        }
    }

    /// Iterate over all 64 cells in canonical order
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..TOTAL_CELLS).map(Coord::from_index)
    }

    /// Whether this is one of the 8 interior cells
    #[inline]
    pub fn is_center(self) -> bool {
        CENTER_CELLS.contains(&self)
    }

    /// Whether this is one of the 8 corners of the cube
    #[inline]
    pub fn is_corner(self) -> bool {
        CORNER_CELLS.contains(&self)
    }

    /// Static move-ordering weight: the 4x4 table summed over the
    /// (x,y), (z,x) and (y,z) projections, +2 for centers, +1 for corners.
    pub fn positional_weight(self) -> i32 {
        let (x, y, z) = (self.x as usize, self.y as usize, self.z as usize);
        let mut weight =
            POSITION_WEIGHTS[x][y] + POSITION_WEIGHTS[z][x] + POSITION_WEIGHTS[y][z];
        if self.is_center() {
            weight += 2;
        }
        if self.is_corner() {
            weight += 1;
        }
        weight
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}

/// A direction vector. The negated vector describes the same axis.
pub type Axis = (i8, i8, i8);

/// The 13 spatial axes, one signed representative each
/// (first non-zero component positive).
pub const AXES: [Axis; 13] = [
    (1, 0, 0),
    (0, 1, 0),
    (0, 0, 1),
    (1, 1, 0),
    (1, -1, 0),
    (1, 0, 1),
    (1, 0, -1),
    (0, 1, 1),
    (0, 1, -1),
    (1, 1, 1),
    (1, 1, -1),
    (1, -1, 1),
    (1, -1, -1),
];

/// The 8 interior cells
pub const CENTER_CELLS: [Coord; 8] = [
    Coord { x: 1, y: 1, z: 1 },
    Coord { x: 1, y: 1, z: 2 },
    Coord { x: 1, y: 2, z: 1 },
    Coord { x: 1, y: 2, z: 2 },
    Coord { x: 2, y: 1, z: 1 },
    Coord { x: 2, y: 1, z: 2 },
    Coord { x: 2, y: 2, z: 1 },
    Coord { x: 2, y: 2, z: 2 },
];

/// The 8 corners of the cube
pub const CORNER_CELLS: [Coord; 8] = [
    Coord { x: 0, y: 0, z: 0 },
    Coord { x: 0, y: 0, z: 3 },
    Coord { x: 0, y: 3, z: 0 },
    Coord { x: 0, y: 3, z: 3 },
    Coord { x: 3, y: 0, z: 0 },
    Coord { x: 3, y: 0, z: 3 },
    Coord { x: 3, y: 3, z: 0 },
    Coord { x: 3, y: 3, z: 3 },
];

/// Per-projection weights; edges of each face count most
pub const POSITION_WEIGHTS: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
    [4, 3, 3, 4],
    [3, 2, 2, 3],
    [3, 2, 2, 3],
    [4, 3, 3, 4],
];
