//! Bitboard implementation for fast occupancy tests

use super::Coord;

/// One bit per cell. The 4x4x4 board fits a single `u64` exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard {
    bits: u64,
}

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Set the bit for a cell
    #[inline]
    pub fn set(&mut self, coord: Coord) {
        self.bits |= 1u64 << coord.to_index();
    }

    /// Clear the bit for a cell
    #[inline]
    pub fn clear(&mut self, coord: Coord) {
        self.bits &= !(1u64 << coord.to_index());
    }

    /// Check if the bit for a cell is set. Cells outside the cube are never set.
    #[inline]
    pub fn get(&self, coord: Coord) -> bool {
        coord.in_bounds() && (self.bits >> coord.to_index()) & 1 == 1
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(&self) -> u32 {
        self.bits.count_ones()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Union of two bitboards
    #[inline]
    pub fn union(self, other: Bitboard) -> Bitboard {
        Bitboard {
            bits: self.bits | other.bits,
        }
    }

    /// Iterate over set cells in canonical index order
    pub fn iter_ones(&self) -> BitboardIter {
        BitboardIter { bits: self.bits }
    }
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter {
    bits: u64,
}

impl Iterator for BitboardIter {
    type Item = Coord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let idx = self.bits.trailing_zeros() as usize;
        // Clear the bit we just found
        self.bits &= self.bits - 1;
        Some(Coord::from_index(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_clear() {
        let mut bb = Bitboard::new();
        let c = Coord::new(1, 2, 3);
        assert!(!bb.get(c));
        bb.set(c);
        assert!(bb.get(c));
        assert_eq!(bb.count(), 1);
        bb.clear(c);
        assert!(bb.is_empty());
    }

    #[test]
    fn test_last_cell_fits() {
        let mut bb = Bitboard::new();
        bb.set(Coord::new(3, 3, 3));
        assert_eq!(bb.count(), 1);
        assert_eq!(bb.iter_ones().next(), Some(Coord::new(3, 3, 3)));
    }

    #[test]
    fn test_iter_ones_in_index_order() {
        let mut bb = Bitboard::new();
        bb.set(Coord::new(2, 0, 0));
        bb.set(Coord::new(0, 0, 1));
        bb.set(Coord::new(0, 3, 0));
        let cells: Vec<Coord> = bb.iter_ones().collect();
        assert_eq!(
            cells,
            vec![Coord::new(0, 0, 1), Coord::new(0, 3, 0), Coord::new(2, 0, 0)]
        );
    }
}
