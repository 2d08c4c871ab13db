//! Killer-move table
//!
//! Remembers up to three moves per remaining search depth that caused a
//! cutoff, so sibling nodes at the same depth can try them first.

use crate::board::Coord;

/// Moves kept per depth
pub const MAX_KILLERS: usize = 3;

/// Deepest remaining depth tracked
const MAX_DEPTH: usize = 64;

pub struct KillerTable {
    slots: [[Option<Coord>; MAX_KILLERS]; MAX_DEPTH],
}

impl KillerTable {
    pub fn new() -> Self {
        Self {
            slots: [[None; MAX_KILLERS]; MAX_DEPTH],
        }
    }

    /// Record a cutoff move. New moves go to the front and push the oldest
    /// out; a move already present is left where it is.
    pub fn store(&mut self, depth: u8, mv: Coord) {
        let Some(slot) = self.slots.get_mut(depth as usize) else {
            return;
        };
        if slot.contains(&Some(mv)) {
            return;
        }
        slot.rotate_right(1);
        slot[0] = Some(mv);
    }

    /// Killer moves for `depth`, most recent first
    pub fn get(&self, depth: u8) -> impl Iterator<Item = Coord> + '_ {
        self.slots
            .get(depth as usize)
            .into_iter()
            .flat_map(|slot| slot.iter().flatten().copied())
    }

    pub fn clear(&mut self) {
        self.slots = [[None; MAX_KILLERS]; MAX_DEPTH];
    }
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_insert_and_cap() {
        let mut killers = KillerTable::new();
        for z in 0..4 {
            killers.store(2, Coord::new(0, 0, z));
        }
        let moves: Vec<Coord> = killers.get(2).collect();
        assert_eq!(
            moves,
            vec![Coord::new(0, 0, 3), Coord::new(0, 0, 2), Coord::new(0, 0, 1)]
        );
    }

    #[test]
    fn test_duplicates_ignored() {
        let mut killers = KillerTable::new();
        killers.store(1, Coord::new(1, 1, 1));
        killers.store(1, Coord::new(2, 2, 2));
        killers.store(1, Coord::new(1, 1, 1));
        let moves: Vec<Coord> = killers.get(1).collect();
        assert_eq!(moves, vec![Coord::new(2, 2, 2), Coord::new(1, 1, 1)]);
    }

    #[test]
    fn test_depths_are_separate() {
        let mut killers = KillerTable::new();
        killers.store(3, Coord::new(3, 3, 3));
        assert_eq!(killers.get(2).count(), 0);
        assert_eq!(killers.get(200).count(), 0);
        killers.clear();
        assert_eq!(killers.get(3).count(), 0);
    }
}
