//! One-ply tactical shortcuts
//!
//! Cheap checks that run before any tree search:
//! - immediate win for the side to move
//! - block of the opponent's immediate win
//! - double threat: a move that creates two one-move wins at once
//!
//! Candidates are scanned in `enumerate_moves` order, so ties resolve the
//! same way the search would order them.

use crate::board::{BoardState, Coord, Mark};
use crate::rules::{count_threats_created, is_winning_move};

/// Minimum simultaneous threats for a fork
const FORK_THREATS: usize = 2;

/// A forced move found without searching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tactic {
    ImmediateWin(Coord),
    Block(Coord),
    DoubleThreat(Coord),
}

impl Tactic {
    #[inline]
    pub fn coord(self) -> Coord {
        match self {
            Tactic::ImmediateWin(c) | Tactic::Block(c) | Tactic::DoubleThreat(c) => c,
        }
    }
}

/// First empty cell where `mark` would complete four in a row.
pub fn find_immediate_win(board: &BoardState, mark: Mark) -> Option<Coord> {
    board
        .enumerate_moves()
        .into_iter()
        .find(|&c| is_winning_move(board, c, mark))
}

/// First empty cell that gives `mark` two or more one-move wins at once.
pub fn find_double_threat(board: &BoardState, mark: Mark) -> Option<Coord> {
    board
        .enumerate_moves()
        .into_iter()
        .find(|&c| count_threats_created(board, c, mark) >= FORK_THREATS)
}

/// Run the shortcuts for `me` in priority order: win, block, fork.
pub fn find_tactical_move(board: &BoardState, me: Mark) -> Option<Tactic> {
    if board.is_game_over() {
        return None;
    }
    if let Some(c) = find_immediate_win(board, me) {
        return Some(Tactic::ImmediateWin(c));
    }
    if let Some(c) = find_immediate_win(board, me.opponent()) {
        return Some(Tactic::Block(c));
    }
    find_double_threat(board, me).map(Tactic::DoubleThreat)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(cells: &[((u8, u8, u8), Mark)], to_move: Mark) -> BoardState {
        let mut board = BoardState::new();
        for &((x, y, z), mark) in cells {
            board.place_raw(Coord::new(x, y, z), mark);
        }
        board.set_current_player(to_move);
        board
    }

    #[test]
    fn test_finds_win() {
        let board = board_from(
            &[
                ((1, 0, 0), Mark::X),
                ((1, 1, 0), Mark::X),
                ((1, 2, 0), Mark::X),
                ((3, 3, 3), Mark::O),
            ],
            Mark::X,
        );
        assert_eq!(find_immediate_win(&board, Mark::X), Some(Coord::new(1, 3, 0)));
        assert_eq!(
            find_tactical_move(&board, Mark::X),
            Some(Tactic::ImmediateWin(Coord::new(1, 3, 0)))
        );
    }

    #[test]
    fn test_win_beats_block() {
        let board = board_from(
            &[
                ((0, 0, 0), Mark::X),
                ((0, 0, 1), Mark::X),
                ((0, 0, 2), Mark::X),
                ((3, 0, 0), Mark::O),
                ((3, 1, 0), Mark::O),
                ((3, 2, 0), Mark::O),
            ],
            Mark::O,
        );
        assert_eq!(
            find_tactical_move(&board, Mark::O),
            Some(Tactic::ImmediateWin(Coord::new(3, 3, 0)))
        );
    }

    #[test]
    fn test_blocks_opponent() {
        let board = board_from(
            &[
                ((0, 0, 0), Mark::X),
                ((0, 1, 0), Mark::X),
                ((0, 2, 0), Mark::X),
            ],
            Mark::O,
        );
        assert_eq!(
            find_tactical_move(&board, Mark::O),
            Some(Tactic::Block(Coord::new(0, 3, 0)))
        );
    }

    #[test]
    fn test_finds_fork() {
        // (0,0,0) would make three-of-four along both x and z
        let board = board_from(
            &[
                ((1, 0, 0), Mark::X),
                ((2, 0, 0), Mark::X),
                ((0, 0, 1), Mark::X),
                ((0, 0, 2), Mark::X),
                ((3, 3, 3), Mark::O),
                ((3, 3, 2), Mark::O),
                ((2, 3, 3), Mark::O),
            ],
            Mark::X,
        );
        assert_eq!(find_immediate_win(&board, Mark::X), None);
        assert_eq!(find_immediate_win(&board, Mark::O), None);
        let fork = find_double_threat(&board, Mark::X);
        assert_eq!(fork, Some(Coord::new(0, 0, 0)));
        assert_eq!(
            find_tactical_move(&board, Mark::X),
            Some(Tactic::DoubleThreat(Coord::new(0, 0, 0)))
        );
    }

    #[test]
    fn test_quiet_position() {
        let board = board_from(&[((1, 1, 1), Mark::X), ((2, 2, 2), Mark::O)], Mark::X);
        assert_eq!(find_tactical_move(&board, Mark::X), None);
        assert_eq!(Tactic::Block(Coord::new(1, 2, 3)).coord(), Coord::new(1, 2, 3));
    }
}
