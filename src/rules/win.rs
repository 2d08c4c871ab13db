//! Win detection and line scanning for 4x4x4 connect-four
//!
//! A win is four contiguous marks along one of the 13 axes. Every scan here
//! treats an `origin` cell as if it already held the scanned mark, so the
//! same helpers answer "did this placement win" and "would this placement
//! win" without mutating the board.

use crate::board::{Axis, BoardState, Coord, Mark, AXES, WIN_LENGTH};

/// True if `cell` holds `mark`, counting `origin` as holding it.
#[inline]
fn holds(board: &BoardState, cell: Coord, mark: Mark, origin: Coord) -> bool {
    cell == origin || board.get(cell) == Some(mark)
}

/// Length of the run of `mark` through `origin` along `axis`, scanning
/// both directions.
pub fn run_length(board: &BoardState, origin: Coord, axis: Axis, mark: Mark) -> usize {
    let mut count = 1;
    for sign in [1, -1] {
        for step in 1..WIN_LENGTH as i32 {
            match origin.offset(axis, step * sign) {
                Some(c) if holds(board, c, mark, origin) => count += 1,
                _ => break,
            }
        }
    }
    count
}

/// Fast win check at a specific cell. Only checks the 13 axes through it.
#[inline]
pub fn is_winning_move(board: &BoardState, origin: Coord, mark: Mark) -> bool {
    AXES
        .iter()
        .any(|&axis| run_length(board, origin, axis, mark) >= WIN_LENGTH)
}

/// Number of axes through `origin` on which `mark` would have a completed
/// four-in-a-row.
pub fn count_completed_lines(board: &BoardState, origin: Coord, mark: Mark) -> usize {
    AXES
        .iter()
        .filter(|&&axis| run_length(board, origin, axis, mark) >= WIN_LENGTH)
        .count()
}

/// Find the winning line through `origin`, ordered from the negative end
/// of the axis to the positive end.
pub fn winning_line_at(
    board: &BoardState,
    origin: Coord,
    mark: Mark,
) -> Option<[Coord; WIN_LENGTH]> {
    for &axis in &AXES {
        // Walk back to the start of the run
        let mut start = origin;
        while let Some(prev) = start.offset(axis, -1) {
            if !holds(board, prev, mark, origin) {
                break;
            }
            start = prev;
        }

        let mut line = [start; WIN_LENGTH];
        let mut len = 1;
        while len < WIN_LENGTH {
            match start.offset(axis, len as i32) {
                Some(c) if holds(board, c, mark, origin) => {
                    line[len] = c;
                    len += 1;
                }
                _ => break,
            }
        }
        if len == WIN_LENGTH {
            return Some(line);
        }
    }
    None
}

/// The full board line through `origin` along `axis`, if the cube is long
/// enough in that direction to hold a winning line there.
pub fn line_through(origin: Coord, axis: Axis) -> Option<[Coord; WIN_LENGTH]> {
    let mut start = origin;
    while let Some(prev) = start.offset(axis, -1) {
        start = prev;
    }
    let mut line = [start; WIN_LENGTH];
    for (i, slot) in line.iter_mut().enumerate().skip(1) {
        *slot = start.offset(axis, i as i32)?;
    }
    // On a cube as wide as the winning length a full line must contain origin
    line.contains(&origin).then_some(line)
}

/// Number of lines through `origin` that would hold three `mark`s and one
/// empty cell once `origin` is taken by `mark`. Each is a threat to win on
/// the next move; two at once cannot both be blocked.
pub fn count_threats_created(board: &BoardState, origin: Coord, mark: Mark) -> usize {
    let mut threats = 0;
    for &axis in &AXES {
        let Some(line) = line_through(origin, axis) else {
            continue;
        };
        let mut own = 0;
        let mut empty = 0;
        for &c in &line {
            if holds(board, c, mark, origin) {
                own += 1;
            } else if board.get(c).is_none() {
                empty += 1;
            }
        }
        if own == WIN_LENGTH - 1 && empty == 1 {
            threats += 1;
        }
    }
    threats
}

/// Scan every occupied cell for a completed line. Used when a board is
/// rebuilt from a saved record rather than grown move by move.
pub fn find_any_win(board: &BoardState) -> Option<(Mark, [Coord; WIN_LENGTH])> {
    for mark in [Mark::X, Mark::O] {
        for cell in board.stones(mark).iter_ones() {
            if let Some(line) = winning_line_at(board, cell, mark) {
                return Some((mark, line));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(cells: &[(u8, u8, u8)], mark: Mark) -> BoardState {
        let mut board = BoardState::new();
        for &(x, y, z) in cells {
            board.place_raw(Coord::new(x, y, z), mark);
        }
        board
    }

    #[test]
    fn test_run_length_counts_both_directions() {
        let board = board_with(&[(0, 0, 0), (0, 0, 1), (0, 0, 3)], Mark::X);
        assert_eq!(run_length(&board, Coord::new(0, 0, 2), (0, 0, 1), Mark::X), 4);
        assert_eq!(run_length(&board, Coord::new(0, 0, 2), (1, 0, 0), Mark::X), 1);
    }

    #[test]
    fn test_straight_line_win() {
        let board = board_with(&[(2, 0, 1), (2, 1, 1), (2, 2, 1)], Mark::O);
        assert!(is_winning_move(&board, Coord::new(2, 3, 1), Mark::O));
        assert!(!is_winning_move(&board, Coord::new(2, 3, 1), Mark::X));
    }

    #[test]
    fn test_space_diagonal_win() {
        let board = board_with(&[(0, 3, 0), (1, 2, 1), (3, 0, 3)], Mark::X);
        let line = winning_line_at(&board, Coord::new(2, 1, 2), Mark::X).unwrap();
        assert_eq!(
            line,
            [
                Coord::new(0, 3, 0),
                Coord::new(1, 2, 1),
                Coord::new(2, 1, 2),
                Coord::new(3, 0, 3)
            ]
        );
    }

    #[test]
    fn test_three_not_win() {
        let board = board_with(&[(1, 1, 0), (1, 1, 1)], Mark::X);
        assert!(!is_winning_move(&board, Coord::new(1, 1, 2), Mark::X));
        assert!(winning_line_at(&board, Coord::new(1, 1, 2), Mark::X).is_none());
    }

    #[test]
    fn test_line_through_exists_only_on_full_diagonals() {
        assert!(line_through(Coord::new(1, 2, 3), (1, 0, 0)).is_some());
        assert!(line_through(Coord::new(1, 1, 1), (1, 1, 1)).is_some());
        assert!(line_through(Coord::new(1, 2, 1), (1, 1, 1)).is_none());
        assert!(line_through(Coord::new(0, 3, 2), (0, 1, -1)).is_none());
        assert!(line_through(Coord::new(0, 3, 0), (0, 1, -1)).is_some());
    }

    #[test]
    fn test_every_cell_has_three_straight_lines() {
        for cell in Coord::all() {
            let lines = AXES
                .iter()
                .filter(|&&a| line_through(cell, a).is_some())
                .count();
            assert!(lines >= 3, "{cell} only has {lines} lines");
        }
    }

    #[test]
    fn test_seventy_six_lines_in_total() {
        let mut starts = std::collections::HashSet::new();
        for cell in Coord::all() {
            for &axis in &AXES {
                if let Some(line) = line_through(cell, axis) {
                    starts.insert(line);
                }
            }
        }
        assert_eq!(starts.len(), 76);
    }

    #[test]
    fn test_count_completed_lines_fork_cell() {
        // (0,0,3) completes both the z-column and the x-row
        let board = board_with(
            &[(0, 0, 0), (0, 0, 1), (0, 0, 2), (1, 0, 3), (2, 0, 3), (3, 0, 3)],
            Mark::X,
        );
        assert_eq!(count_completed_lines(&board, Coord::new(0, 0, 3), Mark::X), 2);
    }

    #[test]
    fn test_count_threats_created() {
        // Two rows through (0,0,0), each already holding two X
        let board = board_with(&[(0, 0, 1), (0, 0, 2), (1, 0, 0), (2, 0, 0)], Mark::X);
        assert_eq!(count_threats_created(&board, Coord::new(0, 0, 0), Mark::X), 2);

        // Opponent presence kills the line
        let mut blocked = board.clone();
        blocked.place_raw(Coord::new(0, 0, 3), Mark::O);
        assert_eq!(count_threats_created(&blocked, Coord::new(0, 0, 0), Mark::X), 1);
    }

    #[test]
    fn test_find_any_win() {
        let board = board_with(&[(3, 3, 0), (3, 3, 1), (3, 3, 2), (3, 3, 3)], Mark::O);
        let (mark, line) = find_any_win(&board).unwrap();
        assert_eq!(mark, Mark::O);
        assert_eq!(line[0], Coord::new(3, 3, 0));
        assert!(find_any_win(&BoardState::new()).is_none());
    }
}
