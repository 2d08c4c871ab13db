//! Saved-game record
//!
//! The engine does not pick a file format; `GameRecord` derives serde so the
//! caller can write it with whichever serializer it already uses.

use serde::{Deserialize, Serialize};

use super::board::{BoardState, GameStatus};
use super::{Coord, Mark, BOARD_SIZE};
use crate::error::RestoreError;
use crate::rules::find_any_win;

/// One entry of the move history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub coord: Coord,
    pub mark: Mark,
}

/// Minimal fields needed to resume a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Indexed `cells[x][y][z]`
    pub cells: [[[Option<Mark>; BOARD_SIZE]; BOARD_SIZE]; BOARD_SIZE],
    pub current_player: Mark,
    pub move_history: Vec<HistoryEntry>,
}

impl BoardState {
    /// Snapshot the grid, side to move and history.
    pub fn to_record(&self) -> GameRecord {
        let mut cells = [[[None; BOARD_SIZE]; BOARD_SIZE]; BOARD_SIZE];
        for c in Coord::all() {
            cells[c.x as usize][c.y as usize][c.z as usize] = self.get(c);
        }
        GameRecord {
            cells,
            current_player: self.current_player(),
            move_history: self
                .history()
                .iter()
                .map(|&(coord, mark)| HistoryEntry { coord, mark })
                .collect(),
        }
    }

    /// Rebuild a board from a record.
    ///
    /// The history must describe exactly the occupied cells. The move count
    /// comes from the history length and the terminal status is recomputed
    /// from the grid, so a finished game stays finished after a reload.
    pub fn from_record(record: &GameRecord) -> Result<BoardState, RestoreError> {
        let occupied = Coord::all()
            .filter(|c| record.cells[c.x as usize][c.y as usize][c.z as usize].is_some())
            .count();
        if occupied != record.move_history.len() {
            return Err(RestoreError::CellCountMismatch {
                occupied,
                history: record.move_history.len(),
            });
        }

        let mut board = BoardState::new();
        for entry in &record.move_history {
            let c = entry.coord;
            if !Coord::is_valid(c.x as i32, c.y as i32, c.z as i32) {
                return Err(RestoreError::OutOfBounds(c));
            }
            if !board.is_empty(c) {
                return Err(RestoreError::DuplicateHistory(c));
            }
            let found = record.cells[c.x as usize][c.y as usize][c.z as usize];
            if found != Some(entry.mark) {
                return Err(RestoreError::HistoryMismatch {
                    coord: c,
                    expected: entry.mark,
                    found,
                });
            }
            board.place_raw(c, entry.mark);
        }
        board.set_current_player(record.current_player);

        if let Some((winner, line)) = find_any_win(&board) {
            board.set_status(GameStatus::Won { winner, line });
        } else if board.is_full() {
            board.set_status(GameStatus::Draw);
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_restores_move_count_and_turn() {
        let board = BoardState::from_moves([
            Coord::new(1, 1, 1),
            Coord::new(0, 0, 0),
            Coord::new(2, 2, 2),
        ])
        .unwrap();
        let restored = BoardState::from_record(&board.to_record()).unwrap();

        assert_eq!(restored.move_count(), 3);
        assert_eq!(restored.current_player(), Mark::O);
        assert_eq!(restored.serialize_key(), board.serialize_key());
        assert_eq!(restored.history(), board.history());
        assert!(!restored.is_game_over());
    }

    #[test]
    fn test_record_recomputes_win() {
        let board = BoardState::from_moves([
            Coord::new(0, 0, 0),
            Coord::new(3, 3, 3),
            Coord::new(0, 1, 0),
            Coord::new(3, 3, 2),
            Coord::new(0, 2, 0),
            Coord::new(3, 3, 1),
            Coord::new(0, 3, 0),
        ])
        .unwrap();
        assert_eq!(board.winner(), Some(Mark::X));

        let restored = BoardState::from_record(&board.to_record()).unwrap();
        assert!(restored.is_game_over());
        assert_eq!(restored.winner(), Some(Mark::X));
        assert_eq!(restored.winning_line(), board.winning_line());
    }

    #[test]
    fn test_record_rejects_mismatched_history() {
        let board = BoardState::from_moves([Coord::new(1, 1, 1)]).unwrap();
        let mut record = board.to_record();
        record.move_history[0].mark = Mark::O;
        assert!(matches!(
            BoardState::from_record(&record),
            Err(RestoreError::HistoryMismatch { .. })
        ));

        let mut record = board.to_record();
        record.move_history.clear();
        assert_eq!(
            BoardState::from_record(&record).unwrap_err(),
            RestoreError::CellCountMismatch {
                occupied: 1,
                history: 0
            }
        );
    }

    #[test]
    fn test_record_json_round_trip() {
        let board = BoardState::from_moves([Coord::new(1, 2, 1), Coord::new(3, 0, 3)]).unwrap();
        let json = serde_json::to_string(&board.to_record()).unwrap();
        let record: GameRecord = serde_json::from_str(&json).unwrap();
        let restored = BoardState::from_record(&record).unwrap();
        assert_eq!(restored.serialize_key(), board.serialize_key());
    }
}
