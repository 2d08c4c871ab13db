use crate::board::{Coord, Mark};

/// Why a move was rejected. The board is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cell {0} lies outside the board")]
    OutOfBounds(Coord),

    #[error("cell {0} is already occupied")]
    Occupied(Coord),

    #[error("the game is already over")]
    GameOver,
}

/// Errors that can occur when rebuilding a board from a saved record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RestoreError {
    #[error("record has {occupied} occupied cells but {history} history entries")]
    CellCountMismatch { occupied: usize, history: usize },

    #[error("history places {expected} at {coord} but the cell holds {found:?}")]
    HistoryMismatch {
        coord: Coord,
        expected: Mark,
        found: Option<Mark>,
    },

    #[error("history visits {0} more than once")]
    DuplicateHistory(Coord),

    #[error("history entry {0} lies outside the board")]
    OutOfBounds(Coord),
}

/// Errors that can occur when building engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("difficulty must be between 1 and 5, got {0}")]
    InvalidDifficulty(u8),

    #[error("unknown evaluator '{0}' (expected quick or comprehensive)")]
    UnknownEvaluator(String),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors that can stop a self-play experiment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExperimentError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("engine produced an illegal move: {0}")]
    IllegalMove(#[from] MoveError),
}
